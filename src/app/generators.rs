use std::fmt;
use std::str::FromStr;

/// Generators a column can be assigned to. The identifiers match what the
/// recommendation service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    RandomNumber,
    FirstName,
    LastName,
    PastDate,
    Gender,
    AddressLine1,
    AddressLine2,
    City,
    State,
    ZipCode,
    PhoneNumber,
    EmailId,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 12] = [
        GeneratorKind::RandomNumber,
        GeneratorKind::FirstName,
        GeneratorKind::LastName,
        GeneratorKind::PastDate,
        GeneratorKind::Gender,
        GeneratorKind::AddressLine1,
        GeneratorKind::AddressLine2,
        GeneratorKind::City,
        GeneratorKind::State,
        GeneratorKind::ZipCode,
        GeneratorKind::PhoneNumber,
        GeneratorKind::EmailId,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GeneratorKind::RandomNumber => "randomNumber",
            GeneratorKind::FirstName => "firstName",
            GeneratorKind::LastName => "lastName",
            GeneratorKind::PastDate => "pastDate",
            GeneratorKind::Gender => "gender",
            GeneratorKind::AddressLine1 => "addressline1",
            GeneratorKind::AddressLine2 => "addressline2",
            GeneratorKind::City => "city",
            GeneratorKind::State => "state",
            GeneratorKind::ZipCode => "zipcode",
            GeneratorKind::PhoneNumber => "phoneNumber",
            GeneratorKind::EmailId => "emailID",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeneratorKind::RandomNumber => "Random Number",
            GeneratorKind::FirstName => "First Name",
            GeneratorKind::LastName => "Last Name",
            GeneratorKind::PastDate => "Past Date",
            GeneratorKind::Gender => "Gender",
            GeneratorKind::AddressLine1 => "Address Line 1",
            GeneratorKind::AddressLine2 => "Address Line 2",
            GeneratorKind::City => "City",
            GeneratorKind::State => "State",
            GeneratorKind::ZipCode => "Zip Code",
            GeneratorKind::PhoneNumber => "Phone Number",
            GeneratorKind::EmailId => "Email Address",
        }
    }

    /// Human label for any identifier, falling back to the identifier itself
    /// for generators this build does not know about.
    pub fn label_for(id: &str) -> &str {
        match id.parse::<GeneratorKind>() {
            Ok(g) => g.label(),
            Err(_) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generator '{0}'")]
pub struct UnknownGenerator(pub String);

impl FromStr for GeneratorKind {
    type Err = UnknownGenerator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|g| g.id() == s)
            .ok_or_else(|| UnknownGenerator(s.to_string()))
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
