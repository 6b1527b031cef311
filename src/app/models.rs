use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    #[serde(rename = "COLUMN_NAME")]
    pub name: String,
    #[serde(rename = "DATA_TYPE")]
    pub data_type: String,
    #[serde(rename = "CHARACTER_MAXIMUM_LENGTH", default)]
    pub max_length: Option<i64>,
    #[serde(rename = "PRIMARY_KEY")]
    pub is_primary_key: bool,
    #[serde(rename = "NULLABLE")]
    pub is_nullable: bool,
    #[serde(rename = "IDENTITY", default)]
    pub is_identity: bool,
    #[serde(rename = "COLUMN_COMMENT", default)]
    pub comment: Option<String>,
}

impl ColumnMetadata {
    /// `varchar(50)` when a maximum length is known, the bare type otherwise.
    pub fn type_label(&self) -> String {
        match self.max_length {
            Some(len) if len != 0 => format!("{}({})", self.data_type, len),
            _ => self.data_type.clone(),
        }
    }

    /// Comment text, ignoring blank comments.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    #[serde(rename = "table_name")]
    pub name: String,
    pub total_rows: u64,
    pub columns: Vec<ColumnMetadata>,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// One directed foreign-key edge: `child_table.child_column -> referenced_table.referenced_column`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintDetail {
    #[serde(rename = "ConstraintName")]
    pub constraint_name: String,
    #[serde(rename = "ChildTable")]
    pub child_table: String,
    #[serde(rename = "ChildColumn")]
    pub child_column: String,
    #[serde(rename = "ReferencedTable")]
    pub referenced_table: String,
    #[serde(rename = "ReferencedColumn")]
    pub referenced_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableRole {
    Central,
    Parent,
    Child,
}

impl TableRole {
    pub const ALL: [TableRole; 3] = [TableRole::Central, TableRole::Parent, TableRole::Child];

    pub fn heading(self) -> &'static str {
        match self {
            TableRole::Central => "Central Tables",
            TableRole::Parent => "Parent Tables",
            TableRole::Child => "Child Tables",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableRole::Central => "central",
            TableRole::Parent => "parent",
            TableRole::Child => "child",
        };
        f.write_str(name)
    }
}

// Produced by one scan and replaced wholesale by the next one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TableMetadataResponse {
    #[serde(rename = "central_table_metadata")]
    pub central_tables: Vec<TableInfo>,
    #[serde(rename = "parent_tables_metadata", default)]
    pub parent_tables: Vec<TableInfo>,
    #[serde(rename = "child_tables_metadata")]
    pub child_tables: Vec<TableInfo>,
    #[serde(rename = "constraint_details")]
    pub constraints: Vec<ConstraintDetail>,
}

impl TableMetadataResponse {
    pub fn tables_for(&self, role: TableRole) -> &[TableInfo] {
        match role {
            TableRole::Central => &self.central_tables,
            TableRole::Parent => &self.parent_tables,
            TableRole::Child => &self.child_tables,
        }
    }

    /// Every table of the scan, central first, then parents, then children.
    pub fn tables(&self) -> impl Iterator<Item = (TableRole, &TableInfo)> {
        TableRole::ALL
            .into_iter()
            .flat_map(move |role| self.tables_for(role).iter().map(move |t| (role, t)))
    }

    pub fn find_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables().map(|(_, t)| t).find(|t| t.name == name)
    }

    pub fn central_table(&self) -> Option<&TableInfo> {
        self.central_tables.first()
    }
}

/// A 0..=100 trust score. Anything else on the wire is rejected while decoding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: Confidence = Confidence(100);

    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Confidence(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Confidence::new)
            .ok_or_else(|| format!("confidence {} is outside 0..=100", value))
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecommendationEntry {
    #[serde(rename = "COLUMN_NAME")]
    pub column_name: String,
    pub generator: String,
    pub confidence: Confidence,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableRecommendation {
    #[serde(rename = "table_name")]
    pub table_name: String,
    pub columns: Vec<RecommendationEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationResponse {
    #[serde(rename = "central_table_metadata", default)]
    pub central_tables: Vec<TableRecommendation>,
    #[serde(rename = "parent_tables_metadata", default)]
    pub parent_tables: Vec<TableRecommendation>,
    #[serde(rename = "child_tables_metadata", default)]
    pub child_tables: Vec<TableRecommendation>,
}

impl RecommendationResponse {
    pub fn tables_for(&self, role: TableRole) -> &[TableRecommendation] {
        match role {
            TableRole::Central => &self.central_tables,
            TableRole::Parent => &self.parent_tables,
            TableRole::Child => &self.child_tables,
        }
    }

    /// Flattened `(table, entry)` pairs across all roles, in wire order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RecommendationEntry)> {
        TableRole::ALL.into_iter().flat_map(move |role| {
            self.tables_for(role)
                .iter()
                .flat_map(|t| t.columns.iter().map(move |e| (t.table_name.as_str(), e)))
        })
    }

    pub fn entry_for(&self, table: &str, column: &str) -> Option<&RecommendationEntry> {
        self.entries()
            .find(|(t, e)| *t == table && e.column_name == column)
            .map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    PrimaryKeyRef,
    ForeignKeyRef,
}

impl RelationshipKind {
    pub fn label(self) -> &'static str {
        match self {
            RelationshipKind::PrimaryKeyRef => "Primary Key",
            RelationshipKind::ForeignKeyRef => "Foreign Key",
        }
    }
}

// Derived per column, never stored alongside the metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipInfo {
    pub kind: RelationshipKind,
    pub description: String,
    pub constraint_name: String,
}
