use crate::app::error::ExportError;
use crate::app::models::{TableInfo, TableRole};
use crate::app::session::Session;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

/// Writes one row per column, headed with the scan service's field names.
pub fn write_columns_csv<W: io::Write>(table: &TableInfo, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for column in &table.columns {
        csv.serialize(column)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn default_csv_name(table_name: &str) -> String {
    format!("{}_metadata.csv", table_name)
}

pub fn export_table_csv(
    session: &Session,
    table_name: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let table = session
        .metadata()
        .and_then(|m| m.find_table(table_name))
        .ok_or_else(|| ExportError::UnknownTable(table_name.to_string()))?;

    let file = std::fs::File::create(path)?;
    write_columns_csv(table, file)?;
    info!(table = table_name, path = %path.display(), "column metadata exported");
    Ok(())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnPlan {
    #[serde(rename = "COLUMN_NAME")]
    pub column_name: String,
    pub generator: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TablePlan {
    pub table_name: String,
    pub role: TableRole,
    pub records_to_generate: u64,
    pub key_reuse_percent: u8,
    pub truncate_load: bool,
    pub generate_data: bool,
    pub columns: Vec<ColumnPlan>,
}

/// The synthetic-data request as prepared in the session. Generating the data
/// is left to whoever consumes this document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationPlan {
    pub central_table: String,
    pub tables: Vec<TablePlan>,
}

impl GenerationPlan {
    pub fn from_session(session: &Session) -> Option<Self> {
        let metadata = session.metadata()?;
        let selections = session.selections();

        let tables = metadata
            .tables()
            .map(|(role, table)| {
                let controls = session.controls(&table.name).cloned().unwrap_or_default();
                TablePlan {
                    table_name: table.name.clone(),
                    role,
                    records_to_generate: controls.records_to_generate,
                    key_reuse_percent: controls.key_reuse_percent,
                    truncate_load: controls.truncate,
                    generate_data: controls.generate,
                    columns: table
                        .columns
                        .iter()
                        .map(|c| ColumnPlan {
                            column_name: c.name.clone(),
                            generator: selections.get(&c.name).map(str::to_string),
                        })
                        .collect(),
                }
            })
            .collect();

        Some(Self {
            central_table: session.scanned_table().unwrap_or_default().to_string(),
            tables,
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), tables = self.tables.len(), "generation plan written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures;
    use crate::app::generators::GeneratorKind;

    fn scanned_session() -> Session {
        let mut session = Session::default();
        let ticket = session.begin_scan("member").unwrap();
        session.apply_scan(ticket, Ok(fixtures::member_scan()));
        session
    }

    #[test]
    fn csv_has_wire_headers_and_one_row_per_column() {
        let mut buf = Vec::new();
        write_columns_csv(&fixtures::member_table(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("COLUMN_NAME,DATA_TYPE,CHARACTER_MAXIMUM_LENGTH,PRIMARY_KEY,NULLABLE,IDENTITY,COLUMN_COMMENT")
        );
        assert_eq!(lines.next(), Some("MemberID,int,,true,false,true,"));
        assert_eq!(text.lines().count(), 13);
        assert!(text.contains("EmailAddress,varchar,100,false,false,false,Primary contact address"));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_csv_name("member"));
        export_table_csv(&scanned_session(), "member", &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("COLUMN_NAME,"));
        assert!(path.ends_with("member_metadata.csv"));
    }

    #[test]
    fn export_unknown_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_table_csv(&scanned_session(), "ghost", &dir.path().join("x.csv"));
        assert!(matches!(err, Err(ExportError::UnknownTable(t)) if t == "ghost"));
    }

    #[test]
    fn plan_reflects_controls_and_selections() {
        let mut session = scanned_session();
        session.set_records_text("claim", "500").unwrap();
        session.set_key_reuse("claim", 25).unwrap();
        session.toggle_generate("claim").unwrap();
        session
            .select_generator("member", "City", Some(GeneratorKind::City))
            .unwrap();

        let plan = GenerationPlan::from_session(&session).unwrap();
        assert_eq!(plan.central_table, "member");
        assert_eq!(plan.tables.len(), 2);

        let member = &plan.tables[0];
        assert_eq!(member.role, TableRole::Central);
        assert_eq!(member.records_to_generate, 10);
        let city = member.columns.iter().find(|c| c.column_name == "City").unwrap();
        assert_eq!(city.generator.as_deref(), Some("city"));

        let claim = &plan.tables[1];
        assert_eq!(claim.role, TableRole::Child);
        assert_eq!(claim.records_to_generate, 500);
        assert_eq!(claim.key_reuse_percent, 25);
        assert!(claim.generate_data);
        assert!(!claim.truncate_load);
    }

    #[test]
    fn plan_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        GenerationPlan::from_session(&scanned_session())
            .unwrap()
            .write_json(&path)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["tables"][1]["role"], "child");
        assert_eq!(json["tables"][0]["columns"][0]["COLUMN_NAME"], "MemberID");
        assert!(json["tables"][0]["columns"][0]["generator"].is_null());
    }

    #[test]
    fn no_plan_without_scan() {
        assert!(GenerationPlan::from_session(&Session::default()).is_none());
    }
}
