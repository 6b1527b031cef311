use crate::app::generators::GeneratorKind;
use crate::app::models::{ColumnMetadata, TableInfo, TableRole};
use crate::app::recommend::NOT_KNOWN;
use crate::app::relationships::RelationshipIndex;
use crate::app::session::{Session, TableControls};
use std::fmt::Write;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_markdown(session: &Session) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        let Some(metadata) = session.metadata() else {
            writeln!(output, "No metadata scanned yet.")?;
            return Ok(output);
        };

        writeln!(
            output,
            "Synthetic data plan for: {}\n",
            session.scanned_table().unwrap_or("unknown")
        )?;

        let index = RelationshipIndex::for_metadata(metadata);

        for role in TableRole::ALL {
            let tables = metadata.tables_for(role);
            if tables.is_empty() {
                continue;
            }

            writeln!(output, "# {}\n", role.heading())?;
            for table in tables {
                Self::write_table(&mut output, session, &index, table)?;
            }
        }

        if !metadata.constraints.is_empty() {
            writeln!(output, "# Constraints\n")?;
            for c in &metadata.constraints {
                writeln!(
                    output,
                    "- `{}`: `{}.{}` -> `{}.{}`",
                    c.constraint_name, c.child_table, c.child_column, c.referenced_table, c.referenced_column
                )?;
            }
            writeln!(output)?;
        }

        Ok(output)
    }

    fn write_table(
        output: &mut String,
        session: &Session,
        index: &RelationshipIndex<'_>,
        table: &TableInfo,
    ) -> std::fmt::Result {
        writeln!(output, "## Table: {} ({} rows)", table.name, table.total_rows)?;

        let controls = session.controls(&table.name).cloned().unwrap_or_default();
        writeln!(output, "{}", controls_line(&controls))?;

        if !controls.expanded {
            writeln!(output, "\n_{} columns (collapsed)_", table.columns.len())?;
            writeln!(output, "\n---\n")?;
            return Ok(());
        }

        writeln!(
            output,
            "\n| Column | Type | Flags | AI Recommendation | Confidence | Selected Generator |"
        )?;
        writeln!(output, "|---|---|---|---|---|---|")?;
        for col in &table.columns {
            let (suggested, confidence) = match session.recommendation_for(&table.name, &col.name) {
                Some(rec) => {
                    let suggested = if rec.generator == NOT_KNOWN {
                        "-".to_string()
                    } else {
                        GeneratorKind::label_for(&rec.generator).to_string()
                    };
                    let confidence = if rec.confidence.value() == 0 {
                        "-".to_string()
                    } else {
                        rec.confidence.to_string()
                    };
                    (suggested, confidence)
                }
                None => ("-".to_string(), "-".to_string()),
            };
            let selected = session
                .selections()
                .get(&col.name)
                .map(GeneratorKind::label_for)
                .unwrap_or("-");

            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                cell(&col.name),
                cell(&col.type_label()),
                flags(col),
                cell(&suggested),
                confidence,
                cell(selected)
            )?;
        }

        for col in &table.columns {
            let relationships = index.resolve(col, &table.name);
            let comment = col.comment();
            if relationships.is_none() && comment.is_none() {
                continue;
            }

            writeln!(output, "\n**{}**", col.name)?;
            for rel in relationships.iter().flatten() {
                writeln!(
                    output,
                    "- {}: {} (Constraint: {})",
                    rel.kind.label(),
                    rel.description,
                    rel.constraint_name
                )?;
            }
            if let Some(comment) = comment {
                writeln!(output, "- Comment: {}", comment)?;
            }
        }

        writeln!(output, "\n---\n")?;
        Ok(())
    }
}

fn controls_line(controls: &TableControls) -> String {
    format!(
        "Records to generate: {} | New keys reuse: {}% | Truncate load: {} | Generate data: {}",
        controls.records_to_generate,
        controls.key_reuse_percent,
        yes_no(controls.truncate),
        yes_no(controls.generate)
    )
}

fn flags(col: &ColumnMetadata) -> String {
    let mut flags = Vec::new();
    if col.is_primary_key {
        flags.push("PK");
    }
    if !col.is_nullable {
        flags.push("NN");
    }
    if col.is_identity {
        flags.push("IDENTITY");
    }
    if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(", ")
    }
}

/// Escapes pipes so a value stays inside its table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
