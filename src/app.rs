pub mod advisor;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod generators;
pub mod inspector;
pub mod models;
pub mod recommend;
pub mod relationships;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod fixtures;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::collections::BTreeSet;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use self::advisor::Advisor;
use self::cli::Cli;
use self::config::{AppConfig, resolve_config};
use self::export::{GenerationPlan, export_table_csv};
use self::formatter::OutputGenerator;
use self::inspector::Inspector;
use self::session::{Applied, Session};
use self::transport::HttpTransport;

// Scans, recommends, applies the requested edits, and formats in one go.
pub async fn generate_report(config: &AppConfig) -> Result<String> {
    // 1. Clients
    let transport = HttpTransport::new(config.request_timeout)?;
    let inspector = Inspector::new(transport.clone(), config.scan_base_url.clone());
    let advisor = Advisor::new(transport, config.recommend_base_url.clone());

    // 2. Scan
    let mut session = Session::new(config.auto_accept_threshold);
    if let Applied::Failed(err) = session.scan(&inspector, &config.table_name).await? {
        return Err(anyhow!(err).context(format!(
            "Failed to scan metadata for '{}'",
            config.table_name
        )));
    }

    // 3. User edits, before recommendations so they are never overwritten
    apply_edits(&mut session, config)?;

    // 4. Recommend. A failure here is reported and the report still renders.
    if config.recommend {
        if let Applied::Failed(err) = session.recommend(&advisor).await? {
            warn!("continuing without recommendations: {}", err);
        }
    }

    // 5. Exports
    if let Some(path) = &config.csv_out {
        export_table_csv(&session, &config.table_name, path)
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
    }
    if let Some(path) = &config.plan_out {
        let plan = GenerationPlan::from_session(&session).context("No metadata to plan from")?;
        plan.write_json(path)
            .with_context(|| format!("Failed to write plan to {}", path.display()))?;
    }

    // 6. Format
    let output = OutputGenerator::generate_markdown(&session)?;

    Ok(output)
}

fn apply_edits(session: &mut Session, config: &AppConfig) -> Result<()> {
    session.set_expanded_all(config.expand);

    // A table can appear under more than one role; edit it once.
    let tables: BTreeSet<String> = session
        .metadata()
        .map(|m| m.tables().map(|(_, t)| t.name.clone()).collect())
        .unwrap_or_default();

    for table in &tables {
        if let Some(records) = &config.records {
            session.set_records_text(table, records)?;
        }
        if let Some(percent) = config.key_reuse {
            session.set_key_reuse(table, percent)?;
        }
        if config.generate {
            session.set_generate(table, true)?;
        }
        if config.truncate {
            session.set_truncate(table, true)?;
        }
    }

    for selection in &config.selections {
        session
            .select_generator(&selection.table, &selection.column, Some(selection.generator))
            .with_context(|| {
                format!(
                    "Cannot assign {} to {}.{}",
                    selection.generator, selection.table, selection.column
                )
            })?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    init_tracing(args.verbose);

    // 2. Resolve Config
    let config = resolve_config(args)?;

    // 3. Generate
    let output = generate_report(&config).await?;

    // 4. Output
    print!("{}", output);

    Ok(())
}
