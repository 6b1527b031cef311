use crate::app::cli::Cli;
use crate::app::generators::GeneratorKind;
use crate::app::recommend::AUTO_ACCEPT_THRESHOLD;
use crate::app::transport::DEFAULT_TIMEOUT;
use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SCAN_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_RECOMMEND_URL: &str = "http://localhost:5003";

/// A generator assigned by hand on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSelection {
    pub table: String,
    pub column: String,
    pub generator: GeneratorKind,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scan_base_url: Url,
    pub recommend_base_url: Url,
    pub table_name: String,
    pub request_timeout: Duration,
    pub auto_accept_threshold: u8,
    pub recommend: bool,
    pub expand: bool,
    pub records: Option<String>,
    pub key_reuse: Option<u8>,
    pub generate: bool,
    pub truncate: bool,
    pub selections: Vec<ManualSelection>,
    pub csv_out: Option<PathBuf>,
    pub plan_out: Option<PathBuf>,
}

pub fn resolve_config(cli: Cli) -> Result<AppConfig> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    resolve_with(cli, |key| env::var(key).ok())
}

/// Flag, then `lookup` (the environment), then the built-in default.
pub fn resolve_with(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let scan_base_url = parse_base_url(
        cli.scan_url
            .or_else(|| lookup("SCAN_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_SCAN_URL.to_string()),
        "scan",
    )?;

    let recommend_base_url = parse_base_url(
        cli.recommend_url
            .or_else(|| lookup("RECOMMEND_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_RECOMMEND_URL.to_string()),
        "recommendation",
    )?;

    let request_timeout = match cli.timeout_secs {
        Some(secs) => Duration::from_secs(secs),
        None => match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: '{}'", raw))?,
            ),
            None => DEFAULT_TIMEOUT,
        },
    };
    if request_timeout.is_zero() {
        bail!("Request timeout must be at least one second");
    }

    let auto_accept_threshold = match cli.threshold {
        Some(t) => t,
        None => match lookup("AUTO_ACCEPT_THRESHOLD") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("AUTO_ACCEPT_THRESHOLD is not a number: '{}'", raw))?,
            None => AUTO_ACCEPT_THRESHOLD,
        },
    };
    if auto_accept_threshold > 100 {
        bail!(
            "Auto-accept threshold must be between 0 and 100, got {}",
            auto_accept_threshold
        );
    }

    let selections = cli
        .selections
        .iter()
        .map(|raw| parse_selection(raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(AppConfig {
        scan_base_url,
        recommend_base_url,
        table_name: cli.table,
        request_timeout,
        auto_accept_threshold,
        recommend: cli.recommend,
        expand: !cli.collapsed,
        records: cli.records,
        key_reuse: cli.key_reuse,
        generate: cli.generate,
        truncate: cli.truncate,
        selections,
        csv_out: cli.csv_out,
        plan_out: cli.plan_out,
    })
}

fn parse_base_url(raw: String, service: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("Invalid {} service URL '{}'", service, raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("The {} service URL must use http or https: '{}'", service, raw);
    }
    Ok(url)
}

/// Parses `table.column=generator`.
pub fn parse_selection(raw: &str) -> Result<ManualSelection> {
    let (target, generator) = raw
        .split_once('=')
        .with_context(|| format!("Expected TABLE.COLUMN=GENERATOR, got '{}'", raw))?;
    let (table, column) = target
        .split_once('.')
        .with_context(|| format!("Expected TABLE.COLUMN before '=', got '{}'", target))?;

    if table.trim().is_empty() || column.trim().is_empty() {
        bail!("Table and column must not be empty in '{}'", raw);
    }

    let generator = generator
        .trim()
        .parse::<GeneratorKind>()
        .with_context(|| format!("Invalid selection '{}'", raw))?;

    Ok(ManualSelection {
        table: table.trim().to_string(),
        column: column.trim().to_string(),
        generator,
    })
}
