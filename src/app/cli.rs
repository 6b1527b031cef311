use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table to scan.
    #[arg(default_value = "member")]
    pub table: String,

    /// Base URL of the metadata-scan service. If not provided, looks for SCAN_BASE_URL.
    #[arg(long)]
    pub scan_url: Option<String>,

    /// Base URL of the recommendation service. If not provided, looks for RECOMMEND_BASE_URL.
    #[arg(long)]
    pub recommend_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Minimum confidence (0-100) for a recommendation to be auto-selected.
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Ask the recommendation service for generators after scanning.
    #[arg(short, long)]
    pub recommend: bool,

    /// Show only table headers and controls.
    #[arg(long)]
    pub collapsed: bool,

    /// Records to generate for every table. Non-numeric input counts as 0.
    #[arg(long, value_name = "N")]
    pub records: Option<String>,

    /// Percentage of new keys to reuse from existing data, for every table.
    #[arg(long, value_name = "PERCENT")]
    pub key_reuse: Option<u8>,

    /// Enable data generation for every table.
    #[arg(long)]
    pub generate: bool,

    /// Truncate every table before loading.
    #[arg(long)]
    pub truncate: bool,

    /// Assign a generator by hand, e.g. `member.City=city`. Repeatable.
    #[arg(long = "select", value_name = "TABLE.COLUMN=GENERATOR")]
    pub selections: Vec<String>,

    /// Write the central table's column metadata as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Write the prepared generation plan as JSON.
    #[arg(long, value_name = "PATH")]
    pub plan_out: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
