use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// Expense and reimbursement ledger driven by chat-style commands
#[derive(Parser)]
#[command(name = "ledger-assistant")]
#[command(about = "Records income, expenses and capped reimbursements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction log (CSV), created on first write
    #[arg(long, default_value = "ledger.csv")]
    pub ledger: PathBuf,

    /// Cap table override (TOML). Built-in defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "error", value_parser = parse_log_level)]
    pub log_level: LevelFilter,

    /// A single command to run, e.g. `expense Supermercado:100000`.
    /// Commands are read line by line from stdin when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    value.trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("expected one of off, error, warn, info, debug, trace; got [{value}]"))
}
