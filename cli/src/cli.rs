use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(name = "spread-cycles", version)]
pub struct Cli {
    /// Combinations file: {"SYM1": {"pair2": "SYM2", "coef": 1.0, "open": 9.0, "close": 2.0}, ...}
    #[clap(long, default_value = "pairs.json")]
    pub pairs_file: PathBuf,

    /// Persisted analysis report path
    #[clap(long, default_value = "analysis.json")]
    pub report_file: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grid-search historical thresholds for every combination and persist the report
    Analyze,

    /// Print the best threshold pairs per combination from the saved report
    Top {
        /// Entries to show per combination
        #[clap(long, default_value_t = 3)]
        count: usize,
    },

    /// Watch live prices and print open/close alerts
    Monitor {
        /// Poll interval in seconds
        #[clap(long, default_value_t = 10)]
        interval_secs: u64,

        /// SQLite database holding detector state across restarts
        #[clap(long, default_value = "sqlite://monitor_state.db?mode=rwc")]
        state_db: String,
    },
}
