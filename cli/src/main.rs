pub mod cli;
pub mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{Instrument, info};

use analysis::orchestrator::run_analysis;
use analysis::report::AnalysisReport;
use analysis::sweep::SweepConfig;
use common::logger::{RunId, init_logger, run_span};
use market::binance::BinanceFuturesClient;
use market::binance::client::DEFAULT_BASE_URL;
use monitor::engine::{MonitorConfig, MonitorEngine};
use monitor::model::{Alert, AlertKind};
use monitor::store::sqlite_store::SqliteStateStore;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("spread-cycles");

    let args = Cli::parse();

    match args.command {
        Command::Analyze => {
            let entries = config::load_entries(&args.pairs_file)?;
            let combos = config::combinations(&entries);

            let client = BinanceFuturesClient::new(DEFAULT_BASE_URL)?;
            let run_id = RunId::default();
            let report = run_analysis(&combos, &client, &SweepConfig::default())
                .instrument(run_span("analyze", &run_id))
                .await;

            report.save(&args.report_file)?;
            info!(
                pairs = report.pairs.len(),
                report = %args.report_file.display(),
                "analysis report saved"
            );
        }

        Command::Top { count } => {
            let report = AnalysisReport::load(&args.report_file)?;

            println!("generated_at: {}", report.generated_at);
            for (key, results) in &report.pairs {
                println!("{key}");
                for r in results.iter().take(count) {
                    println!(
                        "  open {:.2}%  close {:.2}%  — {} cycles",
                        r.open, r.close, r.cycles
                    );
                }
            }
        }

        Command::Monitor {
            interval_secs,
            state_db,
        } => {
            let entries = config::load_entries(&args.pairs_file)?;

            let client = Arc::new(BinanceFuturesClient::new(DEFAULT_BASE_URL)?);
            let store = Arc::new(SqliteStateStore::new(&state_db).await?);

            let (alert_tx, mut alert_rx) = tokio::sync::mpsc::channel::<Alert>(64);

            tokio::spawn(async move {
                while let Some(alert) = alert_rx.recv().await {
                    let verb = match alert.kind {
                        AlertKind::Opened => "opened",
                        AlertKind::Closed => "closed",
                    };
                    println!(
                        "{} {} at {:.2}% (coef {:.2}) — LONG {} / SHORT {}",
                        alert.key, verb, alert.spread_pct, alert.coef, alert.long_leg,
                        alert.short_leg
                    );
                }
            });

            let cfg = MonitorConfig {
                poll_interval: Duration::from_secs(interval_secs),
            };
            let engine = MonitorEngine::new(cfg, entries, client, store, alert_tx).await?;
            engine.run().await?;
        }
    }

    Ok(())
}
