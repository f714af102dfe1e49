// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:     Run configuration (accounts, endpoints, credentials)
// - schema:     Post / summary / payload types
// - util:       Shared helpers (account ids, time, insight metrics)
// - platforms:  Platform adapters and adapter registry
// - collector:  Runs adapters over every configured account
// - aggregator: Per-account summaries and ranking
// - prompts:    Marketing prompt templates
// - dispatcher: Webhook delivery
// - pipeline:   One daily run, end to end
//
mod config;
mod schema;
mod util;
mod platforms;
mod collector;
mod aggregator;
mod prompts;
mod dispatcher;
mod pipeline;
mod metrics;
// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use config::load_config;
use metrics::METRICS;
use pipeline::{run_daily, RunOutcome};

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Daily batch job. Runs the pipeline exactly once and exits.
//
// Everything is sequential, so a current-thread runtime is
// enough. The process exits successfully whether or not the
// webhook accepted the payload; only an unreadable config file
// is fatal.
//
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::debug!("Loaded config: {:?}", config);

    let http = reqwest::Client::builder()
        .user_agent(concat!("daily-reach-agent/", env!("CARGO_PKG_VERSION")))
        .build()?;

    match run_daily(&config, &http).await {
        RunOutcome::NoData => {}
        RunOutcome::Dispatched { delivered: true } => log::info!("Run complete"),
        RunOutcome::Dispatched { delivered: false } => {
            log::warn!("Run complete, webhook delivery failed")
        }
    }

    println!("{}", METRICS.summary_line());

    Ok(())
}
