//! snsnotify - pipe log lines from stdin to an SNS topic.
//!
//! Reads stdin line by line, buffers the lines through the notifier
//! pipeline and publishes them in batches:
//!
//! ```text
//! tail -f app.log | snsnotify --topic-arn arn:aws:sns:us-east-1:123456789012:app-alerts
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::Level;
use snsnotify::appender::AppenderState;
use snsnotify::cli::Cli;
use snsnotify::config::NotifierConfig;
use snsnotify::core::LogLine;
use snsnotify::formatting::PassthroughFormatter;
use snsnotify::logger::Notifier;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Own diagnostics go to stderr; stdout stays free for future piping.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = NotifierConfig::load_with_cli(&cli).context("failed to load configuration")?;
    info!(
        topic = %config.sns.topic_arn,
        batch_size = config.batch_size,
        flush_period_secs = config.flush_period_secs,
        strategy = ?config.overflow.strategy,
        "snsnotify starting"
    );

    let notifier = Notifier::builder()
        .config(config)
        // Piped lines are already laid out; forward them untouched.
        .formatter_override(Box::new(PassthroughFormatter))
        .build()
        .context("failed to start the notifier")?;
    let handle = notifier.handle();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        handle.record(LogLine::new(Level::Info, "stdin", line));
    }

    info!("stdin closed, flushing remaining records");
    match notifier.shutdown().await {
        AppenderState::Active => Ok(()),
        AppenderState::Disabled => {
            error!("Notifications were disabled by a publish failure");
            std::process::exit(1);
        }
    }
}
