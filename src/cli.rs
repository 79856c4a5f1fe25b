//! Command-line argument parsing for the stdin pipe binary.
//!
//! The arguments defined here are parsed at startup and merged as the
//! highest-priority layer over the TOML file and `SNSNOTIFY_` environment
//! variables. Credentials deliberately have no flags; they belong in the
//! file or the environment, not in the process list.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Publish batched log notifications from stdin to an SNS topic.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ARN of the topic to publish to.
    #[arg(long, value_name = "ARN")]
    pub topic_arn: Option<String>,

    /// AWS region to sign publish calls for.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Minimum severity to buffer (error, warn, info, debug, trace).
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Number of buffered records that triggers a flush.
    #[arg(long, value_name = "N")]
    pub batch_size: Option<u64>,

    /// Seconds between time-based flushes.
    #[arg(long, value_name = "SECONDS")]
    pub flush_period: Option<u64>,

    /// Subject line for email endpoints (also used as the paste title).
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,

    /// SMS overflow strategy (truncate or paste-fallback).
    #[arg(long, value_name = "STRATEGY")]
    pub overflow: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        let mut sns = Dict::new();
        let mut message = Dict::new();
        let mut overflow = Dict::new();

        if let Some(level) = &self.level {
            dict.insert("level".into(), Value::from(level.clone()));
        }
        if let Some(size) = self.batch_size {
            dict.insert("batch_size".into(), Value::from(size));
        }
        if let Some(secs) = self.flush_period {
            dict.insert("flush_period_secs".into(), Value::from(secs));
        }
        if let Some(arn) = &self.topic_arn {
            sns.insert("topic_arn".into(), Value::from(arn.clone()));
        }
        if let Some(region) = &self.region {
            sns.insert("region".into(), Value::from(region.clone()));
        }
        if let Some(subject) = &self.subject {
            message.insert("subject".into(), Value::from(subject.clone()));
        }
        // Passed through as a string; an unknown token fails extraction
        // exactly like it would coming from the file or the environment.
        if let Some(strategy) = &self.overflow {
            overflow.insert("strategy".into(), Value::from(strategy.clone()));
        }

        if !sns.is_empty() {
            dict.insert("sns".into(), Value::from(sns));
        }
        if !message.is_empty() {
            dict.insert("message".into(), Value::from(message));
        }
        if !overflow.is_empty() {
            dict.insert("overflow".into(), Value::from(overflow));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
