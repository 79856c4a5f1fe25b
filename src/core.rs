//! Core domain types and service traits for snsnotify
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the crate.

use crate::paste::PasteError;
use crate::sns::PublishError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::Level;

/// An owned capture of a single log record.
///
/// `log::Record` borrows from the call site, so the logger front-end copies
/// the fields it needs before handing the record to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// UTC timestamp when the record was captured
    pub timestamp: DateTime<Utc>,
    /// Severity of the record
    pub level: Level,
    /// The record's target (usually the emitting module path)
    pub target: String,
    /// The fully rendered message text
    pub message: String,
    /// Module path of the call site, when known
    pub module_path: Option<String>,
    /// Source file of the call site, when known
    pub file: Option<String>,
    /// Source line of the call site, when known
    pub line: Option<u32>,
}

impl LogLine {
    /// Creates a line with the current timestamp and no call-site info.
    /// Used by the stdin pipe binary and by tests.
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            target: target.into(),
            message: message.into(),
            module_path: None,
            file: None,
            line: None,
        }
    }
}

/// The per-protocol message set for one topic publish.
///
/// SNS fans a single publish out to every subscribed endpoint; each protocol
/// gets the body chosen for it here. `json_body` serves the machine-readable
/// protocols (http, https, email-json, sqs).
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Subject line for email endpoints
    pub subject: String,
    /// Body for endpoints with no protocol-specific override
    pub default_body: String,
    /// Human-readable body for email endpoints
    pub email_body: String,
    /// Body for SMS endpoints; the transport clips it to its own limit
    pub sms_body: String,
    /// Machine-readable JSON body for http/https/email-json/sqs endpoints
    pub json_body: String,
}

/// A paste upload: title plus full text body. The fixed upload parameters
/// (unlisted visibility, one-day expiry, plain-text format) are the client's
/// concern, not the caller's.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteRequest {
    /// Paste title, shown by the paste service
    pub title: String,
    /// Full text content of the paste
    pub body: String,
}

/// The outcome of a successful paste upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteReceipt {
    /// The identifier assigned by the paste service (final URL path segment)
    pub id: String,
    /// The full URL of the created paste
    pub url: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Publishes one notification to a pub/sub topic.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes the per-protocol message set as a single topic notification.
    ///
    /// # Returns
    /// * `Ok(())` once the service has accepted the publish
    /// * `Err` for transport failures or service rejections
    async fn publish(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

/// Uploads a text body to a paste-hosting service.
#[async_trait]
pub trait PasteClient: Send + Sync {
    /// Uploads the paste and returns its identifier and URL.
    ///
    /// # Returns
    /// * `Ok(PasteReceipt)` when the service returns a paste URL
    /// * `Err` for transport failures or an error-prefixed response body
    async fn upload(&self, request: &PasteRequest) -> Result<PasteReceipt, PasteError>;
}
