//! The notification appender core.
//!
//! `SnsAppender` receives the formatted batch blob from the dispatcher and
//! carries out one flush: build the human- and machine-readable message
//! variants, work out the SMS body (uploading to the paste service under the
//! `paste-fallback` strategy), and publish the set as a single multi-protocol
//! topic notification.
//!
//! Failure policy: a paste failure degrades to the raw batch and the flush
//! continues; a publish failure permanently disables the appender. `flush`
//! never returns an error, since a broken notification channel must never
//! take down the host application's logging.

use crate::config::{MessageConfig, OverflowStrategy};
use crate::core::{PasteClient, PasteReceipt, PasteRequest, PublishRequest, TopicPublisher};
use crate::sns::PublishError;
use metrics::counter;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Whether the appender is still publishing.
///
/// The transition is one-way: a single publish failure moves the appender to
/// `Disabled` for the remainder of the process lifetime, and every later
/// batch is dropped without a transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppenderState {
    Active,
    Disabled,
}

/// The notification appender.
pub struct SnsAppender {
    message: MessageConfig,
    strategy: OverflowStrategy,
    publisher: Arc<dyn TopicPublisher>,
    paste: Option<Arc<dyn PasteClient>>,
    disabled: AtomicBool,
}

impl SnsAppender {
    /// Creates an appender from validated configuration parts.
    ///
    /// `paste` is consulted only under [`OverflowStrategy::PasteFallback`];
    /// a fallback strategy without a client behaves like a failed upload.
    pub fn new(
        message: MessageConfig,
        strategy: OverflowStrategy,
        publisher: Arc<dyn TopicPublisher>,
        paste: Option<Arc<dyn PasteClient>>,
    ) -> Self {
        Self {
            message,
            strategy,
            publisher,
            paste,
            disabled: AtomicBool::new(false),
        }
    }

    /// The appender's current state.
    pub fn state(&self) -> AppenderState {
        if self.disabled.load(Ordering::SeqCst) {
            AppenderState::Disabled
        } else {
            AppenderState::Active
        }
    }

    /// Flushes one formatted batch blob.
    ///
    /// Infallible by contract: every failure is either degraded or absorbed
    /// by disabling the appender.
    pub async fn flush(&self, batch: &str) {
        if self.state() == AppenderState::Disabled {
            // Keep consuming so the host buffer cannot grow without bound;
            // skip formatting entirely, the batch is going nowhere.
            counter!("notifier_dropped_batches").increment(1);
            debug!("Appender disabled, dropping batch");
            return;
        }

        let human = self.human_message(batch);
        let machine = self.machine_message(batch);
        let sms = self.sms_body(batch, &human).await;

        let request = PublishRequest {
            subject: self.message.subject.clone(),
            default_body: human.clone(),
            email_body: human,
            sms_body: sms,
            json_body: machine,
        };

        match self.publisher.publish(&request).await {
            Ok(()) => {
                counter!("notifier_batches_published").increment(1);
            }
            Err(e) => {
                counter!("notifier_publish_failures").increment(1);
                self.disable(&e);
            }
        }
    }

    /// Human-readable variant: configured prefix and footer around the blob.
    fn human_message(&self, batch: &str) -> String {
        let prefix = self.message.prefix.as_deref().unwrap_or("");
        let footer = self.message.footer.as_deref().unwrap_or("");
        format!("{prefix}{batch}{footer}")
    }

    /// Machine-readable variant: `{"extra_json": <metadata|null>,
    /// "message": <blob>}`.
    fn machine_message(&self, batch: &str) -> String {
        json!({
            "extra_json": self.message.extra_json,
            "message": batch,
        })
        .to_string()
    }

    /// Picks the SMS body. Under `paste-fallback` the upload is attempted
    /// unconditionally; any failure degrades to the raw blob and the flush
    /// carries on.
    async fn sms_body(&self, batch: &str, human: &str) -> String {
        let client = match (self.strategy, &self.paste) {
            (OverflowStrategy::PasteFallback, Some(client)) => client,
            _ => return batch.to_string(),
        };

        let request = PasteRequest {
            title: self.message.subject.clone(),
            body: human.to_string(),
        };
        match client.upload(&request).await {
            Ok(receipt) => {
                counter!("notifier_paste_fallbacks").increment(1);
                sms_pointer(&receipt)
            }
            Err(e) => {
                counter!("notifier_paste_failures").increment(1);
                warn!(error = %e, "Paste upload failed, sending raw batch as SMS body");
                batch.to_string()
            }
        }
    }

    /// One-way transition to `Disabled`. Safe to call from concurrent
    /// flushes; only the first transition is reported.
    fn disable(&self, reason: &PublishError) {
        if !self.disabled.swap(true, Ordering::SeqCst) {
            error!(
                error = %reason,
                "Publish failed, notifications disabled for the remainder of the process"
            );
        }
    }
}

/// The fixed-format SMS pointer for an uploaded batch. The paste identifier
/// reaches the reader as the final path segment of the URL.
fn sms_pointer(receipt: &PasteReceipt) -> String {
    format!("Log batch too long for SMS: {}", receipt.url)
}
