#![allow(dead_code)]
//! Recording fakes for the notifier's service traits.

use async_trait::async_trait;
use snsnotify::core::{PasteClient, PasteReceipt, PasteRequest, PublishRequest, TopicPublisher};
use snsnotify::paste::PasteError;
use snsnotify::sns::PublishError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A publisher that records every request and optionally fails.
pub struct RecordingPublisher {
    requests: Mutex<Vec<PublishRequest>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    pub fn failing() -> Arc<Self> {
        let publisher = Self::new();
        publisher.fail.store(true, Ordering::SeqCst);
        publisher
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn default_bodies(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.default_body)
            .collect()
    }
}

#[async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            Err(PublishError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "<ErrorResponse>InternalError</ErrorResponse>".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// A paste client that records every upload and optionally rejects.
pub struct RecordingPasteClient {
    uploads: Mutex<Vec<PasteRequest>>,
    reject: AtomicBool,
}

impl RecordingPasteClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
            reject: AtomicBool::new(false),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        let client = Self::new();
        client.reject.store(true, Ordering::SeqCst);
        client
    }

    pub fn uploads(&self) -> Vec<PasteRequest> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl PasteClient for RecordingPasteClient {
    async fn upload(&self, request: &PasteRequest) -> Result<PasteReceipt, PasteError> {
        self.uploads.lock().unwrap().push(request.clone());
        if self.reject.load(Ordering::SeqCst) {
            Err(PasteError::Rejected("invalid api_dev_key".to_string()))
        } else {
            Ok(PasteReceipt {
                id: "fakePasteId".to_string(),
                url: "https://pastebin.com/fakePasteId".to_string(),
            })
        }
    }
}
