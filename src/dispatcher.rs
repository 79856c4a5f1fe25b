//! The batching dispatcher: a stateful actor that buffers captured log
//! records and flushes them through the appender.
//!
//! Flush triggers, in order of precedence: the buffer reaching the batch
//! size, an explicit [`DispatchEvent::Flush`], or the periodic timer ticking
//! over a non-empty buffer. When the channel closes the dispatcher flushes
//! whatever is left and exits; nothing is emitted after that final batch.

use crate::appender::SnsAppender;
use crate::core::LogLine;
use crate::formatting::LineFormatter;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

/// An event on the dispatcher's channel.
#[derive(Debug)]
pub enum DispatchEvent {
    /// A captured record to buffer.
    Record(LogLine),
    /// Flush the current buffer immediately.
    Flush,
    /// Flush the current buffer and stop the dispatcher.
    ///
    /// Needed because a globally installed logger keeps its sender alive for
    /// the rest of the process, so the channel never closes on its own.
    Shutdown,
}

/// The dispatcher actor. Runs until its channel closes.
pub struct BatchDispatcher {
    batch_size: usize,
    flush_period: Duration,
    event_rx: mpsc::Receiver<DispatchEvent>,
    formatter: Box<dyn LineFormatter>,
    appender: Arc<SnsAppender>,
}

impl BatchDispatcher {
    /// Creates a new `BatchDispatcher`.
    pub fn new(
        batch_size: usize,
        flush_period: Duration,
        event_rx: mpsc::Receiver<DispatchEvent>,
        formatter: Box<dyn LineFormatter>,
        appender: Arc<SnsAppender>,
    ) -> Self {
        Self {
            batch_size,
            flush_period,
            event_rx,
            formatter,
            appender,
        }
    }

    /// Runs the dispatcher's main loop.
    pub async fn run(mut self) {
        let mut batch: Vec<LogLine> = Vec::with_capacity(self.batch_size);
        let mut timer = interval(self.flush_period);

        loop {
            tokio::select! {
                biased;
                _ = timer.tick() => {
                    if !batch.is_empty() {
                        debug!("Flush period elapsed, sending {} records", batch.len());
                        self.flush(&mut batch).await;
                    }
                }
                event = self.event_rx.recv() => {
                    match event {
                        Some(DispatchEvent::Record(line)) => {
                            batch.push(line);
                            if batch.len() >= self.batch_size {
                                debug!("Batch size limit reached, sending {} records", batch.len());
                                self.flush(&mut batch).await;
                                timer.reset();
                            }
                        }
                        Some(DispatchEvent::Flush) => {
                            if !batch.is_empty() {
                                debug!("Explicit flush, sending {} records", batch.len());
                                self.flush(&mut batch).await;
                                timer.reset();
                            }
                        }
                        Some(DispatchEvent::Shutdown) | None => {
                            info!("Shutting down dispatcher.");
                            if !batch.is_empty() {
                                debug!("Sending final batch of {} records.", batch.len());
                                self.flush(&mut batch).await;
                            }
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Formats the buffered records into the batch blob, hands it to the
    /// appender and clears the buffer.
    async fn flush(&self, batch: &mut Vec<LogLine>) {
        let blob = self.formatter.format_batch(batch);
        self.appender.flush(&blob).await;
        batch.clear();
    }
}
