// src/formatting.rs

use crate::core::LogLine;

/// A trait for formatting buffered log records into the batch text blob.
///
/// The dispatcher formats every buffered record through `format_line` and
/// joins the lines with `\n`; the appender receives only the joined blob.
/// There is no open/close framing: nothing is emitted before the first
/// batch or after the last one.
pub trait LineFormatter: Send + Sync {
    /// Formats a single record, without a trailing newline.
    fn format_line(&self, line: &LogLine) -> String;

    /// Formats a whole batch into the single text blob handed to the
    /// appender.
    fn format_batch(&self, lines: &[LogLine]) -> String {
        if lines.is_empty() {
            return String::new();
        }
        lines
            .iter()
            .map(|line| self.format_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The default layout: timestamp, padded level, target, message.
pub struct PlainLineFormatter;

impl LineFormatter for PlainLineFormatter {
    fn format_line(&self, line: &LogLine) -> String {
        format!(
            "{} {:<5} {}: {}",
            line.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            line.level,
            line.target,
            line.message
        )
    }
}

/// A layout that forwards the message text untouched. Used by the stdin
/// pipe binary, where each line is already fully formatted.
pub struct PassthroughFormatter;

impl LineFormatter for PassthroughFormatter {
    fn format_line(&self, line: &LogLine) -> String {
        line.message.clone()
    }
}
