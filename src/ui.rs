//! UI Loop and Messages
//!
//! The UI loop owns the [`EditorHost`] and is the only place the document
//! is mutated. Background tasks report back through [`UiMessage`]; the loop
//! drains the channel, splices results, surfaces failures, and animates a
//! status indicator while tasks are pending.

use crate::audit;
use crate::editor::{EditorHost, Region};
use crate::error::RedraftError;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::warn;

/// Messages that drive the UI loop
#[derive(Debug)]
pub enum UiMessage {
    /// A background task was spawned for a region
    TaskStarted,
    /// Non-blocking status notice
    Status(String),
    /// A completed request: splice `text` over `region`, provided the
    /// document revision still matches the one captured at dispatch
    ApplyResult {
        region: Region,
        revision: u64,
        text: String,
    },
    /// A failed request, already written to the failure log
    Failure {
        classification: &'static str,
        message: String,
    },
}

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Drains the UI channel until every sender is gone
pub struct UiLoop<H: EditorHost> {
    rx: Receiver<UiMessage>,
    host: H,
    pending: usize,
    frame: usize,
}

impl<H: EditorHost> UiLoop<H> {
    pub fn new(rx: Receiver<UiMessage>, host: H) -> Self {
        Self {
            rx,
            host,
            pending: 0,
            frame: 0,
        }
    }

    /// Run until all senders are dropped, then hand the host back
    pub fn run(mut self) -> H {
        loop {
            match self.rx.recv_timeout(FRAME_INTERVAL) {
                Ok(message) => self.handle(message),
                Err(RecvTimeoutError::Timeout) => self.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.host
    }

    fn handle(&mut self, message: UiMessage) {
        match message {
            UiMessage::TaskStarted => self.pending += 1,
            UiMessage::Status(text) => self.host.status(&text),
            UiMessage::ApplyResult {
                region,
                revision,
                text,
            } => {
                self.apply(region, revision, &text);
                self.finish_task();
            }
            UiMessage::Failure { message, .. } => {
                self.host.error(&message);
                self.finish_task();
            }
        }
    }

    /// Splice the result over the captured region, unless the document
    /// moved on while the request was in flight
    fn apply(&mut self, region: Region, revision: u64, text: &str) {
        let actual = self.host.revision();
        if actual != revision {
            let err = RedraftError::StaleRegion {
                expected: revision,
                actual,
            };
            self.report(err.classification(), &err.to_string());
            return;
        }

        if let Err(e) = self.host.replace(region, text) {
            self.report("unclassified", &format!("Could not apply result: {e}"));
        }
    }

    fn report(&mut self, classification: &'static str, message: &str) {
        if let Err(log_err) = audit::log_failure(classification, message) {
            warn!("Could not write failure log: {log_err}");
        }
        self.host.error(message);
    }

    fn finish_task(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.host.status("Processing complete");
        }
    }

    fn tick(&mut self) {
        if self.pending > 0 {
            let frame = FRAMES[self.frame % FRAMES.len()];
            self.host.status(&format!("Processing {frame}"));
            self.frame += 1;
        }
    }
}
