//! MessageBuilder - scope-bound message accumulator

use std::fmt::{self, Display, Write as _};

use contracts::{MessageCategory, MessageSeverity};
use tracing::warn;

use crate::dispatcher::Dispatcher;
use crate::report::DispatchReport;

/// Accumulates message text and sends it through its dispatcher exactly once.
///
/// The message goes out when the builder is dropped (end of statement or
/// scope, early return, unwind) unless [`commit`](Self::commit) already sent
/// it. A builder that is leaked with `mem::forget` never sends.
///
/// ```ignore
/// log.info("main").append("listening on port ").append(port);
///
/// let mut msg = log.warning("main");
/// write!(msg, "retry {attempt}/{max}")?;
/// let report = msg.commit();
/// ```
pub struct MessageBuilder<'a> {
    dispatcher: &'a Dispatcher,
    sender: String,
    severity: MessageSeverity,
    category: MessageCategory,
    text: String,
    sent: bool,
}

impl<'a> MessageBuilder<'a> {
    pub(crate) fn new(
        dispatcher: &'a Dispatcher,
        sender: impl Into<String>,
        severity: MessageSeverity,
        category: MessageCategory,
    ) -> Self {
        Self {
            dispatcher,
            sender: sender.into(),
            severity,
            category,
            text: String::new(),
            sent: false,
        }
    }

    /// Append a fragment, chaining by value
    pub fn append(mut self, fragment: impl Display) -> Self {
        self.push(fragment);
        self
    }

    /// Append a fragment in place
    pub fn push(&mut self, fragment: impl Display) -> &mut Self {
        // Writing into a String only fails if the Display impl itself fails
        if write!(self.text, "{fragment}").is_err() {
            warn!(sender = %self.sender, "Message fragment failed to format");
        }
        self
    }

    /// Send now and return the per-channel outcomes
    pub fn commit(mut self) -> DispatchReport {
        self.send()
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn severity(&self) -> MessageSeverity {
        self.severity
    }

    pub fn category(&self) -> MessageCategory {
        self.category
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.text
    }

    fn send(&mut self) -> DispatchReport {
        self.sent = true;
        let text = std::mem::take(&mut self.text);
        self.dispatcher
            .dispatch(&self.sender, &text, self.severity, self.category)
    }
}

impl fmt::Write for MessageBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

impl Drop for MessageBuilder<'_> {
    fn drop(&mut self) {
        if !self.sent {
            self.send();
        }
    }
}

impl fmt::Debug for MessageBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("sender", &self.sender)
            .field("severity", &self.severity)
            .field("category", &self.category)
            .field("text", &self.text)
            .field("sent", &self.sent)
            .finish()
    }
}
