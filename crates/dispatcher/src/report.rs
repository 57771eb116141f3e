//! Per-channel outcome of one fan-out

use contracts::{ChannelError, ChannelId, WriteOutcome};

/// Outcome of one channel's write call
#[derive(Debug)]
pub struct ChannelOutcome {
    pub id: ChannelId,
    pub result: Result<WriteOutcome, ChannelError>,
}

/// Outcomes of every channel visited by one dispatch, in visit order.
///
/// A failing channel never stops the fan-out; its error lands here instead.
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, id: ChannelId, result: Result<WriteOutcome, ChannelError>) {
        self.outcomes.push(ChannelOutcome { id, result });
    }

    pub fn outcomes(&self) -> &[ChannelOutcome] {
        &self.outcomes
    }

    /// Outcome for one channel, if it was visited
    pub fn outcome(&self, id: ChannelId) -> Option<&Result<WriteOutcome, ChannelError>> {
        self.outcomes.iter().find(|o| o.id == id).map(|o| &o.result)
    }

    /// Number of channels that emitted the message
    pub fn written(&self) -> usize {
        self.count(WriteOutcome::Written)
    }

    /// Number of channels that filtered the message out
    pub fn filtered(&self) -> usize {
        self.count(WriteOutcome::Filtered)
    }

    pub fn failures(&self) -> impl Iterator<Item = (ChannelId, &ChannelError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id, e)))
    }

    /// True when no channel failed
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, wanted: WriteOutcome) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(outcome) if outcome == wanted))
            .count()
    }
}
