//! Per-entry accumulation state machine

use sprot_common::ProteinRecord;

use crate::classify::{classify, LineKind};
use crate::extract;

/// Whether any field line has been seen since the last terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulatorState {
    #[default]
    Empty,
    Accumulating,
}

/// Builds one [`ProteinRecord`] at a time from classified lines.
///
/// The in-flight record is owned here and handed out by value when the `//`
/// terminator arrives; a fresh default record takes its place.
#[derive(Debug, Default)]
pub struct EntryAccumulator {
    record: ProteinRecord,
    state: AccumulatorState,
}

impl EntryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// The record built so far
    pub fn record(&self) -> &ProteinRecord {
        &self.record
    }

    /// Classify and feed one trimmed line
    pub fn feed(&mut self, line: &str) -> Option<ProteinRecord> {
        self.feed_classified(classify(line), line)
    }

    /// Feed a line that was already classified as `kind`.
    ///
    /// Returns the completed record on `Terminator`, even if nothing was
    /// accumulated. `Other` lines have no effect.
    pub fn feed_classified(&mut self, kind: LineKind, line: &str) -> Option<ProteinRecord> {
        match kind {
            LineKind::Terminator => {
                self.state = AccumulatorState::Empty;
                Some(std::mem::take(&mut self.record))
            },
            LineKind::Other => None,
            _ => {
                self.state = AccumulatorState::Accumulating;
                extract::apply(kind, line, &mut self.record);
                None
            },
        }
    }
}
