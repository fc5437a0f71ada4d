//! In-memory transcript.

use serde::{Deserialize, Serialize};

use crate::models::{RenderedSegment, Sender};
use crate::traits::TranscriptSink;

/// One appended segment and who it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub segment: RenderedSegment,
}

/// Append-only list of rendered segments in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries attributed to `sender`, in order.
    pub fn from_sender(&self, sender: Sender) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().filter(move |entry| entry.sender == sender)
    }

    /// Concatenated html of every entry, in order.
    pub fn html(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.segment.html())
            .collect()
    }

    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        self.entries
    }
}

impl TranscriptSink for Transcript {
    fn append(&mut self, segment: RenderedSegment, sender: Sender) {
        self.entries.push(TranscriptEntry { sender, segment });
    }
}
