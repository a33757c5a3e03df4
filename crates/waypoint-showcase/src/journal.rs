#![forbid(unsafe_code)]

//! JSONL journal of a replay: one line per scripted action.
//!
//! Each line carries a sequence number, the action token, what the tour
//! did with it, and where the tour stands afterwards, so two runs of the
//! same script can be diffed line by line.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One journal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub tour: String,
    pub action: String,
    pub outcome: String,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    pub index: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<String>,
    pub frames_pending: usize,
    pub listeners: usize,
}

/// Line-oriented JSON writer with its own sequence counter.
#[derive(Debug)]
pub struct Journal<W: Write> {
    out: W,
    seq: u64,
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self { out, seq: 0 }
    }

    /// Stamp `entry` with the next sequence number and write it.
    pub fn record(&mut self, mut entry: JournalEntry) -> Result<()> {
        self.seq += 1;
        entry.seq = self.seq;
        serde_json::to_writer(&mut self.out, &entry)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Entries written so far.
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Parse a journal written by [`Journal`].
pub fn read_entries(text: &str) -> Result<Vec<JournalEntry>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}
