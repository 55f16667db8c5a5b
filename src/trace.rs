//! JSON-lines record/replay container for pipeline event streams.
//!
//! One serialized [`TraceEvent`] per line. A stream captured from a live
//! pipeline run can be replayed through a fresh [`Analyzer`] offline, which
//! is also how the end-to-end tests drive the detector.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::event::{ClassFlags, InstEvent, PhysRegId};

/// Owned form of one pipeline event, as stored in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    #[serde(default)]
    pub mnemonic: String,
    pub pc: u64,
    #[serde(default)]
    pub committed: bool,
    #[serde(default)]
    pub issued: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub class: ClassFlags,
    #[serde(default)]
    pub dest: Option<PhysRegId>,
    #[serde(default)]
    pub srcs: [Option<PhysRegId>; 2],
}

impl TraceEvent {
    /// Borrowed view suitable for [`Analyzer::consume_instruction`].
    pub fn as_event(&self) -> InstEvent<'_, ClassFlags> {
        InstEvent {
            mnemonic: &self.mnemonic,
            pc: self.pc,
            committed: self.committed,
            issued: self.issued,
            completed: self.completed,
            class: &self.class,
            dest: self.dest,
            srcs: self.srcs,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode trace record: {0}")]
    Encode(serde_json::Error),
    #[error("malformed trace record on line {line}: {source}")]
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
}

/// Appends events to a JSON-lines trace.
pub struct TraceWriter<W> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, event: &TraceEvent) -> Result<(), TraceError> {
        let line = serde_json::to_string(event).map_err(TraceError::Encode)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads events back from a JSON-lines trace. Blank lines are skipped.
pub struct TraceReader<R> {
    input: R,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> Self {
        Self { input, line: 0 }
    }

    /// Next event in the trace, or `None` at end of input.
    pub fn next_event(&mut self) -> Result<Option<TraceEvent>, TraceError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            if self.input.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            let text = buf.trim();
            if text.is_empty() {
                continue;
            }
            return serde_json::from_str(text)
                .map(Some)
                .map_err(|source| TraceError::Malformed {
                    line: self.line,
                    source,
                });
        }
    }
}

/// Feed every event in `reader` through `analyzer`, in trace order.
/// Returns the number of events replayed.
pub fn replay<R: BufRead>(
    reader: &mut TraceReader<R>,
    analyzer: &mut Analyzer,
) -> Result<u64, TraceError> {
    let mut count = 0;
    while let Some(event) = reader.next_event()? {
        analyzer.consume_instruction(&event.as_event());
        count += 1;
    }
    Ok(count)
}
