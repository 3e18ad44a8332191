//! Per-section field extractors.
//!
//! Each section of the listing has its own sub-format, so each gets its own
//! extractor: the fixed-column header table, the three-shape job
//! information lines, the colon-pair agent lines, and the free-text prose
//! accumulator. Extractors see one line at a time (plus whatever pending
//! state a wrapped value needs) and report what they recorded, what they
//! rejected, or that the line was a structural no-op — never a silent
//! drop.

pub(crate) mod agent_info;
pub(crate) mod header;
pub(crate) mod job_info;
pub(crate) mod prose;

use ljob_core::Attribute;

/// Result of feeding one line (or flushing pending state) to an extractor.
#[derive(Debug, Default)]
pub(crate) struct Capture {
    /// Recorded values as `(line number, attribute, value)`, in extraction
    /// order. The line number feeds duplicate-key warnings, which matters
    /// for values flushed after their line (wrapped narratives).
    pub(crate) pairs: Vec<(usize, Attribute, String)>,
    /// Rejected lines or fragments, as `(line number, detail)`; each
    /// becomes a malformed-field warning.
    pub(crate) rejects: Vec<(usize, String)>,
    /// The line was understood structurally (label row, continuation,
    /// prose text) even if it recorded nothing.
    pub(crate) consumed: bool,
}

impl Capture {
    pub(crate) fn consumed() -> Capture {
        Capture {
            consumed: true,
            ..Capture::default()
        }
    }

    pub(crate) fn reject(line: usize, detail: impl Into<String>) -> Capture {
        Capture {
            rejects: vec![(line, detail.into())],
            ..Capture::default()
        }
    }

    pub(crate) fn recognized(&self) -> bool {
        self.consumed || !self.pairs.is_empty()
    }
}
