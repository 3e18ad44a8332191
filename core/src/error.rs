//! Fatal errors and recoverable warnings for listing parsing.
//!
//! Recoverable conditions are collected into a warnings list returned
//! alongside a still-usable store; fatal conditions abort the parse and
//! return no store at all.

use serde::Serialize;
use thiserror::Error;

use crate::Section;

/// Conditions that make any further parsing meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// The listing text was empty or all whitespace.
    #[error("listing text is empty")]
    EmptyInput,
}

/// Recoverable conditions noted during a parse.
///
/// Every skipped or partially-understood line produces one of these; lines
/// are never dropped silently. Line numbers are 1-based positions in the
/// input text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A banner-shaped line whose title is not a known section. The active
    /// section is left unchanged and the line is ignored.
    #[error("line {line}: unrecognized section marker {title:?}")]
    UnrecognizedSectionMarker { line: usize, title: String },

    /// A line (or fragment of a line) that does not fit any shape of the
    /// active section. Nothing is recorded for it.
    #[error("line {line}: malformed {section} field: {detail}")]
    MalformedFieldLine {
        line: usize,
        section: Section,
        detail: String,
    },

    /// A label seen again within one parse. The first value is kept.
    #[error("line {line}: duplicate {token:?} in {section}; first value kept")]
    DuplicateKey {
        line: usize,
        section: Section,
        token: String,
    },
}

impl ParseWarning {
    /// The 1-based input line this warning points at.
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::UnrecognizedSectionMarker { line, .. }
            | ParseWarning::MalformedFieldLine { line, .. }
            | ParseWarning::DuplicateKey { line, .. } => *line,
        }
    }
}
