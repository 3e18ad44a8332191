//! Structured reporting for a parse run.

use serde::{Deserialize, Serialize};

use ljob_core::{ParseError, ParseWarning, Section};

/// Per-run line accounting collected while parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseDiagnostics {
    /// Sections entered, in banner order (the implicit header included
    /// when it contributed lines).
    pub sections_seen: Vec<Section>,
    /// Non-blank, non-separator lines.
    pub relevant_lines: usize,
    /// Lines that recorded attributes or were understood structurally.
    pub recognized_lines: usize,
    /// Text of the lines and fragments that produced warnings.
    pub unresolved_lines: Vec<String>,
}

impl ParseDiagnostics {
    /// Share of relevant lines the parser understood.
    pub fn coverage(&self) -> f64 {
        if self.relevant_lines == 0 {
            return 0.0;
        }
        self.recognized_lines as f64 / self.relevant_lines as f64
    }
}

/// Report for one listing parse, the shape handed to callers that want
/// more than the store: coverage accounting, rendered warnings, and a
/// generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    pub success: bool,
    /// Structured failure rendering when the parse was fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Number of attributes recorded in the store.
    pub attributes_recorded: usize,
    pub sections_seen: Vec<Section>,
    pub coverage: f64,
    pub relevant_lines: usize,
    pub recognized_lines: usize,
    pub unresolved_lines: Vec<String>,
    pub warnings: Vec<String>,
    /// RFC 3339 timestamp of report generation.
    pub generated_at: String,
}

impl ParseReport {
    pub(crate) fn build(
        outcome: &Result<usize, ParseError>,
        diagnostics: &ParseDiagnostics,
        warnings: &[ParseWarning],
    ) -> ParseReport {
        let (success, failure, attributes_recorded) = match outcome {
            Ok(recorded) => (true, None, *recorded),
            Err(error) => (false, Some(error.to_string()), 0),
        };
        ParseReport {
            success,
            failure,
            attributes_recorded,
            sections_seen: diagnostics.sections_seen.clone(),
            coverage: diagnostics.coverage(),
            relevant_lines: diagnostics.relevant_lines,
            recognized_lines: diagnostics.recognized_lines,
            unresolved_lines: diagnostics.unresolved_lines.clone(),
            warnings: warnings.iter().map(ParseWarning::to_string).collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
