//! `AGENT INFORMATION` section extraction: `Label : Value` lines.

use ljob_core::{AgentInformationAttribute, Attribute};

use super::Capture;
use crate::normalize::{self, Line};

/// Splits on the first colon, trims both sides, and matches the label
/// against the agent registry. Lines without a colon and unknown labels
/// are rejected.
pub(crate) fn extract(line: &Line) -> Capture {
    let trimmed = line.text.trim();
    let Some((label, value)) = trimmed.split_once(':') else {
        return Capture::reject(line.number, format!("missing ':' separator: {trimmed:?}"));
    };
    match AgentInformationAttribute::match_token(label) {
        Some(attr) => Capture {
            pairs: vec![(
                line.number,
                Attribute::AgentInformation(attr),
                normalize::clean_value(value),
            )],
            ..Capture::default()
        },
        None => Capture::reject(
            line.number,
            format!("unknown agent label {:?}", label.trim()),
        ),
    }
}
