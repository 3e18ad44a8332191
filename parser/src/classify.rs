//! Line classification and the section state machine.
//!
//! A banner line — a run of dashes, whitespace, an upper-case section
//! title, whitespace, a run of dashes — switches the active section. A
//! dash-only line is a separator. Everything else is content for the
//! active section's extractor.

use std::sync::LazyLock;

use regex::Regex;

use ljob_core::Section;

// All regexes here are compile-time constants. An expect() failure indicates
// a programmer error in the pattern, not a runtime condition.
static BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{2,}\s+(.+?)\s+-{2,}\s*$").expect("static regex must compile"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-+\s*$").expect("static regex must compile"));

/// How a single line participates in the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineClass {
    /// Banner announcing a known section.
    Banner(Section),
    /// Banner-shaped line with an unknown title; the active section is
    /// kept and the line is ignored.
    UnknownBanner(String),
    /// A dash-only rule line.
    Separator,
    Blank,
    /// Anything else — routed to the active section's extractor.
    Content,
}

pub(crate) fn classify_line(text: &str) -> LineClass {
    if text.trim().is_empty() {
        return LineClass::Blank;
    }
    if SEPARATOR_RE.is_match(text) {
        return LineClass::Separator;
    }
    if let Some(caps) = BANNER_RE.captures(text) {
        let title = caps[1].trim().to_string();
        return match Section::from_banner_title(&title) {
            Some(section) => LineClass::Banner(section),
            None => LineClass::UnknownBanner(title),
        };
    }
    LineClass::Content
}

/// Parser states. The header table is implicitly active before the first
/// banner; end of input always reaches `Done`, whatever the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParserState {
    AwaitingFirstSection,
    InHeader,
    InJobInformation,
    InAgentInformation,
    InProse,
    Done,
}

impl ParserState {
    pub(crate) fn for_section(section: Section) -> ParserState {
        match section {
            Section::Header => ParserState::InHeader,
            Section::JobInformation => ParserState::InJobInformation,
            Section::AgentInformation => ParserState::InAgentInformation,
            Section::Prose => ParserState::InProse,
        }
    }

    /// The section whose extractor receives content lines in this state.
    pub(crate) fn section(self) -> Option<Section> {
        match self {
            ParserState::AwaitingFirstSection | ParserState::InHeader => Some(Section::Header),
            ParserState::InJobInformation => Some(Section::JobInformation),
            ParserState::InAgentInformation => Some(Section::AgentInformation),
            ParserState::InProse => Some(Section::Prose),
            ParserState::Done => None,
        }
    }
}
