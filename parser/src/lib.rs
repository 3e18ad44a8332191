//! Single-pass parser for CA 7 LJOB job-scheduler listings.
//!
//! An LJOB listing is free text organized into sections by dashed banner
//! lines. The parser walks the text once: a state machine tracks the
//! active section, one field extractor per section turns content lines
//! into `(attribute, value)` pairs, and a normalizer cleans the captured
//! values. The result is an [`AttributeStore`] queryable by
//! case-insensitive label, together with the recoverable warnings the
//! pass collected.
//!
//! Parsing is synchronous, side-effect-free, and owns no state beyond one
//! invocation — independent listings can be parsed concurrently (see
//! [`batch::parse_listings`]) with no shared data.
//!
//! # Main entry points
//!
//! - [`parse_listing`] — parse a listing into a store plus warnings.
//! - [`parse_listing_with_report`] — same, plus a [`ParseReport`] with
//!   coverage accounting.
//!
//! # Example
//!
//! ```
//! use ljob_parser::parse_listing;
//!
//! let listing = "\
//! ------------------------- AGENT INFORMATION  -------------------------
//! Job Type: NT_JOB
//! Agent   : USER023ESP
//! Userid  : usero23
//! ";
//!
//! let parsed = parse_listing(listing).expect("listing is not empty");
//! assert_eq!(parsed.store.get("agent"), Some("USER023ESP"));
//! assert_eq!(parsed.store.get("job type"), Some("NT_JOB"));
//! assert!(parsed.warnings.is_empty());
//! ```
//!
//! [`AttributeStore`]: ljob_core::AttributeStore

pub mod batch;
pub mod output;
pub mod report;

mod classify;
mod extract;
mod normalize;

use tracing::debug;

use ljob_core::{Attribute, AttributeStore, ParseError, ParseWarning, ProseAttribute, Section};

use crate::classify::{LineClass, ParserState};
use crate::extract::Capture;
use crate::extract::header::HeaderExtractor;
use crate::extract::job_info::JobInfoExtractor;
use crate::extract::prose::ProseAccumulator;
pub use crate::report::{ParseDiagnostics, ParseReport};

/// A fully parsed listing: the raw text it came from, the attribute store,
/// and the warnings collected along the way. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedListing {
    pub raw: String,
    pub store: AttributeStore,
    pub warnings: Vec<ParseWarning>,
}

/// Result plus report for one parse run.
#[derive(Debug)]
pub struct ListingRun {
    pub result: Result<ParsedListing, ParseError>,
    pub report: ParseReport,
}

/// Parses a listing into an attribute store plus warnings.
///
/// This is the primary entry point. The only fatal condition is an empty
/// input; every other anomaly is a [`ParseWarning`] next to a still-usable
/// (possibly incomplete) store.
pub fn parse_listing(listing: &str) -> Result<ParsedListing, ParseError> {
    let mut parser = ReportParser::new(listing);
    let store = parser.parse()?;
    Ok(ParsedListing {
        raw: listing.to_string(),
        store,
        warnings: parser.warnings().to_vec(),
    })
}

/// Parses a listing and additionally builds a [`ParseReport`] with line
/// coverage, unresolved lines, and rendered warnings.
pub fn parse_listing_with_report(listing: &str) -> ListingRun {
    let mut parser = ReportParser::new(listing);
    let outcome = parser.parse();
    let counted = outcome.as_ref().map(AttributeStore::len).map_err(Clone::clone);
    let report = ParseReport::build(&counted, parser.diagnostics(), parser.warnings());
    let result = outcome.map(|store| ParsedListing {
        raw: listing.to_string(),
        store,
        warnings: parser.warnings().to_vec(),
    });
    ListingRun { result, report }
}

/// Single-use parser for one listing.
///
/// Most consumers should use [`parse_listing`]; the struct form exposes
/// warnings and diagnostics to callers that drive the parse themselves.
pub struct ReportParser {
    raw: String,
    warnings: Vec<ParseWarning>,
    diagnostics: ParseDiagnostics,
}

impl ReportParser {
    pub fn new(listing: &str) -> ReportParser {
        ReportParser {
            raw: listing.to_string(),
            warnings: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Warnings collected so far, in input order.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    /// Runs the single pass over the listing.
    pub fn parse(&mut self) -> Result<AttributeStore, ParseError> {
        if self.raw.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let lines = normalize::to_lines(&self.raw);
        let mut store = AttributeStore::new();
        let mut state = ParserState::AwaitingFirstSection;
        let mut header = HeaderExtractor::new();
        let mut job_info = JobInfoExtractor::new();
        let mut prose = ProseAccumulator::new();

        for line in &lines {
            match classify::classify_line(&line.text) {
                LineClass::Banner(section) => {
                    self.leave_section(state, &mut header, &mut job_info, &mut prose, &mut store);
                    debug!(line = line.number, section = %section, "section banner");
                    state = ParserState::for_section(section);
                    self.note_section(section);
                    self.diagnostics.relevant_lines += 1;
                    self.diagnostics.recognized_lines += 1;
                }
                LineClass::UnknownBanner(title) => {
                    self.diagnostics.relevant_lines += 1;
                    self.diagnostics
                        .unresolved_lines
                        .push(line.text.trim().to_string());
                    self.warnings.push(ParseWarning::UnrecognizedSectionMarker {
                        line: line.number,
                        title,
                    });
                }
                LineClass::Separator => {}
                LineClass::Blank => match state {
                    ParserState::InProse => prose.push_blank(),
                    // A blank line ends a wrapped narrative value.
                    ParserState::InJobInformation => {
                        let capture = job_info.flush();
                        self.apply(capture, Section::JobInformation, &mut store, false);
                    }
                    _ => {}
                },
                LineClass::Content => {
                    self.diagnostics.relevant_lines += 1;
                    match state {
                        ParserState::AwaitingFirstSection | ParserState::InHeader => {
                            if state == ParserState::AwaitingFirstSection {
                                state = ParserState::InHeader;
                                self.note_section(Section::Header);
                            }
                            let capture = header.feed(line);
                            self.apply(capture, Section::Header, &mut store, true);
                        }
                        ParserState::InJobInformation => {
                            let capture = job_info.feed(line);
                            self.apply(capture, Section::JobInformation, &mut store, true);
                        }
                        ParserState::InAgentInformation => {
                            let capture = extract::agent_info::extract(line);
                            self.apply(capture, Section::AgentInformation, &mut store, true);
                        }
                        ParserState::InProse => {
                            prose.push(line.number, &line.text);
                            self.diagnostics.recognized_lines += 1;
                        }
                        ParserState::Done => {}
                    }
                }
            }
        }

        self.leave_section(state, &mut header, &mut job_info, &mut prose, &mut store);
        state = ParserState::Done;
        debug!(
            lines = lines.len(),
            attributes = store.len(),
            warnings = self.warnings.len(),
            state = ?state,
            "parse complete"
        );
        Ok(store)
    }

    /// Records a capture's pairs and rejects. `count_line` is set for
    /// per-line captures so recognized-line accounting skips flushes,
    /// whose pairs belong to lines already counted.
    fn apply(&mut self, capture: Capture, section: Section, store: &mut AttributeStore, count_line: bool) {
        if count_line && capture.recognized() {
            self.diagnostics.recognized_lines += 1;
        }
        for (line, attr, value) in capture.pairs {
            if !store.insert_first(attr, value) {
                self.warnings.push(ParseWarning::DuplicateKey {
                    line,
                    section,
                    token: attr.token().to_string(),
                });
            }
        }
        for (line, detail) in capture.rejects {
            self.diagnostics.unresolved_lines.push(detail.clone());
            self.warnings.push(ParseWarning::MalformedFieldLine {
                line,
                section,
                detail,
            });
        }
    }

    /// Flushes whatever the departing section still holds.
    fn leave_section(
        &mut self,
        state: ParserState,
        header: &mut HeaderExtractor,
        job_info: &mut JobInfoExtractor,
        prose: &mut ProseAccumulator,
        store: &mut AttributeStore,
    ) {
        match state {
            ParserState::AwaitingFirstSection | ParserState::InHeader => {
                let capture = header.flush();
                self.apply(capture, Section::Header, store, false);
            }
            ParserState::InJobInformation => {
                let capture = job_info.flush();
                self.apply(capture, Section::JobInformation, store, false);
            }
            ParserState::InProse => {
                let start = prose.start_line().unwrap_or_default();
                if let Some(text) = prose.take() {
                    let attr = Attribute::Prose(ProseAttribute::Prose);
                    if !store.insert_first(attr, text) {
                        self.warnings.push(ParseWarning::DuplicateKey {
                            line: start,
                            section: Section::Prose,
                            token: attr.token().to_string(),
                        });
                    }
                }
            }
            ParserState::InAgentInformation | ParserState::Done => {}
        }
    }

    fn note_section(&mut self, section: Section) {
        if self.diagnostics.sections_seen.last() != Some(&section) {
            self.diagnostics.sections_seen.push(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_LISTING: &str = "\
        --------------------------- JOB INFORMATION ---------------------------
        N -- SCHD RESOLUTION REQUIRED      Y -- LOAD STEP TO BE EXECUTED
        . CLASS=,MSGCLASS=B,REGION=040K
        ------------------------- AGENT INFORMATION  -------------------------
        Job Type: NT_JOB
        Agent   : USER023ESP
        Userid  : usero23
";

    #[test]
    fn test_empty_input_is_fatal() {
        assert_eq!(parse_listing(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_listing("  \n \n"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_listing(SMALL_LISTING).unwrap();
        let second = parse_listing(SMALL_LISTING).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_flag_and_pair_lines_round_trip() {
        let parsed = parse_listing(SMALL_LISTING).unwrap();
        assert_eq!(parsed.store.get("SCHD RESOLUTION REQUIRED"), Some("false"));
        assert_eq!(parsed.store.get("LOAD STEP TO BE EXECUTED"), Some("true"));
        assert_eq!(parsed.store.get("CLASS"), Some(""));
        assert_eq!(parsed.store.get("MSGCLASS"), Some("B"));
        assert_eq!(parsed.store.get("REGION"), Some("040K"));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_registered_but_absent_labels_answer_none() {
        let parsed = parse_listing(SMALL_LISTING).unwrap();
        for section in Section::PRECEDENCE {
            for attr in Attribute::all_in(section) {
                // Lookup must answer, never panic; spot-check a known absentee.
                let _ = parsed.store.get_in(section, attr.token());
            }
        }
        assert_eq!(parsed.store.get("OWNER"), None);
        assert_eq!(parsed.store.get_in(Section::Header, "JOB NAME"), None);
    }

    #[test]
    fn test_unknown_banner_keeps_section_and_prior_results() {
        let listing = "\
        --------------------------- JOB INFORMATION ---------------------------
        . MSGCLASS=B
        ----------------------- FUTURE INFORMATION -----------------------
        . REGION=040K
";
        let parsed = parse_listing(listing).unwrap();
        assert_eq!(parsed.store.get("MSGCLASS"), Some("B"));
        // Still recorded under job information: the unknown banner did not
        // switch sections.
        assert_eq!(
            parsed.store.get_in(Section::JobInformation, "REGION"),
            Some("040K")
        );
        assert_eq!(parsed.warnings.len(), 1);
        assert!(matches!(
            parsed.warnings[0],
            ParseWarning::UnrecognizedSectionMarker { line: 3, .. }
        ));
    }

    #[test]
    fn test_duplicate_key_keeps_first_value_and_warns() {
        let listing = "\
        --------------------------- JOB INFORMATION ---------------------------
        . MSGCLASS=B
        . MSGCLASS=Z
";
        let parsed = parse_listing(listing).unwrap();
        assert_eq!(parsed.store.get("MSGCLASS"), Some("B"));
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning::DuplicateKey {
                line: 3,
                section: Section::JobInformation,
                token: "MSGCLASS".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_agent_line_warns_without_losing_neighbors() {
        let listing = "\
        ------------------------- AGENT INFORMATION  -------------------------
        Job Type: NT_JOB
        Agent missing separator
        Userid  : usero23
";
        let parsed = parse_listing(listing).unwrap();
        assert_eq!(parsed.store.get("Job Type"), Some("NT_JOB"));
        assert_eq!(parsed.store.get("Userid"), Some("usero23"));
        assert_eq!(parsed.store.get("Agent"), None);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(matches!(
            parsed.warnings[0],
            ParseWarning::MalformedFieldLine {
                line: 3,
                section: Section::AgentInformation,
                ..
            }
        ));
    }

    #[test]
    fn test_prose_runs_to_end_of_input() {
        let listing = "\
---------------------------------- PROSE ----------------------------------
THIS IS THE FIRST JOB IN THE TESTNTWK TO BE EXECUTED AND IS A
SCHEDULED JOB.  IT CONSISTS OF TWO STEPS.  THE FIRST STEP RECEIVES
A SET OF CONTROL CARDS AS INPUT, CREATES A DATASET CA7.TEST1 AS
OUTPUT AND DEMANDS THE NEXT JOB DUSAXX02 TO BE STARTED.
";
        let parsed = parse_listing(listing).unwrap();
        let prose = parsed.store.get("PROSE").expect("prose should be recorded");
        assert_eq!(prose.lines().count(), 4);
        assert!(prose.starts_with("THIS IS THE FIRST JOB"));
        assert!(prose.ends_with("TO BE STARTED."));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_second_prose_section_warns_and_keeps_first() {
        let listing = "\
---------------------------------- PROSE ----------------------------------
FIRST PARAGRAPH.
--------------------------- JOB INFORMATION ---------------------------
. MSGCLASS=B
---------------------------------- PROSE ----------------------------------
SECOND PARAGRAPH.
";
        let parsed = parse_listing(listing).unwrap();
        assert_eq!(parsed.store.get("PROSE"), Some("FIRST PARAGRAPH."));
        assert!(parsed.warnings.iter().any(|warning| matches!(
            warning,
            ParseWarning::DuplicateKey { section: Section::Prose, .. }
        )));
    }

    #[test]
    fn test_report_accounts_for_coverage_and_failure() {
        let run = parse_listing_with_report(SMALL_LISTING);
        assert!(run.result.is_ok());
        assert!(run.report.success);
        assert!(run.report.coverage > 0.99);
        assert_eq!(
            run.report.sections_seen,
            vec![Section::JobInformation, Section::AgentInformation]
        );

        let failed = parse_listing_with_report("");
        assert!(failed.result.is_err());
        assert!(!failed.report.success);
        assert_eq!(failed.report.failure.as_deref(), Some("listing text is empty"));
    }

    #[test]
    fn test_header_only_listing_uses_implicit_section() {
        let listing = "\
   JOB    ----JCL----   SYSTEM  USR MAIN PROSE  SCHED  --NUMBER OF-   LAST-RUN
   NAME    ID  MEMBER   -NAME-  -ID -ID- DSNBR  DSNBR  STP DDS RUNS   DATE/TIME
 DUSAXX01 007 DUSAXX01 TESTNTWK UID ALL  000007 000015 002 008 0000   YY.DDD/HH:MM
";
        let parsed = parse_listing(listing).unwrap();
        assert_eq!(parsed.store.get("JOB NAME"), Some("DUSAXX01"));
        assert_eq!(parsed.store.get("LAST RUN DT"), Some("YY.DDD/HH:MM"));
        assert_eq!(
            parsed.store.get_in(Section::Header, "NUMBER OF RUNS"),
            Some("0000")
        );
        assert!(parsed.warnings.is_empty());
    }
}
