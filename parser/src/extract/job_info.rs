//! `JOB INFORMATION` section extraction.
//!
//! Three line shapes coexist and are tried in a fixed order, first match
//! wins:
//!
//! 1. flag lines — `N -- SCHD RESOLUTION REQUIRED      Y -- LOAD STEP TO
//!    BE EXECUTED`, up to two flags per line matched left to right;
//! 2. narrative `.` lines — a closed set of labels (`DONT SCHEDULE
//!    BEFORE`, `CONSIDER ABNORMAL END IF`, ...) whose remainder is
//!    captured verbatim with no further splitting; the narrative check
//!    runs before pair splitting because narrative free text may itself
//!    contain `=`;
//! 3. pair `.` lines — `CLASS=,MSGCLASS=B,REGION=040K` runs split on
//!    commas, then on runs of two or more spaces, then on the first `=`.
//!
//! A `GROUP: SUB` pair label (`TAPE1: CALC=000`) matches the combined
//! `GROUP SUB` token or the bare `SUB` token and sets a running group
//! prefix, so a later bare `MANL` resolves as `TAPE1 MANL`. Plain lines
//! directly after a narrative line are wrapped continuations, joined into
//! the pending value with single spaces before it is recorded.

use std::sync::LazyLock;

use regex::Regex;

use ljob_core::{Attribute, JobInformationAttribute};

use super::Capture;
use crate::normalize::{self, Line};

static FLAG_MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)[YNyn] -- ").expect("static regex must compile"));
static FLAG_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[YNyn] -- ").expect("static regex must compile"));
static FRAGMENT_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static regex must compile"));

#[derive(Debug, Default)]
pub(crate) struct JobInfoExtractor {
    pending_narrative: Option<(usize, JobInformationAttribute, String)>,
}

impl JobInfoExtractor {
    pub(crate) fn new() -> JobInfoExtractor {
        JobInfoExtractor::default()
    }

    pub(crate) fn feed(&mut self, line: &Line) -> Capture {
        let trimmed = line.text.trim();

        if FLAG_LINE_RE.is_match(trimmed) {
            let mut capture = self.flush();
            extract_flags(trimmed, line.number, &mut capture);
            return capture;
        }

        if let Some(rest) = trimmed.strip_prefix('.') {
            let rest = rest.trim_start();
            let mut capture = self.flush();
            if let Some((attr, value)) = match_narrative(rest) {
                self.pending_narrative = Some((line.number, attr, value));
                capture.consumed = true;
            } else {
                extract_pairs(rest, line.number, &mut capture);
            }
            return capture;
        }

        // Plain text directly after a narrative line wraps its value.
        if let Some((_, _, value)) = &mut self.pending_narrative {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(trimmed);
            return Capture::consumed();
        }

        Capture::reject(
            line.number,
            format!("line fits no job information shape: {trimmed:?}"),
        )
    }

    /// Records the pending narrative value, if any.
    pub(crate) fn flush(&mut self) -> Capture {
        let mut capture = Capture::default();
        if let Some((number, attr, value)) = self.pending_narrative.take() {
            capture.pairs.push((
                number,
                Attribute::JobInformation(attr),
                normalize::clean_value(&value),
            ));
        }
        capture
    }
}

/// Extracts the `Y/N -- LABEL` pairs of a flag line, left to right.
fn extract_flags(trimmed: &str, number: usize, capture: &mut Capture) {
    let marks: Vec<regex::Match<'_>> = FLAG_MARK_RE.find_iter(trimmed).collect();
    for (i, mark) in marks.iter().enumerate() {
        let label_end = marks
            .get(i + 1)
            .map_or(trimmed.len(), |next| next.start());
        let label = trimmed[mark.end()..label_end].trim();
        let flag = trimmed[mark.start()..]
            .trim_start()
            .chars()
            .next()
            .unwrap_or('N');
        if label.is_empty() {
            capture
                .rejects
                .push((number, "flag marker without a label".to_string()));
            continue;
        }
        match JobInformationAttribute::match_token(label) {
            Some(attr) => capture.pairs.push((
                number,
                Attribute::JobInformation(attr),
                normalize::flag_value(flag).to_string(),
            )),
            None => capture
                .rejects
                .push((number, format!("unknown flag label {label:?}"))),
        }
    }
}

/// Matches a narrative label prefix and returns the verbatim remainder,
/// skipping an optional `(...)` qualifier and `:` after the label.
fn match_narrative(rest: &str) -> Option<(JobInformationAttribute, String)> {
    for attr in JobInformationAttribute::NARRATIVE {
        let token = attr.token();
        if rest.len() < token.len()
            || !rest.is_char_boundary(token.len())
            || !rest[..token.len()].eq_ignore_ascii_case(token)
        {
            continue;
        }
        let remainder = &rest[token.len()..];
        // Label must end on a word boundary: "DONT SCHEDULE BEFOREHAND" is
        // not a DONT SCHEDULE BEFORE line.
        let boundary_ok = remainder.is_empty()
            || remainder.starts_with(' ')
            || remainder.starts_with('(')
            || remainder.starts_with(':');
        if !boundary_ok {
            continue;
        }
        let mut tail = remainder.trim_start();
        if let Some(after) = tail.strip_prefix('(') {
            tail = after.split_once(')').map_or("", |(_, rest)| rest).trim_start();
        }
        tail = tail.strip_prefix(':').unwrap_or(tail).trim_start();
        return Some((attr, tail.to_string()));
    }
    None
}

/// Extracts the `LABEL=value` runs of a pair line.
fn extract_pairs(rest: &str, number: usize, capture: &mut Capture) {
    let mut group: Option<String> = None;
    let mut saw_fragment = false;

    for piece in rest.split(',') {
        for fragment in FRAGMENT_SPLIT_RE.split(piece) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            saw_fragment = true;
            let Some((raw_label, raw_value)) = fragment.split_once('=') else {
                capture
                    .rejects
                    .push((number, format!("field without '=': {fragment:?}")));
                continue;
            };
            let value = normalize::clean_value(raw_value);
            match resolve_pair_label(raw_label.trim(), &mut group) {
                Some(attr) => capture
                    .pairs
                    .push((number, Attribute::JobInformation(attr), value)),
                None => capture
                    .rejects
                    .push((number, format!("unknown field label {:?}", raw_label.trim()))),
            }
        }
    }

    if !saw_fragment {
        capture
            .rejects
            .push((number, "empty field line after '.'".to_string()));
    }
}

/// Resolves a pair label, updating the running `GROUP:` prefix.
fn resolve_pair_label(
    raw_label: &str,
    group: &mut Option<String>,
) -> Option<JobInformationAttribute> {
    if let Some((group_part, sub)) = raw_label.split_once(':') {
        let group_part = strip_qualifier(group_part.trim());
        let sub = sub.trim();
        let combined = format!("{group_part} {sub}");
        let attr = JobInformationAttribute::match_token(&combined)
            .or_else(|| JobInformationAttribute::match_token(sub))?;
        *group = Some(group_part);
        return Some(attr);
    }

    JobInformationAttribute::match_token(raw_label).or_else(|| {
        let prefix = group.as_deref()?;
        JobInformationAttribute::match_token(&format!("{prefix} {raw_label}"))
    })
}

/// Drops a trailing parenthetical from a group label: `LEAD TIME (HRS)` →
/// `LEAD TIME`.
fn strip_qualifier(label: &str) -> String {
    match label.rsplit_once('(') {
        Some((head, tail)) if tail.ends_with(')') => head.trim().to_string(),
        _ => label.to_string(),
    }
}
