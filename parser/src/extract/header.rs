//! Fixed-column header table extraction.
//!
//! Two label lines establish the column layout and one data line below
//! supplies the values. Values are split by column boundary, not by
//! whitespace — label and value text may itself contain embedded spaces.
//!
//! ```text
//!   JOB    ----JCL----   SYSTEM  USR MAIN PROSE  SCHED  --NUMBER OF-   LAST-RUN
//!   NAME    ID  MEMBER   -NAME-  -ID -ID- DSNBR  DSNBR  STP DDS RUNS   DATE/TIME
//! ```
//!
//! Column spans come from the second line's word spans, widened to the
//! midpoints of the gaps between them. A first-line group label that
//! overlaps several of those spans (`----JCL----`, `--NUMBER OF-`) merges
//! them into one labeled group, and each column's full label — group part
//! plus sub part, dash decoration stripped — is matched against the closed
//! column table. A candidate line pair is accepted only when at least
//! three columns are recognized; otherwise the older line is reported
//! malformed and the newer one becomes the next candidate, which skips the
//! echoed LJOB command line that precedes the header in captured output.

use ljob_core::{Attribute, HeaderAttribute};

use super::Capture;
use crate::normalize::Line;

#[derive(Debug, Clone)]
struct Column {
    attr: Option<HeaderAttribute>,
    label: String,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Copy)]
struct Span<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

#[derive(Debug, Default)]
pub(crate) struct HeaderExtractor {
    pending: Option<(usize, String)>,
    columns: Option<Vec<Column>>,
    data_seen: bool,
}

impl HeaderExtractor {
    pub(crate) fn new() -> HeaderExtractor {
        HeaderExtractor::default()
    }

    pub(crate) fn feed(&mut self, line: &Line) -> Capture {
        if let Some(columns) = &self.columns {
            if self.data_seen {
                return Capture::reject(
                    line.number,
                    format!("unexpected line after the header data row: {:?}", line.text.trim()),
                );
            }
            self.data_seen = true;
            let mut capture = Capture::consumed();
            for column in columns {
                let value = slice_column(&line.text, column.start, column.end);
                if value.is_empty() {
                    continue;
                }
                match column.attr {
                    Some(attr) => capture.pairs.push((line.number, Attribute::Header(attr), value)),
                    None => capture.rejects.push((
                        line.number,
                        format!("value {value:?} under unrecognized column {:?}", column.label),
                    )),
                }
            }
            return capture;
        }

        match self.pending.take() {
            None => {
                self.pending = Some((line.number, line.text.clone()));
                Capture::consumed()
            }
            Some((first_number, first_text)) => match build_columns(&first_text, &line.text) {
                Some(columns) => {
                    self.columns = Some(columns);
                    Capture::consumed()
                }
                None => {
                    self.pending = Some((line.number, line.text.clone()));
                    Capture::reject(
                        first_number,
                        format!("not part of the header table: {:?}", first_text.trim()),
                    )
                }
            },
        }
    }

    /// Reports a leftover candidate line that never paired into a header.
    pub(crate) fn flush(&mut self) -> Capture {
        match self.pending.take() {
            Some((number, text)) if self.columns.is_none() => Capture::reject(
                number,
                format!("not part of the header table: {:?}", text.trim()),
            ),
            _ => Capture::default(),
        }
    }
}

/// Builds the column layout from the two label lines, or `None` when the
/// pair does not look like the header table.
fn build_columns(first: &str, second: &str) -> Option<Vec<Column>> {
    let groups = word_spans(first);
    let subs = word_spans(second);
    if subs.len() < 2 {
        return None;
    }

    let n = subs.len();
    let mut ranges = Vec::with_capacity(n);
    for i in 0..n {
        let start = if i == 0 { 0 } else { (subs[i - 1].end + subs[i].start) / 2 };
        let end = if i + 1 == n {
            usize::MAX
        } else {
            (subs[i].end + subs[i + 1].start) / 2
        };
        ranges.push((start, end));
    }

    // A group label overlapping several column ranges merges them into one
    // component; the component id is the leftmost member's index.
    let mut component: Vec<usize> = (0..n).collect();
    for group in &groups {
        let touched: Vec<usize> = (0..n)
            .filter(|&i| overlaps(group.start, group.end, ranges[i].0, ranges[i].1))
            .collect();
        if let (Some(&lo), Some(&hi)) = (touched.first(), touched.last()) {
            let id = component[lo];
            for slot in component.iter_mut().take(hi + 1).skip(lo) {
                *slot = id;
            }
        }
    }

    let mut columns = Vec::with_capacity(n);
    for i in 0..n {
        let comp_start = ranges
            .iter()
            .zip(&component)
            .filter(|&(_, &id)| id == component[i])
            .map(|(range, _)| range.0)
            .min()
            .unwrap_or(ranges[i].0);
        let comp_end = ranges
            .iter()
            .zip(&component)
            .filter(|&(_, &id)| id == component[i])
            .map(|(range, _)| range.1)
            .max()
            .unwrap_or(ranges[i].1);

        let group_label = groups
            .iter()
            .filter(|group| overlaps(group.start, group.end, comp_start, comp_end))
            .map(|group| strip_dashes(group.text))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let sub_label = strip_dashes(subs[i].text);
        let label = if group_label.is_empty() {
            sub_label
        } else if sub_label.is_empty() {
            group_label
        } else {
            format!("{group_label} {sub_label}")
        };

        let attr = HeaderAttribute::from_column_label(&label);
        columns.push(Column {
            attr,
            label,
            start: ranges[i].0,
            end: ranges[i].1,
        });
    }

    let matched = columns.iter().filter(|column| column.attr.is_some()).count();
    if matched >= 3 { Some(columns) } else { None }
}

fn word_spans(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(from) = start.take() {
                spans.push(Span {
                    start: from,
                    end: idx,
                    text: &line[from..idx],
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(from) = start {
        spans.push(Span {
            start: from,
            end: line.len(),
            text: &line[from..],
        });
    }
    spans
}

const fn overlaps(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
    a_start < b_end && b_start < a_end
}

fn strip_dashes(text: &str) -> String {
    text.trim_matches('-').trim().to_string()
}

fn slice_column(text: &str, start: usize, end: usize) -> String {
    let from = char_floor(text, start);
    let to = char_floor(text, end).max(from);
    text[from..to].trim().to_string()
}

fn char_floor(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
