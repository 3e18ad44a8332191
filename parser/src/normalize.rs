//! Line preparation and value normalization.
//!
//! Header column math depends on character positions, so line preparation
//! normalizes newlines and trims trailing whitespace but always preserves
//! leading indentation.

/// One input line with its 1-based position in the listing.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    pub(crate) number: usize,
    pub(crate) text: String,
}

/// Splits a raw listing into lines: `\r\n`/`\r` become `\n`, trailing
/// whitespace is dropped, leading whitespace is kept.
pub(crate) fn to_lines(raw: &str) -> Vec<Line> {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .split('\n')
        .enumerate()
        .map(|(index, text)| Line {
            number: index + 1,
            text: text.trim_end().to_string(),
        })
        .collect()
}

/// Trims surrounding whitespace from a captured value.
pub(crate) fn clean_value(raw: &str) -> String {
    raw.trim().to_string()
}

/// Canonical boolean-as-text for a `Y`/`N` flag token.
pub(crate) fn flag_value(flag: char) -> &'static str {
    if flag.eq_ignore_ascii_case(&'Y') { "true" } else { "false" }
}

/// Joins prose lines newline-preserving, stripping a single leading and a
/// single trailing blank line if present. Returns `None` when nothing but
/// blank lines accumulated.
pub(crate) fn join_prose(lines: &[String]) -> Option<String> {
    let mut slice = lines;
    if slice.first().is_some_and(|line| line.trim().is_empty()) {
        slice = &slice[1..];
    }
    if slice.last().is_some_and(|line| line.trim().is_empty()) {
        slice = &slice[..slice.len() - 1];
    }
    if slice.iter().all(|line| line.trim().is_empty()) {
        return None;
    }
    Some(slice.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_lines_normalizes_newlines_and_keeps_indentation() {
        let lines = to_lines("  first  \r\nsecond\rthird");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].text, "  first");
        assert_eq!(lines[1].text, "second");
        assert_eq!(lines[2].text, "third");
    }

    #[test]
    fn test_flag_value_coercion() {
        assert_eq!(flag_value('Y'), "true");
        assert_eq!(flag_value('y'), "true");
        assert_eq!(flag_value('N'), "false");
    }

    #[test]
    fn test_join_prose_strips_one_enclosing_blank_line() {
        let lines = vec![
            String::new(),
            "FIRST LINE".to_string(),
            String::new(),
            "THIRD LINE".to_string(),
            String::new(),
        ];
        assert_eq!(
            join_prose(&lines).as_deref(),
            Some("FIRST LINE\n\nTHIRD LINE")
        );
    }

    #[test]
    fn test_join_prose_of_blanks_is_absent() {
        assert_eq!(join_prose(&[]), None);
        assert_eq!(join_prose(&[String::new(), String::new()]), None);
    }
}
