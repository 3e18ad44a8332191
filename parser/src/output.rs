//! Output formatting for stores and reports.

use ljob_core::AttributeStore;

use crate::report::ParseReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a parsed store in the requested output format.
pub fn format_store(store: &AttributeStore, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(store)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(store).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(store_to_table(store)),
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn store_to_table(store: &AttributeStore) -> String {
    let entries = store.entries_sorted();
    let mut out = String::new();

    let max_token = entries
        .iter()
        .map(|(attr, _)| attr.token().len())
        .max()
        .unwrap_or(0);
    let mut current_section = None;
    for (attr, value) in entries {
        if current_section != Some(attr.section()) {
            current_section = Some(attr.section());
            out.push_str(&format!("{}:\n", attr.section()));
        }
        // Prose spans lines; indent its continuation lines under the token.
        let mut lines = value.lines();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("  {:<max_token$}  {first}\n", attr.token()));
        for continuation in lines {
            out.push_str(&format!("  {:<max_token$}  {continuation}\n", ""));
        }
    }
    out
}

fn report_to_table(report: &ParseReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Parse: {}  Coverage: {:.0}%  Attributes: {}\n",
        if report.success { "ok" } else { "failed" },
        report.coverage * 100.0,
        report.attributes_recorded
    ));
    if let Some(ref failure) = report.failure {
        out.push_str(&format!("  Failure: {failure}\n"));
    }
    if !report.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &report.warnings {
            out.push_str(&format!("  {warning}\n"));
        }
    }
    if !report.unresolved_lines.is_empty() {
        out.push_str("\nUnresolved lines:\n");
        for line in &report.unresolved_lines {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ljob_core::{Attribute, HeaderAttribute, JobInformationAttribute};

    fn sample_store() -> AttributeStore {
        let mut store = AttributeStore::new();
        store.insert_first(Attribute::Header(HeaderAttribute::JobName), "DUSAXX01");
        store.insert_first(Attribute::JobInformation(JobInformationAttribute::Msgclass), "B");
        store
    }

    #[test]
    fn test_json_output_lists_entries() {
        let rendered = format_store(&sample_store(), OutputFormat::Json).unwrap();
        assert!(rendered.contains("\"token\": \"JOB NAME\""));
        assert!(rendered.contains("\"value\": \"DUSAXX01\""));
    }

    #[test]
    fn test_yaml_output_round_trips() {
        let rendered = format_store(&sample_store(), OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed.as_sequence().map(Vec::len), Some(2));
    }

    #[test]
    fn test_table_output_groups_by_section() {
        let rendered = format_store(&sample_store(), OutputFormat::Table).unwrap();
        let header_pos = rendered.find("header:").unwrap();
        let job_pos = rendered.find("job information:").unwrap();
        assert!(header_pos < job_pos);
        assert!(rendered.contains("JOB NAME"));
    }
}
