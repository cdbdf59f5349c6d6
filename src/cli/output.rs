//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying diffs and
//! summaries to the user in text or JSON form.

use colored::Colorize;
use std::fmt::Write;
use std::time::Duration;
use tabled::{Table, Tabled};

use crate::planner::{Diff, DiffBucket, DiffLabel, Summary};
use crate::platform::{PlatformId, PROPERTY_COLOR, PROPERTY_DESCRIPTION};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Bucket diff row for table display.
#[derive(Tabled)]
struct BucketDiffRow {
    #[tabled(rename = "")]
    change: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Retention")]
    retention: String,
}

/// Label diff row for table display.
#[derive(Tabled)]
struct LabelDiffRow {
    #[tabled(rename = "")]
    change: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Label mapping row for table display.
#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "")]
    change: String,
    #[tabled(rename = "Resource Type")]
    resource_type: String,
    #[tabled(rename = "Resource Name")]
    resource_name: String,
    #[tabled(rename = "Resource ID")]
    resource_id: String,
    #[tabled(rename = "Label Name")]
    label_name: String,
    #[tabled(rename = "Label ID")]
    label_id: String,
}

/// Bucket summary row for table display.
#[derive(Tabled)]
struct BucketSummaryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Retention")]
    retention: String,
    #[tabled(rename = "Labels")]
    labels: String,
}

/// Label summary row for table display.
#[derive(Tabled)]
struct LabelSummaryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a diff for display.
    #[must_use]
    pub fn format_diff(&self, diff: &Diff) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(diff).unwrap_or_default(),
            OutputFormat::Text => Self::format_diff_text(diff),
        }
    }

    /// Formats a diff as text.
    fn format_diff_text(diff: &Diff) -> String {
        if !diff.has_changes() {
            return format!(
                "{} No changes required - platform matches the package.\n",
                "✓".green()
            );
        }

        let mut output = String::new();

        if !diff.buckets.is_empty() {
            output.push_str("\nBuckets\n");
            let rows: Vec<BucketDiffRow> = diff.buckets.iter().map(Self::bucket_diff_row).collect();
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        if !diff.labels.is_empty() {
            output.push_str("\nLabels\n");
            let rows: Vec<LabelDiffRow> = diff.labels.iter().map(Self::label_diff_row).collect();
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        if !diff.label_mappings.is_empty() {
            output.push_str("\nLabel Mappings\n");
            let rows: Vec<MappingRow> = diff
                .label_mappings
                .iter()
                .map(|m| MappingRow {
                    change: Self::format_change(m.is_new, !m.is_new),
                    resource_type: m.res_type.to_string(),
                    resource_name: m.res_name.clone(),
                    resource_id: Self::format_id(m.res_id),
                    label_name: m.label_name.clone(),
                    label_id: Self::format_id(m.label_id),
                })
                .collect();
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let new_count = diff.buckets.iter().filter(|b| b.is_new()).count()
            + diff.labels.iter().filter(|l| l.is_new()).count()
            + diff.label_mappings.iter().filter(|m| m.is_new).count();
        let update_count = diff
            .buckets
            .iter()
            .filter(|b| !b.is_new() && b.has_changes())
            .count()
            + diff
                .labels
                .iter()
                .filter(|l| !l.is_new() && l.has_changes())
                .count();

        let _ = write!(
            output,
            "\nDiff: {} to create, {} to update\n",
            new_count.to_string().green(),
            update_count.to_string().yellow()
        );

        output
    }

    /// Builds a bucket diff row.
    fn bucket_diff_row(b: &DiffBucket) -> BucketDiffRow {
        BucketDiffRow {
            change: Self::format_change(b.is_new(), !b.has_changes()),
            id: Self::format_id(b.id),
            name: b.name.clone(),
            description: Self::format_pair(&b.old_desc, &b.new_desc),
            retention: Self::format_pair(
                &Self::format_retention(b.old_retention),
                &Self::format_retention(b.new_retention),
            ),
        }
    }

    /// Builds a label diff row.
    fn label_diff_row(l: &DiffLabel) -> LabelDiffRow {
        LabelDiffRow {
            change: Self::format_change(l.is_new(), !l.has_changes()),
            id: Self::format_id(l.id),
            name: l.name.clone(),
            color: Self::format_pair(&l.old_color, &l.new_color),
            description: Self::format_pair(&l.old_desc, &l.new_desc),
        }
    }

    /// Formats a summary for display.
    #[must_use]
    pub fn format_summary(&self, summary: &Summary) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Text => Self::format_summary_text(summary),
        }
    }

    /// Formats a summary as text.
    fn format_summary_text(summary: &Summary) -> String {
        let mut output = String::new();

        output.push_str("\nBuckets\n");
        let rows: Vec<BucketSummaryRow> = summary
            .buckets
            .iter()
            .map(|b| BucketSummaryRow {
                id: Self::format_id(b.bucket.id),
                name: b.bucket.name.clone(),
                description: b.bucket.description.clone(),
                retention: Self::format_retention(b.bucket.retention_period),
                labels: b
                    .associations
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        output.push_str("\nLabels\n");
        let rows: Vec<LabelSummaryRow> = summary
            .labels
            .iter()
            .map(|l| LabelSummaryRow {
                id: Self::format_id(l.label.id),
                name: l.label.name.clone(),
                color: l.label.property(PROPERTY_COLOR).to_string(),
                description: l.label.property(PROPERTY_DESCRIPTION).to_string(),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        let _ = write!(
            output,
            "\nSummary: {} buckets, {} labels, {} label mappings\n",
            summary.buckets.len(),
            summary.labels.len(),
            summary.label_mappings.len()
        );

        output
    }

    /// Formats a change marker with color.
    fn format_change(is_new: bool, unchanged: bool) -> String {
        if is_new {
            "+new".green().to_string()
        } else if unchanged {
            "=".dimmed().to_string()
        } else {
            "~update".yellow().to_string()
        }
    }

    /// Formats an old/new pair, collapsing equal sides.
    fn format_pair(old: &str, new: &str) -> String {
        if old == new {
            new.to_string()
        } else {
            format!("{} -> {}", old.red(), new.green())
        }
    }

    /// Formats a platform ID, showing new resources as blank.
    fn format_id(id: PlatformId) -> String {
        if id.is_zero() {
            String::new()
        } else {
            id.to_string()
        }
    }

    /// Formats a retention period in the same units packages accept.
    fn format_retention(retention: Duration) -> String {
        let secs = retention.as_secs();
        if secs == 0 {
            return String::from("infinite");
        }

        let mut out = String::new();
        let mut rest = secs;
        for (unit, size) in [("h", 3600), ("m", 60), ("s", 1)] {
            if rest >= size {
                let _ = write!(out, "{}{unit}", rest / size);
                rest %= size;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::DiffLabelMapping;
    use crate::platform::ResourceType;

    fn create_test_diff() -> Diff {
        Diff {
            buckets: vec![DiffBucket {
                name: String::from("b1"),
                new_desc: String::from("d1"),
                new_retention: Duration::from_secs(3600),
                ..DiffBucket::default()
            }],
            labels: vec![],
            label_mappings: vec![DiffLabelMapping {
                is_new: true,
                res_type: ResourceType::Buckets,
                res_id: PlatformId::ZERO,
                res_name: String::from("b1"),
                label_id: PlatformId::new(7),
                label_name: String::from("l1"),
            }],
        }
    }

    #[test]
    fn test_format_retention() {
        assert_eq!(OutputFormatter::format_retention(Duration::ZERO), "infinite");
        assert_eq!(OutputFormatter::format_retention(Duration::from_secs(5400)), "1h30m");
        assert_eq!(OutputFormatter::format_retention(Duration::from_secs(90_000)), "25h");
    }

    #[test]
    fn test_format_diff_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_diff(&create_test_diff())).unwrap();

        assert_eq!(json["buckets"][0]["name"], "b1");
        assert_eq!(json["buckets"][0]["newRetention"], 3600);
        assert_eq!(json["buckets"][0]["id"], "0000000000000000");
        assert_eq!(json["labelMappings"][0]["isNew"], true);
    }

    #[test]
    fn test_format_diff_text_lists_resources() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_diff(&create_test_diff());

        assert!(text.contains("Buckets"));
        assert!(text.contains("b1"));
        assert!(text.contains("Label Mappings"));
        assert!(text.contains("2 to create"));
    }

    #[test]
    fn test_format_empty_diff_text() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_diff(&Diff::default());
        assert!(text.contains("No changes required"));
    }
}
