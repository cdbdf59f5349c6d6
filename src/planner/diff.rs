//! Diff records for comparing package resources against the platform.
//!
//! A diff always reports both sides of every mutable attribute. Whether a
//! pair is an actual change is left to the consumer.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::pkg::{Bucket, Identified, Label};
use crate::platform::{
    duration_secs, PlatformBucket, PlatformId, PlatformLabel, ResourceType, PROPERTY_COLOR,
    PROPERTY_DESCRIPTION,
};

/// The result of a dry run: what is new and or updated on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    /// Bucket diffs.
    pub buckets: Vec<DiffBucket>,
    /// Label diffs.
    pub labels: Vec<DiffLabel>,
    /// Label mapping diffs.
    pub label_mappings: Vec<DiffLabelMapping>,
}

/// A diff of an individual bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffBucket {
    /// Resolved bucket identity.
    pub id: PlatformId,
    /// Bucket name.
    pub name: String,
    /// Platform description.
    pub old_desc: String,
    /// Package description.
    pub new_desc: String,
    /// Platform retention period.
    #[serde(with = "duration_secs")]
    pub old_retention: Duration,
    /// Package retention period.
    #[serde(with = "duration_secs")]
    pub new_retention: Duration,
}

/// A diff of an individual label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLabel {
    /// Resolved label identity.
    pub id: PlatformId,
    /// Label name.
    pub name: String,
    /// Platform color.
    pub old_color: String,
    /// Package color.
    pub new_color: String,
    /// Platform description.
    pub old_desc: String,
    /// Package description.
    pub new_desc: String,
}

/// A diff of an individual label mapping.
///
/// A single resource may have mappings to many labels, and a label may be
/// mapped to many resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLabelMapping {
    /// True if the mapping does not exist on the platform yet.
    pub is_new: bool,
    /// Mapped resource type.
    pub res_type: ResourceType,
    /// Mapped resource identity.
    #[serde(rename = "resourceID")]
    pub res_id: PlatformId,
    /// Mapped resource name.
    pub res_name: String,
    /// Label identity.
    #[serde(rename = "labelID")]
    pub label_id: PlatformId,
    /// Label name.
    pub label_name: String,
}

/// Builds the diff of a package bucket against its platform match.
///
/// Without a match the old side is empty.
#[must_use]
pub fn diff_bucket(bucket: &Bucket, platform: Option<&PlatformBucket>) -> DiffBucket {
    DiffBucket {
        id: bucket.id(),
        name: bucket.name.clone(),
        old_desc: platform.map(|p| p.description.clone()).unwrap_or_default(),
        new_desc: bucket.description.clone(),
        old_retention: platform.map(|p| p.retention_period).unwrap_or_default(),
        new_retention: bucket.retention_period,
    }
}

/// Builds the diff of a package label against its platform match.
///
/// Old values are read from the platform label's properties.
#[must_use]
pub fn diff_label(label: &Label, platform: Option<&PlatformLabel>) -> DiffLabel {
    DiffLabel {
        id: label.id(),
        name: label.name.clone(),
        old_color: platform
            .map(|p| p.property(PROPERTY_COLOR).to_string())
            .unwrap_or_default(),
        new_color: label.color.clone(),
        old_desc: platform
            .map(|p| p.property(PROPERTY_DESCRIPTION).to_string())
            .unwrap_or_default(),
        new_desc: label.description.clone(),
    }
}

impl Diff {
    /// Returns true if applying the package would change anything.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.buckets.iter().any(DiffBucket::has_changes)
            || self.labels.iter().any(DiffLabel::has_changes)
            || self.label_mappings.iter().any(|m| m.is_new)
    }

    /// Returns true if the diff holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.labels.is_empty() && self.label_mappings.is_empty()
    }
}

impl DiffBucket {
    /// Returns true if the bucket is going to be new to the platform.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_zero()
    }

    /// Returns true if the bucket is new or any attribute differs.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.is_new() || self.old_desc != self.new_desc || self.old_retention != self.new_retention
    }
}

impl DiffLabel {
    /// Returns true if the label is going to be new to the platform.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_zero()
    }

    /// Returns true if the label is new or any attribute differs.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.is_new() || self.old_color != self.new_color || self.old_desc != self.new_desc
    }
}

impl fmt::Display for DiffBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_new() {
            write!(f, "bucket {}: new", self.name)
        } else {
            write!(f, "bucket {} ({})", self.name, self.id)
        }
    }
}

impl fmt::Display for DiffLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_new() {
            write!(f, "label {}: new", self.name)
        } else {
            write!(f, "label {} ({})", self.name, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_diff_new_bucket() {
        let bucket = Bucket::new("b1")
            .with_description("d1")
            .with_retention(Duration::from_secs(3600));

        let diff = diff_bucket(&bucket, None);

        assert_eq!(diff.id, PlatformId::ZERO);
        assert_eq!(diff.name, "b1");
        assert_eq!(diff.old_desc, "");
        assert_eq!(diff.new_desc, "d1");
        assert_eq!(diff.old_retention, Duration::ZERO);
        assert_eq!(diff.new_retention, Duration::from_secs(3600));
        assert!(diff.is_new());
    }

    #[test]
    fn test_diff_existing_bucket() {
        let platform = PlatformBucket {
            id: PlatformId::new(42),
            name: String::from("b1"),
            description: String::from("old"),
            retention_period: Duration::from_secs(24 * 3600),
            ..PlatformBucket::default()
        };
        let mut bucket = Bucket::new("b1")
            .with_description("new")
            .with_retention(Duration::from_secs(3600));
        bucket.set_existing(Some(platform.clone()));

        let diff = diff_bucket(&bucket, Some(&platform));

        assert_eq!(diff.id, PlatformId::new(42));
        assert_eq!(diff.old_desc, "old");
        assert_eq!(diff.new_desc, "new");
        assert_eq!(diff.old_retention, Duration::from_secs(24 * 3600));
        assert_eq!(diff.new_retention, Duration::from_secs(3600));
        assert!(!diff.is_new());
        assert!(diff.has_changes());
    }

    #[test]
    fn test_diff_reports_both_sides_when_equal() {
        let platform = PlatformBucket {
            id: PlatformId::new(42),
            name: String::from("b1"),
            description: String::from("same"),
            ..PlatformBucket::default()
        };
        let mut bucket = Bucket::new("b1").with_description("same");
        bucket.set_existing(Some(platform.clone()));

        let diff = diff_bucket(&bucket, Some(&platform));

        assert_eq!(diff.old_desc, "same");
        assert_eq!(diff.new_desc, "same");
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_diff_label_reads_properties() {
        let platform = PlatformLabel {
            id: PlatformId::new(7),
            name: String::from("l1"),
            properties: BTreeMap::from([(String::from("color"), String::from("#fff"))]),
            ..PlatformLabel::default()
        };
        let mut label = Label::new("l1").with_color("#eee").with_description("desc");
        label.set_existing(Some(platform.clone()));

        let diff = diff_label(&label, Some(&platform));

        assert_eq!(diff.id, PlatformId::new(7));
        assert_eq!(diff.old_color, "#fff");
        assert_eq!(diff.new_color, "#eee");
        assert_eq!(diff.old_desc, "");
        assert_eq!(diff.new_desc, "desc");
        assert!(!diff.is_new());
    }

    #[test]
    fn test_diff_new_label() {
        let label = Label::new("l1").with_color("#eee");
        let diff = diff_label(&label, None);

        assert!(diff.is_new());
        assert_eq!(diff.old_color, "");
        assert_eq!(diff.to_string(), "label l1: new");
    }

    #[test]
    fn test_diff_has_changes_from_mapping() {
        let diff = Diff {
            label_mappings: vec![DiffLabelMapping {
                is_new: true,
                res_type: ResourceType::Buckets,
                res_id: PlatformId::new(1),
                res_name: String::from("b1"),
                label_id: PlatformId::new(2),
                label_name: String::from("l1"),
            }],
            ..Diff::default()
        };

        assert!(!diff.is_empty());
        assert!(diff.has_changes());
        assert!(!Diff::default().has_changes());
    }
}
