//! Summary records describing the fully resolved package.
//!
//! A summary is the display-ready view of every resource a package has or
//! will create, including label associations.

use serde::Serialize;

use crate::pkg::{BucketRef, Identified, Label, Pkg};
use crate::platform::{LabelMapping, PlatformBucket, PlatformLabel};

/// All resources that have been or will be created from a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Bucket summaries.
    pub buckets: Vec<SummaryBucket>,
    /// Label summaries.
    pub labels: Vec<SummaryLabel>,
    /// Label mapping summaries.
    pub label_mappings: Vec<SummaryLabelMapping>,
}

/// Summary of a package bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryBucket {
    /// The resolved bucket.
    #[serde(flatten)]
    pub bucket: PlatformBucket,
    /// Labels associated with the bucket.
    pub associations: Vec<PlatformLabel>,
}

/// Summary of a package label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLabel {
    /// The resolved label.
    #[serde(flatten)]
    pub label: PlatformLabel,
}

/// Summary of a label mapped to a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLabelMapping {
    #[serde(skip)]
    exists: bool,
    /// Name of the mapped resource.
    pub resource_name: String,
    /// Name of the label.
    pub label_name: String,
    /// The resolved mapping.
    #[serde(flatten)]
    pub mapping: LabelMapping,
}

impl SummaryLabelMapping {
    /// Returns true if the mapping already exists on the platform.
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }
}

/// Summarizes a bucket with every label currently mapping it.
///
/// Labels appear in package order; each carries both `color` and
/// `description` properties.
#[must_use]
pub fn summarize_bucket(pkg: &Pkg, bucket: BucketRef) -> Option<SummaryBucket> {
    let b = pkg.bucket(bucket)?;

    let associations = pkg
        .labels_for_bucket(bucket)
        .map(|l| summarize_label(l).label)
        .collect();

    Some(SummaryBucket {
        bucket: PlatformBucket {
            id: b.id(),
            org_id: b.org_id,
            name: b.name.clone(),
            description: b.description.clone(),
            retention_period: b.retention_period,
        },
        associations,
    })
}

/// Summarizes a label.
#[must_use]
pub fn summarize_label(label: &Label) -> SummaryLabel {
    SummaryLabel {
        label: PlatformLabel {
            id: label.id(),
            org_id: label.org_id,
            name: label.name.clone(),
            properties: label.properties(),
        },
    }
}

/// Produces one mapping summary per entry of the label's association index.
///
/// The existence flag is preserved and the resource identity is resolved
/// through the index, so unsupported kinds surface with a zero ID.
#[must_use]
pub fn summarize_label_mappings(pkg: &Pkg, label: &Label) -> Vec<SummaryLabelMapping> {
    let label_id = label.id();
    let index = label.associations();

    index
        .iter()
        .map(|(key, entry)| SummaryLabelMapping {
            exists: entry.exists,
            resource_name: key.name.clone(),
            label_name: label.name.clone(),
            mapping: LabelMapping {
                label_id,
                resource_id: index.resolve_associated_id(pkg, key.kind, &key.name),
                resource_type: key.kind,
            },
        })
        .collect()
}

/// Summarizes the whole package.
///
/// Label mappings are sorted by resource name, then label name.
#[must_use]
pub fn summarize(pkg: &Pkg) -> Summary {
    let buckets = pkg
        .buckets()
        .filter_map(|(bucket, _)| summarize_bucket(pkg, bucket))
        .collect();

    let labels = pkg.labels().map(|(_, l)| summarize_label(l)).collect();

    let mut label_mappings: Vec<SummaryLabelMapping> = pkg
        .labels()
        .flat_map(|(_, l)| summarize_label_mappings(pkg, l))
        .collect();
    label_mappings.sort_by(|a, b| {
        a.resource_name
            .cmp(&b.resource_name)
            .then_with(|| a.label_name.cmp(&b.label_name))
    });

    Summary {
        buckets,
        labels,
        label_mappings,
    }
}
