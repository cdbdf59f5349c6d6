//! Resolver matching package resources against platform state.
//!
//! The resolver looks every package resource up on the platform, records
//! the matched counterpart on the resource and builds the dry-run diff. It
//! never creates or updates anything.

use tracing::{debug, info};

use crate::error::Result;
use crate::pkg::{AssociatedResource, Identified, Pkg};
use crate::platform::{PlatformReader, ResourceType};

use super::diff::{diff_bucket, diff_label, Diff, DiffBucket, DiffLabel, DiffLabelMapping};

/// Resolves package identities against a platform reader.
pub struct Resolver<'a, R: PlatformReader> {
    /// Platform reader.
    reader: &'a R,
}

impl<'a, R: PlatformReader> Resolver<'a, R> {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Resolves the package and returns the resulting diff.
    ///
    /// Every bucket and label gets its platform counterpart recorded (or
    /// cleared). Associations between existing labels and buckets are marked
    /// as existing when the platform already maps them.
    ///
    /// # Errors
    ///
    /// Returns an error if a platform lookup fails.
    pub async fn dry_run(&self, pkg: &mut Pkg) -> Result<Diff> {
        info!(
            "Resolving package '{}' against {} platform",
            pkg.metadata.name,
            self.reader.backend_type()
        );

        let buckets = self.resolve_buckets(pkg).await?;
        let labels = self.resolve_labels(pkg).await?;
        let label_mappings = self.resolve_label_mappings(pkg).await?;

        debug!(
            "Dry run produced {} bucket, {} label and {} mapping diffs",
            buckets.len(),
            labels.len(),
            label_mappings.len()
        );

        Ok(Diff {
            buckets,
            labels,
            label_mappings,
        })
    }

    /// Matches every bucket by name and diffs it.
    async fn resolve_buckets(&self, pkg: &mut Pkg) -> Result<Vec<DiffBucket>> {
        let refs: Vec<_> = pkg.buckets().map(|(r, _)| r).collect();
        let mut diffs = Vec::with_capacity(refs.len());

        for bucket_ref in refs {
            let Some(bucket) = pkg.bucket_mut(bucket_ref) else {
                continue;
            };

            let existing = self.reader.find_bucket(bucket.org_id, &bucket.name).await?;
            if existing.is_none() {
                debug!("Bucket {} is new", bucket.name);
            }
            bucket.set_existing(existing);
            diffs.push(diff_bucket(bucket, bucket.existing()));
        }

        Ok(diffs)
    }

    /// Matches every label by name and diffs it.
    async fn resolve_labels(&self, pkg: &mut Pkg) -> Result<Vec<DiffLabel>> {
        let refs: Vec<_> = pkg.labels().map(|(r, _)| r).collect();
        let mut diffs = Vec::with_capacity(refs.len());

        for label_ref in refs {
            let Some(label) = pkg.label_mut(label_ref) else {
                continue;
            };

            let existing = self.reader.find_label(label.org_id, &label.name).await?;
            if existing.is_none() {
                debug!("Label {} is new", label.name);
            }
            label.set_existing(existing);
            diffs.push(diff_label(label, label.existing()));
        }

        Ok(diffs)
    }

    /// Determines which label associations already exist on the platform.
    ///
    /// Must run after buckets and labels are resolved.
    async fn resolve_label_mappings(&self, pkg: &mut Pkg) -> Result<Vec<DiffLabelMapping>> {
        let mut mappings = Vec::new();
        let labels: Vec<_> = pkg.labels().map(|(r, _)| r).collect();

        for label_ref in labels {
            let Some(label) = pkg.label(label_ref) else {
                continue;
            };
            let label_id = label.id();
            let label_name = label.name.clone();
            let entries: Vec<_> = label
                .associations()
                .iter()
                .map(|(key, entry)| (key.clone(), *entry))
                .collect();

            for (key, entry) in entries {
                if key.kind != ResourceType::Buckets {
                    debug!("Skipping unhandled association {}/{}", key.kind, key.name);
                    continue;
                }
                let AssociatedResource::Bucket(bucket_ref) = entry.resource;
                let Some(bucket) = pkg.bucket(bucket_ref) else {
                    continue;
                };

                let bucket_id = bucket.id();
                let mut exists = false;
                if !label_id.is_zero() && !bucket_id.is_zero() {
                    let mapped = self
                        .reader
                        .find_resource_labels(ResourceType::Buckets, bucket_id)
                        .await?;
                    exists = mapped.iter().any(|l| l.id == label_id);
                }

                if let Some(label) = pkg.label_mut(label_ref) {
                    label.set_bucket_mapping(bucket_ref, &key.name, exists);
                }

                mappings.push(DiffLabelMapping {
                    is_new: !exists,
                    res_type: ResourceType::Buckets,
                    res_id: bucket_id,
                    res_name: key.name,
                    label_id,
                    label_name: label_name.clone(),
                });
            }
        }

        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Metadata;
    use crate::pkg::{Bucket, Label};
    use crate::planner::summary::summarize;
    use crate::platform::{
        LabelMapping, PlatformBucket, PlatformId, PlatformLabel, PlatformSnapshot,
        SnapshotPlatform,
    };
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;

    mock! {
        Reader {}

        #[async_trait]
        impl PlatformReader for Reader {
            async fn find_bucket(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformBucket>>;
            async fn find_label(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformLabel>>;
            async fn find_resource_labels(
                &self,
                resource_type: ResourceType,
                resource_id: PlatformId,
            ) -> Result<Vec<PlatformLabel>>;
            fn backend_type(&self) -> &'static str;
        }
    }

    fn create_test_pkg() -> Pkg {
        let mut pkg = Pkg::new(Metadata {
            name: String::from("pkg"),
            ..Metadata::default()
        });
        let b1 = pkg.add_bucket(
            Bucket::new("b1")
                .with_description("new")
                .with_retention(Duration::from_secs(3600)),
        );
        let b2 = pkg.add_bucket(Bucket::new("b2"));
        let l1 = pkg.add_label(Label::new("l1").with_color("#eee"));
        if let Some(label) = pkg.label_mut(l1) {
            label.set_bucket_mapping(b1, "b1", false);
            label.set_bucket_mapping(b2, "b2", false);
        }
        pkg
    }

    fn create_test_platform() -> SnapshotPlatform {
        SnapshotPlatform::new(PlatformSnapshot {
            buckets: vec![PlatformBucket {
                id: PlatformId::new(42),
                name: String::from("b1"),
                description: String::from("old"),
                retention_period: Duration::from_secs(24 * 3600),
                ..PlatformBucket::default()
            }],
            labels: vec![PlatformLabel {
                id: PlatformId::new(7),
                name: String::from("l1"),
                ..PlatformLabel::default()
            }],
            mappings: vec![LabelMapping {
                label_id: PlatformId::new(7),
                resource_id: PlatformId::new(42),
                resource_type: ResourceType::Buckets,
            }],
        })
    }

    #[tokio::test]
    async fn test_dry_run_against_snapshot() {
        let platform = create_test_platform();
        let mut pkg = create_test_pkg();

        let diff = Resolver::new(&platform).dry_run(&mut pkg).await.unwrap();

        assert_eq!(diff.buckets.len(), 2);
        let b1 = &diff.buckets[0];
        assert_eq!(b1.id, PlatformId::new(42));
        assert_eq!(b1.old_desc, "old");
        assert_eq!(b1.new_desc, "new");
        assert_eq!(b1.old_retention, Duration::from_secs(24 * 3600));
        assert!(!b1.is_new());
        assert!(diff.buckets[1].is_new());

        assert_eq!(diff.labels.len(), 1);
        assert_eq!(diff.labels[0].id, PlatformId::new(7));

        assert_eq!(diff.label_mappings.len(), 2);
        let existing = diff
            .label_mappings
            .iter()
            .find(|m| m.res_name == "b1")
            .unwrap();
        assert!(!existing.is_new);
        assert_eq!(existing.res_id, PlatformId::new(42));
        assert_eq!(existing.label_id, PlatformId::new(7));
        let new = diff
            .label_mappings
            .iter()
            .find(|m| m.res_name == "b2")
            .unwrap();
        assert!(new.is_new);
        assert_eq!(new.res_id, PlatformId::ZERO);
    }

    #[tokio::test]
    async fn test_dry_run_updates_association_flags() {
        let platform = create_test_platform();
        let mut pkg = create_test_pkg();

        Resolver::new(&platform).dry_run(&mut pkg).await.unwrap();
        let summary = summarize(&pkg);

        let b1 = summary
            .label_mappings
            .iter()
            .find(|m| m.resource_name == "b1")
            .unwrap();
        assert!(b1.exists());
        assert_eq!(b1.mapping.resource_id, PlatformId::new(42));
        assert_eq!(summary.buckets[0].associations.len(), 1);
        assert_eq!(summary.buckets[0].associations[0].id, PlatformId::new(7));
    }

    #[tokio::test]
    async fn test_dry_run_skips_mapping_lookup_for_new_resources() {
        let mut reader = MockReader::new();
        reader.expect_backend_type().return_const("mock");
        reader.expect_find_bucket().returning(|_, _| Ok(None));
        reader.expect_find_label().returning(|_, _| Ok(None));
        reader.expect_find_resource_labels().never();

        let mut pkg = create_test_pkg();
        let diff = Resolver::new(&reader).dry_run(&mut pkg).await.unwrap();

        assert!(diff.buckets.iter().all(|b| b.is_new()));
        assert!(diff.labels.iter().all(|l| l.is_new()));
        assert!(diff.label_mappings.iter().all(|m| m.is_new));
    }

    #[tokio::test]
    async fn test_dry_run_skips_non_bucket_associations() {
        let mut reader = MockReader::new();
        reader.expect_backend_type().return_const("mock");
        reader.expect_find_bucket().returning(|_, name| {
            Ok(Some(PlatformBucket {
                id: PlatformId::new(42),
                name: name.to_string(),
                ..PlatformBucket::default()
            }))
        });
        reader.expect_find_label().returning(|_, name| {
            Ok(Some(PlatformLabel {
                id: PlatformId::new(7),
                name: name.to_string(),
                ..PlatformLabel::default()
            }))
        });
        reader.expect_find_resource_labels().never();

        let mut pkg = Pkg::new(Metadata::default());
        let b1 = pkg.add_bucket(Bucket::new("b1"));
        let l1 = pkg.add_label(Label::new("l1"));
        if let Some(label) = pkg.label_mut(l1) {
            label.set_association(
                ResourceType::Dashboards,
                "dash",
                AssociatedResource::Bucket(b1),
                true,
            );
        }

        let diff = Resolver::new(&reader).dry_run(&mut pkg).await.unwrap();

        assert!(diff.label_mappings.is_empty());
        let entry = pkg
            .label(l1)
            .unwrap()
            .associations()
            .get(ResourceType::Dashboards, "dash")
            .copied()
            .unwrap();
        assert!(entry.exists);
        assert_eq!(entry.resource, AssociatedResource::Bucket(b1));
    }

    #[tokio::test]
    async fn test_dry_run_propagates_reader_errors() {
        let mut reader = MockReader::new();
        reader.expect_backend_type().return_const("mock");
        reader.expect_find_bucket().returning(|_, name| {
            Err(crate::error::PlatformError::lookup(format!("bucket {name}"), "unavailable").into())
        });

        let mut pkg = create_test_pkg();
        let result = Resolver::new(&reader).dry_run(&mut pkg).await;

        assert!(matches!(result, Err(crate::error::PkgerError::Platform(_))));
    }
}
