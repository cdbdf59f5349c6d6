//! Label association index.
//!
//! Each label owns an index keyed by `(resource kind, resource name)`. An
//! entry points at the associated package resource and records whether the
//! association already exists on the platform.

use std::collections::BTreeMap;
use tracing::trace;

use crate::platform::{PlatformId, ResourceType};

use super::resource::{BucketRef, Identified};
use super::Pkg;

/// A package resource a label can be associated with.
///
/// New association targets are added as new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociatedResource {
    /// A bucket owned by the package.
    Bucket(BucketRef),
}

impl AssociatedResource {
    /// Returns the platform resource type of the referenced resource.
    #[must_use]
    pub const fn resource_type(self) -> ResourceType {
        match self {
            Self::Bucket(_) => ResourceType::Buckets,
        }
    }
}

/// Key of an association entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssociationKey {
    /// Kind of the associated resource.
    pub kind: ResourceType,
    /// Name of the associated resource.
    pub name: String,
}

/// Value of an association entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationEntry {
    /// True if the association is already recorded on the platform.
    pub exists: bool,
    /// The associated resource.
    pub resource: AssociatedResource,
}

/// Per-label index of associations, ordered by kind then name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelAssociationIndex {
    entries: BTreeMap<AssociationKey, AssociationEntry>,
}

impl LabelAssociationIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts the entry at `(kind, name)`, replacing any previous one.
    pub fn set(
        &mut self,
        kind: ResourceType,
        name: impl Into<String>,
        resource: AssociatedResource,
        exists: bool,
    ) {
        let key = AssociationKey {
            kind,
            name: name.into(),
        };
        trace!("Setting association {}/{} (exists: {exists})", key.kind, key.name);
        self.entries.insert(key, AssociationEntry { exists, resource });
    }

    /// Gets the entry at `(kind, name)`.
    #[must_use]
    pub fn get(&self, kind: ResourceType, name: &str) -> Option<&AssociationEntry> {
        self.entries.get(&AssociationKey {
            kind,
            name: name.to_string(),
        })
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssociationKey, &AssociationEntry)> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any bucket entry currently points at `bucket`.
    ///
    /// The key name is not compared: an entry re-pointed at another bucket
    /// counts for the bucket it now references.
    #[must_use]
    pub fn maps_bucket(&self, bucket: BucketRef) -> bool {
        self.entries.iter().any(|(key, entry)| {
            key.kind == ResourceType::Buckets
                && entry.resource == AssociatedResource::Bucket(bucket)
        })
    }

    /// Resolves the effective identity of the resource at `(kind, name)`.
    ///
    /// Returns [`PlatformId::ZERO`] when the key is absent or the entry's
    /// resource does not match a supported kind. A zero result therefore does
    /// not distinguish "unmapped" from "not created yet".
    #[must_use]
    pub fn resolve_associated_id(&self, pkg: &Pkg, kind: ResourceType, name: &str) -> PlatformId {
        let Some(entry) = self.get(kind, name) else {
            return PlatformId::ZERO;
        };

        match (kind, entry.resource) {
            (ResourceType::Buckets, AssociatedResource::Bucket(bucket)) => {
                pkg.bucket(bucket).map_or(PlatformId::ZERO, Identified::id)
            }
            _ => {
                trace!(
                    "Unhandled association {kind}/{name} to {}, resolving to zero",
                    entry.resource.resource_type()
                );
                PlatformId::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Metadata;
    use crate::pkg::{Bucket, Label};
    use crate::platform::PlatformBucket;

    fn create_test_pkg() -> (Pkg, BucketRef, BucketRef) {
        let mut pkg = Pkg::new(Metadata::default());
        let b1 = pkg.add_bucket(Bucket::new("b1"));
        let mut b2 = Bucket::new("b2");
        b2.set_existing(Some(PlatformBucket {
            id: PlatformId::new(42),
            name: String::from("b2"),
            ..PlatformBucket::default()
        }));
        let b2 = pkg.add_bucket(b2);
        (pkg, b1, b2)
    }

    #[test]
    fn test_set_replaces_existing_key() {
        let (pkg, b1, b2) = create_test_pkg();
        let mut label = Label::new("l");

        label.set_association(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b1), false);
        label.set_association(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b2), true);

        let index = label.associations();
        assert_eq!(index.len(), 1);
        let entry = index.get(ResourceType::Buckets, "b1").unwrap();
        assert!(entry.exists);
        assert_eq!(entry.resource, AssociatedResource::Bucket(b2));
        assert_eq!(
            index.resolve_associated_id(&pkg, ResourceType::Buckets, "b1"),
            PlatformId::new(42)
        );
    }

    #[test]
    fn test_resolve_missing_key_is_zero() {
        let (pkg, _, _) = create_test_pkg();
        let index = LabelAssociationIndex::new();

        assert!(index.is_empty());
        assert_eq!(
            index.resolve_associated_id(&pkg, ResourceType::Buckets, "b1"),
            PlatformId::ZERO
        );
    }

    #[test]
    fn test_resolve_unsupported_kind_is_zero_even_with_entry() {
        let (pkg, _, b2) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Dashboards, "b2", AssociatedResource::Bucket(b2), true);

        assert!(index.get(ResourceType::Dashboards, "b2").is_some());
        assert_eq!(
            index.resolve_associated_id(&pkg, ResourceType::Dashboards, "b2"),
            PlatformId::ZERO
        );
    }

    #[test]
    fn test_resolve_new_bucket_is_zero() {
        let (pkg, b1, _) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b1), false);

        assert_eq!(
            index.resolve_associated_id(&pkg, ResourceType::Buckets, "b1"),
            PlatformId::ZERO
        );
    }

    #[test]
    fn test_iteration_is_ordered_by_kind_then_name() {
        let (_, b1, b2) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Buckets, "zeta", AssociatedResource::Bucket(b1), false);
        index.set(ResourceType::Buckets, "alpha", AssociatedResource::Bucket(b2), false);

        let names: Vec<&str> = index.iter().map(|(k, _)| k.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_maps_bucket() {
        let (_, b1, b2) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b1), false);

        assert!(index.maps_bucket(b1));
        assert!(!index.maps_bucket(b2));
    }

    #[test]
    fn test_maps_bucket_follows_repointed_entry() {
        let (_, b1, b2) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b1), false);
        index.set(ResourceType::Buckets, "b1", AssociatedResource::Bucket(b2), true);

        assert!(!index.maps_bucket(b1));
        assert!(index.maps_bucket(b2));
    }

    #[test]
    fn test_maps_bucket_ignores_other_kinds() {
        let (_, b1, _) = create_test_pkg();
        let mut index = LabelAssociationIndex::new();
        index.set(ResourceType::Dashboards, "b1", AssociatedResource::Bucket(b1), false);

        assert!(!index.maps_bucket(b1));
    }
}
