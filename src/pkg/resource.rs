//! Desired package resources and their identity.
//!
//! A resource either carries the platform record it was matched against, or
//! only a local placeholder identity. The platform record always wins.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::platform::{
    PlatformBucket, PlatformId, PlatformLabel, ResourceType, PROPERTY_COLOR, PROPERTY_DESCRIPTION,
};

use super::association::{AssociatedResource, LabelAssociationIndex};

/// Identity resolution shared by every package resource.
pub trait Identified {
    /// The locally assigned placeholder identity.
    fn placeholder_id(&self) -> PlatformId;

    /// The identity of the matched platform counterpart, if any.
    fn existing_id(&self) -> Option<PlatformId>;

    /// Returns the effective identity.
    ///
    /// The counterpart's identity is returned whenever one is present, even
    /// if the placeholder is non-zero.
    fn id(&self) -> PlatformId {
        self.existing_id().unwrap_or_else(|| self.placeholder_id())
    }

    /// Returns true if the resource is going to be new to the platform.
    fn is_new(&self) -> bool {
        self.id().is_zero()
    }
}

/// Handle to a bucket owned by a [`Pkg`](super::Pkg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketRef(pub(crate) usize);

/// Handle to a label owned by a [`Pkg`](super::Pkg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelRef(pub(crate) usize);

/// A desired bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    /// Placeholder identity, zero until the platform assigns one.
    id: PlatformId,
    /// Owning organization.
    pub org_id: PlatformId,
    /// Bucket name, also the match key against the platform.
    pub name: String,
    /// Desired description.
    pub description: String,
    /// Desired retention period (zero means infinite).
    pub retention_period: Duration,
    /// The platform bucket this resource was matched to.
    existing: Option<PlatformBucket>,
}

impl Bucket {
    /// Creates a new bucket with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the retention period.
    #[must_use]
    pub const fn with_retention(mut self, retention: Duration) -> Self {
        self.retention_period = retention;
        self
    }

    /// Sets the owning organization.
    #[must_use]
    pub const fn with_org_id(mut self, org_id: PlatformId) -> Self {
        self.org_id = org_id;
        self
    }

    /// Sets the placeholder identity.
    #[must_use]
    pub const fn with_placeholder_id(mut self, id: PlatformId) -> Self {
        self.id = id;
        self
    }

    /// Records (or clears) the matched platform counterpart.
    pub fn set_existing(&mut self, existing: Option<PlatformBucket>) {
        self.existing = existing;
    }

    /// Returns the matched platform counterpart.
    #[must_use]
    pub const fn existing(&self) -> Option<&PlatformBucket> {
        self.existing.as_ref()
    }
}

impl Identified for Bucket {
    fn placeholder_id(&self) -> PlatformId {
        self.id
    }

    fn existing_id(&self) -> Option<PlatformId> {
        self.existing.as_ref().map(|b| b.id)
    }
}

/// A desired label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    /// Placeholder identity, zero until the platform assigns one.
    id: PlatformId,
    /// Owning organization.
    pub org_id: PlatformId,
    /// Label name, also the match key against the platform.
    pub name: String,
    /// Desired display color.
    pub color: String,
    /// Desired description.
    pub description: String,
    /// Resources this label is associated with.
    associations: LabelAssociationIndex,
    /// The platform label this resource was matched to.
    existing: Option<PlatformLabel>,
}

impl Label {
    /// Creates a new label with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the owning organization.
    #[must_use]
    pub const fn with_org_id(mut self, org_id: PlatformId) -> Self {
        self.org_id = org_id;
        self
    }

    /// Sets the placeholder identity.
    #[must_use]
    pub const fn with_placeholder_id(mut self, id: PlatformId) -> Self {
        self.id = id;
        self
    }

    /// Records (or clears) the matched platform counterpart.
    pub fn set_existing(&mut self, existing: Option<PlatformLabel>) {
        self.existing = existing;
    }

    /// Returns the matched platform counterpart.
    #[must_use]
    pub const fn existing(&self) -> Option<&PlatformLabel> {
        self.existing.as_ref()
    }

    /// Returns the label's property map.
    ///
    /// Both `color` and `description` are always present.
    #[must_use]
    pub fn properties(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (PROPERTY_COLOR.to_string(), self.color.clone()),
            (PROPERTY_DESCRIPTION.to_string(), self.description.clone()),
        ])
    }

    /// Returns the association index.
    #[must_use]
    pub const fn associations(&self) -> &LabelAssociationIndex {
        &self.associations
    }

    /// Inserts or replaces the association at `(kind, name)`.
    pub fn set_association(
        &mut self,
        kind: ResourceType,
        name: impl Into<String>,
        resource: AssociatedResource,
        exists: bool,
    ) {
        self.associations.set(kind, name, resource, exists);
    }

    /// Associates this label with a bucket.
    pub fn set_bucket_mapping(&mut self, bucket: BucketRef, bucket_name: &str, exists: bool) {
        self.set_association(
            ResourceType::Buckets,
            bucket_name,
            AssociatedResource::Bucket(bucket),
            exists,
        );
    }
}

impl Identified for Label {
    fn placeholder_id(&self) -> PlatformId {
        self.id
    }

    fn existing_id(&self) -> Option<PlatformId> {
        self.existing.as_ref().map(|l| l.id)
    }
}
