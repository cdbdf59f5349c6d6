//! Resolved package model.
//!
//! This module holds the desired resources of a loaded package:
//! - Buckets and labels with their identity resolution
//! - The per-label association index
//!
//! A [`Pkg`] owns all of its resources; associations refer to them through
//! typed handles ([`BucketRef`], [`LabelRef`]).

mod association;
mod resource;

pub use association::{
    AssociatedResource, AssociationEntry, AssociationKey, LabelAssociationIndex,
};
pub use resource::{Bucket, BucketRef, Identified, Label, LabelRef};

use crate::package::Metadata;

/// A loaded package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pkg {
    /// Package metadata.
    pub metadata: Metadata,
    /// Desired buckets, in declaration order.
    buckets: Vec<Bucket>,
    /// Desired labels, in declaration order.
    labels: Vec<Label>,
}

impl Pkg {
    /// Creates an empty package.
    #[must_use]
    pub const fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            buckets: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Adds a bucket and returns its handle.
    pub fn add_bucket(&mut self, bucket: Bucket) -> BucketRef {
        self.buckets.push(bucket);
        BucketRef(self.buckets.len() - 1)
    }

    /// Adds a label and returns its handle.
    pub fn add_label(&mut self, label: Label) -> LabelRef {
        self.labels.push(label);
        LabelRef(self.labels.len() - 1)
    }

    /// Gets a bucket by handle.
    #[must_use]
    pub fn bucket(&self, bucket: BucketRef) -> Option<&Bucket> {
        self.buckets.get(bucket.0)
    }

    /// Gets a mutable bucket by handle.
    pub fn bucket_mut(&mut self, bucket: BucketRef) -> Option<&mut Bucket> {
        self.buckets.get_mut(bucket.0)
    }

    /// Gets a label by handle.
    #[must_use]
    pub fn label(&self, label: LabelRef) -> Option<&Label> {
        self.labels.get(label.0)
    }

    /// Gets a mutable label by handle.
    pub fn label_mut(&mut self, label: LabelRef) -> Option<&mut Label> {
        self.labels.get_mut(label.0)
    }

    /// Finds a bucket handle by name.
    #[must_use]
    pub fn find_bucket(&self, name: &str) -> Option<BucketRef> {
        self.buckets.iter().position(|b| b.name == name).map(BucketRef)
    }

    /// Finds a label handle by name.
    #[must_use]
    pub fn find_label(&self, name: &str) -> Option<LabelRef> {
        self.labels.iter().position(|l| l.name == name).map(LabelRef)
    }

    /// Returns all buckets with their handles.
    pub fn buckets(&self) -> impl Iterator<Item = (BucketRef, &Bucket)> {
        self.buckets.iter().enumerate().map(|(i, b)| (BucketRef(i), b))
    }

    /// Returns all labels with their handles.
    pub fn labels(&self) -> impl Iterator<Item = (LabelRef, &Label)> {
        self.labels.iter().enumerate().map(|(i, l)| (LabelRef(i), l))
    }

    /// Returns the labels whose association index currently maps `bucket`.
    pub fn labels_for_bucket(&self, bucket: BucketRef) -> impl Iterator<Item = &Label> {
        self.labels
            .iter()
            .filter(move |l| l.associations().maps_bucket(bucket))
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}
