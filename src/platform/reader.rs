//! Platform reader trait definition.
//!
//! This module defines the lookup interface the resolver uses to find the
//! platform counterparts of package resources.

use async_trait::async_trait;

use crate::error::Result;
use super::types::{PlatformBucket, PlatformId, PlatformLabel, ResourceType};

/// Trait for platform state backends.
#[async_trait]
pub trait PlatformReader: Send + Sync {
    /// Finds a bucket by name within an organization.
    ///
    /// Returns `None` if the bucket does not exist yet.
    async fn find_bucket(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformBucket>>;

    /// Finds a label by name within an organization.
    ///
    /// Returns `None` if the label does not exist yet.
    async fn find_label(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformLabel>>;

    /// Lists the labels currently mapped to a resource.
    async fn find_resource_labels(
        &self,
        resource_type: ResourceType,
        resource_id: PlatformId,
    ) -> Result<Vec<PlatformLabel>>;

    /// Gets the backend type name.
    fn backend_type(&self) -> &'static str;
}

#[async_trait]
impl PlatformReader for Box<dyn PlatformReader> {
    async fn find_bucket(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformBucket>> {
        (**self).find_bucket(org_id, name).await
    }

    async fn find_label(&self, org_id: PlatformId, name: &str) -> Result<Option<PlatformLabel>> {
        (**self).find_label(org_id, name).await
    }

    async fn find_resource_labels(
        &self,
        resource_type: ResourceType,
        resource_id: PlatformId,
    ) -> Result<Vec<PlatformLabel>> {
        (**self).find_resource_labels(resource_type, resource_id).await
    }

    fn backend_type(&self) -> &'static str {
        (**self).backend_type()
    }
}
