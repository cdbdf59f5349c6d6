//! Platform state module.
//!
//! This module provides the platform's data model and the lookup interface
//! used to find existing counterparts of package resources.

mod types;
mod reader;
mod snapshot;

pub(crate) use types::duration_secs;
pub use types::{
    LabelMapping, PlatformBucket, PlatformId, PlatformLabel, ResourceType, PROPERTY_COLOR,
    PROPERTY_DESCRIPTION,
};
pub use reader::PlatformReader;
pub use snapshot::{PlatformSnapshot, SnapshotPlatform};
