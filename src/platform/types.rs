//! Platform data types.
//!
//! These types mirror the records the platform stores for buckets, labels and
//! the mappings between them. They are the "observed" side of every diff.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::PlatformError;

/// Label property holding the display color.
pub const PROPERTY_COLOR: &str = "color";

/// Label property holding the description.
pub const PROPERTY_DESCRIPTION: &str = "description";

/// A platform-assigned identifier.
///
/// The zero value is the "no identity yet" sentinel carried by resources
/// that have not been created on the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(u64);

impl PlatformId {
    /// The "no identity" sentinel.
    pub const ZERO: Self = Self(0);

    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true if this is the zero sentinel.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for PlatformId {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 16 {
            return Err(PlatformError::InvalidId {
                value: s.to_string(),
                reason: format!("expected 16 hex characters, found {}", s.len()),
            });
        }

        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| PlatformError::InvalidId {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<u64> for PlatformId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl Serialize for PlatformId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Kinds of resources known to the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Storage buckets.
    Buckets,
    /// Labels.
    Labels,
    /// Dashboards.
    Dashboards,
    /// Telegraf agent configurations.
    Telegrafs,
    /// Query variables.
    Variables,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buckets => "buckets",
            Self::Labels => "labels",
            Self::Dashboards => "dashboards",
            Self::Telegrafs => "telegrafs",
            Self::Variables => "variables",
        };
        write!(f, "{s}")
    }
}

/// A bucket as stored on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBucket {
    /// Bucket ID.
    pub id: PlatformId,
    /// Owning organization.
    #[serde(rename = "orgID", default)]
    pub org_id: PlatformId,
    /// Bucket name.
    pub name: String,
    /// Bucket description.
    #[serde(default)]
    pub description: String,
    /// Retention period (zero means infinite).
    #[serde(default, with = "duration_secs")]
    pub retention_period: Duration,
}

/// A label as stored on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLabel {
    /// Label ID.
    pub id: PlatformId,
    /// Owning organization.
    #[serde(rename = "orgID", default)]
    pub org_id: PlatformId,
    /// Label name.
    pub name: String,
    /// Free-form label properties (`color`, `description`, ...).
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl PlatformLabel {
    /// Returns a property value, or an empty string if unset.
    #[must_use]
    pub fn property(&self, key: &str) -> &str {
        self.properties.get(key).map_or("", String::as_str)
    }
}

/// A mapping between a label and a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMapping {
    /// Label ID.
    #[serde(rename = "labelID")]
    pub label_id: PlatformId,
    /// Mapped resource ID.
    #[serde(rename = "resourceID")]
    pub resource_id: PlatformId,
    /// Mapped resource type.
    pub resource_type: ResourceType,
}

/// Serializes a [`Duration`] as whole seconds.
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
