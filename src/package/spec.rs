//! Package document types.
//!
//! This module defines the structs that map to a package file. These types
//! are a direct rendering of the document; conversion into a [`Pkg`]
//! happens in the parser.
//!
//! [`Pkg`]: crate::pkg::Pkg

use serde::{de, Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Document kind of a package file.
pub const PACKAGE_KIND: &str = "Package";

/// The root structure of a package file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageDocument {
    /// Document API version.
    #[serde(default)]
    pub api_version: String,
    /// Document kind, normally `Package`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Package metadata.
    #[serde(default)]
    pub meta: Metadata,
    /// Package contents.
    #[serde(default)]
    pub spec: PackageSpec,
}

/// Package metadata describing the user-defined identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    /// Package description.
    #[serde(default)]
    pub description: String,
    /// Package name.
    #[serde(rename = "pkgName", default)]
    pub name: String,
    /// Package version.
    #[serde(rename = "pkgVersion", default)]
    pub version: String,
}

/// Package contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSpec {
    /// Declared resources.
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

/// A single declared resource.
///
/// The `kind` tag is matched case-insensitively when reading.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum ResourceSpec {
    /// A bucket declaration.
    Bucket(BucketSpec),
    /// A label declaration.
    Label(LabelSpec),
}

impl<'de> Deserialize<'de> for ResourceSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Tagged {
            kind: String,
            #[serde(flatten)]
            body: serde_json::Value,
        }

        let tagged = Tagged::deserialize(deserializer)?;
        if tagged.kind.eq_ignore_ascii_case("bucket") {
            serde_json::from_value(tagged.body)
                .map(Self::Bucket)
                .map_err(de::Error::custom)
        } else if tagged.kind.eq_ignore_ascii_case("label") {
            serde_json::from_value(tagged.body)
                .map(Self::Label)
                .map_err(de::Error::custom)
        } else {
            Err(de::Error::unknown_variant(&tagged.kind, &["Bucket", "Label"]))
        }
    }
}

/// A bucket declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketSpec {
    /// Bucket name.
    pub name: String,
    /// Bucket description.
    #[serde(default)]
    pub description: String,
    /// Retention period such as `1h` or `1h30m`.
    #[serde(default)]
    pub retention_period: Option<String>,
    /// Labels associated with this bucket.
    #[serde(default)]
    pub associations: Vec<AssociationSpec>,
}

/// A label declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelSpec {
    /// Label name.
    pub name: String,
    /// Display color.
    #[serde(default)]
    pub color: String,
    /// Label description.
    #[serde(default)]
    pub description: String,
}

/// A reference from one resource to another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationSpec {
    /// Kind of the referenced resource.
    pub kind: String,
    /// Name of the referenced resource.
    pub name: String,
}

fn default_kind() -> String {
    String::from(PACKAGE_KIND)
}

impl AssociationSpec {
    /// Returns true if this references a label.
    #[must_use]
    pub fn is_label(&self) -> bool {
        self.kind.eq_ignore_ascii_case("label")
    }
}

impl BucketSpec {
    /// Parses the declared retention period.
    ///
    /// An absent value means infinite retention and yields zero.
    ///
    /// # Errors
    ///
    /// Returns the raw value if it is not a valid duration.
    pub fn retention(&self) -> Result<Duration, String> {
        match self.retention_period.as_deref() {
            None => Ok(Duration::ZERO),
            Some(raw) => parse_retention(raw).ok_or_else(|| raw.to_string()),
        }
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Longest fraction kept before the remaining digits are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a duration such as `1h30m`, `1.5h` or `300ms`.
///
/// The value is a sequence of decimal numbers, each with an optional
/// fraction and a required unit among `ns`,
/// `us` (or `µs`), `ms`, `s`, `m` and `h`. A leading `+` is allowed. An
/// empty string or `0` is zero. Negative values and durations past the
/// signed 64-bit nanosecond range are rejected.
#[must_use]
pub fn parse_retention(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest.is_empty() || rest == "0" {
        return Some(Duration::ZERO);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (int_part, tail) = split_digits(rest);
        let (frac_part, tail) = match tail.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", tail),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return None,
        };

        if !int_part.is_empty() {
            let value: u128 = int_part.parse().ok()?;
            total = total.checked_add(value.checked_mul(unit_nanos)?)?;
        }
        if !frac_part.is_empty() {
            let frac_part = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
            let value: u128 = frac_part.parse().ok()?;
            let scale = 10u128.checked_pow(u32::try_from(frac_part.len()).ok()?)?;
            total = total.checked_add(value.checked_mul(unit_nanos)? / scale)?;
        }
        rest = tail;
    }

    let nanos = u64::try_from(i64::try_from(total).ok()?).ok()?;
    Some(Duration::from_nanos(nanos))
}

/// Splits off the leading ASCII digits of `s`.
fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retention_units() {
        assert_eq!(parse_retention("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_retention("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_retention("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_retention("300ms"), Some(Duration::from_millis(300)));
        assert_eq!(parse_retention("2us"), Some(Duration::from_micros(2)));
        assert_eq!(parse_retention("2\u{b5}s"), Some(Duration::from_micros(2)));
        assert_eq!(parse_retention("15ns"), Some(Duration::from_nanos(15)));
        assert_eq!(parse_retention("+1m"), Some(Duration::from_secs(60)));
        assert_eq!(parse_retention("0"), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_retention_fractions() {
        assert_eq!(parse_retention("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_retention(".5s"), Some(Duration::from_millis(500)));
        assert_eq!(parse_retention("1.s"), Some(Duration::from_secs(1)));
        assert_eq!(parse_retention("1h0.5m"), Some(Duration::from_secs(3630)));
    }

    #[test]
    fn test_parse_retention_invalid() {
        assert!(parse_retention("1x").is_none());
        assert!(parse_retention("h").is_none());
        assert!(parse_retention("10").is_none());
        assert!(parse_retention("7d").is_none());
        assert!(parse_retention(".s").is_none());
        assert!(parse_retention("-1h").is_none());
        assert!(parse_retention("3000000h").is_none());
    }

    #[test]
    fn test_resource_kind_case_insensitive() {
        let yaml = "kind: bUcKeT\nname: b1\nretention_period: 1h\n";
        let spec: ResourceSpec = serde_yaml::from_str(yaml).unwrap();
        match spec {
            ResourceSpec::Bucket(bucket) => {
                assert_eq!(bucket.name, "b1");
                assert_eq!(bucket.retention_period.as_deref(), Some("1h"));
            }
            ResourceSpec::Label(_) => panic!("expected bucket"),
        }

        let json = r##"{"kind": "LaBeL", "name": "l1", "color": "#eee"}"##;
        let spec: ResourceSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec, ResourceSpec::Label(ref l) if l.color == "#eee"));
    }

    #[test]
    fn test_resource_kind_unknown_rejected() {
        let err = serde_json::from_str::<ResourceSpec>(r#"{"kind": "Dashboard", "name": "d"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Dashboard"));
    }

    #[test]
    fn test_bucket_retention_absent_is_zero() {
        let spec = BucketSpec {
            name: String::from("b1"),
            ..BucketSpec::default()
        };
        assert_eq!(spec.retention(), Ok(Duration::ZERO));
    }

    #[test]
    fn test_association_kind_case_insensitive() {
        let assoc = AssociationSpec {
            kind: String::from("LABEL"),
            name: String::from("l1"),
        };
        assert!(assoc.is_label());
    }
}
