//! Package parser for loading package documents.
//!
//! This module loads package files (YAML or JSON), applies environment
//! overrides and converts the document into a [`Pkg`] with its label
//! associations built.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PackageError, Result};
use crate::pkg::{Bucket, Label, Pkg};
use crate::platform::PlatformId;

use super::spec::{PackageDocument, ResourceSpec};

/// Environment variable overriding the owning organization.
pub const ENV_ORG_ID: &str = "PKGER_ORG_ID";

/// Package parser.
#[derive(Debug, Default)]
pub struct PackageParser {
    /// Organization that owns the package's resources.
    org_id: PlatformId,
}

impl PackageParser {
    /// Creates a new package parser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            org_id: PlatformId::ZERO,
        }
    }

    /// Sets the owning organization.
    #[must_use]
    pub const fn with_org_id(mut self, org_id: PlatformId) -> Self {
        self.org_id = org_id;
        self
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn org_id(&self) -> PlatformId {
        self.org_id
    }

    /// Applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if `PKGER_ORG_ID` is set but is not a valid ID.
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var(ENV_ORG_ID) {
            debug!("Overriding org ID from environment");
            self.org_id = raw.parse()?;
        }
        Ok(self)
    }

    /// Loads a package from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or converted.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Pkg> {
        let path = path.as_ref();
        info!("Loading package from: {}", path.display());

        if !path.exists() {
            return Err(PackageError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| PackageError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document = if is_json {
            Self::parse_json(&content, Some(path))?
        } else {
            Self::parse_yaml(&content, Some(path))?
        };

        self.build(document)
    }

    /// Loads a package from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or cannot be converted.
    pub fn load_yaml(&self, content: &str) -> Result<Pkg> {
        self.build(Self::parse_yaml(content, None)?)
    }

    /// Loads a package from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or cannot be converted.
    pub fn load_json(&self, content: &str) -> Result<Pkg> {
        self.build(Self::parse_json(content, None)?)
    }

    /// Parses a YAML package document.
    fn parse_yaml(content: &str, source: Option<&Path>) -> Result<PackageDocument> {
        debug!("Parsing YAML package");
        serde_yaml::from_str(content).map_err(|e| {
            PackageError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
            .into()
        })
    }

    /// Parses a JSON package document.
    fn parse_json(content: &str, source: Option<&Path>) -> Result<PackageDocument> {
        debug!("Parsing JSON package");
        serde_json::from_str(content).map_err(|e| {
            PackageError::ParseError {
                message: format!("JSON parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
            .into()
        })
    }

    /// Converts a document into a package.
    ///
    /// Labels are added before buckets so bucket associations can refer to
    /// labels declared anywhere in the document.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate names, undeclared or unsupported
    /// associations and malformed retention periods.
    pub fn build(&self, document: PackageDocument) -> Result<Pkg> {
        let mut pkg = Pkg::new(document.meta);

        let mut seen = HashSet::new();
        for resource in &document.spec.resources {
            if let ResourceSpec::Label(spec) = resource {
                if !seen.insert(spec.name.as_str()) {
                    return Err(PackageError::DuplicateName {
                        kind: String::from("label"),
                        name: spec.name.clone(),
                    }
                    .into());
                }
                pkg.add_label(
                    Label::new(&spec.name)
                        .with_org_id(self.org_id)
                        .with_color(&spec.color)
                        .with_description(&spec.description),
                );
            }
        }

        seen.clear();
        for resource in &document.spec.resources {
            let ResourceSpec::Bucket(spec) = resource else {
                continue;
            };
            if !seen.insert(spec.name.as_str()) {
                return Err(PackageError::DuplicateName {
                    kind: String::from("bucket"),
                    name: spec.name.clone(),
                }
                .into());
            }

            let retention = spec.retention().map_err(|value| PackageError::InvalidRetention {
                bucket: spec.name.clone(),
                value,
            })?;
            let bucket_ref = pkg.add_bucket(
                Bucket::new(&spec.name)
                    .with_org_id(self.org_id)
                    .with_description(&spec.description)
                    .with_retention(retention),
            );

            for assoc in &spec.associations {
                if !assoc.is_label() {
                    return Err(PackageError::UnsupportedAssociation {
                        resource: String::from("bucket"),
                        name: spec.name.clone(),
                        kind: assoc.kind.clone(),
                    }
                    .into());
                }

                let label = pkg.find_label(&assoc.name).and_then(|l| pkg.label_mut(l));
                match label {
                    Some(label) => label.set_bucket_mapping(bucket_ref, &spec.name, false),
                    None => {
                        return Err(PackageError::UnknownAssociation {
                            resource: String::from("bucket"),
                            name: spec.name.clone(),
                            kind: String::from("label"),
                            target: assoc.name.clone(),
                        }
                        .into());
                    }
                }
            }
        }

        debug!(
            "Built package '{}' with {} buckets and {} labels",
            pkg.metadata.name,
            pkg.bucket_count(),
            pkg.label_count()
        );
        Ok(pkg)
    }
}
