//! Error types for the pkger package system.
//!
//! Diffing and summarizing are total over a loaded package and never fail.
//! Errors only arise at the edges: loading a package document and reading
//! platform state.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the pkger package system.
#[derive(Debug, Error)]
pub enum PkgerError {
    /// Package loading errors.
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    /// Platform state errors.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Package loading errors.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The package file was not found.
    #[error("Package file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The package document could not be parsed.
    #[error("Failed to parse package: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Two resources of the same kind share a name.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// Kind of resource (bucket, label).
        kind: String,
        /// The duplicated name.
        name: String,
    },

    /// An association names a resource the package does not declare.
    #[error("{resource} '{name}' references undeclared {kind} '{target}'")]
    UnknownAssociation {
        /// Kind of the resource holding the association.
        resource: String,
        /// Name of the resource holding the association.
        name: String,
        /// Kind of the missing target.
        kind: String,
        /// Name of the missing target.
        target: String,
    },

    /// An association targets a kind that cannot carry labels.
    #[error("Unsupported association kind '{kind}' on {resource} '{name}'")]
    UnsupportedAssociation {
        /// Kind of the resource holding the association.
        resource: String,
        /// Name of the resource holding the association.
        name: String,
        /// The unsupported kind.
        kind: String,
    },

    /// A retention period could not be parsed.
    #[error("Invalid retention period '{value}' on bucket '{bucket}'")]
    InvalidRetention {
        /// Bucket carrying the retention.
        bucket: String,
        /// The raw retention value.
        value: String,
    },
}

/// Platform state errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A platform identifier was malformed.
    #[error("Invalid platform ID '{value}': {reason}")]
    InvalidId {
        /// The raw identifier.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A platform snapshot could not be read.
    #[error("Failed to load platform snapshot from {path}: {message}")]
    SnapshotLoad {
        /// Path to the snapshot.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The platform lookup failed.
    #[error("Platform lookup failed for {resource}: {message}")]
    LookupFailed {
        /// The resource being looked up.
        resource: String,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for pkger operations.
pub type Result<T> = std::result::Result<T, PkgerError>;

impl PackageError {
    /// Creates a parse error without a source location.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }
}

impl PlatformError {
    /// Creates a lookup error for the given resource.
    #[must_use]
    pub fn lookup(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_error_converts() {
        let err: PkgerError = PackageError::parse("bad yaml").into();
        assert!(matches!(err, PkgerError::Package(PackageError::ParseError { .. })));
        assert_eq!(err.to_string(), "Package error: Failed to parse package: bad yaml");
    }

    #[test]
    fn test_unknown_association_message() {
        let err = PackageError::UnknownAssociation {
            resource: String::from("bucket"),
            name: String::from("b1"),
            kind: String::from("label"),
            target: String::from("missing"),
        };
        assert_eq!(err.to_string(), "bucket 'b1' references undeclared label 'missing'");
    }
}
