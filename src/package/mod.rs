//! Package document module.
//!
//! This module handles package files:
//! - Deserializing YAML and JSON package documents
//! - Converting documents into a [`Pkg`](crate::pkg::Pkg)
//! - Environment overrides for the owning organization

mod spec;
mod parser;

pub use spec::{
    parse_retention, AssociationSpec, BucketSpec, LabelSpec, Metadata, PackageDocument,
    PackageSpec, ResourceSpec, PACKAGE_KIND,
};
pub use parser::{PackageParser, ENV_ORG_ID};
