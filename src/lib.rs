// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # pkger
//!
//! Identity resolution, diff and summary model for declarative resource
//! packages on a multi-tenant platform.
//!
//! ## Overview
//!
//! A package describes desired buckets, labels and the associations between
//! them. pkger compares a package against the platform's current state and
//! produces:
//!
//! - a [`Diff`](planner::Diff) showing what applying the package would change
//! - a [`Summary`](planner::Summary) showing the fully resolved result
//!
//! ## Identity
//!
//! Every package resource is either new (no platform identity yet) or
//! matched to an existing platform record. When matched, the platform
//! record's identity always wins; otherwise the resource reports the zero
//! sentinel and is treated as new.
//!
//! ## Modules
//!
//! - [`package`]: Package document parsing
//! - [`pkg`]: Loaded package model and label association index
//! - [`platform`]: Platform data types and lookup backends
//! - [`planner`]: Diff and summary builders, platform resolver
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! apiVersion: 0.1.0
//! kind: Package
//! meta:
//!   pkgName: pkg_name
//!   pkgVersion: "1"
//! spec:
//!   resources:
//!     - kind: Label
//!       name: label_1
//!       color: "#eee"
//!     - kind: Bucket
//!       name: rucket_1
//!       retention_period: 1h
//!       associations:
//!         - kind: Label
//!           name: label_1
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod error;
pub mod package;
pub mod pkg;
pub mod planner;
pub mod platform;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use error::{PkgerError, Result};
pub use package::{Metadata, PackageParser};
pub use pkg::{Bucket, Identified, Label, LabelAssociationIndex, Pkg};
pub use planner::{Diff, Resolver, Summary};
pub use platform::{PlatformId, PlatformReader, ResourceType, SnapshotPlatform};
