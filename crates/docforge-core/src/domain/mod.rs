//! Core domain layer for docforge.
//!
//! This module contains pure logic only. All I/O, template lookup, schema
//! loading and rendering concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! - **No I/O**: no filesystem, network, or external calls
//! - **Serde-shaped records**: ledgers, receipts and bundle configs are plain data
//! - **Invariants at construction**: `RelativePath`, `CollisionPolicy`, `ValidationRule`

pub mod artifacts;
pub mod bundle;
pub mod collision;
pub mod common;
pub mod error;
pub mod front_matter;
pub mod ledger;
pub mod merge;
pub mod package;
pub mod placeholders;
pub mod plan;
pub mod seed;
pub mod validation;

pub use bundle::{
    BundleConfig, BundleItem, BundleReport, BundleTargets, GithubReport, GithubSection,
    VscodeReport, VscodeSection,
};
pub use collision::{CollisionPolicy, WriteAction};
pub use common::{RelativePath, relative_display};
pub use error::{DomainError, ErrorCategory};
pub use ledger::{InitReceipt, Ledger, LedgerEntry};
pub use package::{ArchiveLocation, PackageReport};
pub use placeholders::Placeholders;
pub use plan::{WritePlan, WritePlanEntry, WriteScope};
pub use seed::{SeedKind, SeedTarget};
pub use validation::{
    DocumentOutcome, DocumentReport, ValidationIssue, ValidationReport, ValidationRule,
};
