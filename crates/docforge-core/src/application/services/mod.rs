//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a docs tree" or "validate ledgers".

pub mod bundle_service;
pub mod package_service;
pub mod scaffold_service;
pub mod template_service;
pub mod validation_service;

pub use bundle_service::{BundleOptions, BundleService};
pub use package_service::{PackageOptions, PackageService};
pub use scaffold_service::{OverviewChoice, ScaffoldReport, ScaffoldRequest, ScaffoldService};
pub use template_service::{FolderSummary, TemplateService};
pub use validation_service::ValidationService;
