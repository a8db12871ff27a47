//! Docforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for docforge, a
//! documentation scaffolding toolkit, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           docforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Scaffold, Validation, Bundle, Package)│
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TemplateStore, Filesystem, Schemas...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     docforge-adapters (Infrastructure)  │
//! │ (EmbeddedTemplateStore, LocalFilesystem)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (CollisionPolicy, WritePlan, Ledger...) │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use docforge_core::prelude::*;
//! # fn demo(store: Box<dyn TemplateStore>, filesystem: Box<dyn Filesystem>) -> DocforgeResult<()> {
//! let service = ScaffoldService::new(store, filesystem);
//!
//! let mut request = ScaffoldRequest::new("/work/app/docs/ai", "/work/app", chrono::Utc::now());
//! request.on_collision = CollisionPolicy::Skip;
//! request.placeholders = Placeholders::new().with_project_name("Acme");
//!
//! let report = service.scaffold(&request)?;
//! println!("{} files written", report.written_count());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BundleOptions, BundleService, OverviewChoice, PackageOptions, PackageService,
        ScaffoldReport, ScaffoldRequest, ScaffoldService, TemplateService, ValidationService,
        ports::{
            Archiver, DocumentLocator, Filesystem, SchemaSource, SchemaValidator, SourceTree,
            TemplateRenderer, TemplateStore,
        },
    };
    pub use crate::domain::{
        CollisionPolicy, InitReceipt, Placeholders, RelativePath, SeedKind, SeedTarget,
        ValidationReport, ValidationRule, WriteAction, WritePlan,
    };
    pub use crate::error::{DocforgeError, DocforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
