//! Package dependency resolution and project schema building
//!
//! Given the packages a project places in its Plugins and Assets buckets,
//! [`SchemaResolver`] discovers every transitively referenced package,
//! computes dependency closures, rejects cycles, and runs a fixed-point
//! classification that decides each package's final placement and whether it
//! is built as its own project. The result is an immutable [`ProjectSchema`]
//! that drives directory linking and IDE project generation.
//!
//! # Architecture
//!
//! ```text
//!            ProjectSchemaLoader
//!                    |
//!              SchemaResolver
//!        +-----------+------------+
//!        |           |            |
//!   FileSystem  PackageConfig  ExternalProject
//!    (prj-fs)   Reader         Bridge (csproj)
//!              (prj-config)
//! ```
//!
//! Resolution walks `Discovering -> ClosureComputing -> Classifying ->
//! Validating` and either returns a complete schema or an [`Error`]; no
//! partial schema is ever produced.
//!
//! # Example
//!
//! ```ignore
//! use prj_config::Platform;
//! use prj_schema::ProjectSchemaLoader;
//!
//! let loader = ProjectSchemaLoader::new("/work/UnityProjects");
//! let schema = loader.load_schema("Demo", Platform::Windows)?;
//! for link in schema.link_plan() {
//!     println!("{} -> {}", link.source_dir, link.route.relative_dir());
//! }
//! ```

pub mod bridge;
pub mod classify;
pub mod closure;
mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod patterns;
pub mod plan;
pub mod resolver;
pub mod schema;
pub mod tree;

pub use bridge::{CsProjBridge, ExternalProject, ExternalProjectBridge};
pub use classify::{Promotion, PromotionKind};
pub use error::{Error, ErrorKind, Result};
pub use loader::ProjectSchemaLoader;
pub use model::{ExternalLink, OutputRoute, PackageRecord, Placement};
pub use plan::{AggregateUnit, BuildPlan, DedicatedUnit, LinkEntry};
pub use resolver::{Phase, ResolveRequest, SchemaResolver};
pub use schema::ProjectSchema;
