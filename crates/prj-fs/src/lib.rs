//! Filesystem abstraction for the prj package layout tool
//!
//! Provides forward-slash path handling, format-agnostic config document
//! loading, and the narrow [`FileSystem`] port the schema resolver queries.

pub mod config;
pub mod error;
pub mod fs;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use fs::{FileSystem, OsFileSystem};
pub use path::NormalizedPath;
