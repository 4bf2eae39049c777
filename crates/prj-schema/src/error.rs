//! Error types for prj-schema

use prj_fs::NormalizedPath;

/// Result type for prj-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classes of resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The project or package configuration is wrong or incomplete
    Configuration,
    /// The dependency graph itself is malformed
    Structural,
    /// A placement rule cannot be honored
    Policy,
    /// Reading from disk failed
    Io,
}

/// Errors that abort schema resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Could not find package '{name}' in any of the package directories. Referenced in {referenced_by}"
    )]
    MissingPackage { name: String, referenced_by: String },

    #[error(
        "Package '{package}' links external project {path} named '{assembly}'; prebuilt projects must have the same name as their package"
    )]
    AssemblyNameMismatch {
        package: String,
        assembly: String,
        path: NormalizedPath,
    },

    #[error("Dedicated project '{pattern}' is not included in either the Plugins or Assets folder")]
    UnmatchedDedicatedProjectPattern { pattern: String },

    #[error("Invalid dedicated project regex '{pattern}': {source}")]
    InvalidDedicatedProjectPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Found circular dependency: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    #[error("Package '{package}' must be in the Plugins directory, but {reason}")]
    ForcedPlacementViolation { package: String, reason: String },

    #[error(
        "Found package '{name}' in both the Plugins and Assets folder lists. It must be in only one or the other"
    )]
    DuplicatePlacement { name: String },

    #[error("Expected to find external project for package '{package}' at {path}")]
    ExternalProjectNotFound {
        package: String,
        path: NormalizedPath,
    },

    #[error("Failed to read external project for package '{package}': {source}")]
    ExternalProject {
        package: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to parse external project at {path}: {message}")]
    ExternalProjectParse {
        path: NormalizedPath,
        message: String,
    },

    #[error(
        "Found C# scripts in prebuilt package '{package}'. Move them to a separate package"
    )]
    PrebuiltProjectHasScripts { package: String },

    #[error(
        "Expected package '{dependency}' to link an external project, since prebuilt package '{package}' references it"
    )]
    PrebuiltDependencyNotPrebuilt { package: String, dependency: String },

    /// Configuration error from prj-config
    #[error(transparent)]
    Config(#[from] prj_config::Error),

    /// Filesystem error from prj-fs
    #[error(transparent)]
    Fs(#[from] prj_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CircularDependency { .. } => ErrorKind::Structural,
            Self::ForcedPlacementViolation { .. }
            | Self::PrebuiltProjectHasScripts { .. }
            | Self::PrebuiltDependencyNotPrebuilt { .. } => ErrorKind::Policy,
            Self::Fs(_) | Self::Json(_) => ErrorKind::Io,
            Self::ExternalProject { source, .. } => source.kind(),
            Self::MissingPackage { .. }
            | Self::AssemblyNameMismatch { .. }
            | Self::UnmatchedDedicatedProjectPattern { .. }
            | Self::InvalidDedicatedProjectPattern { .. }
            | Self::DuplicatePlacement { .. }
            | Self::ExternalProjectNotFound { .. }
            | Self::ExternalProjectParse { .. }
            | Self::Config(_) => ErrorKind::Configuration,
        }
    }
}
