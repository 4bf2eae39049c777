//! Error types for prj-config

/// Result type for prj-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from prj-fs
    #[error(transparent)]
    Fs(#[from] prj_fs::Error),

    #[error("Unexpected type for config key '{key}': expected {expected}, found {found}")]
    UnexpectedType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Missing required config key '{key}'")]
    MissingKey { key: String },

    #[error("Invalid entry in config key '{key}': {message}")]
    InvalidEntry { key: String, message: String },

    #[error("Unrecognized folder type '{value}'")]
    UnknownFolderType { value: String },

    #[error("Unrecognized platform '{value}'")]
    UnknownPlatform { value: String },

    /// Any of the above, attributed to the package whose config caused it
    #[error("Invalid config for package '{package}': {source}")]
    InPackage {
        package: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn in_package(package: &str, source: Error) -> Self {
        Self::InPackage {
            package: package.to_string(),
            source: Box::new(source),
        }
    }
}
