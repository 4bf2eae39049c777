//! Forward-slash paths shared between machines

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A path stored with `/` separators regardless of host platform.
///
/// Package roots, package directories and external project paths all flow
/// through the resolver as `NormalizedPath` values, so comparisons and error
/// messages look the same on every platform. Conversion to a native
/// `PathBuf` happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Native form for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment`, which may itself contain separators of either kind.
    pub fn join(&self, segment: &str) -> Self {
        let mut inner = self.inner.clone();
        if !inner.is_empty() && !inner.ends_with('/') {
            inner.push('/');
        }
        inner.push_str(&segment.replace('\\', "/"));
        Self { inner }
    }

    pub fn parent(&self) -> Option<Self> {
        let (head, _) = self.trimmed().rsplit_once('/')?;
        let inner = if head.is_empty() { "/" } else { head };
        Some(Self {
            inner: inner.to_string(),
        })
    }

    /// Last component, ignoring a trailing separator.
    pub fn file_name(&self) -> Option<&str> {
        let last = match self.trimmed().rsplit_once('/') {
            Some((_, last)) => last,
            None => self.trimmed(),
        };
        (!last.is_empty()).then_some(last)
    }

    /// File name up to its last dot. Dotfiles keep their full name.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        Some(split_extension(name).0)
    }

    pub fn extension(&self) -> Option<&str> {
        split_extension(self.file_name()?).1
    }

    /// Rooted (`/x`) or drive-letter (`C:/x`) paths, on every host.
    ///
    /// Config files travel between Windows and Unix machines, so this does
    /// not defer to the host's notion of absolute.
    pub fn is_absolute(&self) -> bool {
        if self.inner.starts_with('/') {
            return true;
        }
        let mut chars = self.inner.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(drive), Some(':'), Some('/')) if drive.is_ascii_alphabetic()
        )
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    fn trimmed(&self) -> &str {
        self.inner.trim_end_matches('/')
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], Some(&name[dot + 1..])),
        _ => (name, None),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for NormalizedPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}
