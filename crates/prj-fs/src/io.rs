//! Plain read helpers with path-attributed errors

use crate::{Error, NormalizedPath, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Whole-file read as UTF-8; failures name the file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|source| Error::io(native, source))
}

/// Return true if any file under `dir` (recursively) has the given extension.
///
/// The extension is compared case-insensitively and without the leading dot.
/// Symlinked directories are not followed.
pub fn any_file_with_extension(dir: &NormalizedPath, extension: &str) -> Result<bool> {
    let root = dir.to_native();

    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(&root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let matched = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
        if matched {
            tracing::trace!(path = %entry.path().display(), "Matched extension");
            return Ok(true);
        }
    }

    Ok(false)
}

fn walk_error(root: &Path, error: walkdir::Error) -> Error {
    let path = error.path().unwrap_or(root).to_path_buf();
    Error::io(path, error.into())
}
