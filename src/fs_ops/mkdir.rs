//! Destination directory creation.

use std::fs;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help;

/// Create `dir` and any missing ancestors.
///
/// Idempotent: an existing directory is success, including when another
/// process or thread creates it concurrently. A non-directory at `dir` fails.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(io_error_with_help("create directory", dir)(e)),
    }
}
