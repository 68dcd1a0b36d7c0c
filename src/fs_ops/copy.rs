//! No-clobber copy used by the organizer.
//! A name collision at the destination is an outcome, not an error.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;

/// Result of a successful `copy_no_clobber` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Bytes were written to a new file.
    Copied { bytes: u64 },
    /// Something already exists at the destination; nothing was written.
    Collision,
}

/// Copy `src` to `dest` unless `dest` already exists.
///
/// The existing file at a colliding path is never opened for writing. When
/// `preserve_timestamps` is set, the copy gets the source's access and
/// modification times; the bytes are copied verbatim either way. If the
/// times cannot be applied the new copy is removed, so an error always means
/// nothing was left at `dest`.
pub fn copy_no_clobber(src: &Path, dest: &Path, preserve_timestamps: bool) -> io::Result<CopyOutcome> {
    let bytes = match copy_streaming(src, dest) {
        Ok(n) => n,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(dest = %dest.display(), "destination exists; not copying");
            return Ok(CopyOutcome::Collision);
        }
        Err(e) => return Err(io_error_with_help("copy", src)(e)),
    };

    if preserve_timestamps {
        discard_on_error(dest, copy_times(src, dest))?;
    }

    Ok(CopyOutcome::Copied { bytes })
}

fn copy_times(src: &Path, dest: &Path) -> io::Result<()> {
    let meta = fs::metadata(src).map_err(io_error_with_help("stat", src))?;
    let atime = filetime::FileTime::from_last_access_time(&meta);
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dest, atime, mtime).map_err(io_error_with_help("set timestamps on", dest))
}

/// Remove the file this call just created when a follow-up step failed.
fn discard_on_error<T>(dest: &Path, step: io::Result<T>) -> io::Result<T> {
    if step.is_err() {
        fs::remove_file(dest).unwrap_or_else(|e| {
            warn!(dest = %dest.display(), error = %e, "could not remove incomplete copy");
        });
    }
    step
}
