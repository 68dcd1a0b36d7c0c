//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and an actionable hint while
//! preserving the original ErrorKind, so callers can still match on it.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ENOTDIR => Some("a path component exists but is not a directory"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE | libc::ENFILE => Some("too many open files; raise the descriptor limit"),
            _ => None,
        };
        if let Some(h) = hint {
            msg.push_str(" (");
            msg.push_str(h);
            msg.push(')');
        }
        msg.push_str(&format!(" [os code: {code}]"));
        return msg;
    }

    let hint = match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    msg
}

/// Returns a closure suitable for `.map_err(...)` that keeps the ErrorKind and
/// rewrites the message with context.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_kind_and_mentions_path() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let wrapped = io_error_with_help("open source", Path::new("/x/a.jpg"))(e);
        assert_eq!(wrapped.kind(), io::ErrorKind::NotFound);
        let msg = wrapped.to_string();
        assert!(msg.contains("open source '/x/a.jpg'"), "{msg}");
        assert!(msg.contains("verify it exists"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_errors_get_a_hint() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        let wrapped = io_error_with_help("copy", Path::new("/dst/a.jpg"))(e);
        let msg = wrapped.to_string();
        assert!(msg.contains("insufficient space"), "{msg}");
        assert!(msg.contains("[os code:"), "{msg}");
    }
}
