//! Filesystem operations used by the organizer.

mod copy;
mod mkdir;
mod helpers;
mod io_copy;

pub use copy::{CopyOutcome, copy_no_clobber};
pub use mkdir::ensure_dir;
pub use helpers::io_error_with_help;
