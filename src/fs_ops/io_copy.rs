//! Streaming copy into a file that must not exist yet.
//!
//! - The destination is opened with `create_new`, so the existence check and
//!   the creation are a single filesystem operation (never clobbers).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - The destination is fsynced before returning.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently after EOF are not included.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` and return the number of bytes written.
///
/// Fails with `ErrorKind::AlreadyExists` if `dst` exists; in that case `dst` is
/// left untouched. On any other failure after `dst` was created, the partial
/// file is removed.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    match stream(src_f, dst_f) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let _ = std::fs::remove_file(dst);
            Err(e)
        }
    }
}

fn stream(src_f: File, dst_f: File) -> io::Result<u64> {
    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}
