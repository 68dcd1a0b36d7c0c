//! Metadata-to-path pipeline.
//! Reads the capture time of one image and turns it into a destination sub-path.
//!
//! Logging policy:
//! - no metadata / no capture tag: debug (expected, unremarkable)
//! - capture tag in an unknown format: warn (a format worth adding to the list)
//! - unsupported container, read or decode failure: not logged here; the
//!   error is returned and the caller reports it once per file

pub mod date;
pub mod path;
pub mod reader;

pub use date::{DEFAULT_DATE_FORMATS, DateFormat, DateParseError, DateParser};
pub use path::{CaptureTime, NO_EXIF_DIR, NoExifReason, SubPath, derive_sub_path};
pub use reader::{ContainerKind, ImageMetadata, read_metadata};

use std::path::Path;
use tracing::{debug, warn};

use crate::errors::ExtractError;

/// Destination sub-path for the image at `image`.
///
/// Errors are returned rather than folded into `NoExif/`:
/// a file that cannot be read is skipped by the caller, not bucketed.
pub fn extract_sub_path(image: &Path, parser: &DateParser) -> Result<SubPath, ExtractError> {
    let result = classify(image, parser);
    match &result {
        Ok(SubPath::NoExif(NoExifReason::UnparseableDate { raw })) => {
            warn!(
                path = %image.display(),
                raw = %raw,
                formats = parser.formats().len(),
                "Capture date matches no accepted format; using {NO_EXIF_DIR}/"
            );
        }
        Ok(SubPath::NoExif(reason)) => {
            debug!(path = %image.display(), ?reason, "No capture date; using {NO_EXIF_DIR}/");
        }
        Ok(sub) => {
            debug!(path = %image.display(), sub_path = %sub, "Derived destination");
        }
        Err(_) => {}
    }
    result
}

fn classify(image: &Path, parser: &DateParser) -> Result<SubPath, ExtractError> {
    match read_metadata(image)? {
        None => Ok(SubPath::NoExif(NoExifReason::NoMetadata)),
        Some(ImageMetadata::Other(kind)) => Err(ExtractError::UnsupportedMetadata {
            path: image.to_path_buf(),
            kind,
        }),
        Some(meta @ ImageMetadata::Exif(_)) => Ok(derive_sub_path(&meta.capture_time(), parser)),
    }
}
