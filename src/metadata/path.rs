//! Destination sub-path derivation.
//! Pure mapping from the capture-time tag (or its absence) to `YYYY/MM/DD/` or `NoExif/`.

use chrono::Datelike;
use std::fmt;
use std::path::PathBuf;

use super::date::DateParser;

/// Directory name of the fallback bucket.
pub const NO_EXIF_DIR: &str = "NoExif";

/// Raw value of the capture-time tag as read from the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTime {
    Absent,
    Present(String),
}

/// Why an image ended up in the fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoExifReason {
    /// No embedded metadata at all.
    NoMetadata,
    /// Metadata present, capture-time tag missing.
    NoCaptureTag,
    /// Tag present but none of the accepted formats matched.
    UnparseableDate { raw: String },
}

/// Relative directory an image is copied into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubPath {
    Dated { year: i32, month: u32, day: u32 },
    NoExif(NoExifReason),
}

impl SubPath {
    /// `"<year>/<MM>/<DD>/"` or `"NoExif/"`.
    pub fn relative(&self) -> String {
        match self {
            SubPath::Dated { year, month, day } => format!("{year}/{month:02}/{day:02}/"),
            SubPath::NoExif(_) => format!("{NO_EXIF_DIR}/"),
        }
    }

    /// Same location as a `PathBuf`, one component per segment.
    pub fn to_path_buf(&self) -> PathBuf {
        match self {
            SubPath::Dated { year, month, day } => [
                year.to_string(),
                format!("{month:02}"),
                format!("{day:02}"),
            ]
            .iter()
            .collect(),
            SubPath::NoExif(_) => PathBuf::from(NO_EXIF_DIR),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SubPath::NoExif(_))
    }

    /// True only when a date was present but in an unrecognised format.
    pub fn is_format_miss(&self) -> bool {
        matches!(self, SubPath::NoExif(NoExifReason::UnparseableDate { .. }))
    }
}

impl fmt::Display for SubPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative())
    }
}

pub fn derive_sub_path(capture: &CaptureTime, parser: &DateParser) -> SubPath {
    match capture {
        CaptureTime::Absent => SubPath::NoExif(NoExifReason::NoCaptureTag),
        CaptureTime::Present(raw) => match parser.parse(raw) {
            Ok(date) => SubPath::Dated {
                year: date.year(),
                month: date.month(),
                day: date.day(),
            },
            Err(e) => SubPath::NoExif(NoExifReason::UnparseableDate { raw: e.raw }),
        },
    }
}
