//! Thin adapter over kamadak-exif.
//!
//! Only JPEG files are decoded. Other containers the library could read (TIFF, PNG,
//! WebP, HEIF) are reported as `ImageMetadata::Other` so callers can refuse them
//! explicitly instead of silently dropping them in the fallback bucket.

use exif::{Exif, In, Reader, Tag, Value};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::trace;

use super::path::CaptureTime;
use crate::errors::ExtractError;

/// Image container detected from the leading magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Jpeg,
    Tiff,
    Png,
    WebP,
    Heif,
}

impl ContainerKind {
    /// Identify a container from the first bytes of a file.
    pub fn sniff(header: &[u8]) -> Option<Self> {
        match header {
            [0xFF, 0xD8, ..] => Some(ContainerKind::Jpeg),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ContainerKind::Tiff),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(ContainerKind::Png),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(ContainerKind::WebP),
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => Some(ContainerKind::Heif),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContainerKind::Jpeg => "JPEG",
            ContainerKind::Tiff => "TIFF",
            ContainerKind::Png => "PNG",
            ContainerKind::WebP => "WebP",
            ContainerKind::Heif => "HEIF",
        };
        f.write_str(s)
    }
}

/// Decoded metadata of one image.
pub enum ImageMetadata {
    /// EXIF block of a JPEG file.
    Exif(Exif),
    /// A container this tool does not interpret.
    Other(ContainerKind),
}

// `exif::Exif` has no Debug impl.
impl fmt::Debug for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageMetadata::Exif(_) => f.write_str("Exif(..)"),
            ImageMetadata::Other(kind) => write!(f, "Other({kind:?})"),
        }
    }
}

impl ImageMetadata {
    /// Raw `DateTimeOriginal` value from the primary IFD.
    /// Returns `Absent` for non-EXIF variants.
    pub fn capture_time(&self) -> CaptureTime {
        match self {
            ImageMetadata::Exif(exif) => capture_time(exif),
            ImageMetadata::Other(_) => CaptureTime::Absent,
        }
    }
}

fn capture_time(exif: &Exif) -> CaptureTime {
    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        return CaptureTime::Absent;
    };
    match &field.value {
        Value::Ascii(parts) => match parts.first() {
            Some(bytes) => CaptureTime::Present(String::from_utf8_lossy(bytes).into_owned()),
            None => CaptureTime::Present(String::new()),
        },
        // Wrong type for this tag: keep its textual form so it shows up as a format miss.
        other => CaptureTime::Present(format!("{}", other.display_as(field.tag))),
    }
}

const HEADER_LEN: u64 = 12;

/// Read the metadata of `path`.
///
/// - `Ok(None)`: a JPEG without an EXIF segment.
/// - `Ok(Some(Other(_)))`: a recognised, non-JPEG container.
/// - `Err(_)`: unreadable file, unknown signature or corrupt EXIF data.
pub fn read_metadata(path: &Path) -> Result<Option<ImageMetadata>, ExtractError> {
    let io_err = |source: io::Error| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    (&mut file)
        .take(HEADER_LEN)
        .read_to_end(&mut header)
        .map_err(io_err)?;

    let kind = ContainerKind::sniff(&header).ok_or_else(|| ExtractError::Decode {
        path: path.to_path_buf(),
        reason: "unknown image format".into(),
    })?;
    trace!(path = %path.display(), %kind, "sniffed container");

    if kind != ContainerKind::Jpeg {
        return Ok(Some(ImageMetadata::Other(kind)));
    }

    file.seek(SeekFrom::Start(0)).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(ImageMetadata::Exif(exif))),
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(exif::Error::Io(source)) => Err(io_err(source)),
        Err(e) => Err(ExtractError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sniff_known_signatures() {
        assert_eq!(ContainerKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ContainerKind::Jpeg));
        assert_eq!(ContainerKind::sniff(b"II*\0\x08\0\0\0"), Some(ContainerKind::Tiff));
        assert_eq!(ContainerKind::sniff(b"MM\0*\0\0\0\x08"), Some(ContainerKind::Tiff));
        assert_eq!(
            ContainerKind::sniff(b"\x89PNG\r\n\x1a\n\0\0\0\0"),
            Some(ContainerKind::Png)
        );
        assert_eq!(ContainerKind::sniff(b"RIFF\0\0\0\0WEBP"), Some(ContainerKind::WebP));
        assert_eq!(ContainerKind::sniff(b"\0\0\0\x18ftypheic"), Some(ContainerKind::Heif));
        assert_eq!(ContainerKind::sniff(b"GIF89a"), None);
        assert_eq!(ContainerKind::sniff(&[0xFF]), None);
        assert_eq!(ContainerKind::sniff(&[]), None);
    }

    #[test]
    fn debug_output_names_the_variant() {
        assert_eq!(format!("{:?}", ImageMetadata::Other(ContainerKind::Png)), "Other(Png)");
    }

    #[test]
    fn bare_jpeg_has_no_metadata() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bare.jpg");
        fs::write(&p, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
        assert!(read_metadata(&p).unwrap().is_none());
    }

    #[test]
    fn tiff_is_reported_as_other_variant() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("really_a_tiff.jpg");
        fs::write(&p, b"II*\0\x08\0\0\0\0\0\0\0").unwrap();
        match read_metadata(&p).unwrap() {
            Some(ImageMetadata::Other(kind)) => assert_eq!(kind, ContainerKind::Tiff),
            other => panic!("expected Other(Tiff), got {other:?}"),
        }
    }

    #[test]
    fn unknown_signature_is_decode_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("notes.jpg");
        fs::write(&p, b"hello, not an image").unwrap();
        let err = read_metadata(&p).unwrap_err();
        assert!(matches!(err, ExtractError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_metadata(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }), "{err:?}");
    }

    #[test]
    fn truncated_jpeg_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("cut.jpg");
        // APP1 announces 0x100 bytes but the file ends right after the length.
        fs::write(&p, [0xFF, 0xD8, 0xFF, 0xE1, 0x01, 0x00]).unwrap();
        assert!(read_metadata(&p).is_err());
    }
}
