//! Shared fixtures: minimal JPEG files built in memory.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// SOI + EOI: a valid JPEG with no metadata segment.
pub const BARE_JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xD9];

const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_ORIENTATION: u16 = 0x0112;
const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

fn push_entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: [u8; 4]) {
    buf.extend_from_slice(&tag.to_be_bytes());
    buf.extend_from_slice(&typ.to_be_bytes());
    buf.extend_from_slice(&count.to_be_bytes());
    buf.extend_from_slice(&value);
}

/// Big-endian TIFF block. With `date`, IFD0 points to an Exif IFD holding
/// DateTimeOriginal; without it, IFD0 only carries an Orientation tag.
fn tiff(date: Option<&str>) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(b"MM\0\x2A");
    t.extend_from_slice(&8u32.to_be_bytes());

    let Some(date) = date else {
        t.extend_from_slice(&1u16.to_be_bytes());
        push_entry(&mut t, TAG_ORIENTATION, TYPE_SHORT, 1, [0, 1, 0, 0]);
        t.extend_from_slice(&0u32.to_be_bytes());
        return t;
    };

    // IFD0 at 8: one entry, then next-IFD offset. Exif IFD starts at 26.
    t.extend_from_slice(&1u16.to_be_bytes());
    push_entry(&mut t, TAG_EXIF_IFD, TYPE_LONG, 1, 26u32.to_be_bytes());
    t.extend_from_slice(&0u32.to_be_bytes());
    assert_eq!(t.len(), 26);

    // Exif IFD at 26; out-of-line string data starts at 44.
    let mut ascii = date.as_bytes().to_vec();
    ascii.push(0);
    let count = ascii.len() as u32;
    let value = if ascii.len() <= 4 {
        let mut inline = [0u8; 4];
        inline[..ascii.len()].copy_from_slice(&ascii);
        inline
    } else {
        44u32.to_be_bytes()
    };
    t.extend_from_slice(&1u16.to_be_bytes());
    push_entry(&mut t, TAG_DATE_TIME_ORIGINAL, TYPE_ASCII, count, value);
    t.extend_from_slice(&0u32.to_be_bytes());
    assert_eq!(t.len(), 44);

    if ascii.len() > 4 {
        t.extend_from_slice(&ascii);
    }
    t
}

/// JPEG with an APP1 Exif segment. `None` leaves out DateTimeOriginal.
pub fn exif_jpeg(date: Option<&str>) -> Vec<u8> {
    let tiff = tiff(date);
    let seg_len = (2 + 6 + tiff.len()) as u16;

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&seg_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn write_exif_jpeg(path: &Path, date: Option<&str>) -> Vec<u8> {
    let bytes = exif_jpeg(date);
    fs::write(path, &bytes).unwrap();
    bytes
}

pub fn write_bare_jpeg(path: &Path) -> Vec<u8> {
    fs::write(path, BARE_JPEG).unwrap();
    BARE_JPEG.to_vec()
}
