//! Capture-time parsing.
//!
//! EXIF stores `DateTimeOriginal` as free text. The EXIF standard says
//! `YYYY:MM:DD HH:MM:SS`, but plenty of software writes dashes instead, so the
//! accepted patterns are an ordered list and the first one that parses wins.
//! Operators can append more patterns through config without touching this code.
//!
//! Built-in patterns are strict: every field must be zero-padded to its full
//! width, as the EXIF standard writes it. Operator patterns follow chrono's
//! lenient rules and may omit the time entirely (`%Y:%m:%d`).

use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

/// Built-in patterns, highest priority first (chrono strftime syntax).
pub const DEFAULT_DATE_FORMATS: [&str; 2] = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One accepted textual date-time pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strict: bool,
}

impl DateFormat {
    /// A lenient pattern: chrono's usual rules, date-only allowed.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            strict: false,
        }
    }

    /// A pattern whose match must reproduce the input exactly when formatted
    /// back, so unpadded or short fields are rejected.
    pub fn strict(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            strict: true,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn match_date(&self, text: &str) -> Option<NaiveDate> {
        match NaiveDateTime::parse_from_str(text, &self.pattern) {
            Ok(dt) => {
                if self.strict && dt.format(&self.pattern).to_string() != text {
                    return None;
                }
                Some(dt.date())
            }
            // Pattern carries no time fields.
            Err(e) if e.kind() == ParseErrorKind::NotEnough && !self.strict => {
                NaiveDate::parse_from_str(text, &self.pattern).ok()
            }
            Err(_) => None,
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// No accepted pattern matched the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' matches none of the {tried} accepted date formats")]
pub struct DateParseError {
    pub raw: String,
    pub tried: usize,
}

/// Ordered list of accepted date-time patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    formats: Vec<DateFormat>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|p| DateFormat::strict(*p)).collect(),
        }
    }
}

impl DateParser {
    /// Built-in patterns followed by `extra` in the given order.
    /// Blank entries and exact duplicates of an earlier pattern are ignored.
    pub fn with_extra_formats<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = Self::default();
        for pattern in extra {
            let pattern = pattern.into();
            let pattern = pattern.trim();
            if pattern.is_empty() || parser.formats.iter().any(|f| f.pattern() == pattern) {
                continue;
            }
            parser.formats.push(DateFormat::new(pattern));
        }
        parser
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Parse `raw` against each pattern in order and return the calendar date
    /// of the first match. Time fields must be valid but are otherwise ignored.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate, DateParseError> {
        let cleaned = raw.trim_end_matches('\0').trim();
        let date = if cleaned.is_empty() {
            None
        } else {
            self.formats.iter().find_map(|f| f.match_date(cleaned))
        };
        date.ok_or_else(|| DateParseError {
            raw: raw.to_string(),
            tried: self.formats.len(),
        })
    }
}
