//! Capture-metadata extraction: the adapter over the EXIF decoder.
//!
//! The [`MetadataReader`] trait is the seam between the pipeline and the
//! `exif` crate. The production implementation is [`ExifReader`]; collector
//! tests substitute a mock (see `test_helpers`), so pipeline logic is
//! exercised without real image bytes.
//!
//! ## Failure classification
//!
//! [`ExtractError`] carries the policy the whole run depends on:
//!
//! - [`Open`](ExtractError::Open) and [`Decode`](ExtractError::Decode) are
//!   fatal. An unreadable path or an unrecognizable container means the
//!   input list itself is bad (a typo, a non-image), and the run must stop
//!   before emitting a partial document.
//! - [`NoTimestamp`](ExtractError::NoTimestamp) and
//!   [`NoLocation`](ExtractError::NoLocation) are skippable. The image is
//!   fine, it just was not geotagged or carries no capture time; the
//!   collector warns and moves on.
//!
//! ## Field selection
//!
//! The capture time prefers `DateTimeOriginal` and falls back to
//! `DateTime`. GPS position needs all four of latitude, longitude, and
//! their hemisphere references; degree/minute/second rationals are folded
//! into signed decimal degrees.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode metadata from {path}: {source}")]
    Decode { path: PathBuf, source: exif::Error },
    #[error("no capture timestamp in {0}")]
    NoTimestamp(PathBuf),
    #[error("no GPS position in {0}")]
    NoLocation(PathBuf),
}

impl ExtractError {
    /// Whether the collector may skip this photo and continue.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ExtractError::NoTimestamp(_) | ExtractError::NoLocation(_)
        )
    }
}

/// Timestamp and position extracted from one photo.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureData {
    pub timestamp: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
}

/// Trait for capture-metadata readers.
///
/// One operation: given a photo path, return its capture data or an
/// [`ExtractError`] classifying why it is unavailable.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Result<CaptureData, ExtractError>;
}

/// Production reader backed by the `exif` crate.
#[derive(Debug, Default)]
pub struct ExifReader;

impl ExifReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for ExifReader {
    fn read(&self, path: &Path) -> Result<CaptureData, ExtractError> {
        let file = File::open(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let exif = Reader::new()
            .read_from_container(&mut BufReader::new(file))
            .map_err(|source| ExtractError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let timestamp = capture_timestamp(&exif)
            .ok_or_else(|| ExtractError::NoTimestamp(path.to_path_buf()))?;
        let (lat, lon) =
            gps_position(&exif).ok_or_else(|| ExtractError::NoLocation(path.to_path_buf()))?;

        Ok(CaptureData {
            timestamp,
            lat,
            lon,
        })
    }
}

/// Capture time from `DateTimeOriginal`, falling back to `DateTime`.
fn capture_timestamp(exif: &Exif) -> Option<NaiveDateTime> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .iter()
        .find_map(|&tag| {
            let field = exif.get_field(tag, In::PRIMARY)?;
            ascii_datetime(&field.value)
        })
}

/// Parse an EXIF ASCII date-time (`YYYY:MM:DD HH:MM:SS`) as naive time.
fn ascii_datetime(value: &Value) -> Option<NaiveDateTime> {
    let Value::Ascii(ref lines) = *value else {
        return None;
    };
    let parsed = exif::DateTime::from_ascii(lines.first()?).ok()?;
    let date = NaiveDate::from_ymd_opt(
        i32::from(parsed.year),
        u32::from(parsed.month),
        u32::from(parsed.day),
    )?;
    let time = NaiveTime::from_hms_opt(
        u32::from(parsed.hour),
        u32::from(parsed.minute),
        u32::from(parsed.second),
    )?;
    Some(NaiveDateTime::new(date, time))
}

fn gps_position(exif: &Exif) -> Option<(f64, f64)> {
    let lat = gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let lon = gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    Some((lat, lon))
}

/// One signed coordinate from its value tag and hemisphere-reference tag.
/// Both must be present and well-formed.
fn gps_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let degrees = dms_to_degrees(&exif.get_field(value_tag, In::PRIMARY)?.value)?;
    let sign = ref_sign(&exif.get_field(ref_tag, In::PRIMARY)?.value, negative_ref)?;
    Some(sign * degrees)
}

/// Fold GPS degree/minute/second rationals into decimal degrees.
///
/// Accepts one to three components (some encoders store fractional degrees
/// in a single rational). A zero denominator invalidates the coordinate.
fn dms_to_degrees(value: &Value) -> Option<f64> {
    const DIVISORS: [f64; 3] = [1.0, 60.0, 3600.0];

    let Value::Rational(ref parts) = *value else {
        return None;
    };
    if parts.is_empty() || parts.len() > DIVISORS.len() {
        return None;
    }

    let mut degrees = 0.0;
    for (part, divisor) in parts.iter().zip(DIVISORS) {
        if part.denom == 0 {
            return None;
        }
        degrees += part.to_f64() / divisor;
    }
    Some(degrees)
}

/// Sign from a hemisphere reference (`N`/`S` or `E`/`W`).
fn ref_sign(value: &Value, negative: u8) -> Option<f64> {
    let Value::Ascii(ref lines) = *value else {
        return None;
    };
    let letter = lines.first()?.first()?;
    Some(if letter.eq_ignore_ascii_case(&negative) {
        -1.0
    } else {
        1.0
    })
}
