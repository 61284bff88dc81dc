//! Shared test utilities for the phototrack test suite.
//!
//! Three kinds of scaffolding:
//!
//! - [`MockReader`]: canned per-path extractor outcomes, so collector
//!   tests exercise the fatal-vs-skip policy without touching the disk.
//!   Unknown paths report as open failures, mirroring a missing file.
//! - [`photo_at`] / [`capture_at`]: terse constructors for pipeline data.
//! - [`exif_tiff`]: builds a real little-endian TIFF byte stream carrying
//!   a `DateTime` tag and/or a GPS IFD, so the production reader is
//!   tested against genuine container bytes without binary fixtures in
//!   the repository.

use crate::extract::{CaptureData, ExtractError, MetadataReader};
use crate::photo::Photo;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =========================================================================
// Data constructors
// =========================================================================

/// Capture data at an ISO timestamp (`2024-06-01T10:30:00`) and position.
pub fn capture_at(timestamp: &str, lat: f64, lon: f64) -> CaptureData {
    CaptureData {
        timestamp: parse_timestamp(timestamp),
        lat,
        lon,
    }
}

/// A [`Photo`] with the given name, ISO timestamp, and position.
pub fn photo_at(name: &str, timestamp: &str, lat: f64, lon: f64) -> Photo {
    Photo {
        name: name.to_string(),
        timestamp: parse_timestamp(timestamp),
        lat,
        lon,
    }
}

fn parse_timestamp(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|err| panic!("bad test timestamp {timestamp:?}: {err}"))
}

// =========================================================================
// Mock metadata reader
// =========================================================================

enum MockOutcome {
    Capture(CaptureData),
    NoTimestamp,
    NoLocation,
    DecodeFailure,
}

/// Metadata reader with canned per-path outcomes.
#[derive(Default)]
pub struct MockReader {
    outcomes: HashMap<PathBuf, MockOutcome>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capture(mut self, path: &str, data: CaptureData) -> Self {
        self.outcomes.insert(path.into(), MockOutcome::Capture(data));
        self
    }

    pub fn with_no_timestamp(mut self, path: &str) -> Self {
        self.outcomes.insert(path.into(), MockOutcome::NoTimestamp);
        self
    }

    pub fn with_no_location(mut self, path: &str) -> Self {
        self.outcomes.insert(path.into(), MockOutcome::NoLocation);
        self
    }

    pub fn with_decode_failure(mut self, path: &str) -> Self {
        self.outcomes.insert(path.into(), MockOutcome::DecodeFailure);
        self
    }
}

impl MetadataReader for MockReader {
    fn read(&self, path: &Path) -> Result<CaptureData, ExtractError> {
        match self.outcomes.get(path) {
            Some(MockOutcome::Capture(data)) => Ok(data.clone()),
            Some(MockOutcome::NoTimestamp) => Err(ExtractError::NoTimestamp(path.to_path_buf())),
            Some(MockOutcome::NoLocation) => Err(ExtractError::NoLocation(path.to_path_buf())),
            Some(MockOutcome::DecodeFailure) => Err(ExtractError::Decode {
                path: path.to_path_buf(),
                source: exif::Error::InvalidFormat("mock decode failure"),
            }),
            None => Err(ExtractError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

// =========================================================================
// EXIF fixture builder
// =========================================================================

/// Degrees, minutes, whole seconds, and hemisphere letter (`N`/`S`/`E`/`W`).
pub type Dms = (u32, u32, u32, u8);

const ASCII: u16 = 2;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

/// Build a minimal little-endian TIFF whose IFD0 carries an optional
/// `DateTime` tag and an optional GPS sub-IFD with latitude/longitude.
///
/// The layout is fixed: header, IFD0, date-time string, GPS IFD, then the
/// latitude and longitude rationals. All offsets stay word-aligned.
pub fn exif_tiff(datetime: Option<&str>, gps: Option<(Dms, Dms)>) -> Vec<u8> {
    const DATETIME_TAG: u16 = 0x0132;
    const GPS_IFD_TAG: u16 = 0x8825;
    const LAT_REF_TAG: u16 = 0x0001;
    const LAT_TAG: u16 = 0x0002;
    const LON_REF_TAG: u16 = 0x0003;
    const LON_TAG: u16 = 0x0004;

    if let Some(s) = datetime {
        assert_eq!(s.len(), 19, "EXIF date-time must be 19 characters");
    }

    let ifd0_entries = u32::from(datetime.is_some()) + u32::from(gps.is_some());
    let ifd0_offset = 8u32;
    let datetime_offset = ifd0_offset + 2 + ifd0_entries * 12 + 4;
    let datetime_len = if datetime.is_some() { 20 } else { 0 };
    let gps_ifd_offset = datetime_offset + datetime_len;
    let lat_offset = gps_ifd_offset + 2 + 4 * 12 + 4;
    let lon_offset = lat_offset + 24;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&ifd0_offset.to_le_bytes());

    // IFD0: entry count, entries sorted by tag, next-IFD terminator.
    out.extend_from_slice(&(ifd0_entries as u16).to_le_bytes());
    if datetime.is_some() {
        ifd_entry(&mut out, DATETIME_TAG, ASCII, 20, datetime_offset.to_le_bytes());
    }
    if gps.is_some() {
        ifd_entry(&mut out, GPS_IFD_TAG, LONG, 1, gps_ifd_offset.to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    if let Some(s) = datetime {
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }

    if let Some((lat, lon)) = gps {
        out.extend_from_slice(&4u16.to_le_bytes());
        ifd_entry(&mut out, LAT_REF_TAG, ASCII, 2, [lat.3, 0, 0, 0]);
        ifd_entry(&mut out, LAT_TAG, RATIONAL, 3, lat_offset.to_le_bytes());
        ifd_entry(&mut out, LON_REF_TAG, ASCII, 2, [lon.3, 0, 0, 0]);
        ifd_entry(&mut out, LON_TAG, RATIONAL, 3, lon_offset.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        for component in [lat, lon] {
            for value in [component.0, component.1, component.2] {
                out.extend_from_slice(&value.to_le_bytes());
                out.extend_from_slice(&1u32.to_le_bytes());
            }
        }
    }

    out
}

fn ifd_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value);
}
