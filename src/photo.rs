//! Shared types for the collect → sort → serialize pipeline.
//!
//! A [`Photo`] exists only once both its capture timestamp and its GPS
//! position are known; inputs missing either field never make it past the
//! collect stage. Instances are immutable from then on: the sorter reorders
//! the set, the serializer reads it.

use chrono::NaiveDateTime;
use std::path::Path;

/// One successfully processed input photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    /// Display name for the placemark, per the configured [`NamePolicy`].
    pub name: String,
    /// Capture time as embedded in the photo. EXIF timestamps carry no
    /// timezone, so this is kept naive and never normalized.
    pub timestamp: NaiveDateTime,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// How an input path becomes a placemark name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Final path segment only (`trip/img_001.jpg` → `img_001.jpg`).
    #[default]
    Basename,
    /// The input path verbatim.
    Absolute,
}

/// Derive the placemark name for an input path under the given policy.
///
/// A path with no final segment (e.g. `/`) falls back to the full input.
pub fn placemark_name(path: &str, policy: NamePolicy) -> String {
    match policy {
        NamePolicy::Absolute => path.to_string(),
        NamePolicy::Basename => Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string()),
    }
}

/// Order photos by capture time, ascending.
///
/// The sort is stable: burst-mode photos sharing a second keep their
/// input order from run to run.
pub fn sort_chronological(photos: &mut [Photo]) {
    photos.sort_by_key(|photo| photo.timestamp);
}
