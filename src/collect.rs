//! Photo collection: the read phase of the pipeline.
//!
//! Consumes newline-delimited photo paths from any line source, extracts
//! capture metadata per path, and builds the photo set in input order.
//!
//! The input list is treated as authoritative. A path that cannot be
//! opened, or bytes that cannot be decoded at all, abort the whole
//! collection; a photo that merely lacks a timestamp or a GPS position is
//! reported through the event callback and skipped. Blank lines are
//! ignored without comment.
//!
//! Processing is strictly sequential: each line is fully resolved (open,
//! decode, classify, append) before the next is read, so skip events come
//! out in input order.

use crate::extract::{ExtractError, MetadataReader};
use crate::photo::{NamePolicy, Photo, placemark_name};
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("failed to read photo list: {0}")]
    Input(#[from] std::io::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Collector configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectConfig {
    /// How placemark names are derived from input paths.
    pub names: NamePolicy,
}

/// Why a photo was left out of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoTimestamp,
    NoLocation,
}

/// Progress event emitted while collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectEvent {
    /// A decodable photo lacked a required field and was excluded.
    Skipped { path: String, reason: SkipReason },
}

/// Read photo paths from `input` and build the photo set.
///
/// Returns every successfully extracted photo in input order (possibly
/// zero). Skips are reported via `on_event`; fatal conditions abort with
/// the underlying error and whatever was already reported stands.
pub fn collect(
    input: impl BufRead,
    reader: &dyn MetadataReader,
    config: &CollectConfig,
    on_event: &mut dyn FnMut(CollectEvent),
) -> Result<Vec<Photo>, CollectError> {
    let mut photos = Vec::new();

    for line in input.lines() {
        let path = line?;
        if path.is_empty() {
            continue;
        }

        let data = match reader.read(std::path::Path::new(&path)) {
            Ok(data) => data,
            Err(err @ (ExtractError::NoTimestamp(_) | ExtractError::NoLocation(_))) => {
                let reason = match err {
                    ExtractError::NoTimestamp(_) => SkipReason::NoTimestamp,
                    _ => SkipReason::NoLocation,
                };
                on_event(CollectEvent::Skipped { path, reason });
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        photos.push(Photo {
            name: placemark_name(&path, config.names),
            timestamp: data.timestamp,
            lat: data.lat,
            lon: data.lon,
        });
    }

    Ok(photos)
}
