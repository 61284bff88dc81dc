//! # phototrack
//!
//! Turn a list of geotagged photos into a KML track. Feed it newline
//! separated photo paths; it extracts each photo's capture time and GPS
//! position and emits a chronologically ordered KML document with one
//! placemark per photo and a path connecting them, ready for any map
//! viewer that speaks KML.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Collect    paths      →  Vec<Photo>    (EXIF → structured data)
//! 2. Sort       Vec<Photo> →  Vec<Photo>    (stable, by capture time)
//! 3. Serialize  Vec<Photo> →  KML document  (placemarks + path)
//! ```
//!
//! The stages are plain functions over owned data. Collection is the only
//! stage that touches the filesystem; serialization builds the complete
//! document in memory before anything reaches stdout, so a run that fails
//! never leaves a truncated document behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Stage 1: reads the path list, extracts metadata per photo, applies the fatal-vs-skip policy |
//! | [`photo`] | Shared [`Photo`](photo::Photo) type, name policy, stage 2's stable chronological sort |
//! | [`kml`] | Stage 3: renders the ordered set as a KML document |
//! | [`extract`] | Adapter over the `exif` crate behind the [`MetadataReader`](extract::MetadataReader) seam |
//! | [`geocode`] | Optional enrichment: reverse geocoding via Nominatim |
//! | [`output`] | CLI diagnostics formatting (pure `format_*`, printing `print_*`) |
//!
//! # Design Decisions
//!
//! ## Fatal vs. Skip
//!
//! The input list is authoritative: a path that cannot be opened or bytes
//! that cannot be decoded abort the run immediately (almost certainly a
//! typo the user wants to know about now), while a photo that merely lacks
//! a GPS tag or a capture time is warned about and excluded. The two
//! classes are encoded in [`extract::ExtractError`] and enforced in one
//! place, the collector's classification match.
//!
//! ## Naive Timestamps
//!
//! EXIF capture times carry no timezone, so they are parsed and formatted
//! as naive date-times. Sorting compares photos from the same camera in
//! the same frame of reference; normalizing to UTC would invent data the
//! file does not contain.
//!
//! ## Enrichment Stays Outside the Pipeline
//!
//! Reverse geocoding ([`geocode::PlaceResolver`]) is a per-coordinate side
//! channel owned by the CLI driver. A failed lookup costs one placemark
//! its pretty name, never the track.

pub mod collect;
pub mod extract;
pub mod geocode;
pub mod kml;
pub mod output;
pub mod photo;

#[cfg(test)]
pub(crate) mod test_helpers;
