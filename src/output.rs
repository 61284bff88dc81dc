//! CLI diagnostics and check-mode formatting.
//!
//! All user-facing message text lives here, split in two layers:
//! `format_*` functions are pure and return strings, `print_*` wrappers do
//! the I/O. Diagnostics always go to stderr; stdout is reserved for the
//! KML document, so a consumer piping `phototrack track` into a file gets
//! either a complete document or nothing.

use crate::collect::{CollectEvent, SkipReason};
use crate::kml;
use crate::photo::Photo;

/// Warning line for a photo excluded from the set.
pub fn format_collect_event(event: &CollectEvent) -> String {
    match event {
        CollectEvent::Skipped { path, reason } => {
            let missing = match reason {
                SkipReason::NoTimestamp => "timestamp",
                SkipReason::NoLocation => "location",
            };
            format!("The photo {path} has no {missing} -> will be skipped")
        }
    }
}

/// Post-collection summary line.
pub fn format_summary(count: usize) -> String {
    format!("Collected {count} photos")
}

/// Announcement before a reverse-geocoding lookup.
pub fn format_geocode_lookup(name: &str, endpoint: &str) -> String {
    format!("Reverse-geocoding {name} using {endpoint}")
}

/// Warning when enrichment fails for one photo; the track keeps the
/// file-derived name.
pub fn format_geocode_failure(name: &str, error: &crate::geocode::GeocodeError) -> String {
    format!("Could not resolve a place name for {name}: {error}")
}

/// Check-mode listing: one indexed header line per photo plus an indented
/// capture-time/coordinate context line, in track order.
pub fn format_check_output(photos: &[Photo]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, photo) in photos.iter().enumerate() {
        lines.push(format!("{:0>3} {}", i + 1, photo.name));
        lines.push(format!(
            "    {}  {}",
            kml::format_when(photo),
            kml::format_coordinate(photo)
        ));
    }
    lines.push(format_summary(photos.len()));
    lines
}

pub fn print_reading_stdin() {
    eprintln!("Reading list of photos from stdin ...");
}

pub fn print_collect_event(event: &CollectEvent) {
    eprintln!("{}", format_collect_event(event));
}

pub fn print_summary(count: usize) {
    eprintln!("{}", format_summary(count));
}

pub fn print_geocode_lookup(name: &str, endpoint: &str) {
    eprintln!("{}", format_geocode_lookup(name, endpoint));
}

pub fn print_geocode_failure(name: &str, error: &crate::geocode::GeocodeError) {
    eprintln!("{}", format_geocode_failure(name, error));
}

pub fn print_check_output(photos: &[Photo]) {
    for line in format_check_output(photos) {
        println!("{line}");
    }
}
