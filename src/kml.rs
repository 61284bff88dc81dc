//! KML track serialization.
//!
//! Renders the ordered photo set as a KML document: one `Placemark` per
//! photo (name, `TimeStamp/when`, `Point`) followed by a single `Path`
//! placemark whose `LineString` connects every coordinate in chronological
//! order. See <https://developers.google.com/kml/documentation/kml_tut#paths>.
//!
//! The serializer trusts its input: no reordering, no deduplication, no
//! range checks on coordinates. A zero-photo set still yields a complete
//! document with an empty path geometry.
//!
//! Coordinates render as `longitude,latitude` with six fixed decimal
//! digits, never scientific notation. Names pass through XML text escaping
//! (`quick-xml` escapes the reserved characters on write).

use crate::photo::Photo;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("failed to write KML: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write KML: {0}")]
    Xml(#[from] quick_xml::Error),
}

const KML_NS: &str = "http://www.opengis.net/kml/2.2";
const GX_NS: &str = "http://www.google.com/kml/ext/2.2";

/// Render the photo set as a KML document string.
///
/// Callers decide where the document goes; building it in full before any
/// byte reaches the output stream is what keeps fatal upstream errors from
/// leaving a partial document behind.
pub fn track_document(photos: &[Photo]) -> Result<String, SerializeError> {
    let mut writer = Writer::new(Vec::new());
    write_track(&mut writer, photos)?;
    // The writer only ever emits UTF-8.
    Ok(String::from_utf8(writer.into_inner()).unwrap_or_default())
}

fn write_track<W: Write>(writer: &mut Writer<W>, photos: &[Photo]) -> Result<(), SerializeError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NS));
    kml.push_attribute(("xmlns:gx", GX_NS));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;

    for photo in photos {
        write_placemark(writer, photo)?;
    }
    write_path(writer, photos)?;

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;
    Ok(())
}

/// One photo placemark: escaped name, capture time, single-point geometry.
fn write_placemark<W: Write>(writer: &mut Writer<W>, photo: &Photo) -> Result<(), SerializeError> {
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "name", &photo.name)?;

    writer.write_event(Event::Start(BytesStart::new("TimeStamp")))?;
    text_element(writer, "when", &format_when(photo))?;
    writer.write_event(Event::End(BytesEnd::new("TimeStamp")))?;

    writer.write_event(Event::Start(BytesStart::new("Point")))?;
    text_element(writer, "coordinates", &format_coordinate(photo))?;
    writer.write_event(Event::End(BytesEnd::new("Point")))?;

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

/// The trailing `Path` placemark connecting all photos in order.
fn write_path<W: Write>(writer: &mut Writer<W>, photos: &[Photo]) -> Result<(), SerializeError> {
    let coordinates = photos
        .iter()
        .map(format_coordinate)
        .collect::<Vec<_>>()
        .join(" ");

    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "name", "Path")?;
    writer.write_event(Event::Start(BytesStart::new("LineString")))?;
    text_element(writer, "coordinates", &coordinates)?;
    writer.write_event(Event::End(BytesEnd::new("LineString")))?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), SerializeError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// `longitude,latitude` with fixed six-digit precision, longitude first.
pub fn format_coordinate(photo: &Photo) -> String {
    format!("{:.6},{:.6}", photo.lon, photo.lat)
}

/// Capture time as a `YYYY-MM-DDTHH:MM:SSZ` string.
pub fn format_when(photo: &Photo) -> String {
    photo.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
