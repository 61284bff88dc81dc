use clap::{Parser, Subcommand};
use phototrack::collect::{self, CollectConfig};
use phototrack::extract::ExifReader;
use phototrack::geocode::{PlaceResolver, ResolverConfig};
use phototrack::photo::{self, NamePolicy, Photo};
use phototrack::{kml, output};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "phototrack")]
#[command(about = "Turn a list of geotagged photos into a KML track")]
#[command(long_about = "\
Turn a list of geotagged photos into a KML track

Reads a list of photo filenames (stdin by default, one per line) and
extracts each photo's EXIF capture time and GPS position. The resulting
KML document goes to stdout: one placemark per photo plus a path
connecting them in chronological order.

Pipeline behavior:

  Unreadable paths and undecodable files abort the run; the photo list is
  assumed authoritative, so a bad entry is almost certainly a typo worth
  fixing. Photos that simply lack a timestamp or GPS tag are skipped with
  a warning on stderr. Only the KML document goes to stdout.

Typical usage:

  find ~/photos/trip -name '*.jpg' | phototrack track > trip.kml")]
#[command(version = version_string())]
struct Cli {
    /// Read the photo list from this file instead of stdin
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Use the full input path for placemark names instead of the basename
    #[arg(short = 'a', long, global = true)]
    absolute: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the KML track document
    Track(TrackArgs),
    /// Collect and list photos without generating KML
    Check,
    /// Reverse-geocode a single coordinate
    Resolve(ResolveArgs),
}

#[derive(clap::Args)]
struct TrackArgs {
    /// Write the KML document to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Name placemarks by reverse-geocoded place instead of filename
    #[arg(long)]
    geocode: bool,
}

#[derive(clap::Args)]
struct ResolveArgs {
    /// Latitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    lon: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Track(args) => {
            let mut photos = collect_photos(&cli)?;
            photo::sort_chronological(&mut photos);

            if args.geocode {
                photos = resolve_names(photos)?;
            }

            let document = kml::track_document(&photos)?;
            match &args.output {
                Some(path) => std::fs::write(path, document)?,
                None => print!("{document}"),
            }
        }
        Command::Check => {
            let mut photos = collect_photos(&cli)?;
            photo::sort_chronological(&mut photos);
            output::print_check_output(&photos);
        }
        Command::Resolve(args) => {
            let resolver = PlaceResolver::new(ResolverConfig::default())?;
            let name = resolver.resolve(args.lat, args.lon)?;
            println!("{name}");
        }
    }

    Ok(())
}

/// Run the collect stage over stdin or `--input`, streaming warnings to
/// stderr as they occur.
fn collect_photos(cli: &Cli) -> Result<Vec<Photo>, Box<dyn std::error::Error>> {
    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => {
            output::print_reading_stdin();
            Box::new(BufReader::new(std::io::stdin()))
        }
    };

    let config = CollectConfig {
        names: if cli.absolute {
            NamePolicy::Absolute
        } else {
            NamePolicy::Basename
        },
    };

    let photos = collect::collect(input, &ExifReader::new(), &config, &mut |event| {
        output::print_collect_event(&event)
    })?;
    output::print_summary(photos.len());
    Ok(photos)
}

/// Replace each photo's name with its reverse-geocoded place name.
///
/// Lookups run sequentially, one per photo. A failed lookup keeps the
/// file-derived name and warns; it never aborts the track.
fn resolve_names(photos: Vec<Photo>) -> Result<Vec<Photo>, Box<dyn std::error::Error>> {
    let resolver = PlaceResolver::new(ResolverConfig::default())?;

    Ok(photos
        .into_iter()
        .map(|photo| {
            output::print_geocode_lookup(&photo.name, resolver.endpoint());
            match resolver.resolve(photo.lat, photo.lon) {
                Ok(place) => Photo {
                    name: place,
                    ..photo
                },
                Err(err) => {
                    output::print_geocode_failure(&photo.name, &err);
                    photo
                }
            }
        })
        .collect())
}
