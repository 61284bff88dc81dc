//! Reverse geocoding against a Nominatim-style service.
//!
//! Optional enrichment: turn a coordinate into a human-readable place
//! name. Lives entirely outside the core pipeline; a failed lookup is an
//! error for that single coordinate and never aborts track generation.
//!
//! The HTTP client is built explicitly from a [`ResolverConfig`] and owned
//! by the [`PlaceResolver`] value. No process-global client state: tests
//! construct resolvers against their own base URL, and every timeout is an
//! ordinary construction parameter. No retries either; one request per
//! resolution, bounded by the configured timeouts.

use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("reverse-geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream server returned HTTP status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("upstream response carries no display name")]
    NoDisplayName,
}

/// Construction parameters for a [`PlaceResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Endpoint queried with `format=json&lat=..&lon=..&zoom=..`.
    pub base_url: String,
    /// Nominatim zoom level; 12 trades street-level noise for town names.
    pub zoom: u8,
    /// Sent on every request, as the Nominatim usage policy requires.
    pub user_agent: String,
    /// TCP connect (and TLS handshake) bound.
    pub connect_timeout: Duration,
    /// Bound on each read of the response, headers included.
    pub read_timeout: Duration,
    /// Bound on the whole request, connect to last body byte.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            zoom: 12,
            user_agent: concat!("phototrack/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

/// Reverse-geocoding client for one configured endpoint.
#[derive(Debug)]
pub struct PlaceResolver {
    client: Client,
    config: ResolverConfig,
}

impl PlaceResolver {
    pub fn new(config: ResolverConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// The endpoint this resolver queries.
    pub fn endpoint(&self) -> &str {
        &self.config.base_url
    }

    /// Resolve a coordinate to a display name.
    ///
    /// Any non-success status, timeout, or malformed body is an error for
    /// this single coordinate only.
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<String, GeocodeError> {
        let response = self.client.execute(self.request(lat, lon)?)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(GeocodeError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body: NominatimResponse = response.json()?;
        body.display_name
            .filter(|name| !name.is_empty())
            .ok_or(GeocodeError::NoDisplayName)
    }

    fn request(&self, lat: f64, lon: f64) -> Result<Request, GeocodeError> {
        Ok(self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("zoom", self.config.zoom.to_string()),
            ])
            .build()?)
    }
}
