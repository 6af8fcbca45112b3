//! Configuration parsing for the console.
//!
//! This module owns translation of CLI arguments and `AIRMAP_*` environment
//! variables into a `ConsoleConfig` struct which the server and the embedded
//! page use without re-parsing flags. Flags win over environment variables,
//! which win over the built-in defaults.

use std::str::FromStr;

use anyhow::{Result, bail};
use clap::Parser;
use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/light-v10";
const DEFAULT_SOURCE_URL: &str = "mapbox://mapbox.04w69w5j";
const DEFAULT_SOURCE_LAYER: &str = "ne_10m_airports";
const DEFAULT_KEY_PROPERTY: &str = "iata_code";
const DEFAULT_LONGITUDE: f64 = 20.0;
const DEFAULT_LATITUDE: f64 = -4.0;
const DEFAULT_ZOOM: f64 = 4.8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} in environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
/// Canonical configuration shared by the server and the embedded page.
pub struct ConsoleConfig {
    /// Listen address for the HTTP server.
    pub bind: String,
    /// Tile provider access token; may be empty for token-free styles.
    pub access_token: String,
    /// Map style URL handed to the page.
    pub style_url: String,
    /// Vector tile source URL carrying the airport layer.
    pub source_url: String,
    /// Named layer inside the vector source.
    pub source_layer: String,
    /// Feature property used as the dedup and filter key.
    pub key_property: String,
    /// Initial map center longitude.
    pub longitude: f64,
    /// Initial map center latitude.
    pub latitude: f64,
    /// Initial map zoom level.
    pub zoom: f64,
    /// Emit verbose logging (per-event listing sizes).
    pub verbose: bool,
}

/// CLI arguments accepted by the `serve` subcommand.
#[derive(Debug, Parser)]
#[command(name = "serve", about = "Start the airport map console")]
pub struct ConsoleCliArgs {
    /// Listen address, host:port.
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,
    /// Tile provider access token.
    #[arg(long = "token", value_name = "TOKEN")]
    pub access_token: Option<String>,
    /// Map style URL.
    #[arg(long = "style", value_name = "URL")]
    pub style_url: Option<String>,
    /// Vector tile source URL.
    #[arg(long = "source", value_name = "URL")]
    pub source_url: Option<String>,
    /// Source layer holding airport points.
    #[arg(long = "source-layer", value_name = "NAME")]
    pub source_layer: Option<String>,
    /// Feature property used as the dedup and filter key.
    #[arg(long = "key-property", value_name = "NAME")]
    pub key_property: Option<String>,
    /// Initial center longitude.
    #[arg(long = "lon", value_name = "DEG")]
    pub longitude: Option<f64>,
    /// Initial center latitude.
    #[arg(long = "lat", value_name = "DEG")]
    pub latitude: Option<f64>,
    /// Initial zoom level.
    #[arg(long = "zoom", value_name = "LEVEL")]
    pub zoom: Option<f64>,
    /// Enable verbose logging.
    #[arg(long = "verbose", action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Read an `AIRMAP_*` override, failing loudly on unparseable values instead
/// of silently falling back.
fn env_override<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::InvalidEnv { key, value: raw }),
        },
        Err(_) => Ok(None),
    }
}

impl TryFrom<ConsoleCliArgs> for ConsoleConfig {
    type Error = anyhow::Error;

    fn try_from(args: ConsoleCliArgs) -> Result<Self> {
        let bind = args
            .bind
            .or(env_override("AIRMAP_BIND")?)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let access_token = args
            .access_token
            .or(env_override("AIRMAP_TOKEN")?)
            .unwrap_or_default();
        let style_url = args
            .style_url
            .or(env_override("AIRMAP_STYLE")?)
            .unwrap_or_else(|| DEFAULT_STYLE_URL.to_string());
        let source_url = args
            .source_url
            .or(env_override("AIRMAP_SOURCE")?)
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let source_layer = args
            .source_layer
            .or(env_override("AIRMAP_SOURCE_LAYER")?)
            .unwrap_or_else(|| DEFAULT_SOURCE_LAYER.to_string());
        let key_property = args
            .key_property
            .or(env_override("AIRMAP_KEY_PROPERTY")?)
            .unwrap_or_else(|| DEFAULT_KEY_PROPERTY.to_string());
        let longitude = args
            .longitude
            .or(env_override("AIRMAP_LON")?)
            .unwrap_or(DEFAULT_LONGITUDE);
        let latitude = args
            .latitude
            .or(env_override("AIRMAP_LAT")?)
            .unwrap_or(DEFAULT_LATITUDE);
        let zoom = args
            .zoom
            .or(env_override("AIRMAP_ZOOM")?)
            .unwrap_or(DEFAULT_ZOOM);

        if source_layer.is_empty() {
            bail!("--source-layer must not be empty");
        }
        if key_property.is_empty() {
            bail!("--key-property must not be empty");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            bail!("--lon must be within [-180, 180]");
        }
        if !(-90.0..=90.0).contains(&latitude) {
            bail!("--lat must be within [-90, 90]");
        }
        if !(0.0..=24.0).contains(&zoom) {
            bail!("--zoom must be within [0, 24]");
        }

        Ok(Self {
            bind,
            access_token,
            style_url,
            source_url,
            source_layer,
            key_property,
            longitude,
            latitude,
            zoom,
            verbose: args.verbose,
        })
    }
}

impl ConsoleConfig {
    /// Build a configuration from environment variables and defaults alone,
    /// used when the binary runs without a subcommand.
    pub fn from_env() -> Result<Self> {
        Self::try_from(ConsoleCliArgs {
            bind: None,
            access_token: None,
            style_url: None,
            source_url: None,
            source_layer: None,
            key_property: None,
            longitude: None,
            latitude: None,
            zoom: None,
            verbose: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ConsoleCliArgs {
        ConsoleCliArgs::parse_from(args)
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let config = ConsoleConfig::try_from(parse(&["serve"])).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.source_layer, "ne_10m_airports");
        assert_eq!(config.key_property, "iata_code");
        assert_eq!(config.zoom, DEFAULT_ZOOM);
        assert!(config.access_token.is_empty());
        assert!(!config.verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ConsoleConfig::try_from(parse(&[
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--key-property",
            "abbrev",
            "--zoom",
            "3.5",
            "--verbose",
        ]))
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.key_property, "abbrev");
        assert_eq!(config.zoom, 3.5);
        assert!(config.verbose);
    }

    #[test]
    fn out_of_range_center_is_rejected() {
        assert!(ConsoleConfig::try_from(parse(&["serve", "--lat", "123.0"])).is_err());
        assert!(ConsoleConfig::try_from(parse(&["serve", "--lon", "181.0"])).is_err());
        assert!(ConsoleConfig::try_from(parse(&["serve", "--zoom", "99"])).is_err());
    }
}
