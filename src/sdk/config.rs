use crate::sdk::maps::model::{Position, SearchRadius};
use crate::sdk::maps::provider::remote::{DEFAULT_BASE_URL, DEFAULT_GEOLOCATION_URL};
use crate::sdk::util::rate_limit::DEFAULT_REQUESTS_PER_SECOND;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const BASE_URL_VAR: &str = "GOOGLE_MAPS_BASE_URL";
pub const GEOLOCATION_URL_VAR: &str = "GOOGLE_GEOLOCATION_URL";
pub const FALLBACK_LAT_VAR: &str = "CHARGEPARK_FALLBACK_LAT";
pub const FALLBACK_LNG_VAR: &str = "CHARGEPARK_FALLBACK_LNG";
pub const RADIUS_VAR: &str = "CHARGEPARK_RADIUS";
pub const RATE_LIMIT_VAR: &str = "CHARGEPARK_REQUESTS_PER_SECOND";

/// City-centre default used whenever the device cannot report a position.
pub const DEFAULT_FALLBACK: Position = Position::new(22.5950, 88.4790);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub api_key: String,
    pub base_url: String,
    pub geolocation_url: String,
    pub fallback: Position,
    pub radius: SearchRadius,
    pub requests_per_second: NonZeroU32,
}

impl MapsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let latitude = parse_or(&lookup, FALLBACK_LAT_VAR, DEFAULT_FALLBACK.latitude)?;
        let longitude = parse_or(&lookup, FALLBACK_LNG_VAR, DEFAULT_FALLBACK.longitude)?;
        let fallback = Position::new(latitude, longitude);
        if !fallback.is_valid() {
            return Err(ConfigError::Invalid {
                key: FALLBACK_LAT_VAR,
                value: fallback.to_string(),
            });
        }

        let radius = SearchRadius::new(parse_or(
            &lookup,
            RADIUS_VAR,
            SearchRadius::DEFAULT.meters(),
        )?);

        Ok(Self {
            api_key,
            base_url: lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            geolocation_url: lookup(GEOLOCATION_URL_VAR)
                .unwrap_or_else(|| DEFAULT_GEOLOCATION_URL.to_string()),
            fallback,
            radius,
            requests_per_second: parse_or(&lookup, RATE_LIMIT_VAR, DEFAULT_REQUESTS_PER_SECOND)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
