//! Application-level configuration loading: theater layout, pricing, pre-booking and the
//! knobs driving the simulated backend behavior.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::state::{
    latency::ArtificialDelay,
    seat_map::{PrebookingPolicy, SeatLayout},
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SEAT_BOOKING_BACK_CONFIG_PATH";

/// How the booked check and the booking mutation relate under concurrent requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    /// The booked flag is read before the artificial delay and never re-checked, so two
    /// concurrent requests for one seat may both succeed.
    #[default]
    Racy,
    /// Check and mutation of a seat happen under a per-seat lock.
    Atomic,
}

/// Simulated backend failures injected into otherwise valid bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureSimulation {
    /// Every other valid booking attempt fails with a transient server error.
    #[default]
    Alternating,
    /// Valid bookings always succeed.
    Disabled,
}

#[derive(Debug, Clone, Validate)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    #[validate(range(min = 1, max = 26))]
    pub num_of_rows: u8,
    #[validate(range(min = 1))]
    pub seats_per_row: u16,
    pub base_price: i64,
    pub price_increment_per_row: i64,
    #[validate(custom(function = "validate_prebooking"))]
    pub prebooking: PrebookingPolicy,
    #[validate(nested)]
    pub availability_delay: ArtificialDelay,
    #[validate(nested)]
    pub booking_delay: ArtificialDelay,
    pub booking_mode: BookingMode,
    pub failure_simulation: FailureSimulation,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        rows = app_config.num_of_rows,
                        seats_per_row = app_config.seats_per_row,
                        mode = ?app_config.booking_mode,
                        "loaded seat map configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "invalid config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON document. Omitted fields take their default value.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        let app_config: Self = raw.into();
        app_config.validate()?;
        Ok(app_config)
    }

    /// Theater dimensions and pricing.
    pub fn layout(&self) -> SeatLayout {
        SeatLayout {
            num_of_rows: self.num_of_rows,
            seats_per_row: self.seats_per_row,
            base_price: self.base_price,
            price_increment_per_row: self.price_increment_per_row,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            num_of_rows: 8,
            seats_per_row: 12,
            base_price: 225,
            price_increment_per_row: -10,
            prebooking: PrebookingPolicy::default(),
            availability_delay: ArtificialDelay::fixed(750),
            booking_delay: ArtificialDelay::between(0, 3000),
            booking_mode: BookingMode::default(),
            failure_simulation: FailureSimulation::default(),
        }
    }
}

/// Failure to turn a configuration document into an [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    num_of_rows: Option<u8>,
    seats_per_row: Option<u16>,
    base_price: Option<i64>,
    price_increment_per_row: Option<i64>,
    prebooking: Option<PrebookingPolicy>,
    availability_delay: Option<ArtificialDelay>,
    booking_delay: Option<ArtificialDelay>,
    booking_mode: Option<BookingMode>,
    failure_simulation: Option<FailureSimulation>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            num_of_rows: value.num_of_rows.unwrap_or(defaults.num_of_rows),
            seats_per_row: value.seats_per_row.unwrap_or(defaults.seats_per_row),
            base_price: value.base_price.unwrap_or(defaults.base_price),
            price_increment_per_row: value
                .price_increment_per_row
                .unwrap_or(defaults.price_increment_per_row),
            prebooking: value.prebooking.unwrap_or(defaults.prebooking),
            availability_delay: value
                .availability_delay
                .unwrap_or(defaults.availability_delay),
            booking_delay: value.booking_delay.unwrap_or(defaults.booking_delay),
            booking_mode: value.booking_mode.unwrap_or(defaults.booking_mode),
            failure_simulation: value
                .failure_simulation
                .unwrap_or(defaults.failure_simulation),
        }
    }
}

fn validate_prebooking(policy: &PrebookingPolicy) -> Result<(), ValidationError> {
    match policy {
        PrebookingPolicy::Probability { probability } if !(0.0..=1.0).contains(probability) => {
            let mut err = ValidationError::new("prebooking_probability");
            err.message =
                Some(format!("probability must lie within [0, 1] (got {probability})").into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.num_of_rows, 8);
        assert_eq!(config.seats_per_row, 12);
        assert_eq!(config.base_price, 225);
        assert_eq!(config.price_increment_per_row, -10);
        assert_eq!(
            config.prebooking,
            PrebookingPolicy::Probability { probability: 0.4 }
        );
        assert_eq!(config.booking_delay, ArtificialDelay::between(0, 3000));
        assert_eq!(config.booking_mode, BookingMode::Racy);
        assert_eq!(config.failure_simulation, FailureSimulation::Alternating);
    }

    #[test]
    fn full_document_is_honored() {
        let config = AppConfig::from_json(
            r#"{
                "num_of_rows": 4,
                "seats_per_row": 6,
                "base_price": 400,
                "price_increment_per_row": -35,
                "prebooking": { "policy": "fixed_count", "count": 30 },
                "availability_delay": { "min_ms": 0, "max_ms": 3000 },
                "booking_delay": { "min_ms": 0, "max_ms": 0 },
                "booking_mode": "atomic",
                "failure_simulation": "disabled"
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout().price_for_row(3), 295);
        assert_eq!(config.prebooking, PrebookingPolicy::FixedCount { count: 30 });
        assert_eq!(config.booking_delay, ArtificialDelay::NONE);
        assert_eq!(config.booking_mode, BookingMode::Atomic);
        assert_eq!(config.failure_simulation, FailureSimulation::Disabled);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for doc in [
            r#"{ "num_of_rows": 0 }"#,
            r#"{ "num_of_rows": 27 }"#,
            r#"{ "seats_per_row": 0 }"#,
            r#"{ "prebooking": { "policy": "probability", "probability": 1.5 } }"#,
            r#"{ "booking_delay": { "min_ms": 10, "max_ms": 1 } }"#,
        ] {
            assert!(
                matches!(AppConfig::from_json(doc), Err(ConfigError::Invalid(_))),
                "{doc} should be invalid"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "rows": 8 }"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
