//! Configuration models and loaders for qspace.
//!
//! Two kinds of files are understood:
//!
//! - simulation configs: a propagation window (Unix seconds) plus the initial
//!   Cartesian state, stored either as TOML/YAML or in the legacy whitespace
//!   layout `start stop` / `x y z vx vy vz` shared with the propagator;
//! - central-body catalogs: name, gravitational parameter and radius, loaded
//!   from a YAML list, a single TOML file, or a directory of TOML files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use qspace_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2};
use qspace_epoch::{CalendarTimestamp, EpochError, julian_date_from_unix};
use qspace_orbits::CartesianState;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Number of whitespace-separated values in a legacy simulation config.
const LEGACY_VALUE_COUNT: usize = 8;

/// Gravitating body that the orbit conversions are evaluated around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    pub name: String,
    pub mu_km3_s2: f64,
    pub radius_km: f64,
}

impl CentralBody {
    /// Earth with the standard gravitational parameter 398600.4418 km³/s².
    pub fn earth() -> Self {
        Self {
            name: "Earth".to_string(),
            mu_km3_s2: MU_EARTH_KM3_S2,
            radius_km: EARTH_RADIUS_KM,
        }
    }
}

/// Propagation window and initial state handed to the external propagator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Window start, Unix seconds (UTC).
    pub start_unix: i64,
    /// Window end, Unix seconds (UTC).
    pub stop_unix: i64,
    pub initial_state: CartesianState,
}

impl SimulationConfig {
    pub fn duration_seconds(&self) -> i64 {
        self.stop_unix - self.start_unix
    }

    pub fn start_epoch(&self) -> Result<CalendarTimestamp, EpochError> {
        CalendarTimestamp::from_unix_seconds(self.start_unix)
    }

    pub fn stop_epoch(&self) -> Result<CalendarTimestamp, EpochError> {
        CalendarTimestamp::from_unix_seconds(self.stop_unix)
    }

    /// Julian Dates of the window start and end.
    pub fn julian_window(&self) -> Result<(f64, f64), EpochError> {
        Ok((
            julian_date_from_unix(self.start_unix)?,
            julian_date_from_unix(self.stop_unix)?,
        ))
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.stop_unix < self.start_unix {
            return Err(ConfigError::InvalidWindow {
                start: self.start_unix,
                stop: self.stop_unix,
            });
        }
        Ok(self)
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("legacy simulation config needs {expected} values, found {found}")]
    ValueCount { expected: usize, found: usize },
    #[error("value {index} (`{token}`) is not a number")]
    InvalidNumber { index: usize, token: String },
    #[error("simulation stop {stop} precedes start {start}")]
    InvalidWindow { start: i64, stop: i64 },
    #[error("body `{0}` must have a finite, positive gravitational parameter")]
    InvalidBody(String),
    #[error("body `{0}` not found in catalog")]
    UnknownBody(String),
}

/// Load a simulation config, choosing the format by file extension.
///
/// `.toml` and `.yaml`/`.yml` files are deserialized directly; anything else
/// is read as the legacy whitespace layout.
pub fn load_simulation<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    let path = path.as_ref();
    let config = match extension(path).as_deref() {
        Some("toml") => toml::from_str(&fs::read_to_string(path)?)?,
        Some("yaml" | "yml") => serde_yaml::from_reader(File::open(path)?)?,
        _ => parse_legacy_simulation(&fs::read_to_string(path)?)?,
    };
    debug!(path = %path.display(), "loaded simulation config");
    config.validate()
}

/// Write a simulation config in the legacy whitespace layout.
pub fn save_simulation<P: AsRef<Path>>(
    path: P,
    config: &SimulationConfig,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    fs::write(path, format_legacy_simulation(config))?;
    debug!(path = %path.display(), "saved simulation config");
    Ok(())
}

/// Parse `start stop x y z vx vy vz` separated by arbitrary whitespace.
pub fn parse_legacy_simulation(contents: &str) -> Result<SimulationConfig, ConfigError> {
    let tokens: Vec<&str> = contents.split_whitespace().collect();
    if tokens.len() != LEGACY_VALUE_COUNT {
        return Err(ConfigError::ValueCount {
            expected: LEGACY_VALUE_COUNT,
            found: tokens.len(),
        });
    }

    let mut values = [0.0_f64; LEGACY_VALUE_COUNT];
    for (index, (slot, token)) in values.iter_mut().zip(&tokens).enumerate() {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ConfigError::InvalidNumber {
                index,
                token: token.to_string(),
            })?;
    }

    // Epochs are whole seconds; fractional parts are dropped like the propagator does.
    SimulationConfig {
        start_unix: values[0] as i64,
        stop_unix: values[1] as i64,
        initial_state: CartesianState::new(
            [values[2], values[3], values[4]],
            [values[5], values[6], values[7]],
        ),
    }
    .validate()
}

/// Render the legacy layout: epochs on the first line, six state values on the second.
pub fn format_legacy_simulation(config: &SimulationConfig) -> String {
    let r = &config.initial_state.position_km;
    let v = &config.initial_state.velocity_km_s;
    format!(
        "{} {}\n{:.6} {:.6} {:.6} {:.6} {:.6} {:.6}\n",
        config.start_unix, config.stop_unix, r[0], r[1], r[2], v[0], v[1], v[2]
    )
}

/// Load central-body definitions from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<CentralBody>, ConfigError> {
    let bodies: Vec<CentralBody> = load_records(path)?;
    for body in &bodies {
        if !(body.mu_km3_s2.is_finite() && body.mu_km3_s2 > 0.0) {
            return Err(ConfigError::InvalidBody(body.name.clone()));
        }
    }
    debug!(count = bodies.len(), "loaded central bodies");
    Ok(bodies)
}

/// Case-insensitive lookup by body name.
pub fn find_body<'a>(bodies: &'a [CentralBody], name: &str) -> Result<&'a CentralBody, ConfigError> {
    bodies
        .iter()
        .find(|body| body.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if extension(path).as_deref() == Some("toml") {
        let contents = fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| extension(path).as_deref() == Some("toml"))
        .collect();
    entries.sort();
    for path in entries {
        let contents = fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
