//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Error for an environment variable with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {value}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Directory holding the GeoJSON datasets.
    pub data_dir: PathBuf,

    /// Stop points file name, relative to `data_dir`.
    pub stops_file: String,

    /// Corridor lines file name, relative to `data_dir`.
    pub corridors_file: String,

    pub bind: SocketAddr,

    /// Static assets served under `/static`, if set.
    pub static_dir: Option<PathBuf>,

    /// Fixed seed for the slime-mould search.
    pub sma_seed: Option<u64>,
}

impl ServerConfig {
    /// Read `TRANSIT_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let set = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind = match set("TRANSIT_BIND") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError {
                var: "TRANSIT_BIND",
                value,
            })?,
            None => defaults.bind,
        };

        let sma_seed = set("TRANSIT_SMA_SEED")
            .map(|value| {
                value.trim().parse().map_err(|_| ConfigError {
                    var: "TRANSIT_SMA_SEED",
                    value,
                })
            })
            .transpose()?;

        Ok(Self {
            data_dir: set("TRANSIT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            stops_file: set("TRANSIT_STOPS_FILE").unwrap_or(defaults.stops_file),
            corridors_file: set("TRANSIT_CORRIDORS_FILE").unwrap_or(defaults.corridors_file),
            bind,
            static_dir: set("TRANSIT_STATIC_DIR").map(PathBuf::from),
            sma_seed,
        })
    }

    pub fn stops_path(&self) -> PathBuf {
        self.data_dir.join(&self.stops_file)
    }

    pub fn corridors_path(&self) -> PathBuf {
        self.data_dir.join(&self.corridors_file)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            stops_file: "stops.geojson".to_string(),
            corridors_file: "corridors.geojson".to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            sma_seed: None,
        }
    }
}
