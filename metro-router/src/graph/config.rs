//! Graph construction parameters.

/// Environment variable overriding [`GraphConfig::avg_speed_kmh`].
pub const AVG_SPEED_VAR: &str = "METRO_AVG_SPEED_KMH";

/// Environment variable overriding [`GraphConfig::dwell_sec`].
pub const DWELL_VAR: &str = "METRO_DWELL_SEC";

/// Environment variable overriding [`GraphConfig::k_neighbors`].
pub const NEIGHBORS_VAR: &str = "METRO_K_NEIGHBORS";

/// Invalid graph configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("average speed must be positive, got {0} km/h")]
    InvalidSpeed(f64),

    #[error("dwell time must be non-negative, got {0} s")]
    InvalidDwell(f64),

    #[error("neighbor count must be at least 1")]
    InvalidNeighbors,

    #[error("could not parse {key}={value:?}")]
    Parse { key: &'static str, value: String },
}

/// Parameters for turning line groups into weighted edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Commercial speed between stops (km/h).
    pub avg_speed_kmh: f64,

    /// Time added to every edge for stopping (seconds).
    pub dwell_sec: f64,

    /// How many same-line neighbors each station connects to.
    pub k_neighbors: usize,
}

impl GraphConfig {
    /// Create a validated configuration.
    pub fn new(
        avg_speed_kmh: f64,
        dwell_sec: f64,
        k_neighbors: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            avg_speed_kmh,
            dwell_sec,
            k_neighbors,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.avg_speed_kmh.is_finite() && self.avg_speed_kmh > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.avg_speed_kmh));
        }
        if !(self.dwell_sec.is_finite() && self.dwell_sec >= 0.0) {
            return Err(ConfigError::InvalidDwell(self.dwell_sec));
        }
        if self.k_neighbors == 0 {
            return Err(ConfigError::InvalidNeighbors);
        }
        Ok(())
    }

    /// Defaults overridden by whichever variables `lookup` returns.
    ///
    /// `main` passes `std::env::var`; tests pass a map.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(AVG_SPEED_VAR) {
            config.avg_speed_kmh = parse_var(AVG_SPEED_VAR, &v)?;
        }
        if let Some(v) = lookup(DWELL_VAR) {
            config.dwell_sec = parse_var(DWELL_VAR, &v)?;
        }
        if let Some(v) = lookup(NEIGHBORS_VAR) {
            config.k_neighbors = parse_var(NEIGHBORS_VAR, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Travel cost in seconds for a hop of `distance_km`.
    pub fn edge_cost(&self, distance_km: f64) -> f64 {
        (distance_km / self.avg_speed_kmh) * 3600.0 + self.dwell_sec
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            avg_speed_kmh: 35.0,
            dwell_sec: 30.0,
            k_neighbors: 4,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Parse {
        key,
        value: value.to_string(),
    })
}
