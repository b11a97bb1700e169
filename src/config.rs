use log::info;
use std::env;
use std::ops::RangeInclusive;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "Admin123!";
const DEFAULT_ROOM_IDS: [i32; 3] = [1, 2, 3];
const DEFAULT_SENSOR_TYPE: &str = "DHT22";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API_BASE_URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("invalid room id '{0}' in ROOM_IDS")]
    InvalidRoomId(String),
    #[error("ROOM_IDS does not contain any room")]
    NoRooms,
    #[error("unknown ANOMALY_POLICY '{0}', expected 'mixed' or 'hot-humid'")]
    UnknownPolicy(String),
    #[error("ANOMALY_PROBABILITY must be a number between 0 and 1, got '{0}'")]
    InvalidProbability(String),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// How anomalous readings are shaped once the anomaly coin comes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyPolicy {
    /// Temperature-only, humidity-only or both, each with probability 1/3.
    /// Single-value excursions go either direction with probability 1/2.
    Mixed,
    /// Always hot and humid together.
    HotHumid,
}

impl AnomalyPolicy {
    /// Per-reading trigger probability used when none is configured
    pub fn default_probability(&self) -> f64 {
        match self {
            AnomalyPolicy::Mixed => 0.5,
            AnomalyPolicy::HotHumid => 0.1,
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mixed" => Ok(AnomalyPolicy::Mixed),
            "hot-humid" | "hot_humid" | "hothumid" => Ok(AnomalyPolicy::HotHumid),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Value ranges readings are drawn from
#[derive(Debug, Clone)]
pub struct ReadingRanges {
    pub normal_temperature: RangeInclusive<f64>,
    pub normal_humidity: RangeInclusive<f64>,
    pub hot: RangeInclusive<f64>,
    pub cold: RangeInclusive<f64>,
    pub humid: RangeInclusive<f64>,
    pub dry: RangeInclusive<f64>,
}

impl Default for ReadingRanges {
    fn default() -> Self {
        ReadingRanges {
            normal_temperature: 18.0..=24.0,
            normal_humidity: 30.0..=60.0,
            hot: 27.0..=32.0,
            cold: 12.0..=17.5,
            humid: 65.0..=80.0,
            dry: 15.0..=29.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub api_base_url: Url,
    pub credentials: Credentials,
    pub room_ids: Vec<i32>,
    pub sensor_type: String,
    pub ranges: ReadingRanges,
    pub anomaly_policy: AnomalyPolicy,
    pub anomaly_probability: f64,
}

impl SimulatorConfig {
    /// Load configuration from the process environment and an optional `.env` file
    ///
    /// Every variable is optional. With none set, the simulator runs against
    /// `http://localhost:5000/api` as `admin`, for rooms 1, 2 and 3, with `DHT22`
    /// readings and the mixed anomaly policy at 50%.
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;

        info!("API base URL: {}", config.api_base_url);
        info!("Simulating rooms: {:?}", config.room_ids);
        info!(
            "Anomaly policy: {:?} at {:.0}% per reading",
            config.anomaly_policy,
            config.anomaly_probability * 100.0
        );

        Ok(config)
    }

    /// Build a configuration from a variable lookup, applying defaults for
    /// anything unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = parse_base_url(&raw_url)?;

        let credentials = Credentials {
            username: lookup("API_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: lookup("API_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        };

        let room_ids = match lookup("ROOM_IDS") {
            Some(value) => parse_room_ids(&value)?,
            None => DEFAULT_ROOM_IDS.to_vec(),
        };

        let sensor_type = lookup("SENSOR_TYPE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SENSOR_TYPE.to_string());

        let anomaly_policy = match lookup("ANOMALY_POLICY") {
            Some(value) => AnomalyPolicy::parse(&value)?,
            None => AnomalyPolicy::Mixed,
        };

        let anomaly_probability = match lookup("ANOMALY_PROBABILITY") {
            Some(value) => parse_probability(&value)?,
            None => anomaly_policy.default_probability(),
        };

        Ok(SimulatorConfig {
            api_base_url,
            credentials,
            room_ids,
            sensor_type,
            ranges: ReadingRanges::default(),
            anomaly_policy,
            anomaly_probability,
        })
    }
}

/// Parse the base URL, making sure its path ends with '/' so endpoint joins
/// keep the path prefix
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash).map_err(|source| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        source,
    })
}

fn parse_room_ids(value: &str) -> Result<Vec<i32>, ConfigError> {
    let mut rooms = Vec::new();
    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidRoomId(part.to_string()))?;
        rooms.push(id);
    }

    if rooms.is_empty() {
        return Err(ConfigError::NoRooms);
    }
    Ok(rooms)
}

fn parse_probability(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(p) if (0.0..=1.0).contains(&p) => Ok(p),
        _ => Err(ConfigError::InvalidProbability(value.to_string())),
    }
}
