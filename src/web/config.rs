use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::orbit::{ElementConverter, DEFAULT_MASS_KG, EARTH_MU_KM3_S2, EARTH_RADIUS_KM};
use crate::poll::OrbitGenerator;
use crate::stream::StreamSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub body: BodyConfig,
    pub stream: StreamConfig,
    pub poll: PollConfig,
}

/// Central body the elements are expressed around
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub mu_km3_s2: f64,
    pub radius_km: f64,
    pub default_mass_kg: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            mu_km3_s2: EARTH_MU_KM3_S2,
            radius_km: EARTH_RADIUS_KM,
            default_mass_kg: DEFAULT_MASS_KG,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub bind: String,
    pub trajectory_file: PathBuf,
    #[serde(deserialize_with = "deserialize_duration")]
    pub frame_interval: Duration,
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        let settings = StreamSettings::default();
        StreamConfig {
            bind: default_bind(),
            trajectory_file: PathBuf::from("AsteroidTrajectory.txt"),
            frame_interval: settings.frame_interval,
            channel_capacity: settings.channel_capacity,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub bind: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8765".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn converter(&self) -> ElementConverter {
        ElementConverter::new(self.body.mu_km3_s2, self.body.default_mass_kg)
    }

    pub fn generator(&self) -> OrbitGenerator {
        OrbitGenerator::new(
            self.body.mu_km3_s2,
            self.body.radius_km,
            self.body.default_mass_kg,
        )
    }

    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            frame_interval: self.stream.frame_interval,
            channel_capacity: self.stream.channel_capacity,
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.stream.bind, "127.0.0.1:8765");
        assert_eq!(config.poll.bind, "127.0.0.1:8765");
        assert_eq!(config.stream.frame_interval, Duration::from_millis(50));
        assert_eq!(config.body.mu_km3_s2, EARTH_MU_KM3_S2);
        assert_eq!(config.converter(), ElementConverter::default());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let yaml = "
body:
  mu_km3_s2: 42828.37
  radius_km: 3389.5
stream:
  trajectory_file: /data/mars.txt
  frame_interval: 1s 500ms
poll:
  bind: 0.0.0.0:9000
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.body.radius_km, 3389.5);
        assert_eq!(config.body.default_mass_kg, DEFAULT_MASS_KG);
        assert_eq!(config.stream.trajectory_file, PathBuf::from("/data/mars.txt"));
        assert_eq!(config.stream.frame_interval, Duration::from_millis(1500));
        assert_eq!(config.stream.channel_capacity, 16);
        assert_eq!(config.poll.bind, "0.0.0.0:9000");
        assert_eq!(config.converter().mu, 42828.37);
    }

    #[test]
    fn rejects_bad_duration() {
        assert!(matches!(
            Config::from_yaml("stream:\n  frame_interval: soon\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::from_file("/nonexistent/gmat-bridge.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
