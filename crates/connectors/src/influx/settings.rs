use crate::error::ConnectorError;
use serde::Deserialize;
use std::path::Path;

/// Connection settings for an InfluxDB 2.x backend.
///
/// Read from a TOML file with an `[influx2]` table, the same layout the
/// official client tooling uses:
///
/// ```toml
/// [influx2]
/// url = "http://localhost:8086"
/// token = "my-token"
/// org = "my-org"
/// bucket = "my-bucket"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxSettings {
    pub url: String,
    pub token: String,
    pub org: String,
    /// Default bucket; queries name their bucket explicitly, so this is
    /// informational only.
    #[serde(default)]
    pub bucket: String,
    /// Request timeout in milliseconds applied to every call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    influx2: InfluxSettings,
}

impl InfluxSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let raw = std::fs::read_to_string(path)?;
        let file: SettingsFile = toml::from_str(&raw)?;
        Ok(file.influx2)
    }

    /// Base URL without a trailing slash, so endpoint paths can be appended.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_file() {
        let raw = r#"
            [influx2]
            url = "http://localhost:8086/"
            token = "secret"
            org = "lab"
            bucket = "prototype"
        "#;
        let file: SettingsFile = toml::from_str(raw).unwrap();
        let settings = file.influx2;
        assert_eq!(settings.base_url(), "http://localhost:8086");
        assert_eq!(settings.org, "lab");
        assert_eq!(settings.bucket, "prototype");
        assert_eq!(settings.timeout_ms, 10_000);
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let raw = r#"
            [influx2]
            url = "http://localhost:8086"
            org = "lab"
        "#;
        assert!(toml::from_str::<SettingsFile>(raw).is_err());
    }
}
