use crate::{
    error::SettingsError,
    flux::DEFAULT_FILTER,
    window::{DEFAULT_TIME_FORMAT, DeltaTime},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Query parameters for one extraction, typically the `[query]` table of the
/// application configuration file.
///
/// Immutable once constructed. Unknown keys are rejected at parse time so a
/// typo in a config file fails loudly instead of silently using a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuerySettings {
    /// strftime pattern used both to parse the base query time and to
    /// format the window boundaries.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Offset added to the (timezone-shifted) base time for the window
    /// start, as `[days, hours, minutes, seconds]`.
    #[serde(default)]
    pub delta_time_start: DeltaTime,

    /// Offset added to the (timezone-shifted) base time for the window end.
    #[serde(default)]
    pub delta_time_end: DeltaTime,

    /// Whole hours added to the base time before the deltas apply.
    #[serde(default)]
    pub tz_offset: i64,

    /// Bucket to read; must be set for the query to return anything useful.
    #[serde(default)]
    pub bucket: String,

    /// Columns removed from the result table after the query, best-effort.
    #[serde(default)]
    pub columns_to_drop: Vec<String>,

    /// Flux predicate inserted verbatim into the generated query.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for QuerySettings {
    fn default() -> Self {
        QuerySettings {
            time_format: default_time_format(),
            delta_time_start: DeltaTime::default(),
            delta_time_end: DeltaTime::default(),
            tz_offset: 0,
            bucket: String::new(),
            columns_to_drop: Vec::new(),
            filter: default_filter(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Path to the TOML file holding the backend connection settings.
    pub connection: String,

    #[serde(default)]
    pub query: QuerySettings,
}

/// Loads an application configuration file, dispatching on the extension.
///
/// Supports `.toml`, `.yaml`/`.yml` and `.json`. A missing file is an
/// explicit error rather than an empty default.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, SettingsError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SettingsError::FileNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match extension {
        "toml" => Ok(toml::from_str(&raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&raw)?),
        "json" => Ok(serde_json::from_str(&raw)?),
        other => Err(SettingsError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOML_CONFIG: &str = r#"
connection = "config/influxdb.toml"

[query]
bucket = "prototype"
delta_time_start = [0, -1, 0, 0]
delta_time_end = [0, 1, 0, 0]
tz_offset = -8
columns_to_drop = ["result", "table"]
filter = 'r["_measurement"] == "temperature"'
"#;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(".toml", TOML_CONFIG);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.connection, "config/influxdb.toml");
        assert_eq!(config.query.bucket, "prototype");
        assert_eq!(config.query.delta_time_start, DeltaTime::new(0, -1, 0, 0));
        assert_eq!(config.query.tz_offset, -8);
        assert_eq!(config.query.columns_to_drop, vec!["result", "table"]);
        // Defaults for keys the file leaves out.
        assert_eq!(config.query.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
connection: config/influxdb.toml
query:
  bucket: prototype
  delta_time_end: [0, 0, 30, 0]
"#;
        let file = write_temp(".yaml", yaml);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.query.bucket, "prototype");
        assert_eq!(config.query.delta_time_end, DeltaTime::new(0, 0, 30, 0));
        assert_eq!(config.query.filter, DEFAULT_FILTER);
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{"connection": "c.toml", "query": {"bucket": "b"}}"#;
        let file = write_temp(".json", json);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.query.bucket, "b");
    }

    #[test]
    fn test_missing_file_is_explicit_error() {
        let err = load_config("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, SettingsError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "whatever");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unknown_query_key_is_rejected() {
        let toml = r#"
connection = "c.toml"

[query]
buckit = "typo"
"#;
        assert!(load_config(write_temp(".toml", toml).path()).is_err());
    }
}
