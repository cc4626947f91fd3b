//! File readers for the mount phase. Every reader treats a missing file as
//! "nothing configured" and reports anything else as a `LoadError`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::*;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed RON in {path}: {source}")]
    Ron {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LoadError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    ron::from_str(&text).map(Some).map_err(|source| LoadError::Ron {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text).map(Some).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<Option<GardenConfig>, LoadError> {
    load_ron(path)
}

pub fn load_snapshot(path: &Path) -> Result<Option<ProductivitySnapshot>, LoadError> {
    load_json(path)
}

pub fn load_weather(path: &Path) -> Result<Option<WeatherReport>, LoadError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("focus-garden-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("focus-garden-does-not-exist.ron");
        assert!(load_config(&path).unwrap().is_none());
        assert!(load_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let path = scratch("partial.ron", "(min_flowers: 8, latitude: Some(-33.9))");
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.min_flowers, 8);
        assert_eq!(config.latitude, Some(-33.9));
        assert_eq!(config.max_event_flowers, GardenConfig::default().max_event_flowers);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let path = scratch("broken.ron", "(min_flowers: ");
        assert!(matches!(load_config(&path), Err(LoadError::Ron { .. })));
    }

    #[test]
    fn test_snapshot_json() {
        let path = scratch(
            "today.json",
            r#"{
                "tasks": [
                    {"id": "a", "completed_at": "2026-04-02T09:30:00Z", "priority": "high", "category": "work"},
                    {"id": "b", "completed_at": "2026-04-02T11:00:00Z"}
                ],
                "sessions": [{"id": "s", "started_at": "2026-04-02T13:00:00Z", "completed": true}],
                "streak": 4
            }"#,
        );
        let snapshot = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(snapshot.tasks.len(), 2);
        assert_eq!(snapshot.tasks[0].priority, Priority::High);
        assert_eq!(snapshot.tasks[1].priority, Priority::Medium);
        assert_eq!(snapshot.streak, 4);
    }

    #[test]
    fn test_weather_json() {
        let path = scratch(
            "weather.json",
            r#"{"condition": "snow", "is_daytime": true, "temperature_c": -2.5}"#,
        );
        let report = load_weather(&path).unwrap().unwrap();
        assert_eq!(report.condition, WeatherCondition::Snow);
        assert_eq!(report.temperature_c, -2.5);

        let bad = scratch("weather-bad.json", r#"{"condition": "hail"}"#);
        assert!(matches!(load_weather(&bad), Err(LoadError::Json { .. })));
    }
}
