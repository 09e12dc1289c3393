use crate::errors::ConfigError;
use chrono::Weekday;
use std::{env, path::PathBuf};

pub const DEFAULT_RECENT_JOIN_DAYS: i64 = 60;
pub const DEFAULT_LOW_ACTIVITY_DAYS: u32 = 7;
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_PORT: u16 = 8080;

/// Thresholds and calendar conventions the analyzer works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Accounts younger than this many days count as recently joined.
    pub recent_join_days: i64,
    pub weekend: Vec<Weekday>,
    pub low_activity_days: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            recent_join_days: DEFAULT_RECENT_JOIN_DAYS,
            weekend: vec![Weekday::Sat, Weekday::Sun],
            low_activity_days: DEFAULT_LOW_ACTIVITY_DAYS,
        }
    }
}

impl AnalyzerConfig {
    pub fn is_weekend(&self, day: Weekday) -> bool {
        self.weekend.contains(&day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub cache_capacity: usize,
    pub analyzer: AnalyzerConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let data_dir = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let cache_capacity = parse_or(
            "REPORT_CACHE_CAPACITY",
            lookup("REPORT_CACHE_CAPACITY"),
            DEFAULT_CACHE_CAPACITY,
        )?;

        let recent_join_days = parse_or(
            "RECENT_JOIN_DAYS",
            lookup("RECENT_JOIN_DAYS"),
            DEFAULT_RECENT_JOIN_DAYS,
        )?;
        if recent_join_days < 0 {
            return Err(ConfigError::Invalid {
                key: "RECENT_JOIN_DAYS",
                value: recent_join_days.to_string(),
            });
        }
        let low_activity_days = parse_or(
            "LOW_ACTIVITY_DAYS",
            lookup("LOW_ACTIVITY_DAYS"),
            DEFAULT_LOW_ACTIVITY_DAYS,
        )?;
        let weekend = match lookup("WEEKEND_DAYS") {
            Some(raw) => parse_weekend(&raw)?,
            None => AnalyzerConfig::default().weekend,
        };

        Ok(Self {
            port,
            data_dir,
            cache_capacity,
            analyzer: AnalyzerConfig {
                recent_join_days,
                weekend,
                low_activity_days,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    let parsed = value.trim().parse();
    match parsed {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::Invalid { key, value }),
    }
}

/// Parses a comma separated day list such as `fri,sat`. An empty list is
/// allowed and means no day is treated as weekend.
pub fn parse_weekend(raw: &str) -> Result<Vec<Weekday>, ConfigError> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let day: Weekday = part.parse().map_err(|_| ConfigError::Invalid {
            key: "WEEKEND_DAYS",
            value: raw.to_string(),
        })?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.analyzer, AnalyzerConfig::default());
        assert!(config.analyzer.is_weekend(Weekday::Sun));
        assert!(!config.analyzer.is_weekend(Weekday::Fri));
    }

    #[test]
    fn reads_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/snapshots"),
            ("RECENT_JOIN_DAYS", "30"),
            ("WEEKEND_DAYS", "Fri, sat"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/snapshots"));
        assert_eq!(config.analyzer.recent_join_days, 30);
        assert_eq!(config.analyzer.weekend, vec![Weekday::Fri, Weekday::Sat]);
    }

    #[test]
    fn rejects_garbage_instead_of_defaulting() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".into()
            }
        );
        assert!(parse_weekend("sat,someday").is_err());
        assert!(
            ServiceConfig::from_lookup(lookup_from(&[("RECENT_JOIN_DAYS", "-1")])).is_err()
        );
    }

    #[test]
    fn empty_weekend_list_is_allowed() {
        assert!(parse_weekend("").unwrap().is_empty());
    }
}
