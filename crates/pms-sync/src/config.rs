use log::warn;
use pms_client::ClientConfig;
use reqwest::Url;
use std::{env, time::Duration};
use thiserror::Error;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const PMS_BASE_URL: &str = "PMS_BASE_URL";
pub const PMS_MIN_REQUEST_INTERVAL_MS: &str = "PMS_MIN_REQUEST_INTERVAL_MS";
pub const PMS_REQUEST_TIMEOUT_SECS: &str = "PMS_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything the sync job reads from its environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub pms: ClientConfig,
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!("Ignoring unreadable .env file: {err}");
            }
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, or `None` when unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required(DATABASE_URL)?;
        let base_url = required(PMS_BASE_URL)?;

        let parsed = Url::parse(&base_url).map_err(|err| ConfigError::Invalid {
            name: PMS_BASE_URL,
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: PMS_BASE_URL,
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        let mut pms = ClientConfig::new(base_url);

        if let Some(millis) = parse_number(&lookup, PMS_MIN_REQUEST_INTERVAL_MS)? {
            pms = pms.with_min_interval(Duration::from_millis(millis));
        }

        if let Some(secs) = parse_number(&lookup, PMS_REQUEST_TIMEOUT_SECS)? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: PMS_REQUEST_TIMEOUT_SECS,
                    reason: "must be at least 1".to_string(),
                });
            }
            pms = pms.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self { database_url, pms })
    }
}

/// Reads an optional non-negative integer variable
fn parse_number<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|err| ConfigError::Invalid {
            name,
            reason: format!("`{raw}` is not a whole number: {err}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        (DATABASE_URL, "postgres://localhost/pms"),
        (PMS_BASE_URL, "https://pms.example.com"),
    ];

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(settings.database_url, "postgres://localhost/pms");
        assert_eq!(settings.pms.base_url, "https://pms.example.com");
        assert_eq!(settings.pms.min_interval, Duration::from_millis(500));
        assert_eq!(settings.pms.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push((PMS_MIN_REQUEST_INTERVAL_MS, "250"));
        vars.push((PMS_REQUEST_TIMEOUT_SECS, " 5 "));

        let settings = Settings::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(settings.pms.min_interval, Duration::from_millis(250));
        assert_eq!(settings.pms.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_required() {
        let err = Settings::from_lookup(lookup_from(&[REQUIRED[1]])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_URL));

        let err = Settings::from_lookup(lookup_from(&[REQUIRED[0]])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(PMS_BASE_URL));

        let err =
            Settings::from_lookup(lookup_from(&[REQUIRED[0], (PMS_BASE_URL, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(PMS_BASE_URL));
    }

    #[test]
    fn test_invalid_base_url() {
        for url in ["not a url", "ftp://pms.example.com"] {
            let err =
                Settings::from_lookup(lookup_from(&[REQUIRED[0], (PMS_BASE_URL, url)])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name, .. } if name == PMS_BASE_URL));
        }
    }

    #[test]
    fn test_invalid_numbers() {
        let mut vars = REQUIRED.to_vec();
        vars.push((PMS_MIN_REQUEST_INTERVAL_MS, "half a second"));
        let err = Settings::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { name, .. } if name == PMS_MIN_REQUEST_INTERVAL_MS)
        );

        let mut vars = REQUIRED.to_vec();
        vars.push((PMS_REQUEST_TIMEOUT_SECS, "0"));
        let err = Settings::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == PMS_REQUEST_TIMEOUT_SECS));
    }
}
