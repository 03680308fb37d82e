//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::{ConfigError, Result};

/// Default base URL of the career-profile API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/career-profile-tool/api";
/// Default path of the evaluate operation, relative to the base URL.
pub const DEFAULT_EVALUATE_PATH: &str = "/mba/evaluate";
/// Default path prefix of the admin response viewer, relative to the base URL.
pub const DEFAULT_ADMIN_PATH: &str = "/admin/view/response";
/// Default client-side timeout for remote calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

/// Application configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL every API path is joined onto.
    pub api_base_url: String,
    /// Path of the evaluate operation.
    pub evaluate_path: String,
    /// Path prefix of the admin response viewer.
    pub admin_path: String,
    /// Client-side timeout for remote calls. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Port for the read-only quiz routes, if they should be served.
    pub routes_port: Option<u16>,
    /// Admin credentials for the `admin` sub-command.
    pub admin: Option<AdminCredentialsConfig>,
}

/// Admin username/password pair from the environment.
#[derive(Debug, Clone)]
pub struct AdminCredentialsConfig {
    pub username: String,
    pub password: SecretString,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            evaluate_path: DEFAULT_EVALUATE_PATH.to_string(),
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            routes_port: None,
            admin: None,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Admin credentials are all-or-nothing: setting only one of the two
    /// variables is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("QUIZ_API_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let evaluate_path = lookup("QUIZ_EVALUATE_PATH").unwrap_or(defaults.evaluate_path);
        let admin_path = lookup("QUIZ_ADMIN_PATH").unwrap_or(defaults.admin_path);

        let request_timeout = match lookup("QUIZ_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match parse_number::<u64>("QUIZ_REQUEST_TIMEOUT_SECS", &raw)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => defaults.request_timeout,
        };

        let routes_port = lookup("QUIZ_ROUTES_PORT")
            .map(|raw| parse_number::<u16>("QUIZ_ROUTES_PORT", &raw))
            .transpose()?;

        let admin = match (lookup("QUIZ_ADMIN_USERNAME"), lookup("QUIZ_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminCredentialsConfig {
                username,
                password: SecretString::from(password),
            }),
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("QUIZ_ADMIN_PASSWORD".to_string()).into());
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("QUIZ_ADMIN_USERNAME".to_string()).into());
            }
            (None, None) => None,
        };

        Ok(Self {
            api_base_url,
            evaluate_path,
            admin_path,
            request_timeout,
            routes_port,
            admin,
        })
    }

    /// Full URL of the evaluate operation.
    pub fn evaluate_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.evaluate_path)
    }

    /// Full URL prefix of the admin response viewer.
    pub fn admin_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.admin_path)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> std::result::Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;
    use crate::error::Error;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.evaluate_url(),
            "http://localhost:8000/career-profile-tool/api/mba/evaluate"
        );
        assert_eq!(
            config.admin_url(),
            "http://localhost:8000/career-profile-tool/api/admin/view/response"
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
        assert!(config.routes_port.is_none());
        assert!(config.admin.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("QUIZ_API_BASE_URL", "http://api.test/"),
            ("QUIZ_EVALUATE_PATH", "/evaluate"),
            ("QUIZ_REQUEST_TIMEOUT_SECS", "0"),
            ("QUIZ_ROUTES_PORT", "9090"),
            ("QUIZ_ADMIN_USERNAME", "admin"),
            ("QUIZ_ADMIN_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(config.evaluate_url(), "http://api.test/evaluate");
        assert!(config.request_timeout.is_none());
        assert_eq!(config.routes_port, Some(9090));
        let admin = config.admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password.expose_secret(), "hunter2");
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("QUIZ_ROUTES_PORT", "not-a-port")]))
            .unwrap_err();
        match err {
            Error::Config(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "QUIZ_ROUTES_PORT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn half_configured_admin_credentials_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("QUIZ_ADMIN_USERNAME", "admin")])).unwrap_err();
        match err {
            Error::Config(ConfigError::MissingEnvVar(key)) => assert_eq!(key, "QUIZ_ADMIN_PASSWORD"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = AppConfig::from_lookup(lookup_from(&[("QUIZ_ADMIN_PASSWORD", "secret")])).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingEnvVar(ref key)) if key == "QUIZ_ADMIN_USERNAME"));
    }
}
