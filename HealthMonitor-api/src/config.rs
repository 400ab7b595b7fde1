use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

/// Configuration errors raised while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Directory holding `<user>/<date>/<domain>.json` documents (default: `root`).
    pub data_root: PathBuf,
    /// User served when a request names none (default: `jane_doe`).
    pub default_user: String,
    /// Date served when a request names none (default: `20250605`).
    pub default_date: String,
    /// Allowed CORS origins, `*` allows any (default: `*`).
    pub cors_origins: Vec<String>,
    /// Reported by the health endpoint (default: `development`).
    pub app_env: String,
    /// Write generated documents for the default user and date at startup (default: `false`).
    pub seed_mock_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_root: PathBuf::from("root"),
            default_user: "jane_doe".to_string(),
            default_date: "20250605".to_string(),
            cors_origins: vec!["*".to_string()],
            app_env: "development".to_string(),
            seed_mock_data: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default     |
    /// |------------------|-------------|
    /// | `HOST`           | `0.0.0.0`   |
    /// | `PORT`           | `3000`      |
    /// | `DATA_ROOT`      | `root`      |
    /// | `DEFAULT_USER`   | `jane_doe`  |
    /// | `DEFAULT_DATE`   | `20250605`  |
    /// | `CORS_ORIGINS`   | `*`         |
    /// | `APP_ENV`        | `development` |
    /// | `SEED_MOCK_DATA` | `false`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                expected: "a port number",
                value,
            })?,
            None => defaults.port,
        };

        let data_root = lookup("DATA_ROOT").map(PathBuf::from).unwrap_or(defaults.data_root);

        let default_user = lookup("DEFAULT_USER").unwrap_or(defaults.default_user);
        let user_ok = !default_user.is_empty()
            && default_user
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !user_ok {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_USER",
                expected: "letters, digits, '_' or '-'",
                value: default_user,
            });
        }

        let default_date = lookup("DEFAULT_DATE").unwrap_or(defaults.default_date);
        if chrono::NaiveDate::parse_from_str(&default_date, "%Y%m%d").is_err() || default_date.len() != 8 {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_DATE",
                expected: "a YYYYMMDD date",
                value: default_date,
            });
        }

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                for origin in &origins {
                    if origin != "*" && origin.parse::<HeaderValue>().is_err() {
                        return Err(ConfigError::InvalidValue {
                            name: "CORS_ORIGINS",
                            expected: "a comma separated list of origins",
                            value: raw.clone(),
                        });
                    }
                }
                if origins.is_empty() {
                    defaults.cors_origins
                } else {
                    origins
                }
            }
            None => defaults.cors_origins,
        };

        let app_env = lookup("APP_ENV").unwrap_or(defaults.app_env);

        let seed_mock_data = match lookup("SEED_MOCK_DATA") {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "SEED_MOCK_DATA",
                        expected: "true or false",
                        value,
                    })
                }
            },
            None => defaults.seed_mock_data,
        };

        Ok(Self {
            host,
            port,
            data_root,
            default_user,
            default_date,
            cors_origins,
            app_env,
            seed_mock_data,
        })
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_root, PathBuf::from("root"));
        assert_eq!(config.default_user, "jane_doe");
        assert_eq!(config.default_date, "20250605");
        assert!(config.allows_any_origin());
        assert!(!config.seed_mock_data);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATA_ROOT", "/srv/health"),
            ("CORS_ORIGINS", "http://localhost:5173, https://example.org"),
            ("SEED_MOCK_DATA", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_root, PathBuf::from("/srv/health"));
        assert_eq!(config.cors_origins, vec!["http://localhost:5173", "https://example.org"]);
        assert!(!config.allows_any_origin());
        assert!(config.seed_mock_data);
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("DEFAULT_DATE", "20251301")]).is_err());
        assert!(load(&[("DEFAULT_USER", "../etc")]).is_err());
        assert!(load(&[("SEED_MOCK_DATA", "maybe")]).is_err());
    }
}
