use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Crate-wide configuration. One instance is built at process start and
/// shared by reference with the session store and the transport.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rest_api: RestApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds. Applies to every call uniformly,
    /// including the nested refresh round-trip.
    pub timeout: u64,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"rest_api\":{}}}", self.rest_api)
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: get_env_or_default("API_BASE_URL", String::from(DEFAULT_BASE_URL)),
                timeout: get_env_or_default("API_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
        }
    }

    /// Configuration pointing at an arbitrary host, used by tests and local
    /// development against a non-production backend.
    pub fn with_base_url(base_url: &str) -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: base_url.to_string(),
                timeout: get_env_or_default("API_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
        }
    }
}

#[cfg(test)]
mod tests_config {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn with_env_vars<F>(vars: Vec<(&str, &str)>, test: F)
    where
        F: FnOnce(),
    {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut old_vars = Vec::new();

        for (key, value) in vars {
            old_vars.push((key, env::var(key).ok()));
            env::set_var(key, value);
        }

        test();

        for (key, value) in old_vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_new() {
        with_env_vars(
            vec![
                ("API_BASE_URL", "https://staging.readingwithme.xyz/api"),
                ("API_TIMEOUT", "30"),
            ],
            || {
                let config = Config::new();

                assert_eq!(
                    config.rest_api.base_url,
                    "https://staging.readingwithme.xyz/api"
                );
                assert_eq!(config.rest_api.timeout, 30);
            },
        );
    }

    #[test]
    fn test_default_values() {
        with_env_vars(vec![], || {
            env::remove_var("API_BASE_URL");
            env::remove_var("API_TIMEOUT");
            let config = Config::new();

            assert_eq!(config.rest_api.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.rest_api.timeout, DEFAULT_TIMEOUT_SECS);
        });
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        with_env_vars(vec![("API_TIMEOUT", "not-a-number")], || {
            let config = Config::new();
            assert_eq!(config.rest_api.timeout, DEFAULT_TIMEOUT_SECS);
        });
    }

    #[test]
    fn test_with_base_url() {
        with_env_vars(vec![], || {
            env::remove_var("API_TIMEOUT");
            let config = Config::with_base_url("http://127.0.0.1:8080/api");
            assert_eq!(config.rest_api.base_url, "http://127.0.0.1:8080/api");
            assert_eq!(config.rest_api.timeout, DEFAULT_TIMEOUT_SECS);
        });
    }

    #[test]
    fn test_display() {
        with_env_vars(vec![], || {
            env::remove_var("API_BASE_URL");
            env::remove_var("API_TIMEOUT");
            let config = Config::new();
            let shown = format!("{}", config);
            assert!(shown.contains("\"base_url\""));
            assert!(shown.contains("\"timeout\":10"));
        });
    }
}
