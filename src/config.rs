use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub lottie_api_url: String,
    /// Static featured-assets resource used instead of `<base>/popular` when set.
    pub lottie_popular_url: Option<String>,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
    pub request_timeout_secs: u64,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            lottie_api_url: env::var("LOTTIE_API_URL")
                .unwrap_or_else(|_| "https://lottiefiles.com/api/v2".to_string()),
            lottie_popular_url: env::var("LOTTIE_POPULAR_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            cache_ttl_secs: parse_var("LOTTIE_CACHE_TTL_SECS", 3600)?,
            cache_max_entries: parse_var("LOTTIE_CACHE_MAX_ENTRIES", 1000)?,
            request_timeout_secs: parse_var("LOTTIE_REQUEST_TIMEOUT_SECS", 30)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    parse_value(name, env::var(name).ok(), default)
}

fn parse_value<T: FromStr>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a number, got {:?}", name, value)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_defaults_when_missing() {
        assert_eq!(parse_value::<u64>("X", None, 3600).unwrap(), 3600);
        assert_eq!(parse_value::<u64>("X", Some("  ".to_string()), 7).unwrap(), 7);
    }

    #[test]
    fn test_parse_value_reads_value() {
        assert_eq!(parse_value::<u64>("X", Some(" 120 ".to_string()), 3600).unwrap(), 120);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        let err = parse_value::<u64>("LOTTIE_CACHE_TTL_SECS", Some("soon".to_string()), 3600)
            .unwrap_err();
        assert!(err.to_string().contains("LOTTIE_CACHE_TTL_SECS"));
    }

    #[test]
    fn test_parse_var_reads_environment() {
        env::set_var("LOTTIE_PROXY_TEST_PARSE_VAR", "42");
        assert_eq!(parse_var::<u64>("LOTTIE_PROXY_TEST_PARSE_VAR", 7).unwrap(), 42);
        env::remove_var("LOTTIE_PROXY_TEST_PARSE_VAR");
        assert_eq!(parse_var::<u64>("LOTTIE_PROXY_TEST_PARSE_VAR", 7).unwrap(), 7);
    }
}
