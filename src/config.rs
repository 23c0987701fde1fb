use anyhow::Context;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

pub struct Config {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match var("ESTATE_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("ESTATE_API_TIMEOUT_SECS is not a number: {}", raw))?,
            None => 30,
        };
        let page_size = match var("ESTATE_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("ESTATE_PAGE_SIZE is not a number: {}", raw))?,
            None => 12,
        };

        Ok(Self {
            base_url: var("ESTATE_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: var("ESTATE_API_TOKEN"),
            timeout: Duration::from_secs(timeout_secs),
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn reads_overrides_and_ignores_blank_token() {
        let config = config(&[
            ("ESTATE_API_BASE_URL", "https://api.example.com/v1"),
            ("ESTATE_API_TOKEN", "  "),
            ("ESTATE_API_TIMEOUT_SECS", "5"),
            ("ESTATE_PAGE_SIZE", "24"),
        ])
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 24);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(config(&[("ESTATE_PAGE_SIZE", "lots")]).is_err());
        assert!(config(&[("ESTATE_API_TIMEOUT_SECS", "-1")]).is_err());
    }
}
