use std::{env, time::Duration};

use anyhow::Context;
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3003";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub page_size: u32,
    /// When set, a cached product older than this is fetched again.
    pub product_max_age: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            env::var("CATALOGUE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let request_timeout = env::var("CATALOGUE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let page_size = env::var("CATALOGUE_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let product_max_age = env::var("CATALOGUE_PRODUCT_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Ok(Self {
            request_timeout: Duration::from_secs(request_timeout),
            page_size: page_size.clamp(1, 100),
            product_max_age,
            ..Self::new(&api_base_url)?
        })
    }

    /// Config pointing at `api_base_url` with every other setting at its default.
    pub fn new(api_base_url: &str) -> anyhow::Result<Self> {
        Self::default().with_base_url(api_base_url)
    }

    pub fn with_base_url(self, api_base_url: &str) -> anyhow::Result<Self> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)
            .with_context(|| format!("CATALOGUE_API_URL is not a valid URL: {api_base_url}"))?;
        Ok(Self {
            api_base_url: trimmed.to_string(),
            ..self
        })
    }

    pub fn with_product_max_age(mut self, max_age: Duration) -> Self {
        self.product_max_age = Some(max_age);
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            product_max_age: None,
        }
    }
}
