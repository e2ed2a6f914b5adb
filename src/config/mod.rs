// src/config/mod.rs
//! Application configuration: TOML file + environment overrides.

pub mod ai;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alerts::nws::DEFAULT_NWS_ALERTS_URL;
use crate::config::ai::AiConfig;
use crate::news::providers::gnews::DEFAULT_GNEWS_URL;
use crate::news::providers::google_rss::DEFAULT_GOOGLE_NEWS_RSS_URL;

pub const DEFAULT_CONFIG_PATH: &str = "config/floodwatch.toml";
pub const ENV_CONFIG_PATH: &str = "FLOODWATCH_CONFIG_PATH";
pub const ENV_GNEWS_API_KEY: &str = "GNEWS_API_KEY";
pub const ENV_NEWS_PROVIDER: &str = "FLOODWATCH_NEWS_PROVIDER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub alerts: AlertsConfig,
    pub news: NewsConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// NWS requires an identifying User-Agent.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 4,
            user_agent: "flood-watch/0.1 (flood dashboard backend)".to_string(),
        }
    }
}

impl HttpConfig {
    /// One shared outbound client for every source and the assistant.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .context("building http client")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub url: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NWS_ALERTS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsProviderKind {
    Gnews,
    GoogleRss,
}

impl NewsProviderKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "gnews" => Some(Self::Gnews),
            "google_rss" | "google" => Some(Self::GoogleRss),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub provider: NewsProviderKind,
    pub gnews_url: String,
    /// "ENV" means: read from GNEWS_API_KEY.
    pub gnews_api_key: String,
    pub query: String,
    pub country: String,
    pub lang: String,
    pub rss_url: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            provider: NewsProviderKind::Gnews,
            gnews_url: DEFAULT_GNEWS_URL.to_string(),
            gnews_api_key: "ENV".to_string(),
            query: "flood".to_string(),
            country: "us".to_string(),
            lang: "en".to_string(),
            rss_url: DEFAULT_GOOGLE_NEWS_RSS_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg.resolve())
    }

    /// Load using env var + fallbacks:
    /// 1) $FLOODWATCH_CONFIG_PATH (must exist)
    /// 2) config/floodwatch.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        Ok(Self::default().resolve())
    }

    fn resolve(mut self) -> Self {
        if self.news.gnews_api_key.trim().eq_ignore_ascii_case("env") {
            self.news.gnews_api_key = std::env::var(ENV_GNEWS_API_KEY).unwrap_or_default();
        }
        if let Some(kind) = std::env::var(ENV_NEWS_PROVIDER)
            .ok()
            .as_deref()
            .and_then(NewsProviderKind::parse)
        {
            self.news.provider = kind;
        }
        self.ai = self.ai.resolve();
        self
    }
}
