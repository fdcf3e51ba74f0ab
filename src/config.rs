use crate::browser::BrowserConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub browser: BrowserSettings,

    #[serde(default)]
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Browser headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// User agent presented to the target site
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page-load timeout in seconds
    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Origin used to absolutize relative URLs found on cards
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound on the best-effort consent-overlay wait
    #[serde(default = "default_overlay_timeout")]
    pub overlay_timeout_secs: u64,

    /// Bound on each wait while driving the job-function filter
    #[serde(default = "default_filter_timeout")]
    pub filter_timeout_secs: u64,

    /// Fixed delay after the filtered listing appears, for async rendering
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

fn default_db_path() -> String {
    "jobs.db".to_string()
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_true() -> bool {
    true
}
fn default_window_width() -> u32 {
    1920
}
fn default_window_height() -> u32 {
    1080
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}
fn default_page_load_timeout() -> u64 {
    30
}
fn default_base_url() -> String {
    "https://jobs.techstars.com".to_string()
}
fn default_overlay_timeout() -> u64 {
    5
}
fn default_filter_timeout() -> u64 {
    40
}
fn default_settle_delay() -> u64 {
    2000
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: default_user_agent(),
            page_load_timeout_secs: default_page_load_timeout(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            overlay_timeout_secs: default_overlay_timeout(),
            filter_timeout_secs: default_filter_timeout(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_addr: default_bind_addr(),
            browser: BrowserSettings::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl ScraperConfig {
    pub fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url.trim_end_matches('/'))
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }

    /// Create a browser configuration from these settings
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.browser.headless,
            window_size: (self.browser.window_width, self.browser.window_height),
            user_agent: self.browser.user_agent.clone(),
            timeout_seconds: self.browser.page_load_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.scraper.base_url, "https://jobs.techstars.com");
        assert_eq!(cfg.scraper.jobs_url(), "https://jobs.techstars.com/jobs");
        assert_eq!(cfg.scraper.overlay_timeout_secs, 5);
        assert_eq!(cfg.scraper.filter_timeout_secs, 40);
        assert_eq!(cfg.scraper.settle_delay_ms, 2000);
        assert!(cfg.browser.headless);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            db_path = "other.db"

            [scraper]
            settle_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(cfg.db_path, "other.db");
        assert_eq!(cfg.scraper.settle_delay_ms, 500);
        assert_eq!(cfg.scraper.filter_timeout_secs, 40);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
    }
}
