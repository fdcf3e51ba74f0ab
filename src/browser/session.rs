use super::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// Overrides the navigator properties that betray automation. The filter
/// dropdown on the jobs board does not populate for webdriver clients.
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    });
    Object.defineProperty(navigator, 'plugins', {
        get: () => [1, 2, 3, 4, 5]
    });
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en']
    });
"#;

/// Errors raised while acquiring a browser session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Browser configuration error: {0}")]
    Configuration(String),

    #[error("Tab creation failed: {0}")]
    Tab(String),
}

/// An acquired browser handle scoped to one scrape run.
///
/// Dropping the session closes the underlying browser, so release happens on
/// every exit path of a run, including early aborts.
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a browser with anti-detection configuration and open one tab.
    pub fn acquire(config: &BrowserConfig) -> Result<Self, SessionError> {
        let user_agent_arg = format!("--user-agent={}", config.user_agent);

        let args: Vec<&OsStr> = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&user_agent_arg),
        ];

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args)
            .build()
            .map_err(|e| SessionError::Configuration(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| SessionError::Launch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SessionError::Tab(e.to_string()))?;
        tab.set_default_timeout(config.timeout());

        tab.evaluate(STEALTH_SCRIPT, false)
            .map_err(|e| SessionError::Tab(e.to_string()))?;

        Ok(Self { browser, tab })
    }

    /// The tab this session scrapes through
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get a reference to the underlying browser
    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        log::debug!("Browser session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires Chrome/Chromium to be installed
    fn test_session_acquire() {
        let session = BrowserSession::acquire(&BrowserConfig::default());
        assert!(session.is_ok());
    }
}
