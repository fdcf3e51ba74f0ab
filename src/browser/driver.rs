use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Errors that can occur while driving a page
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScript(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtraction(String),
}

/// Low-level page operations over a browser tab: bounded waits, clicks and
/// script evaluation. Site-specific flow lives in the navigator.
pub struct PageDriver {
    tab: Arc<Tab>,
}

impl PageDriver {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.tab.navigate_to(url).map_err(|e| {
            DriverError::Navigation(format!("Failed to navigate to {}: {}", url, e))
        })?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| DriverError::Navigation(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for an element matching the given CSS selector
    pub fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            escape_selector(selector)
        );
        self.wait_until(&script, timeout, selector)
    }

    /// Poll a boolean script until it returns true or the timeout elapses.
    /// Script failures during polling are treated as "not yet".
    pub fn wait_until(
        &self,
        script: &str,
        timeout: Duration,
        what: &str,
    ) -> Result<(), DriverError> {
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(DriverError::Timeout(what.to_string()));
            }

            if let Ok(true) = self.eval_bool(script) {
                return Ok(());
            }

            std::thread::sleep(Duration::from_millis(100));
        }
    }

    /// Evaluate a script expected to yield a boolean
    pub fn eval_bool(&self, script: &str) -> Result<bool, DriverError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| DriverError::JavaScript(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Collect the inner text of every element matching the selector
    pub fn inner_texts(&self, selector: &str) -> Result<Vec<String>, DriverError> {
        let script = format!(
            r#"JSON.stringify(Array.from(document.querySelectorAll('{}')).map(el => el.innerText || ''))"#,
            escape_selector(selector)
        );

        let result = self
            .tab
            .evaluate(&script, false)
            .map_err(|e| DriverError::JavaScript(e.to_string()))?;

        let encoded = result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .ok_or_else(|| DriverError::JavaScript("Script returned no value".to_string()))?;

        serde_json::from_str(&encoded).map_err(|e| DriverError::JavaScript(e.to_string()))
    }

    /// Click the first element matching the given selector
    pub fn click(&self, selector: &str) -> Result<(), DriverError> {
        let script = format!(
            r#"document.querySelector('{}').click();"#,
            escape_selector(selector)
        );

        self.tab
            .evaluate(&script, false)
            .map_err(|e| DriverError::JavaScript(format!("Click failed: {}", e)))?;

        Ok(())
    }

    /// Click the nth element matching the given selector
    pub fn click_nth(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        let script = format!(
            r#"document.querySelectorAll('{}')[{}].click();"#,
            escape_selector(selector),
            index
        );

        self.tab
            .evaluate(&script, false)
            .map_err(|e| DriverError::JavaScript(format!("Click failed: {}", e)))?;

        Ok(())
    }

    /// Get the HTML content of the page
    pub fn html(&self) -> Result<String, DriverError> {
        self.tab
            .get_content()
            .map_err(|e| DriverError::HtmlExtraction(e.to_string()))
    }
}

fn escape_selector(selector: &str) -> String {
    selector.replace('\'', "\\'")
}
