//! Drives the listings page to the filtered state: open, dismiss the cookie
//! banner, pick a job function from the filter dropdown, wait for the
//! refreshed listing.

use crate::browser::{DriverError, PageDriver};
use crate::config::ScraperConfig;
use log::info;
use std::time::Duration;

pub const COOKIE_BUTTON_SELECTOR: &str = "#onetrust-accept-btn-handler";
pub const DROPDOWN_OPTION_SELECTOR: &str = "div[role='option']";
pub const JOB_CARD_SELECTOR: &str = "div[data-testid='job-list-item']";

/// Finds the element containing the "Job function" label and clicks its
/// grandparent, which is the actual dropdown trigger. Returns false until
/// the label exists, so it can be polled.
const FILTER_TRIGGER_CLICK: &str = r#"
    (function() {
        var label = document.evaluate(
            "//*[contains(text(),'Job function')]",
            document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null
        ).singleNodeValue;
        if (!label) { return false; }
        var trigger = label.parentNode.parentNode;
        trigger.scrollIntoView(true);
        trigger.click();
        return true;
    })()
"#;

#[derive(Debug, thiserror::Error)]
pub enum NavigateError {
    #[error("Job function '{0}' not found in dropdown options")]
    FilterNotFound(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Browser error: {0}")]
    Browser(DriverError),
}

fn nav_err(e: DriverError) -> NavigateError {
    match e {
        DriverError::Timeout(what) => NavigateError::Timeout(what),
        other => NavigateError::Browser(other),
    }
}

pub struct PageNavigator<'a> {
    driver: &'a PageDriver,
    config: &'a ScraperConfig,
}

impl<'a> PageNavigator<'a> {
    pub fn new(driver: &'a PageDriver, config: &'a ScraperConfig) -> Self {
        Self { driver, config }
    }

    /// Load the listings page
    pub fn open(&self) -> Result<(), NavigateError> {
        self.driver
            .navigate(&self.config.jobs_url())
            .map_err(nav_err)
    }

    /// Best-effort dismissal of the consent overlay. The banner is not
    /// always served, so absence or a failed click is not an error.
    pub fn dismiss_cookie_banner(&self) {
        let bound = Duration::from_secs(self.config.overlay_timeout_secs);
        let result = self
            .driver
            .wait_for_selector(COOKIE_BUTTON_SELECTOR, bound)
            .and_then(|_| self.driver.click(COOKIE_BUTTON_SELECTOR));
        match result {
            Ok(()) => {
                info!("Cookie banner dismissed");
                std::thread::sleep(Duration::from_millis(500));
            }
            Err(e) => {
                info!("Cookie banner not found or could not be clicked, continuing: {}", e);
            }
        }
    }

    /// Open the job-function filter, pick the option matching `function`
    /// (trimmed, case-insensitive) and wait for the listing to refresh.
    pub fn select_job_function(&self, function: &str) -> Result<(), NavigateError> {
        let bound = Duration::from_secs(self.config.filter_timeout_secs);

        self.driver
            .wait_until(FILTER_TRIGGER_CLICK, bound, "job function filter trigger")
            .map_err(nav_err)?;

        self.driver
            .wait_for_selector(DROPDOWN_OPTION_SELECTOR, bound)
            .map_err(nav_err)?;
        let options = self
            .driver
            .inner_texts(DROPDOWN_OPTION_SELECTOR)
            .map_err(nav_err)?;

        let index = find_option_index(&options, function)
            .ok_or_else(|| NavigateError::FilterNotFound(function.trim().to_string()))?;
        self.driver
            .click_nth(DROPDOWN_OPTION_SELECTOR, index)
            .map_err(nav_err)?;

        self.driver
            .wait_for_selector(JOB_CARD_SELECTOR, bound)
            .map_err(nav_err)?;
        // The listing re-renders asynchronously after filtering; presence of
        // the first card is not enough.
        std::thread::sleep(Duration::from_millis(self.config.settle_delay_ms));

        Ok(())
    }

    /// Snapshot of the rendered page after filtering
    pub fn listing_html(&self) -> Result<String, NavigateError> {
        self.driver.html().map_err(nav_err)
    }
}

/// Match a dropdown option by trimmed, case-insensitive equality
pub fn find_option_index(options: &[String], wanted: &str) -> Option<usize> {
    let wanted = wanted.trim();
    options
        .iter()
        .position(|option| option.trim().eq_ignore_ascii_case(wanted))
}
