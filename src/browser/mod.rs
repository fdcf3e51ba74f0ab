//! Browser automation module for the job-board scraper
//!
//! The listings page renders through JavaScript and fingerprints automation,
//! so scraping goes through a real headless Chrome instance: a session is
//! acquired with anti-detection configuration, driven to the filtered state,
//! and released when the run ends.
//!
//! # Example
//!
//! ```no_run
//! use rust_job_scraper::browser::{BrowserConfig, BrowserSession, PageDriver};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = BrowserSession::acquire(&BrowserConfig::default())?;
//! let driver = PageDriver::new(session.tab().clone());
//!
//! driver.navigate("https://example.com")?;
//! driver.wait_for_selector("h1", Duration::from_secs(10))?;
//! let html = driver.html()?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod session;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use driver::{DriverError, PageDriver};
pub use session::{BrowserSession, SessionError};
