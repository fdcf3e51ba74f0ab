//! Per-card field extraction over the rendered listings snapshot.
//!
//! The orchestrator takes one HTML snapshot of the filtered page and hands
//! each `div[data-testid='job-list-item']` element to the extractor. Title
//! and URLs are required; location, posted date, description and tag chips
//! are optional with defaults.

use chrono::{Local, NaiveDate, TimeZone};
use scraper::{ElementRef, Html, Selector};

/// A card whose required fields are missing is unusable; the orchestrator
/// logs the error and skips the card without aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("job card is missing required element: {0}")]
    MissingElement(&'static str),

    #[error("job card is missing required attribute: {0}")]
    MissingAttribute(&'static str),
}

/// Raw fields read out of one job card, before entity resolution
#[derive(Debug, Clone)]
pub struct JobCard {
    pub position_name: String,
    pub job_page_url: String,
    pub logo_url: String,
    pub labor_function: String,
    pub posted_date: i64,
    pub description: String,
    pub location: String,
    pub organization_url: String,
    pub organization_title: String,
    pub tags: Vec<String>,
}

struct CardSelectors {
    card: Selector,
    title_link: Selector,
    logo_link: Selector,
    logo_image: Selector,
    location: Selector,
    posted_date: Selector,
    description: Selector,
    tag: Selector,
}

impl CardSelectors {
    fn new() -> Self {
        Self {
            card: Selector::parse("div[data-testid='job-list-item']").unwrap(),
            title_link: Selector::parse("a[data-testid='job-title-link']").unwrap(),
            logo_link: Selector::parse("a[data-testid='company-logo-link']").unwrap(),
            logo_image: Selector::parse("img").unwrap(),
            location: Selector::parse("div[itemprop='jobLocation'] span.vIGjl").unwrap(),
            posted_date: Selector::parse("meta[itemprop='datePosted']").unwrap(),
            description: Selector::parse("meta[itemprop='description']").unwrap(),
            tag: Selector::parse("div[data-testid='tag'] div").unwrap(),
        }
    }
}

pub struct CardExtractor {
    base_url: String,
    selectors: CardSelectors,
}

impl CardExtractor {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            selectors: CardSelectors::new(),
        }
    }

    /// Enumerate the job cards present in a rendered document
    pub fn cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.selectors.card).collect()
    }

    /// Extract only the card's job page URL. Cheap enough to run before the
    /// dedup check; full extraction happens only for novel cards.
    pub fn job_page_url(&self, card: ElementRef) -> Result<String, ExtractError> {
        let link = card
            .select(&self.selectors.title_link)
            .next()
            .ok_or(ExtractError::MissingElement("job title link"))?;
        let href = link
            .value()
            .attr("href")
            .ok_or(ExtractError::MissingAttribute("job title link href"))?;
        Ok(self.absolute_url(href))
    }

    /// Extract all fields of one job card
    pub fn extract(&self, card: ElementRef, labor_function: &str) -> Result<JobCard, ExtractError> {
        let title_link = card
            .select(&self.selectors.title_link)
            .next()
            .ok_or(ExtractError::MissingElement("job title link"))?;
        let job_page_url = title_link
            .value()
            .attr("href")
            .map(|href| self.absolute_url(href))
            .ok_or(ExtractError::MissingAttribute("job title link href"))?;
        let position_name = element_text(title_link);

        let logo_link = card
            .select(&self.selectors.logo_link)
            .next()
            .ok_or(ExtractError::MissingElement("company logo link"))?;
        let organization_url = logo_link
            .value()
            .attr("href")
            .map(|href| self.absolute_url(href))
            .ok_or(ExtractError::MissingAttribute("company logo link href"))?;
        let logo_image = logo_link
            .select(&self.selectors.logo_image)
            .next()
            .ok_or(ExtractError::MissingElement("company logo image"))?;
        let logo_url = logo_image
            .value()
            .attr("src")
            .map(|src| self.absolute_url(src))
            .ok_or(ExtractError::MissingAttribute("company logo image src"))?;
        let organization_title = logo_image
            .value()
            .attr("alt")
            .map(|alt| alt.trim().to_string())
            .ok_or(ExtractError::MissingAttribute("company logo image alt"))?;

        let location = card
            .select(&self.selectors.location)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let posted_date = card
            .select(&self.selectors.posted_date)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(parse_posted_date)
            .unwrap_or(0);

        let description = card
            .select(&self.selectors.description)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default()
            .to_string();

        let mut tags: Vec<String> = Vec::new();
        for tag_el in card.select(&self.selectors.tag) {
            let name = element_text(tag_el);
            if !name.is_empty() && !tags.iter().any(|t| t == &name) {
                tags.push(name);
            }
        }

        Ok(JobCard {
            position_name,
            job_page_url,
            logo_url,
            labor_function: labor_function.to_string(),
            posted_date,
            description,
            location,
            organization_url,
            organization_title,
            tags,
        })
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse an ISO calendar date into epoch seconds at local-timezone midnight.
/// Absent or malformed input yields 0.
pub fn parse_posted_date(raw: &str) -> i64 {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|moment| moment.timestamp())
        .unwrap_or(0)
}
