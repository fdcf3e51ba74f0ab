//! Run control for one scrape: acquire a browser session, bring the page to
//! the filtered state, then process every listed card with per-card failure
//! isolation. Only session startup, navigation timeouts and a missing filter
//! option are fatal; everything that goes wrong inside a single card is
//! logged and skipped.

use crate::browser::{BrowserSession, PageDriver};
use crate::config::Config;
use crate::db;
use crate::extractor::{CardExtractor, ExtractError};
use crate::models::Job;
use crate::navigator::PageNavigator;
use crate::resolver;
use log::{debug, error, info};
use rusqlite::Connection;
use scraper::{ElementRef, Html};

/// Scrape run states. `Done` and `Aborted` are terminal; a fatal error moves
/// any non-terminal state to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    SessionReady,
    Navigated,
    Filtered,
    ListingFound,
    Done,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted)
    }
}

/// Outcome of one card, captured locally instead of unwinding past the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    Saved,
    Duplicate,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

fn transition(state: &mut RunState, next: RunState) {
    debug!("Scrape state: {:?} -> {:?}", state, next);
    *state = next;
}

/// Scrape the board for the given job function and persist novel listings.
///
/// Returns the number of jobs newly saved in this run. Fatal failures are
/// logged and yield whatever count had accumulated (0 before any card is
/// processed); they never propagate to the caller. The browser session is
/// released on every path out of the run.
pub fn scrape_jobs_by_function(conn: &mut Connection, config: &Config, function: &str) -> usize {
    info!("Starting scrape for job function: {}", function);
    let mut state = RunState::Init;

    let session = match BrowserSession::acquire(&config.browser_config()) {
        Ok(session) => session,
        Err(e) => {
            error!("A critical error occurred during scraping: {}", e);
            transition(&mut state, RunState::Aborted);
            return 0;
        }
    };
    transition(&mut state, RunState::SessionReady);

    let saved = match run_filtered_scrape(conn, config, &session, function, &mut state) {
        Ok(count) => {
            transition(&mut state, RunState::Done);
            count
        }
        Err(e) => {
            error!("A critical error occurred during scraping: {}", e);
            transition(&mut state, RunState::Aborted);
            0
        }
    };

    info!(
        "Scrape finished in state {:?}, {} jobs saved for function: {}",
        state, saved, function
    );
    saved
    // session drops here, releasing the browser on both paths
}

fn run_filtered_scrape(
    conn: &mut Connection,
    config: &Config,
    session: &BrowserSession,
    function: &str,
    state: &mut RunState,
) -> Result<usize, crate::navigator::NavigateError> {
    let driver = PageDriver::new(session.tab().clone());
    let navigator = PageNavigator::new(&driver, &config.scraper);

    navigator.open()?;
    transition(state, RunState::Navigated);

    navigator.dismiss_cookie_banner();
    navigator.select_job_function(function)?;
    transition(state, RunState::Filtered);

    let html = navigator.listing_html()?;
    let document = Html::parse_document(&html);
    transition(state, RunState::ListingFound);

    let extractor = CardExtractor::new(&config.scraper.base_url);
    Ok(process_cards(conn, &extractor, &document, function))
}

/// Process every card in a rendered snapshot: dedup pre-check, extraction,
/// entity resolution, save. Returns the count of newly saved jobs.
pub fn process_cards(
    conn: &mut Connection,
    extractor: &CardExtractor,
    document: &Html,
    function: &str,
) -> usize {
    let cards = extractor.cards(document);
    info!("Found {} job cards for function: {}", cards.len(), function);

    let mut saved = 0;
    for card in cards {
        let outcome = match process_card(conn, extractor, card, function) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error processing a job card: {}", e);
                CardOutcome::Failed
            }
        };
        if outcome == CardOutcome::Saved {
            saved += 1;
        }
    }
    saved
}

fn process_card(
    conn: &mut Connection,
    extractor: &CardExtractor,
    card: ElementRef,
    function: &str,
) -> Result<CardOutcome, CardError> {
    // Cheap URL read first so stored cards are skipped without full
    // extraction or overwrite.
    let job_page_url = extractor.job_page_url(card)?;
    if db::exists_by_job_page_url(conn, &job_page_url)? {
        debug!("Job already stored, skipping: {}", job_page_url);
        return Ok(CardOutcome::Duplicate);
    }

    let card_data = extractor.extract(card, function)?;

    let organization = resolver::resolve_organization(
        conn,
        &card_data.organization_url,
        &card_data.organization_title,
    )?;
    let tags = resolver::resolve_tags(conn, &card_data.tags)?;

    let job = Job {
        id: 0,
        position_name: card_data.position_name,
        job_page_url: card_data.job_page_url,
        logo_url: card_data.logo_url,
        labor_function: card_data.labor_function,
        posted_date: card_data.posted_date,
        description: card_data.description,
        location: card_data.location,
        organization_id: organization.id,
        tags,
    };
    db::save_job(conn, &job)?;

    Ok(CardOutcome::Saved)
}
