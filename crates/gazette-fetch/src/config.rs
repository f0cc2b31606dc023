//! Construction-time configuration for the fetch layer.
//!
//! Base URLs are passed in explicitly instead of being read from the
//! process environment, so the fetch components stay testable against
//! stub collaborators.

use gazette_shared::constants::{DEFAULT_PDF2TEXT_BASE, DEFAULT_SCRAPER_BASE, SGG_AJAX_URL};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the page-scraping collaborator (no trailing slash).
    pub scraper_base: String,

    /// Base URL of the PDF-to-text collaborator (no trailing slash).
    pub pdf_text_base: String,

    /// The upstream AJAX listing endpoint.
    pub ajax_url: String,
}

impl FetchConfig {
    pub fn new(scraper_base: &str, pdf_text_base: &str) -> Self {
        Self {
            scraper_base: scraper_base.trim_end_matches('/').to_string(),
            pdf_text_base: pdf_text_base.trim_end_matches('/').to_string(),
            ajax_url: SGG_AJAX_URL.to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCRAPER_BASE, DEFAULT_PDF2TEXT_BASE)
    }
}
