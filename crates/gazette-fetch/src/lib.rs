// Upstream network layer: one HTTP client per external collaborator (page
// scraper, bulletin listing endpoint, PDF-text service) and the fetch
// orchestrator that ties them together.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod listing;
pub mod pdftext;
pub mod scraper;

pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::BulletinFetcher;
pub use listing::ListingClient;
pub use pdftext::PdfTextClient;
pub use scraper::ScraperClient;
