pub mod config;
pub mod error;
pub mod parsers;
pub mod results;
pub mod scrapers;
pub mod table;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::{ConfigError, FetchError, ScrapeError, TableError};
pub use results::{ScrapeReport, TouristSite};
pub use scrapers::{Fetch, HttpFetcher, TouristSiteScraper};
pub use table::Table;

/// Scrape the Ivory Coast tourism portal with the default configuration
pub async fn scrape_tourist_sites() -> Result<Table, ScrapeError> {
    let scraper = TouristSiteScraper::from_config(ScraperConfig::default())?;
    scraper.scrape().await
}
