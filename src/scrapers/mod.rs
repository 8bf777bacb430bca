pub mod fetcher;
pub mod tourism;

#[cfg(test)]
mod tests;

pub use fetcher::{Fetch, HttpFetcher, validate_url};
pub use tourism::TouristSiteScraper;
