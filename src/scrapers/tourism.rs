use crate::config::{DetailErrorPolicy, LINK_TEXT, ScraperConfig};
use crate::error::{ConfigError, ScrapeError};
use crate::parsers::{DetailExtractor, Document, SiteFields};
use crate::results::{DetailLink, ScrapeReport, SkipReason, SkippedLink, TouristSite};
use crate::scrapers::fetcher::{Fetch, HttpFetcher};
use crate::table::Table;
use crate::utils::resolve_link;
use regex::{Regex, RegexBuilder};
use url::Url;

/// Scrapes the tourist-site listing and every detail page it links to
///
/// Pages are fetched one at a time, in the order the links appear on the
/// listing page.
pub struct TouristSiteScraper<F = HttpFetcher> {
    fetcher: F,
    listing_url: Url,
    link_pattern: Regex,
    extractor: DetailExtractor,
    on_detail_error: DetailErrorPolicy,
}

impl TouristSiteScraper<HttpFetcher> {
    /// Create a scraper that fetches over HTTP
    pub fn from_config(config: ScraperConfig) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::from_config(&config);
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetch> TouristSiteScraper<F> {
    /// Create a scraper that reads pages through `fetcher`
    pub fn with_fetcher(config: ScraperConfig, fetcher: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let listing_url = Url::parse(&config.listing_url)
            .map_err(|_| ConfigError::ListingUrl(config.listing_url.clone()))?;
        let link_pattern = RegexBuilder::new(&regex::escape(LINK_TEXT))
            .case_insensitive(true)
            .build()?;
        let extractor = DetailExtractor::from_config(&config)?;

        Ok(Self {
            fetcher,
            listing_url,
            link_pattern,
            extractor,
            on_detail_error: config.on_detail_error,
        })
    }

    /// Page source used by this scraper
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrape all sites and return them as a table
    ///
    /// Any fetch failure ends the run unless the scraper was configured to
    /// skip failed detail pages.
    pub async fn scrape(&self) -> Result<Table, ScrapeError> {
        Ok(self.scrape_report().await?.table)
    }

    /// Scrape all sites, also reporting links that produced no row
    pub async fn scrape_report(&self) -> Result<ScrapeReport, ScrapeError> {
        ::log::info!("Fetching listing page: {}", self.listing_url);
        let listing = self.fetcher.fetch(self.listing_url.as_str()).await?;
        let links = self.discover_links(&listing);
        ::log::info!("Found {} detail links", links.len());

        let mut report = ScrapeReport::default();
        for (index, link) in links.into_iter().enumerate() {
            ::log::debug!("Visiting detail link {}: {}", index + 1, link.url);

            let page = match self.fetcher.fetch(&link.url).await {
                Ok(page) => page,
                Err(e) => match self.on_detail_error {
                    DetailErrorPolicy::Abort => return Err(e.into()),
                    DetailErrorPolicy::Skip => {
                        ::log::warn!("Skipping {}: {}", link.url, e);
                        report.skipped.push(SkippedLink {
                            url: link.url,
                            reason: SkipReason::Fetch(e),
                        });
                        continue;
                    }
                },
            };

            match self.extract_fields(&page) {
                Some(fields) => {
                    let site = TouristSite::new(link, fields);
                    report.table.push(site.into_row())?;
                }
                None => {
                    ::log::debug!("No detail container on {}", link.url);
                    report.skipped.push(SkippedLink {
                        url: link.url,
                        reason: SkipReason::MissingContainer,
                    });
                }
            }
        }

        ::log::info!(
            "Scraped {} tourist sites, skipped {} links",
            report.table.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Detail links on the listing page, in document order
    fn discover_links(&self, markup: &str) -> Vec<DetailLink> {
        let listing = Document::parse(markup);
        listing
            .find_all_by_text("a", &self.link_pattern)
            .into_iter()
            .filter_map(|anchor| match anchor.attr("href") {
                Some(href) => resolve_link(&self.listing_url, href),
                None => {
                    ::log::debug!("Ignoring '{}' anchor without href", anchor.text().trim());
                    None
                }
            })
            .map(|url| DetailLink { url })
            .collect()
    }

    fn extract_fields(&self, markup: &str) -> Option<SiteFields> {
        self.extractor.extract(&Document::parse(markup))
    }
}
