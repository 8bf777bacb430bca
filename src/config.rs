use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Listing page of the Ivory Coast tourism portal
pub const IVORY_COAST_URL: &str = "https://tourisme.gouv.ci/accueil/sitetouristique";

/// Anchor text that marks a link to a tourist-site detail page
pub const LINK_TEXT: &str = "lire plus";

/// Environment variable that overrides the listing URL
pub const LISTING_URL_ENV: &str = "TOURISM_LISTING_URL";

/// What to do when a detail page cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailErrorPolicy {
    /// Stop the run and return the error
    #[default]
    Abort,
    /// Record the link as skipped and keep going
    Skip,
}

/// Configuration for the tourist-site scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Page listing all tourist sites
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tag of the element wrapping a site's details
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    /// Class of the element wrapping a site's details
    #[serde(default = "default_container_class")]
    pub container_class: String,

    /// CSS selector for the description, evaluated inside the container.
    /// When unset the description is the container's second-to-last child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_selector: Option<String>,

    /// Behaviour on a failed detail-page fetch
    #[serde(default)]
    pub on_detail_error: DetailErrorPolicy,
}

fn default_listing_url() -> String {
    IVORY_COAST_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_container_tag() -> String {
    "div".to_string()
}

fn default_container_class() -> String {
    "news_content".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            timeout_secs: default_timeout_secs(),
            container_tag: default_container_tag(),
            container_class: default_container_class(),
            description_selector: None,
            on_detail_error: DetailErrorPolicy::default(),
        }
    }
}

impl ScraperConfig {
    /// Create a configuration for the given listing page
    pub fn new(listing_url: &str) -> Self {
        Self {
            listing_url: listing_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the listing URL with the one from the environment, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(listing_url) = std::env::var(LISTING_URL_ENV) {
            if !listing_url.is_empty() {
                ::log::debug!("Listing URL overridden by {}", LISTING_URL_ENV);
                self.listing_url = listing_url;
            }
        }
        self
    }

    /// Check fields that would otherwise only fail mid-run
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.listing_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::ListingUrl(self.listing_url.clone())),
        }
        if let Some(selector) = &self.description_selector {
            scraper::Selector::parse(selector)
                .map_err(|_| ConfigError::Selector(selector.clone()))?;
        }
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
