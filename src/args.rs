use clap::Parser;
use std::path::PathBuf;
use tourist_sites::ScraperConfig;
use tourist_sites::config::DetailErrorPolicy;
use tourist_sites::error::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "tourist-sites")]
#[command(about = "Scrapes tourist-site listings from the Ivory Coast tourism portal")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing page to start from (overrides config and TOURISM_LISTING_URL)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// CSS selector for the description inside the detail container
    #[arg(long)]
    pub description_selector: Option<String>,

    /// Skip detail pages that fail to load instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Build the scraper configuration: file or defaults, then environment, then flags
    pub fn to_config(&self) -> Result<ScraperConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        }
        .with_env_overrides();

        if let Some(url) = &self.url {
            config.listing_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(selector) = &self.description_selector {
            config.description_selector = Some(selector.clone());
        }
        if self.skip_failed {
            config.on_detail_error = DetailErrorPolicy::Skip;
        }

        config.validate()?;
        Ok(config)
    }
}
