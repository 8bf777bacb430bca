use clap::Parser;
use std::error::Error;
use tourist_sites::TouristSiteScraper;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = args.to_config()?;

    ::log::info!("Starting scrape of {}", config.listing_url);
    let scraper = TouristSiteScraper::from_config(config)?;

    let start_time = std::time::Instant::now();
    let report = match scraper.scrape_report().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    for skipped in &report.skipped {
        ::log::warn!("Skipped {}: {}", skipped.url, skipped.reason);
    }
    ::log::info!(
        "Scrape complete - {} sites in {:.2} seconds",
        report.table.len(),
        start_time.elapsed().as_secs_f64()
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&report.table)?
    } else {
        serde_json::to_string(&report.table)?
    };
    println!("{}", json);

    Ok(())
}
