mod models;
mod scrapers;
mod writer;

use clap::Parser;
use scrapers::{NjuskaloScraper, ScraperConfig, ScraperTrait, SearchFilter};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};

/// Scrape Zagreb rental listings from Njuškalo into a CSV file
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Comma-separated neighbourhood names to keep (case-insensitive
    /// substring match); empty keeps everything
    #[arg(short, long, value_delimiter = ',')]
    locations: Vec<String>,

    /// Minimum price in EUR, inclusive
    #[arg(long, default_value_t = 0)]
    min_price: i64,

    /// Maximum price in EUR, inclusive
    #[arg(long, default_value_t = 9_999_999)]
    max_price: i64,

    /// Number of index pages to scrape
    #[arg(short, long, default_value_t = 5)]
    pages: u32,

    /// Output CSV path
    #[arg(short, long, default_value = "njuskalo_stanovi.csv")]
    output: PathBuf,

    /// Also dump the full records as pretty JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Fetch individual ad pages when the index gives no location
    #[arg(long)]
    fetch_details: bool,

    /// Seconds to wait between page requests
    #[arg(long, default_value_t = 2)]
    delay_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Njuškalo Scout - Zagreb rental scraper");

    let scraper = NjuskaloScraper::with_config(ScraperConfig {
        page_delay: Duration::from_secs(args.delay_secs),
        fetch_details: args.fetch_details,
        ..Default::default()
    })?;

    info!("Source: {}", scraper.source_name());

    let filter = SearchFilter {
        locations: args.locations,
        min_price: args.min_price,
        max_price: args.max_price,
        pages: args.pages,
    };

    let listings = scraper.scrape(&filter).await?;

    for (i, listing) in listings.iter().enumerate() {
        println!(
            "{}. {} ({})",
            i + 1,
            listing.title.as_deref().unwrap_or("(bez naslova)"),
            listing.price_text.as_deref().unwrap_or("cijena nepoznata"),
        );
        if let Some(location) = &listing.location {
            println!("   Lokacija: {}", location);
        }
        if let Some(link) = &listing.link {
            println!("   {}", link);
        }
        println!();
    }

    let outcome = writer::write_csv(&args.output, &listings)?;

    if let Some(json_path) = &args.json {
        writer::write_json(json_path, &listings)?;
    }

    println!(
        "✅ Gotovo! {} listings saved to {}",
        outcome.count,
        outcome.output_path.display()
    );

    Ok(())
}
