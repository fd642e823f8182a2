use crate::models::{Listing, ScrapeOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Column order of the CSV output.
pub const CSV_COLUMNS: [&str; 6] = ["title", "price", "description", "location", "date", "link"];

/// Write the listings to a CSV file, overwriting any previous run.
///
/// The `price` column carries the raw price text; absent fields become
/// empty cells. Quoting and line endings follow standard CSV rules, so
/// no blank interstitial rows appear on CRLF platforms.
pub fn write_csv(path: &Path, listings: &[Listing]) -> Result<ScrapeOutcome> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;

    writer.write_record(CSV_COLUMNS)?;
    for listing in listings {
        writer.write_record([
            listing.title.as_deref().unwrap_or(""),
            listing.price_text.as_deref().unwrap_or(""),
            listing.description.as_deref().unwrap_or(""),
            listing.location.as_deref().unwrap_or(""),
            listing.date.as_deref().unwrap_or(""),
            listing.link.as_deref().unwrap_or(""),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    info!("Saved {} listings to {}", listings.len(), path.display());

    Ok(ScrapeOutcome {
        count: listings.len(),
        output_path: path.to_path_buf(),
    })
}

/// Dump the full listing records, including the parsed price and the
/// scrape timestamp, as pretty-printed JSON.
pub fn write_json(path: &Path, listings: &[Listing]) -> Result<()> {
    let json = serde_json::to_string_pretty(listings)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved raw records to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_listings() -> Vec<Listing> {
        vec![
            Listing {
                title: Some("Trosoban stan Maksimir".to_string()),
                price_text: Some("1.200 €".to_string()),
                price_value: 1200,
                description: Some("Svijetao stan, \"uredan\", 75 m2".to_string()),
                location: Some("Zagreb, Maksimir".to_string()),
                date: Some("26.08.2026.".to_string()),
                link: Some("https://www.njuskalo.hr/nekretnine/oglas-1".to_string()),
                scraped_at: Utc::now(),
            },
            Listing {
                title: Some("Garsonijera".to_string()),
                price_text: None,
                price_value: 0,
                description: None,
                location: None,
                date: None,
                link: None,
                scraped_at: Utc::now(),
            },
        ]
    }

    #[test]
    fn csv_round_trip_preserves_rows_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let listings = sample_listings();

        let outcome = write_csv(&path, &listings).unwrap();
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.output_path, path);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_COLUMNS);

        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), listings.len());

        assert_eq!(&rows[0][0], "Trosoban stan Maksimir");
        assert_eq!(&rows[0][1], "1.200 €");
        assert_eq!(&rows[0][2], "Svijetao stan, \"uredan\", 75 m2");
        assert_eq!(&rows[0][3], "Zagreb, Maksimir");
        assert_eq!(&rows[0][4], "26.08.2026.");
        assert_eq!(&rows[0][5], "https://www.njuskalo.hr/nekretnine/oglas-1");

        // Absent fields come back as empty cells.
        for cell in rows[1].iter().skip(1) {
            assert_eq!(cell, "");
        }
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let listings = sample_listings();

        write_csv(&path, &listings).unwrap();
        write_csv(&path, &listings[..1]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn empty_scrape_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let outcome = write_csv(&path, &[]).unwrap();
        assert_eq!(outcome.count, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "title,price,description,location,date,link");
    }

    #[test]
    fn json_dump_contains_full_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&path, &sample_listings()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Listing> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].price_value, 1200);
    }
}
