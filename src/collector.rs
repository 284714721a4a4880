use crate::constants::LISTING_TABLE_SELECTOR;
use crate::error::{Result, ScraperError};
use crate::fetch::PageFetcher;
use crate::sources::{normalize_date, RowSchema, SOURCES};
use crate::types::ReportRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LISTING_TABLE_SELECTOR).unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());

/// Scrape one listing page into normalized records.
///
/// Rows that fail to parse or whose date cell is not a `YY.MM.DD` date are
/// non-report rows (headers, ads, pagination) and are dropped silently. A
/// missing report table is a page-level failure.
pub async fn collect_source(
    fetcher: &dyn PageFetcher,
    schema: &RowSchema,
) -> Result<Vec<ReportRecord>> {
    let body = fetcher.fetch(schema.list_url).await?;
    let document = Html::parse_document(&body);

    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| ScraperError::Page {
            url: schema.list_url.to_string(),
            message: "report table never appeared".to_string(),
        })?;

    let mut records = Vec::new();
    for row in table.select(&ROW_SELECTOR) {
        let Some(mut record) = schema.extract_row(row) else {
            continue;
        };
        let Some(normalized) = normalize_date(&record.raw_date) else {
            continue;
        };
        record.normalized_date = Some(normalized);
        records.push(record);
    }

    info!(
        "Collected {} rows from {} ({})",
        records.len(),
        schema.list_url,
        schema.report_type
    );
    Ok(records)
}

/// Walk all five sources in declaration order. A failing source is logged and
/// skipped so the remaining sources still contribute; row order within each
/// source is preserved.
pub async fn collect_all(fetcher: &dyn PageFetcher) -> Vec<ReportRecord> {
    let mut all_reports = Vec::new();
    for schema in SOURCES.iter() {
        match collect_source(fetcher, schema).await {
            Ok(mut records) => all_reports.append(&mut records),
            Err(e) => {
                warn!("Skipping source {}: {}", schema.list_url, e);
            }
        }
    }
    all_reports
}
