use crate::constants::{DETAIL_CONTENT_SELECTOR, SUMMARY_FALLBACK};
use crate::error::{Result, ScraperError};
use crate::fetch::PageFetcher;
use crate::sources::absolutize;
use crate::types::ReportRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};

static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(DETAIL_CONTENT_SELECTOR).unwrap());
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static PDF_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*=".pdf"]"#).unwrap());

/// Summary text from the first nested block inside the content container.
/// Falls back to the sentinel when the block is missing or empty.
fn summary_text(document: &Html) -> String {
    let text = document
        .select(&CONTENT_SELECTOR)
        .next()
        .and_then(|content| content.select(&BLOCK_SELECTOR).next())
        .map(|block| block.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        SUMMARY_FALLBACK.to_string()
    } else {
        text
    }
}

/// First link on the page pointing at a PDF, resolved against the site
/// origin. No such link is an absence, not an error.
fn find_pdf_link(document: &Html) -> Option<String> {
    document
        .select(&PDF_LINK_SELECTOR)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(absolutize)
}

/// Fetch and parse a detail page, requiring the content container to be
/// present. An absent container is the bounded-wait timeout of the original
/// page flow and counts as a page-level failure.
async fn fetch_detail(fetcher: &dyn PageFetcher, url: &str) -> Result<Html> {
    let body = fetcher.fetch(url).await?;
    let document = Html::parse_document(&body);
    if document.select(&CONTENT_SELECTOR).next().is_none() {
        return Err(ScraperError::Page {
            url: url.to_string(),
            message: "summary container never appeared".to_string(),
        });
    }
    Ok(document)
}

/// Fill in `summary` and `pdf_url` for a single record. Failures leave the
/// record with the fallback sentinel and no PDF; they never propagate.
pub async fn enrich_record(fetcher: &dyn PageFetcher, record: &mut ReportRecord) {
    let document = match fetch_detail(fetcher, &record.detail_url).await {
        Ok(document) => document,
        Err(e) => {
            warn!("Detail page failed for {}: {}", record.detail_url, e);
            record.summary = Some(SUMMARY_FALLBACK.to_string());
            record.pdf_url = None;
            return;
        }
    };

    record.summary = Some(summary_text(&document));

    // A PDF link captured on the listing page wins; no detail-page search.
    record.pdf_url = match &record.list_pdf_url {
        Some(url) => Some(url.clone()),
        None => find_pdf_link(&document),
    };

    debug!(
        "Enriched {} (pdf: {})",
        record.title,
        record.pdf_url.is_some()
    );
}

/// Enrich every record in place, one page at a time, preserving order. One
/// record's failure never affects its siblings.
pub async fn enrich_all(fetcher: &dyn PageFetcher, records: &mut [ReportRecord]) {
    for record in records.iter_mut() {
        enrich_record(fetcher, record).await;
    }
}
