use serde::{Deserialize, Serialize};

/// A single analyst report, built up incrementally as it moves through the
/// pipeline: listing row, date filter, detail enrichment, upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Category label, fixed per source except for the industry page where it
    /// comes from the first column.
    pub category: String,
    pub title: String,
    /// Publishing brokerage.
    pub company: String,
    /// Present only for company-analysis reports.
    pub stock_name: Option<String>,
    /// Date cell text as scraped, `YY.MM.DD`.
    pub raw_date: String,
    /// ISO form of `raw_date`; set only when the raw date matched the
    /// expected pattern.
    pub normalized_date: Option<String>,
    /// Absolute URL of the report's detail page.
    pub detail_url: String,
    /// PDF link taken directly from the listing row (company-analysis only).
    pub list_pdf_url: Option<String>,
    /// Human-readable source label, e.g. `산업분석 리포트`.
    pub report_type: String,
    /// Filled in by the detail enricher; fallback sentinel on failure.
    pub summary: Option<String>,
    /// Final resolved PDF URL, if any.
    pub pdf_url: Option<String>,
}
