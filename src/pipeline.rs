use crate::collector;
use crate::enrich;
use crate::fetch::PageFetcher;
use crate::sink::{self, ReportSink, UploadOutcome};
use crate::types::ReportRecord;
use serde::Serialize;
use tracing::info;

/// Tally of one full run.
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub collected: usize,
    pub matched: usize,
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Keep only records published on `today` (ISO date), preserving collection
/// order. Idempotent: filtering its own output again changes nothing.
pub fn filter_by_date(records: Vec<ReportRecord>, today: &str) -> Vec<ReportRecord> {
    records
        .into_iter()
        .filter(|record| record.normalized_date.as_deref() == Some(today))
        .collect()
}

/// Run the full pipeline: collect listings, keep today's reports, enrich each
/// from its detail page, then upload. Strictly sequential; the shared fetcher
/// handles one page at a time and no stage reorders records.
pub async fn run(
    fetcher: &dyn PageFetcher,
    sink: &dyn ReportSink,
    today: &str,
) -> PipelineResult {
    info!("Starting research report run for {}", today);

    let collected = collector::collect_all(fetcher).await;
    let collected_count = collected.len();
    info!("Collected {} rows across all sources", collected_count);

    let mut matched = filter_by_date(collected, today);
    if matched.is_empty() {
        // Normal no-op outcome: nothing published today, stop before any
        // detail fetch or sink call.
        info!("No reports dated {}", today);
        return PipelineResult {
            collected: collected_count,
            matched: 0,
            uploaded: 0,
            skipped: 0,
            failed: 0,
        };
    }
    info!("{} reports dated {}", matched.len(), today);

    enrich::enrich_all(fetcher, &mut matched).await;

    let outcomes = sink::upload_all(sink, &matched).await;
    let uploaded = outcomes
        .iter()
        .filter(|o| **o == UploadOutcome::Uploaded)
        .count();
    let skipped = outcomes
        .iter()
        .filter(|o| **o == UploadOutcome::Skipped)
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| **o == UploadOutcome::Failed)
        .count();

    PipelineResult {
        collected: collected_count,
        matched: matched.len(),
        uploaded,
        skipped,
        failed,
    }
}
