use crate::config::AirtableConfig;
use crate::constants::SUMMARY_FALLBACK;
use crate::error::{Result, ScraperError};
use crate::types::ReportRecord;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

/// One entry in Airtable's attachment-field format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub url: String,
}

/// Destination schema. Serialized names match the Airtable table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadFields {
    #[serde(rename = "날짜")]
    pub date: String,
    #[serde(rename = "리포트 종류")]
    pub report_type: String,
    #[serde(rename = "분류")]
    pub category: String,
    #[serde(rename = "증권사")]
    pub company: String,
    #[serde(rename = "리포트명")]
    pub title: String,
    #[serde(rename = "리포트 링크")]
    pub detail_url: String,
    #[serde(rename = "PDF파일")]
    pub pdf_attachments: Vec<Attachment>,
    #[serde(rename = "PDF파일 링크")]
    pub pdf_url: String,
    #[serde(rename = "리포트 서머리")]
    pub summary: String,
    #[serde(rename = "종목명", skip_serializing_if = "Option::is_none")]
    pub stock_name: Option<String>,
}

/// Map a record to the destination schema, or `None` when it is missing a
/// required field (date or PDF) and must be skipped.
pub fn to_upload_fields(record: &ReportRecord) -> Option<UploadFields> {
    let date = record.normalized_date.clone()?;
    let pdf_url = record.pdf_url.clone()?;

    Some(UploadFields {
        date,
        report_type: record.report_type.clone(),
        category: record.category.clone(),
        company: record.company.clone(),
        title: record.title.clone(),
        detail_url: record.detail_url.clone(),
        pdf_attachments: vec![Attachment {
            url: pdf_url.clone(),
        }],
        pdf_url,
        summary: record
            .summary
            .clone()
            .unwrap_or_else(|| SUMMARY_FALLBACK.to_string()),
        stock_name: record.stock_name.clone(),
    })
}

/// Tabular destination accepting one record per call.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(&self, fields: &UploadFields) -> Result<()>;
}

/// Production sink posting records to the Airtable REST API.
pub struct AirtableSink {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AirtableSink {
    pub fn new(config: &AirtableConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ReportSink for AirtableSink {
    async fn submit(&self, fields: &UploadFields) -> Result<()> {
        let payload = serde_json::json!({ "fields": fields });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ScraperError::Sink(format!("status {status}: {body}")))
        }
    }
}

/// Sink that prints the mapped payload instead of posting it.
pub struct DryRunSink;

#[async_trait]
impl ReportSink for DryRunSink {
    async fn submit(&self, fields: &UploadFields) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(fields)?);
        Ok(())
    }
}

/// Per-record upload outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Skipped,
    Failed,
}

/// Submit every eligible record, one at a time, in order. A rejected or
/// failed submission is reported and never aborts the remaining records.
pub async fn upload_all(sink: &dyn ReportSink, records: &[ReportRecord]) -> Vec<UploadOutcome> {
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records {
        let outcome = match to_upload_fields(record) {
            None => {
                warn!("Skipping {}: missing date or PDF URL", record.title);
                println!("   ⏭️  Skipped (missing data): {}", record.title);
                UploadOutcome::Skipped
            }
            Some(fields) => match sink.submit(&fields).await {
                Ok(()) => {
                    info!("Uploaded: {} ({})", record.title, record.report_type);
                    println!("   ✅ Uploaded: {} ({})", record.title, record.report_type);
                    UploadOutcome::Uploaded
                }
                Err(e) => {
                    warn!("Upload failed for {}: {}", record.title, e);
                    println!("   ❌ Upload failed: {}", record.title);
                    UploadOutcome::Failed
                }
            },
        };
        outcomes.push(outcome);
    }

    outcomes
}
