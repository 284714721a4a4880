use crate::constants::AIRTABLE_TABLE_NAME;
use crate::error::{Result, ScraperError};

/// Airtable credentials and destination, read from the environment
/// (a local `.env` file is honored via dotenv at startup).
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
}

impl AirtableConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AIRTABLE_API_KEY")
            .map_err(|_| ScraperError::Config("AIRTABLE_API_KEY is not set".to_string()))?;
        let base_id = std::env::var("AIRTABLE_BASE_ID")
            .map_err(|_| ScraperError::Config("AIRTABLE_BASE_ID is not set".to_string()))?;

        Ok(Self {
            api_key,
            base_id,
            table_name: AIRTABLE_TABLE_NAME.to_string(),
        })
    }

    /// Record-creation endpoint for the destination table.
    pub fn endpoint(&self) -> String {
        format!("https://api.airtable.com/v0/{}/{}", self.base_id, self.table_name)
    }
}
