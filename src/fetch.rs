use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Page-fetching capability. The pipeline never talks to the network
/// directly, so tests can substitute canned documents.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve the HTML body at `url`. Timeouts and transport failures
    /// surface as errors; element lookup happens on the parsed document.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Production fetcher backed by a shared HTTP client. The request timeout is
/// the bounded wait for a page; exceeding it is a page-level failure, never
/// fatal to the run.
pub struct HttpFetcher {
    client: reqwest::Client,
}

const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PAGE_TIMEOUT)
            .user_agent(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/120.0.0.0 Safari/537.36",
            )
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}
