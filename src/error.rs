use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Page error at {url}: {message}")]
    Page { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sink rejected record: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
