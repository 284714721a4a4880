pub mod collector;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod sink;
pub mod sources;
pub mod types;
