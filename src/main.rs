use chrono::Local;
use clap::Parser;
use research_scraper::config::AirtableConfig;
use research_scraper::error::Result;
use research_scraper::fetch::HttpFetcher;
use research_scraper::sink::{AirtableSink, DryRunSink, ReportSink};
use research_scraper::{logging, pipeline};

#[derive(Parser)]
#[command(name = "research_scraper")]
#[command(about = "Naver Finance analyst research report scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Collect and enrich, but print records instead of uploading
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let today = cli
        .date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    // Credentials are resolved before any page is fetched.
    let sink: Box<dyn ReportSink> = if cli.dry_run {
        Box::new(DryRunSink)
    } else {
        Box::new(AirtableSink::new(&AirtableConfig::from_env()?))
    };

    // One shared fetcher for every page in the run; dropped once on exit.
    let fetcher = HttpFetcher::new()?;

    println!("🔎 Scraping research reports for {today}");
    let result = pipeline::run(&fetcher, sink.as_ref(), &today).await;

    if result.matched == 0 {
        println!("ℹ️  No reports dated {today} — nothing to upload");
        return Ok(());
    }

    println!("\n📊 Run results:");
    println!("   Collected rows: {}", result.collected);
    println!("   Dated {}: {}", today, result.matched);
    println!("   Uploaded: {}", result.uploaded);
    println!("   Skipped (missing data): {}", result.skipped);
    println!("   Failed uploads: {}", result.failed);

    Ok(())
}
