use chrono::Local;
use sitedump::{info_time, process::process_site, CrawlConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    process_site(&CrawlConfig::default()).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
