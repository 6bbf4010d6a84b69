use url::Url;

use crate::chrome::ChromeSession;
use crate::collect::collect_links;
use crate::driver::PageDriver;
use crate::fetch::{fetch_page, prepare_output_dir, PageOutcome};
use crate::http::HttpDriver;
use crate::{info_time, Backend, CrawlConfig, Result};

/// Counts for one finished crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Size of the collected URL set, i.e. how many pages were attempted.
    pub collected: usize,
    pub saved: usize,
    pub failed: usize,
}

impl CrawlSummary {
    fn record(&mut self, outcome: &PageOutcome) {
        if outcome.is_saved() {
            self.saved += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Launches the configured backend and crawls the site with it.
pub async fn process_site(config: &CrawlConfig) -> Result<CrawlSummary> {
    match config.backend {
        Backend::Chrome => run_scoped(ChromeSession::launch(config).await?, config).await,
        Backend::Http => run_scoped(HttpDriver::new(), config).await,
    }
}

/// Runs `crawl` and closes the driver afterwards, also when the crawl failed.
/// The crawl's error wins over an error from closing.
pub async fn run_scoped<D: PageDriver>(
    mut driver: D,
    config: &CrawlConfig,
) -> Result<CrawlSummary> {
    let res = crawl(&mut driver, config).await;
    let closed = driver.close().await;

    let summary = res?;
    closed?;
    info_time!(
        "Done! {} pages saved in '{}' folder ({} collected, {} failed).",
        summary.saved,
        config.output_dir.display(),
        summary.collected,
        summary.failed
    );
    Ok(summary)
}

/// Collects the seed page's links, then fetches and saves every one of them.
pub async fn crawl<D>(driver: &mut D, config: &CrawlConfig) -> Result<CrawlSummary>
where
    D: PageDriver + ?Sized,
{
    let seed = Url::parse(&config.seed_url)?;
    prepare_output_dir(&config.output_dir).await?;

    let urls = collect_links(driver, &seed, config.collect_settle).await?;

    let start_time = chrono::Local::now();
    let mut summary = CrawlSummary {
        collected: urls.len(),
        ..Default::default()
    };
    for url in &urls {
        let outcome = fetch_page(driver, url, &config.output_dir, config.fetch_settle).await;
        summary.record(&outcome);
    }
    info_time!(start_time, "Processed {} pages", summary.collected);

    Ok(summary)
}
