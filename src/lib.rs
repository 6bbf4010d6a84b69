//! SITE TEXT DUMPER
//! Loads one seed page in a headless browser, follows every same-site link on it
//! and writes each page's visible text into `OUTPUT_DIR`.

mod error;
mod macros;

pub mod chrome;
pub mod collect;
pub mod driver;
pub mod fetch;
pub mod filename;
pub mod http;
pub mod process;

use std::path::PathBuf;
use std::time::Duration;

pub use error::{Error, Result};

const SEED_URL: &str = "https://www.occamsadvisory.com/";
const OUTPUT_DIR: &str = "scraped_pages";
/// Time given to client-side rendering after the seed page loads.
const COLLECT_SETTLE_SECS: u64 = 3;
/// Time given to client-side rendering after every fetched page loads.
const FETCH_SETTLE_SECS: u64 = 2;
/// If set to `None` chromiumoxide looks the browser up on its own.
const CHROME_EXECUTABLE: Option<&str> = None;
const BACKEND: Backend = Backend::Chrome;

/// Which `PageDriver` the binary runs the crawl with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Headless Chromium, scripts are executed.
    Chrome,
    /// Plain HTTP + HTML parsing, no scripts.
    Http,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: String,
    pub output_dir: PathBuf,
    pub collect_settle: Duration,
    pub fetch_settle: Duration,
    pub chrome_executable: Option<PathBuf>,
    pub backend: Backend,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: SEED_URL.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            collect_settle: Duration::from_secs(COLLECT_SETTLE_SECS),
            fetch_settle: Duration::from_secs(FETCH_SETTLE_SECS),
            chrome_executable: CHROME_EXECUTABLE.map(PathBuf::from),
            backend: BACKEND,
        }
    }
}
