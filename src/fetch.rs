use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::driver::PageDriver;
use crate::filename::sanitize_filename;
use crate::{info_time, warn_time, Result};

/// What happened to a single collected URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Saved { url: String, filename: String },
    Failed { url: String, reason: String },
}

impl PageOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PageOutcome::Saved { .. })
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOutcome::Saved { filename, .. } => write!(f, "Saved: {filename}"),
            PageOutcome::Failed { url, reason } => write!(f, "Failed to process {url}: {reason}"),
        }
    }
}

/// Creates the output directory, leaving it and its files alone if it already exists.
pub async fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(output_dir).await?;
    Ok(())
}

/// Loads `url`, waits `settle` and writes the page's body text to `output_dir`.
/// Never fails: any error is turned into `PageOutcome::Failed`.
pub async fn fetch_page<D>(
    driver: &mut D,
    url: &str,
    output_dir: &Path,
    settle: Duration,
) -> PageOutcome
where
    D: PageDriver + ?Sized,
{
    let outcome = match save_page(driver, url, output_dir, settle).await {
        Ok(filename) => PageOutcome::Saved {
            url: url.to_string(),
            filename,
        },
        Err(e) => PageOutcome::Failed {
            url: url.to_string(),
            reason: e.to_string(),
        },
    };

    if outcome.is_saved() {
        info_time!("{}", outcome);
    } else {
        warn_time!("{}", outcome);
    }
    outcome
}

async fn save_page<D>(
    driver: &mut D,
    url: &str,
    output_dir: &Path,
    settle: Duration,
) -> Result<String>
where
    D: PageDriver + ?Sized,
{
    driver.navigate(url).await?;
    tokio::time::sleep(settle).await;
    let text = driver.body_text().await?;

    let filename = sanitize_filename(&Url::parse(url)?);
    tokio::fs::write(output_dir.join(&filename), text).await?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_lines() {
        let saved = PageOutcome::Saved {
            url: "https://example.com/about".into(),
            filename: "about.txt".into(),
        };
        let failed = PageOutcome::Failed {
            url: "https://example.com/broken".into(),
            reason: "timed out".into(),
        };
        assert_eq!(saved.to_string(), "Saved: about.txt");
        assert_eq!(
            failed.to_string(),
            "Failed to process https://example.com/broken: timed out"
        );
        assert!(!failed.is_saved());
    }

    #[tokio::test]
    async fn preparing_twice_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pages");

        prepare_output_dir(&out).await.unwrap();
        tokio::fs::write(out.join("home.txt"), "old").await.unwrap();
        prepare_output_dir(&out).await.unwrap();

        let kept = tokio::fs::read_to_string(out.join("home.txt")).await.unwrap();
        assert_eq!(kept, "old");
    }
}
