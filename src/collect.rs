use std::collections::HashSet;
use std::time::Duration;

use url::Url;

use crate::driver::PageDriver;
use crate::{info_time, Result};

/// Loads the seed page and returns every distinct same-origin link found on it,
/// without fragments.
///
/// Any error here is fatal for the whole crawl.
pub async fn collect_links<D>(
    driver: &mut D,
    seed: &Url,
    settle: Duration,
) -> Result<HashSet<String>>
where
    D: PageDriver + ?Sized,
{
    let start_time = chrono::Local::now();
    info_time!("Collecting links from {}", seed);

    driver.navigate(seed.as_str()).await?;
    tokio::time::sleep(settle).await;

    let hrefs = driver.anchor_hrefs().await?;
    let found = hrefs.len();
    let urls: HashSet<String> = hrefs
        .iter()
        .flatten()
        .filter_map(|href| canonical_same_origin(seed, href))
        .collect();

    info_time!(
        start_time,
        "Found {} anchors, {} unique same-site links",
        found,
        urls.len()
    );
    Ok(urls)
}

/// Resolves `href` against `seed` and returns it without its fragment,
/// or `None` if it doesn't resolve or points to another origin.
pub fn canonical_same_origin(seed: &Url, href: &str) -> Option<String> {
    let mut url = seed.join(href).ok()?;
    // Opaque origins (mailto:, javascript:, data:) never compare equal.
    if url.origin() != seed.origin() {
        return None;
    }
    url.set_fragment(None);
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn relative_links_are_resolved() {
        assert_eq!(
            canonical_same_origin(&seed(), "/about").as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(
            canonical_same_origin(&Url::parse("https://example.com/blog/").unwrap(), "post-1")
                .as_deref(),
            Some("https://example.com/blog/post-1")
        );
    }

    #[test]
    fn fragment_is_stripped() {
        assert_eq!(
            canonical_same_origin(&seed(), "https://example.com/about#team").as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(
            canonical_same_origin(&seed(), "#top").as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn other_origins_are_excluded() {
        for href in [
            "https://other.com/x",
            "http://example.com/about",
            "https://example.com:8443/about",
            "https://sub.example.com/",
            "mailto:a@b.com",
            "javascript:void(0)",
            "tel:+123",
        ] {
            assert_eq!(canonical_same_origin(&seed(), href), None, "href {href}");
        }
    }

    #[test]
    fn unresolvable_hrefs_are_skipped() {
        for href in ["http://[bad", "https://example.com:99999/x", "http://"] {
            assert_eq!(canonical_same_origin(&seed(), href), None, "href {href}");
        }
    }

    #[test]
    fn query_is_kept() {
        assert_eq!(
            canonical_same_origin(&seed(), "/search?q=a#r").as_deref(),
            Some("https://example.com/search?q=a")
        );
    }
}
