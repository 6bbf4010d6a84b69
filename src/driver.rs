use async_trait::async_trait;

use crate::Result;

/// The few things the crawl needs from a browser.
///
/// A driver holds one current page: `navigate` replaces it, the other calls read from it.
#[async_trait]
pub trait PageDriver: Send {
    /// Loads `url` and waits for the load event.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// The `href` attribute of every `<a>` on the current page, in document order.
    /// `None` for anchors without one.
    async fn anchor_hrefs(&mut self) -> Result<Vec<Option<String>>>;

    /// Human readable text of the current page's `<body>`.
    async fn body_text(&mut self) -> Result<String>;

    /// Releases the underlying session.
    async fn close(self) -> Result<()>;
}
