use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::driver::PageDriver;
use crate::{info_time, warn_time, CrawlConfig, Error, Result};

/// A headless Chromium with a single tab, driven over the DevTools protocol.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// Starts the browser. Sandboxing, GPU and `/dev/shm` are all turned off so it runs
    /// in containers and on CI boxes.
    pub async fn launch(config: &CrawlConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build().map_err(Error::BrowserConfig)?;

        let (browser, mut events) = Browser::launch(browser_config).await?;
        // The handler has to be polled for the whole life of the browser.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    warn_time!("Browser event error: {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        info_time!("Launched headless browser");

        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

#[async_trait]
impl PageDriver for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn anchor_hrefs(&mut self) -> Result<Vec<Option<String>>> {
        let anchors = self.page.find_elements("a").await?;

        let mut hrefs = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            hrefs.push(anchor.attribute("href").await?);
        }
        Ok(hrefs)
    }

    async fn body_text(&mut self) -> Result<String> {
        let body = self.page.find_element("body").await?;
        Ok(body.inner_text().await?.unwrap_or_default())
    }

    async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        self.handler.await?;
        info_time!("Closed headless browser");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "data:text/html,<body>\
        <div>Hello%20there</div>\
        <div><a%20href=\"/x\">X</a></div>\
        <div><a>Y</a></div>\
        </body>";

    #[tokio::test]
    #[cfg_attr(not(feature = "browser"), ignore)]
    async fn reads_anchors_and_text_from_chrome() -> Result<()> {
        let mut session = ChromeSession::launch(&CrawlConfig::default()).await?;

        session.navigate(PAGE).await?;
        let hrefs = session.anchor_hrefs().await?;
        let text = session.body_text().await?;
        session.close().await?;

        assert_eq!(hrefs, vec![Some("/x".to_string()), None]);
        assert_eq!(text.lines().collect::<Vec<_>>(), ["Hello there", "X", "Y"]);
        Ok(())
    }
}
