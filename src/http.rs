use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};

use crate::driver::PageDriver;
use crate::{Error, Result};

/// Elements whose text never shows up on screen.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// HTML of a page as the server sent it.
///
/// `Html` isn't `Send`, so the document is only parsed inside the synchronous getters.
#[derive(Debug, Clone)]
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn anchor_hrefs(&self) -> Result<Vec<Option<String>>> {
        let doc = Html::parse_document(&self.html);
        let anchor_selector = create_selector("a")?;

        let hrefs = doc
            .select(&anchor_selector)
            .map(|a| a.value().attr("href").map(str::to_string))
            .collect();
        Ok(hrefs)
    }

    /// Visible text under `<body>`. Inline content is joined with single spaces,
    /// block elements and `<br>` start a new line.
    pub fn body_text(&self) -> Result<String> {
        let doc = Html::parse_document(&self.html);
        let body_selector = create_selector("body")?;
        let body = doc
            .select(&body_selector)
            .next()
            .ok_or_else(|| Error::MissingElement("body".into()))?;

        let mut text = TextCollector::default();
        text.walk(body);
        Ok(text.finish())
    }
}

/// Elements that are laid out on their own line.
const BLOCK_ELEMENTS: [&str; 33] = [
    "address", "article", "aside", "blockquote", "body", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    line: String,
    space: bool,
}

impl TextCollector {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(el) => {
                    let name = el.name();
                    if name == "br" {
                        self.break_line();
                    } else if HIDDEN_ELEMENTS.contains(&name) {
                        continue;
                    } else if let Some(child_el) = ElementRef::wrap(child) {
                        let block = BLOCK_ELEMENTS.contains(&name);
                        if block {
                            self.break_line();
                        }
                        self.walk(child_el);
                        if block {
                            self.break_line();
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if text.starts_with(char::is_whitespace) {
            self.space = true;
        }
        for word in text.split_whitespace() {
            if self.space && !self.line.is_empty() {
                self.line.push(' ');
            }
            self.line.push_str(word);
            self.space = true;
        }
        self.space = text.ends_with(char::is_whitespace);
    }

    fn break_line(&mut self) {
        if !self.line.is_empty() {
            self.lines.push(std::mem::take(&mut self.line));
        }
        self.space = false;
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}

/// Fetches pages with plain GET requests. Scripts are never run, so pages that render
/// their content client-side come out mostly empty.
pub struct HttpDriver {
    client: Client,
    current: Option<StaticPage>,
}

impl HttpDriver {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            current: None,
        }
    }

    fn current(&self) -> Result<&StaticPage> {
        self.current.as_ref().ok_or(Error::NoPageLoaded)
    }
}

impl Default for HttpDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageDriver for HttpDriver {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let res = self.client.get(url).send().await?.error_for_status()?;
        let html = res.text().await?;
        self.current = Some(StaticPage::new(html));
        Ok(())
    }

    async fn anchor_hrefs(&mut self) -> Result<Vec<Option<String>>> {
        self.current()?.anchor_hrefs()
    }

    async fn body_text(&mut self) -> Result<String> {
        self.current()?.body_text()
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_without_href_are_none() {
        let page = StaticPage::new(
            r#"<html><body>
                <a href="/about">About</a><a name="top">Top</a><a href="">Self</a>
            </body></html>"#,
        );
        let hrefs = page.anchor_hrefs().unwrap();
        assert_eq!(
            hrefs,
            vec![Some("/about".to_string()), None, Some(String::new())]
        );
    }

    #[test]
    fn body_text_skips_hidden_elements() {
        let page = StaticPage::new(
            r#"<html><head><title>Title</title></head><body>
                <h1>Hello
                    world</h1>
                <script>var x = 1;</script>
                <style>p { color: red; }</style>
                <noscript>Enable JavaScript</noscript>
                <template><p>Later</p></template>
                <p>Some <b>bold</b> text</p>
            </body></html>"#,
        );
        assert_eq!(page.body_text().unwrap(), "Hello world\nSome bold text");
    }

    #[test]
    fn inline_elements_stay_on_one_line() {
        let page = StaticPage::new(
            r#"<body>
                <div>Call <a href="/contact">us</a> today<br>or <em>write</em>.</div>
                <ul><li>One</li><li>T<i>w</i>o</li></ul>
            </body>"#,
        );
        assert_eq!(
            page.body_text().unwrap(),
            "Call us today\nor write.\nOne\nTwo"
        );
    }

    #[test]
    fn fragment_without_body_still_has_one() {
        // html5ever always synthesizes a <body>.
        let page = StaticPage::new("just text");
        assert_eq!(page.body_text().unwrap(), "just text");
    }

    #[tokio::test]
    async fn reading_before_navigating_fails() {
        let mut driver = HttpDriver::new();
        assert!(matches!(
            driver.body_text().await,
            Err(Error::NoPageLoaded)
        ));
    }
}
