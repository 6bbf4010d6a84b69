use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("The page has no <{0}> element.")]
    MissingElement(String),
    #[error("The selector couldn't be parsed. Selector: {0}")]
    InvalidSelector(String),
    #[error("No page has been loaded yet.")]
    NoPageLoaded,

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Browser config error: {0}")]
    BrowserConfig(String),
    #[error("DevTools protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
