//! Page-access handle for the crawl and scrape pipelines
//!
//! This module abstracts "open a page, locate elements, read their text
//! and attributes, activate a control" over an HTTP client plus an HTML
//! parser. Strategies never touch reqwest or scraper directly; they work
//! against [`PageSession`], [`Locator`], and [`PageElement`].

mod element;
mod session;

pub use element::{Locator, PageElement};
pub use session::{build_http_client, PageSession};

use thiserror::Error;

/// Errors raised by the page-access layer
///
/// `ElementNotFound` and `MissingAttribute` are the catchable-absence
/// outcomes strategies recover from locally; `InvalidLocator` signals a
/// defect in a coordinate table and is always fatal.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid locator {name}: {selector}")]
    InvalidLocator {
        name: &'static str,
        selector: &'static str,
    },

    #[error("no page is open")]
    NoPageOpen,

    #[error("element not found: {0}")]
    ElementNotFound(&'static str),

    #[error("element {locator} has no {attribute} attribute")]
    MissingAttribute {
        locator: &'static str,
        attribute: &'static str,
    },

    #[error("element {locator} has unexpected content: {message}")]
    UnexpectedContent {
        locator: &'static str,
        message: String,
    },

    #[error("timeout opening {url}")]
    Timeout { url: String },

    #[error("failed to open {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("invalid URL {url}: {source}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl PageError {
    /// True for failures worth retrying later rather than surfacing
    /// (timeouts, connection-level failures, server-side errors).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Navigation { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for page-access operations
pub type PageResult<T> = std::result::Result<T, PageError>;
