//! The page session: one navigable view onto a site
//!
//! A session owns the HTTP client and the body of the currently open
//! page. One session serves at most one logical operation at a time (one
//! crawl of one site, or one detail batch); dropping it releases the
//! underlying connection pool on every exit path.

use crate::page::element::select_all;
use crate::page::{Locator, PageElement, PageError, PageResult};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("jobharvest/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client all sessions use
///
/// Explicit user agent and timeouts; compressed transfer accepted.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A page-access handle over an HTTP client and an HTML parser
///
/// "Activating" a control means following its `href`, which is how a
/// next-page button behaves for a client that does not execute scripts.
pub struct PageSession {
    client: Client,
    current_url: Option<Url>,
    body: Option<String>,
}

impl PageSession {
    pub fn new() -> PageResult<Self> {
        let client = build_http_client().map_err(|source| PageError::Navigation {
            url: String::new(),
            source,
        })?;
        Ok(Self {
            client,
            current_url: None,
            body: None,
        })
    }

    /// Builds a session already "on" a page, without any network access
    #[cfg(test)]
    pub(crate) fn with_body(body: &str) -> Self {
        Self {
            client: Client::new(),
            current_url: Url::parse("http://test.invalid/").ok(),
            body: Some(body.to_string()),
        }
    }

    /// The URL of the currently open page, after any redirects
    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    /// Opens a page, replacing whatever was open before
    ///
    /// Relative URLs are resolved against the current page. Non-success
    /// statuses are reported as [`PageError::HttpStatus`]; the caller
    /// decides whether that means "expired listing" or a real failure.
    pub async fn open(&mut self, url: &str) -> PageResult<()> {
        let absolute = self.resolve(url)?;

        let response = self
            .client
            .get(absolute.clone())
            .send()
            .await
            .map_err(|e| classify_send_error(absolute.as_str(), e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(PageError::HttpStatus {
                status: status.as_u16(),
                url: final_url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(final_url.as_str(), e))?;

        tracing::debug!("Opened {} ({} bytes)", final_url, body.len());
        self.current_url = Some(final_url);
        self.body = Some(body);
        Ok(())
    }

    /// Locates the first element matching the locator
    ///
    /// Absence is the catchable [`PageError::ElementNotFound`].
    pub fn find(&self, locator: &Locator) -> PageResult<PageElement> {
        self.find_all(locator)?
            .into_iter()
            .next()
            .ok_or(PageError::ElementNotFound(locator.name))
    }

    /// Locates every element matching the locator (zero matches is Ok)
    pub fn find_all(&self, locator: &Locator) -> PageResult<Vec<PageElement>> {
        let body = self.body.as_deref().ok_or(PageError::NoPageOpen)?;
        select_all(body, locator)
    }

    /// True when at least one element matches the locator
    pub fn exists(&self, locator: &Locator) -> PageResult<bool> {
        Ok(!self.find_all(locator)?.is_empty())
    }

    /// Resolves a possibly-relative href against the current page
    ///
    /// What a browser would hand back when asked for a link's target.
    pub fn absolutize(&self, href: &str) -> PageResult<Url> {
        self.resolve(href)
    }

    /// Locates a control and follows its `href`
    ///
    /// Not finding the control is catchable; a control without an `href`
    /// is a structural defect and surfaces as `MissingAttribute`.
    pub async fn activate(&mut self, locator: &Locator) -> PageResult<()> {
        let element = self.find(locator)?;
        let href = element.require_attr(locator, "href")?.to_string();
        tracing::debug!("Activating {} -> {}", locator, href);
        self.open(&href).await
    }

    fn resolve(&self, url: &str) -> PageResult<Url> {
        let parse = match self.current_url {
            Some(ref base) => base.join(url),
            None => Url::parse(url),
        };
        parse.map_err(|source| PageError::BadUrl {
            url: url.to_string(),
            source,
        })
    }
}

fn classify_send_error(url: &str, error: reqwest::Error) -> PageError {
    if error.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageError::Navigation {
            url: url.to_string(),
            source: error,
        }
    }
}
