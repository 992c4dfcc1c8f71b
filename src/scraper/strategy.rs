//! The detail-scraping strategy contract
//!
//! One strategy turns one stored job link into one full detail record,
//! or reports the posting as unavailable. Unavailability is an expected
//! outcome (postings expire), kept separate from real errors.

use crate::models::{JobDetails, JobLink, Site};
use crate::page::PageSession;
use crate::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// What a detail extraction produced
#[derive(Debug)]
pub enum DetailOutcome {
    /// The posting was extracted; optional fields may carry placeholders
    Extracted(JobDetails),
    /// The posting is gone (expired marker, missing title, 404)
    Unavailable { reason: String },
}

/// Per-site single-posting extraction
#[async_trait]
pub trait DetailStrategy: Send + Sync {
    /// The site whose stored links this strategy understands
    fn site(&self) -> Site;

    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Navigates to the link's page and extracts the posting
    ///
    /// Missing secondary fields never fail the extraction; a missing
    /// title means [`DetailOutcome::Unavailable`]. Errors escape only
    /// for access failures and structural surprises, which the engine
    /// then classifies as transient or fatal.
    async fn extract(&self, page: &mut PageSession, link: &JobLink) -> Result<DetailOutcome>;
}

/// Future type returned by plain-function detail strategies
pub type DetailFuture<'a> = Pin<Box<dyn Future<Output = Result<DetailOutcome>> + Send + 'a>>;

/// Adapter pairing a plain extraction function with its site metadata
///
/// Some sites need no state beyond their locator constants; those are
/// written as free functions and wrapped here, constructed explicitly by
/// the registry.
pub struct FnDetailStrategy<F> {
    site: Site,
    name: &'static str,
    f: F,
}

impl<F> FnDetailStrategy<F>
where
    F: for<'a> Fn(&'a mut PageSession, &'a JobLink) -> DetailFuture<'a> + Send + Sync,
{
    pub fn new(site: Site, name: &'static str, f: F) -> Self {
        Self { site, name, f }
    }
}

#[async_trait]
impl<F> DetailStrategy for FnDetailStrategy<F>
where
    F: for<'a> Fn(&'a mut PageSession, &'a JobLink) -> DetailFuture<'a> + Send + Sync,
{
    fn site(&self) -> Site {
        self.site
    }

    fn name(&self) -> &'static str {
        self.name
    }

    async fn extract(&self, page: &mut PageSession, link: &JobLink) -> Result<DetailOutcome> {
        (self.f)(page, link).await
    }
}
