//! The link-crawling strategy contract
//!
//! A strategy owns the per-site traversal logic: how to reach the first
//! listing page, how to move to the next one, and which elements on the
//! current page are job links. It knows nothing about batching, caps, or
//! storage; the engine drives it page by page.

use crate::models::{JobLink, Site};
use crate::page::{Locator, PageSession};
use crate::Result;
use async_trait::async_trait;

/// Per-site listing traversal and item extraction
///
/// The two operations are coupled through the session's position and must
/// be interleaved as "advance once, then drain the page's items". The
/// engine owns that loop; implementations only ever see the current page.
#[async_trait]
pub trait LinkStrategy: Send {
    /// The site this strategy traverses
    fn site(&self) -> Site;

    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Moves the session forward by one listing page
    ///
    /// The first call opens the entry page. Later calls locate the site's
    /// "next page" controls, trying them in the site's priority order, and
    /// follow one. Returns Ok(false) once no control is present: that is
    /// the normal end of the listing, never an error. A control that is
    /// present but unusable (e.g. missing its href) is a structural
    /// failure and propagates.
    async fn advance_page(&mut self, page: &mut PageSession) -> Result<bool>;

    /// Reads the current page's job link elements
    ///
    /// Emits one [`JobLink`] per element carrying all three required
    /// attributes; elements missing any of them are skipped and logged,
    /// never an error.
    async fn extract_items(&self, page: &PageSession) -> Result<Vec<JobLink>>;
}

/// Shared extraction walk for strategies whose items are anchor elements
///
/// Reads the site-local identifier from `id_attr`, the title from
/// `title`, and the target URL from `href`.
pub(crate) fn collect_anchor_links(
    page: &PageSession,
    items: &Locator,
    id_attr: &str,
    site: Site,
) -> Result<Vec<JobLink>> {
    let elements = page.find_all(items)?;
    tracing::info!("Found {} job link elements on the page", elements.len());

    let mut links = Vec::new();
    for element in elements {
        let id = element.attr(id_attr);
        let title = element.attr("title");
        let href = element.attr("href");

        match (id, title, href) {
            (Some(id), Some(title), Some(href)) => match page.absolutize(href) {
                Ok(url) => links.push(JobLink::new(id, title, url.to_string(), site)),
                Err(e) => {
                    tracing::warn!("Skipping {} element with unusable href: {}", items, e);
                }
            },
            _ => {
                tracing::warn!(
                    "Skipping {} element missing one of {}/title/href",
                    items,
                    id_attr
                );
            }
        }
    }
    Ok(links)
}
