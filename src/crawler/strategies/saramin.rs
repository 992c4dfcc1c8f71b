//! Saramin listing traversal
//!
//! Saramin paginates in blocks of ten: each page links its numbered
//! neighbours, and the last page of a block carries a separate control
//! that jumps to the first page of the next block. Advancing therefore
//! tries the numbered "next page" link first and the block control
//! second before concluding the listing is over.

use crate::crawler::strategy::{collect_anchor_links, LinkStrategy};
use crate::models::{JobLink, Site};
use crate::page::{Locator, PageError, PageSession};
use crate::Result;
use async_trait::async_trait;

const ENTRY_URL: &str = "https://www.saramin.co.kr/zf_user/jobs/list/domestic";

/// Job link anchors; the element id doubles as the posting id
const ITEMS: Locator = Locator::new("saramin job links", r#"#default_list_wrap section a[id^="rec_link_"]"#);

/// Marker showing which numbered page is currently open
const CURRENT_PAGE: Locator = Locator::new(
    "saramin current page marker",
    "#default_list_wrap div.PageBox span.BtnType.active",
);

/// Numbered page links inside the pagination box
const NUMBERED_PAGES: Locator = Locator::new(
    "saramin numbered page links",
    "#default_list_wrap div.PageBox a.BtnType[page]",
);

/// Control jumping to the next block of ten pages
const NEXT_BLOCK: Locator = Locator::new(
    "saramin next block control",
    "#default_list_wrap div.PageBox a.BtnType.BtnNext",
);

pub struct SaraminLinks {
    entry_url: String,
    started: bool,
}

impl SaraminLinks {
    pub fn new() -> Self {
        Self::starting_at(ENTRY_URL)
    }

    /// Starts from a different listing entry point (mirrors, tests)
    pub fn starting_at(entry_url: impl Into<String>) -> Self {
        Self {
            entry_url: entry_url.into(),
            started: false,
        }
    }
}

impl Default for SaraminLinks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStrategy for SaraminLinks {
    fn site(&self) -> Site {
        Site::Saramin
    }

    fn name(&self) -> &'static str {
        "SaraminLinks"
    }

    async fn advance_page(&mut self, page: &mut PageSession) -> Result<bool> {
        if !self.started {
            page.open(&self.entry_url).await?;
            self.started = true;
            return Ok(true);
        }

        // The pagination box and its active marker must exist on every
        // listing page; their absence means the markup changed.
        let active = page.find(&CURRENT_PAGE)?;
        let current: u32 =
            active
                .text()
                .parse()
                .map_err(|_| PageError::UnexpectedContent {
                    locator: CURRENT_PAGE.name,
                    message: format!("page number expected, got {:?}", active.text()),
                })?;

        // First choice: the link to page current+1 within this block.
        let wanted = (current + 1).to_string();
        let numbered = page.find_all(&NUMBERED_PAGES)?;
        if let Some(next) = numbered
            .iter()
            .find(|el| el.attr("page") == Some(wanted.as_str()))
        {
            let href = next.require_attr(&NUMBERED_PAGES, "href")?.to_string();
            page.open(&href).await?;
            return Ok(true);
        }

        // Second choice: the control opening the next block of pages.
        match page.activate(&NEXT_BLOCK).await {
            Ok(()) => {
                tracing::info!("Opening the next block of pages");
                Ok(true)
            }
            Err(PageError::ElementNotFound(_)) => {
                tracing::info!("No next-page control found, listing exhausted");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn extract_items(&self, page: &PageSession) -> Result<Vec<JobLink>> {
        collect_anchor_links(page, &ITEMS, "id", Site::Saramin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_page(current: u32, pages: &[u32], with_next_block: bool) -> String {
        let numbered: String = pages
            .iter()
            .map(|p| {
                format!(
                    r#"<a class="BtnType" page="{p}" href="/jobs?page={p}">{p}</a>"#
                )
            })
            .collect();
        let block = if with_next_block {
            r#"<a class="BtnType BtnNext" href="/jobs?page=11">next</a>"#
        } else {
            ""
        };
        format!(
            r#"<html><body><div id="default_list_wrap">
                <section>
                    <a id="rec_link_1" title="Job One" href="/job/1">One</a>
                </section>
                <div class="PageBox">
                    <span class="BtnType active">{current}</span>
                    {numbered}
                    {block}
                </div>
            </div></body></html>"#
        )
    }

    #[tokio::test]
    async fn test_extract_items_reads_element_id() {
        let strategy = SaraminLinks::new();
        let page = PageSession::with_body(&listing_page(1, &[2], false));

        let links = strategy.extract_items(&page).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, "rec_link_1");
        assert_eq!(links[0].title, "Job One");
        assert_eq!(links[0].site, Site::Saramin);
    }

    #[tokio::test]
    async fn test_advance_requires_page_marker() {
        let mut strategy = SaraminLinks::new();
        strategy.started = true;
        let mut page = PageSession::with_body("<html><body>no pagination</body></html>");

        // A listing page without the pagination marker is a structural
        // failure, not end-of-results.
        let result = strategy.advance_page(&mut page).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_advance_rejects_non_numeric_marker() {
        let mut strategy = SaraminLinks::new();
        strategy.started = true;
        let body = listing_page(1, &[2], false).replace(">1<", ">one<");
        let mut page = PageSession::with_body(&body);

        let result = strategy.advance_page(&mut page).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_advance_terminates_without_controls() {
        let mut strategy = SaraminLinks::new();
        strategy.started = true;
        // Page 3 is current, only pages 1..3 are linked, no block control.
        let mut page = PageSession::with_body(&listing_page(3, &[1, 2], false));

        assert!(!strategy.advance_page(&mut page).await.unwrap());
    }
}
