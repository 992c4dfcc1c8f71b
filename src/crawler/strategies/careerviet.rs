//! Careerviet listing traversal
//!
//! Careerviet keeps it simple: a single "next page" anchor at the bottom
//! of the listing, absent on the last page.

use crate::crawler::strategy::{collect_anchor_links, LinkStrategy};
use crate::models::{JobLink, Site};
use crate::page::{Locator, PageError, PageSession};
use crate::Result;
use async_trait::async_trait;

const ENTRY_URL: &str = "https://careerviet.vn/viec-lam/tat-ca-viec-lam-vi.html";

/// Job title anchors; the posting id rides in data-id
const ITEMS: Locator = Locator::new(
    "careerviet job links",
    r#"#jobs-side-list-content div[id^="job-item"] div.title a.job_link"#,
);

const NEXT_PAGE: Locator = Locator::new("careerviet next page link", "li.next-page a");

pub struct CareervietLinks {
    entry_url: String,
    started: bool,
}

impl CareervietLinks {
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

impl Default for CareervietLinks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStrategy for CareervietLinks {
    fn site(&self) -> Site {
        Site::Careerviet
    }

    fn name(&self) -> &'static str {
        "CareervietLinks"
    }

    async fn advance_page(&mut self, page: &mut PageSession) -> Result<bool> {
        if !self.started {
            page.open(&self.entry_url).await?;
            self.started = true;
            return Ok(true);
        }

        match page.activate(&NEXT_PAGE).await {
            Ok(()) => Ok(true),
            Err(PageError::ElementNotFound(_)) => {
                tracing::info!("No next page button found, listing exhausted");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn extract_items(&self, page: &PageSession) -> Result<Vec<JobLink>> {
        collect_anchor_links(page, &ITEMS, "data-id", Site::Careerviet)
    }
}
