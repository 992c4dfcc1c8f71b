//! Saramin detail extraction
//!
//! Saramin posting pages keep the summary fields in the `jview` section
//! and the free-form body in a separate content container. A posting
//! without its title heading is treated as expired.

use crate::models::{JobDetails, JobLink, Site, UNSPECIFIED};
use crate::page::{Locator, PageError, PageSession};
use crate::scraper::strategy::{DetailOutcome, DetailStrategy};
use crate::Result;
use async_trait::async_trait;

const TITLE: Locator = Locator::new("saramin posting title", "section.jview h1.tit_job");
const COMPANY: Locator = Locator::new("saramin company link", "section.jview a.company");
const LOCATION: Locator = Locator::new(
    "saramin work place",
    "section.jview address span.work_place",
);
const MAP: Locator = Locator::new("saramin map container", "#map_0");
const SALARY: Locator = Locator::new("saramin salary row", "section.jview dl.salary dd");
const DESCRIPTION: Locator = Locator::new("saramin posting body", "div.user_content");

pub struct SaraminDetails;

impl SaraminDetails {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SaraminDetails {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DetailStrategy for SaraminDetails {
    fn site(&self) -> Site {
        Site::Saramin
    }

    fn name(&self) -> &'static str {
        "SaraminDetails"
    }

    async fn extract(&self, page: &mut PageSession, link: &JobLink) -> Result<DetailOutcome> {
        tracing::info!("Retrieving details for job {} (id {})", link.title, link.id);

        match page.open(&link.link).await {
            Ok(()) => {}
            Err(PageError::HttpStatus {
                status: status @ (404 | 410),
                url,
            }) => {
                return Ok(DetailOutcome::Unavailable {
                    reason: format!("HTTP {} for {}", status, url),
                })
            }
            Err(e) => return Err(e.into()),
        }

        extract_current_page(page, link)
    }
}

/// Extracts the posting from the page the session currently has open
fn extract_current_page(page: &PageSession, link: &JobLink) -> Result<DetailOutcome> {
    let title = match page.find(&TITLE) {
        Ok(element) => element.text().to_string(),
        Err(PageError::ElementNotFound(_)) => {
            return Ok(DetailOutcome::Unavailable {
                reason: "posting title missing (expired or unusual page structure)".to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let company = page
        .find(&COMPANY)
        .ok()
        .and_then(|element| element.attr("title").map(str::to_string))
        .unwrap_or_else(|| UNSPECIFIED.to_string());

    let primary_location = page
        .find(&LOCATION)
        .ok()
        .map(|element| element.text().to_string())
        .filter(|text| !text.is_empty());

    // The map container carries a richer address with coordinates; it is
    // appended to the visible location rather than replacing it.
    let map_location = page.find(&MAP).ok().and_then(|element| {
        match (
            element.attr("data-address"),
            element.attr("data-latitude"),
            element.attr("data-longitude"),
        ) {
            (Some(address), Some(lat), Some(long)) => {
                Some(format!("{}; lat {}; long {}", address, lat, long))
            }
            _ => None,
        }
    });

    let location = match (primary_location, map_location) {
        (Some(visible), Some(map)) => Some(format!("{} ({})", visible, map)),
        (None, Some(map)) => Some(map),
        (visible, None) => visible,
    };

    let salary_information = page
        .find(&SALARY)
        .ok()
        .map(|element| element.text().to_string())
        .filter(|text| !text.is_empty());

    let description = page
        .find(&DESCRIPTION)
        .ok()
        .map(|element| element.text().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNSPECIFIED.to_string());

    Ok(DetailOutcome::Extracted(JobDetails::new(
        &link.id,
        title,
        company,
        location,
        salary_information,
        description,
    )))
}
