//! The generic detail-scraping engine
//!
//! Walks a batch of stored links in order, sharing one page session for
//! the whole batch, and collects whatever the strategy can extract.
//! Expired postings and transient access failures are logged and
//! skipped; anything else aborts the batch.

use crate::models::{JobDetails, JobLink, Site};
use crate::page::PageSession;
use crate::scraper::strategy::{DetailOutcome, DetailStrategy};
use crate::Result;

/// Generic driver pairing one detail strategy with the skip policy
pub struct DetailScraper {
    strategy: Box<dyn DetailStrategy>,
}

impl DetailScraper {
    pub fn new(strategy: Box<dyn DetailStrategy>) -> Self {
        Self { strategy }
    }

    pub fn site(&self) -> Site {
        self.strategy.site()
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Extracts details for a batch of links, in input order
    ///
    /// The result is shorter than the input when postings turned out to
    /// be unavailable or temporarily unreachable; relative order of the
    /// remaining records matches the input.
    pub async fn scrape(&self, links: &[JobLink]) -> Result<Vec<JobDetails>> {
        tracing::info!(
            "Scraping job details for {} links with strategy {}",
            links.len(),
            self.strategy.name()
        );

        // One session serves the whole batch; dropping it at the end of
        // this function releases it on every exit path.
        let mut page = PageSession::new()?;
        let mut extracted = Vec::new();

        for link in links {
            match self.strategy.extract(&mut page, link).await {
                Ok(DetailOutcome::Extracted(details)) => extracted.push(details),
                Ok(DetailOutcome::Unavailable { reason }) => {
                    tracing::warn!("Skipping link {} ({}): {}", link.id, link.link, reason);
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        "Skipping link {} ({}) after transient failure: {}",
                        link.id,
                        link.link,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Extracted {} details from {} links",
            extracted.len(),
            links.len()
        );
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageError;
    use crate::scraper::strategy::DetailOutcome;
    use async_trait::async_trait;

    /// Scripted per-id outcomes: "ok", "gone", "timeout", "broken"
    struct ScriptedDetails;

    #[async_trait]
    impl DetailStrategy for ScriptedDetails {
        fn site(&self) -> Site {
            Site::Careerviet
        }

        fn name(&self) -> &'static str {
            "scripted_details"
        }

        async fn extract(
            &self,
            _page: &mut PageSession,
            link: &JobLink,
        ) -> Result<DetailOutcome> {
            match link.title.as_str() {
                "gone" => Ok(DetailOutcome::Unavailable {
                    reason: "expired".to_string(),
                }),
                "timeout" => Err(PageError::Timeout {
                    url: link.link.clone(),
                }
                .into()),
                "broken" => Err(PageError::ElementNotFound("description").into()),
                _ => Ok(DetailOutcome::Extracted(JobDetails::new(
                    &link.id, &link.title, "ACME", None, None, "body",
                ))),
            }
        }
    }

    fn link(id: &str, kind: &str) -> JobLink {
        JobLink::new(id, kind, format!("https://x/{}", id), Site::Careerviet)
    }

    #[tokio::test]
    async fn test_unavailable_links_are_omitted_in_order() {
        let scraper = DetailScraper::new(Box::new(ScriptedDetails));
        let links = vec![
            link("1", "ok"),
            link("2", "gone"),
            link("3", "ok"),
            link("4", "gone"),
            link("5", "ok"),
        ];

        let details = scraper.scrape(&links).await.unwrap();
        let ids: Vec<&str> = details.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[tokio::test]
    async fn test_transient_failures_are_skipped() {
        let scraper = DetailScraper::new(Box::new(ScriptedDetails));
        let links = vec![link("1", "timeout"), link("2", "ok")];

        let details = scraper.scrape(&links).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, "2");
    }

    #[tokio::test]
    async fn test_structural_failures_abort_the_batch() {
        let scraper = DetailScraper::new(Box::new(ScriptedDetails));
        let links = vec![link("1", "ok"), link("2", "broken"), link("3", "ok")];

        assert!(scraper.scrape(&links).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let scraper = DetailScraper::new(Box::new(ScriptedDetails));
        let details = scraper.scrape(&[]).await.unwrap();
        assert!(details.is_empty());
    }
}
