//! The generic link-crawling engine
//!
//! Drives any [`LinkStrategy`] page by page, truncates the combined item
//! stream at the requested cap, and re-chunks it into fixed-size batches
//! the caller pulls one at a time.

use crate::crawler::strategy::LinkStrategy;
use crate::models::{JobLink, Site};
use crate::page::PageSession;
use crate::{HarvestError, Result};
use std::collections::VecDeque;

/// Generic driver pairing one strategy with the batching logic
pub struct LinkCrawler {
    strategy: Box<dyn LinkStrategy>,
}

impl LinkCrawler {
    pub fn new(strategy: Box<dyn LinkStrategy>) -> Self {
        Self { strategy }
    }

    pub fn site(&self) -> Site {
        self.strategy.site()
    }

    /// Starts a crawl for up to `max_items` links in `batch_size` groups
    ///
    /// Acquires the page session here so that dropping the returned
    /// [`Crawl`] releases it on every exit path, including errors and
    /// early abandonment.
    pub fn crawl(&mut self, batch_size: usize, max_items: usize) -> Result<Crawl<'_>> {
        if batch_size == 0 || max_items == 0 {
            return Err(HarvestError::InvalidCrawlBounds {
                batch_size,
                max_items,
            });
        }

        tracing::info!(
            "Scraping {} links in batches of {} using strategy {}",
            max_items,
            batch_size,
            self.strategy.name()
        );

        Ok(Crawl {
            strategy: self.strategy.as_mut(),
            page: PageSession::new()?,
            pending: VecDeque::new(),
            produced: 0,
            emitted: 0,
            batch_size,
            max_items,
            exhausted: false,
            finished: false,
        })
    }
}

/// One in-progress crawl; pull batches with [`Crawl::next_batch`]
///
/// Not re-entrant: drain it to completion or drop it before starting
/// another crawl with the same strategy. The cap is the only early-stop
/// mechanism; a caller wanting out sooner just stops pulling and drops.
pub struct Crawl<'c> {
    strategy: &'c mut dyn LinkStrategy,
    page: PageSession,
    pending: VecDeque<JobLink>,
    /// Items taken from the strategy so far, truncated at `max_items`
    produced: usize,
    /// Items handed out in batches so far
    emitted: usize,
    batch_size: usize,
    max_items: usize,
    exhausted: bool,
    finished: bool,
}

impl Crawl<'_> {
    /// Produces the next batch, or None once the crawl is complete
    ///
    /// Advances a page and drains its items, repeatedly, until a full
    /// batch is pending, the cap is reached, or the listing runs out. No
    /// further `advance_page` call is issued once the cap is reached, so
    /// no page is loaded whose items could not be used. Every batch has
    /// exactly `batch_size` items except possibly the last; an empty
    /// batch is never returned.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<JobLink>>> {
        while !self.exhausted
            && self.produced < self.max_items
            && self.pending.len() < self.batch_size
        {
            if !self.strategy.advance_page(&mut self.page).await? {
                self.exhausted = true;
                break;
            }

            let items = self.strategy.extract_items(&self.page).await?;
            for item in items {
                if self.produced == self.max_items {
                    break;
                }
                self.pending.push_back(item);
                self.produced += 1;
            }
        }

        let take = self.pending.len().min(self.batch_size);
        if take == 0 {
            if !self.finished {
                self.finished = true;
                tracing::info!(
                    "{} collected {} links",
                    self.strategy.name(),
                    self.emitted
                );
            }
            return Ok(None);
        }

        let batch: Vec<JobLink> = self.pending.drain(..take).collect();
        self.emitted += batch.len();
        tracing::info!("Collected a batch of {} job links", batch.len());
        Ok(Some(batch))
    }

    /// Running total of links emitted so far; final total on completion
    pub fn total_collected(&self) -> usize {
        self.emitted
    }
}
