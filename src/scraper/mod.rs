//! Detail scraping: turning stored job links into full posting records
//!
//! The engine walks one batch of links with one shared page session;
//! per-site extraction lives in `strategies`. Expired postings are an
//! expected outcome and are skipped, not errors.

mod engine;
mod strategy;
pub mod strategies;

pub use engine::DetailScraper;
pub use strategy::{DetailFuture, DetailOutcome, DetailStrategy, FnDetailStrategy};
