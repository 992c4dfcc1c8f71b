//! Link crawling: strategy-driven listing traversal with batching
//!
//! The engine interleaves one page advance with one full item drain,
//! truncates the combined stream at the caller's cap, and re-chunks it
//! into fixed-size batches. Per-site traversal lives in `strategies`.

mod engine;
mod strategy;
pub mod strategies;

pub use engine::{Crawl, LinkCrawler};
pub use strategy::LinkStrategy;
