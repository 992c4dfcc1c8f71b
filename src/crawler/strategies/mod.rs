//! Concrete per-site link crawling strategies

mod careerviet;
mod saramin;

pub use careerviet::CareervietLinks;
pub use saramin::SaraminLinks;
