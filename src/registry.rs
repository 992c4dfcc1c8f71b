//! Explicit site-to-strategy registry
//!
//! The orchestrator constructs one [`Registry`] and injects its
//! strategies into the engines; nothing registers itself and no global
//! table exists. Adding a site means adding its enum variant and the
//! two match arms here.

use crate::crawler::strategies::{CareervietLinks, SaraminLinks};
use crate::crawler::LinkStrategy;
use crate::models::Site;
use crate::scraper::strategies::{careerviet_details, SaraminDetails};
use crate::scraper::DetailStrategy;

/// Builds the link crawling strategy for a site
pub fn link_strategy_for(site: Site) -> Box<dyn LinkStrategy> {
    match site {
        Site::Saramin => Box::new(SaraminLinks::new()),
        Site::Careerviet => Box::new(CareervietLinks::new()),
    }
}

/// Builds the detail scraping strategy for a site
pub fn detail_strategy_for(site: Site) -> Box<dyn DetailStrategy> {
    match site {
        Site::Saramin => Box::new(SaraminDetails::new()),
        Site::Careerviet => Box::new(careerviet_details()),
    }
}

/// The set of strategies one command run works with
pub struct Registry {
    sites: Vec<Site>,
}

impl Registry {
    /// Registry over every known site, in [`Site::ALL`] order
    pub fn standard() -> Self {
        Self {
            sites: Site::ALL.to_vec(),
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Link strategies for every registered site
    pub fn link_strategies(&self) -> Vec<Box<dyn LinkStrategy>> {
        self.sites.iter().map(|&s| link_strategy_for(s)).collect()
    }

    /// Detail strategies for every registered site
    pub fn detail_strategies(&self) -> Vec<Box<dyn DetailStrategy>> {
        self.sites.iter().map(|&s| detail_strategy_for(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_site_has_both_strategies() {
        for site in Site::ALL {
            assert_eq!(link_strategy_for(site).site(), site);
            assert_eq!(detail_strategy_for(site).site(), site);
        }
    }

    #[test]
    fn test_standard_registry_covers_all_sites() {
        let registry = Registry::standard();
        assert_eq!(registry.sites(), &Site::ALL);
        assert_eq!(registry.link_strategies().len(), Site::ALL.len());
        assert_eq!(registry.detail_strategies().len(), Site::ALL.len());
    }
}
