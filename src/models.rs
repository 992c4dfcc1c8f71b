//! Core record types shared by the crawl and scrape pipelines

use chrono::Utc;
use std::fmt;

/// The job sites this crate knows how to harvest
///
/// Used as the partition key for stored records and as the dispatch key
/// when selecting strategies from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Saramin,
    Careerviet,
}

impl Site {
    /// All known sites, in registry order
    pub const ALL: [Site; 2] = [Site::Saramin, Site::Careerviet];

    /// Stable string form used as the database partition key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saramin => "saramin",
            Self::Careerviet => "careerviet",
        }
    }

    /// Parses the database string form back into a site
    ///
    /// Returns None for unknown strings.
    pub fn from_str_key(s: &str) -> Option<Self> {
        match s {
            "saramin" => Some(Self::Saramin),
            "careerviet" => Some(Self::Careerviet),
            _ => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight pointer to a job posting found on a listing page
///
/// `id` is site-local: two sites may reuse the same identifier, so the
/// `(site, id)` pair is the real key. Immutable once produced; the store
/// absorbs duplicate keys silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLink {
    pub id: String,
    pub title: String,
    pub link: String,
    pub site: Site,
}

impl JobLink {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        site: Site,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            site,
        }
    }
}

/// Fully extracted posting content, keyed by the same id as its JobLink
///
/// Mutable via re-extraction: saving again with the same `id` replaces
/// every other field (upsert, not append).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_information: Option<String>,
    pub description: String,
    /// RFC 3339 timestamp of when the extraction happened
    pub access_date: String,
}

impl JobDetails {
    /// Builds a record stamped with the current UTC time
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
        location: Option<String>,
        salary_information: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            location,
            salary_information,
            description: description.into(),
            access_date: Utc::now().to_rfc3339(),
        }
    }
}

/// Placeholder stored when a required secondary field is absent on the page
pub const UNSPECIFIED: &str = "unspecified";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_roundtrip() {
        for site in Site::ALL {
            assert_eq!(Site::from_str_key(site.as_str()), Some(site));
        }
    }

    #[test]
    fn test_site_unknown_string() {
        assert_eq!(Site::from_str_key("monster"), None);
    }

    #[test]
    fn test_job_details_timestamp_is_rfc3339() {
        let details = JobDetails::new("1", "t", "c", None, None, "d");
        assert!(chrono::DateTime::parse_from_rfc3339(&details.access_date).is_ok());
    }
}
