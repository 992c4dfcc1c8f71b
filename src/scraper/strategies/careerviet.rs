//! Careerviet detail extraction
//!
//! Careerviet serves posting pages to plain HTTP clients, so the
//! extraction is a free function wrapped in [`FnDetailStrategy`].
//! Removed postings either redirect to the site's error page or render
//! a "no results" banner in place of the posting.

use crate::models::{JobDetails, JobLink, Site, UNSPECIFIED};
use crate::page::{Locator, PageError, PageSession};
use crate::scraper::strategy::{DetailFuture, DetailOutcome, DetailStrategy, FnDetailStrategy};
use crate::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Path postings redirect to once they are taken down
const EXPIRED_REDIRECT_PATH: &str = "/error.html";

const TITLE: Locator = Locator::new("careerviet document title", "title");
const EXPIRED_BANNER: Locator = Locator::new("careerviet expired banner", "div.no-search");
const LOCATION: Locator = Locator::new("careerviet location link", "div.job-summary p.location a");
const ALT_LOCATION: Locator = Locator::new("careerviet branch location", "div.job-address p.name");
const ADDRESS: Locator = Locator::new("careerviet street address", "div.job-address span.address");
const SALARY: Locator = Locator::new("careerviet salary row", "div.job-summary li.salary p");
const ALT_SALARY: Locator = Locator::new(
    "careerviet salary table cell",
    "table.jobs-detail-table tr.salary td p",
);
const DESCRIPTION: Locator = Locator::new(
    "careerviet job description",
    "section.job-detail div.job-description",
);
const ALT_DESCRIPTION: Locator = Locator::new(
    "careerviet alternate job description",
    "div.detail-content div.tab-content",
);

const TITLE_PREFIX: &str = "Tuyển dụng ";
const TITLE_COMPANY_SEPARATOR: &str = " tại ";
const TITLE_SUFFIX: &str = " - CareerViet.vn";

/// Builds the Careerviet detail strategy
pub fn careerviet_details() -> impl DetailStrategy {
    FnDetailStrategy::new(Site::Careerviet, "careerviet_details", collect)
}

fn collect<'a>(page: &'a mut PageSession, link: &'a JobLink) -> DetailFuture<'a> {
    Box::pin(collect_details(page, link))
}

async fn collect_details(page: &mut PageSession, link: &JobLink) -> Result<DetailOutcome> {
    tracing::info!(
        "Retrieving details for job {} (id: {}, link: {})",
        link.title,
        link.id,
        link.link
    );

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

    if page
        .current_url()
        .map(|u| u.path() == EXPIRED_REDIRECT_PATH)
        .unwrap_or(false)
    {
        return Ok(DetailOutcome::Unavailable {
            reason: "redirected to the error page".to_string(),
        });
    }

    extract_current_page(page, link)
}

/// Extracts the posting from the page the session currently has open
fn extract_current_page(page: &PageSession, link: &JobLink) -> Result<DetailOutcome> {
    if page.exists(&EXPIRED_BANNER)? {
        return Ok(DetailOutcome::Unavailable {
            reason: "expired banner present".to_string(),
        });
    }

    let raw_title = match page.find(&TITLE) {
        Ok(element) => element.text().to_string(),
        Err(PageError::ElementNotFound(_)) => {
            return Ok(DetailOutcome::Unavailable {
                reason: "document title missing".to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let (title, company) = split_title_company(&raw_title);

    let mut location_parts = Vec::new();
    for locator in [&LOCATION, &ALT_LOCATION, &ADDRESS] {
        if let Ok(element) = page.find(locator) {
            if !element.text().is_empty() {
                location_parts.push(format!("{};", element.text()));
            }
        }
    }
    let location = if location_parts.is_empty() {
        None
    } else {
        Some(location_parts.join(" "))
    };

    let salary_information = first_text(page, &[&SALARY, &ALT_SALARY]);

    let description =
        first_text(page, &[&DESCRIPTION, &ALT_DESCRIPTION]).unwrap_or_else(|| UNSPECIFIED.into());

    Ok(DetailOutcome::Extracted(JobDetails::new(
        &link.id,
        title,
        company,
        location,
        salary_information,
        description,
    )))
}

/// Text of the first locator that matches with non-empty content
fn first_text(page: &PageSession, locators: &[&Locator]) -> Option<String> {
    locators
        .iter()
        .filter_map(|locator| page.find(locator).ok())
        .map(|element| element.text().to_string())
        .find(|text| !text.is_empty())
}

/// Splits the document title into posting title and company name
///
/// Titles look like "Tuyển dụng <title> tại <company> 2024 - CareerViet.vn";
/// the year and site suffix are shed from the company part. Without the
/// "tại" separator the whole remainder is the title and the company is
/// unknown.
fn split_title_company(raw: &str) -> (String, String) {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let year = YEAR.get_or_init(|| Regex::new(r" 20[0-9][0-9]").expect("year pattern"));

    let trimmed = raw.strip_prefix(TITLE_PREFIX).unwrap_or(raw);
    match trimmed.split_once(TITLE_COMPANY_SEPARATOR) {
        Some((title, rest)) => {
            let rest = rest.strip_suffix(TITLE_SUFFIX).unwrap_or(rest);
            let company = year.split(rest).next().unwrap_or(rest).trim().to_string();
            (title.to_string(), company)
        }
        None => (
            trimmed
                .strip_suffix(TITLE_SUFFIX)
                .unwrap_or(trimmed)
                .to_string(),
            UNSPECIFIED.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_company() {
        let (title, company) = split_title_company(
            "Tuyển dụng Senior Backend Engineer tại ACME Corporation 2024 - CareerViet.vn",
        );
        assert_eq!(title, "Senior Backend Engineer");
        assert_eq!(company, "ACME Corporation");
    }

    #[test]
    fn test_split_title_company_without_year() {
        let (title, company) =
            split_title_company("Tuyển dụng Kế Toán tại Công Ty TNHH Delta - CareerViet.vn");
        assert_eq!(title, "Kế Toán");
        assert_eq!(company, "Công Ty TNHH Delta");
    }

    #[test]
    fn test_split_title_company_without_separator() {
        let (title, company) = split_title_company("Tuyển dụng Kỹ Sư Phần Mềm - CareerViet.vn");
        assert_eq!(title, "Kỹ Sư Phần Mềm");
        assert_eq!(company, UNSPECIFIED);
    }

    fn posting_page() -> &'static str {
        r#"<html>
        <head><title>Tuyển dụng QA Lead tại Beta Ltd 2025 - CareerViet.vn</title></head>
        <body>
            <div class="job-summary">
                <p class="location"><a href="/loc">Hà Nội</a></p>
                <ul><li class="salary"><p>10-15 triệu</p></li></ul>
            </div>
            <div class="job-address">
                <p class="name">Chi nhánh 2</p>
                <span class="address">12 Phố Huế</span>
            </div>
            <section class="job-detail">
                <div class="job-description">Build and test things.</div>
            </section>
        </body></html>"#
    }

    #[test]
    fn test_extract_full_page() {
        let page = PageSession::with_body(posting_page());
        let link = JobLink::new("35A1", "QA Lead", "https://x/35A1", Site::Careerviet);

        let details = match extract_current_page(&page, &link).unwrap() {
            DetailOutcome::Extracted(d) => d,
            DetailOutcome::Unavailable { reason } => panic!("unexpected skip: {}", reason),
        };

        assert_eq!(details.id, "35A1");
        assert_eq!(details.title, "QA Lead");
        assert_eq!(details.company, "Beta Ltd");
        assert_eq!(
            details.location.as_deref(),
            Some("Hà Nội; Chi nhánh 2; 12 Phố Huế;")
        );
        assert_eq!(details.salary_information.as_deref(), Some("10-15 triệu"));
        assert_eq!(details.description, "Build and test things.");
    }

    #[test]
    fn test_extract_expired_banner() {
        let page = PageSession::with_body(
            r#"<html><head><title>x</title></head>
            <body><div class="no-search">Tin đã hết hạn</div></body></html>"#,
        );
        let link = JobLink::new("1", "t", "https://x/1", Site::Careerviet);

        let outcome = extract_current_page(&page, &link).unwrap();
        assert!(matches!(outcome, DetailOutcome::Unavailable { .. }));
    }

    #[test]
    fn test_extract_missing_title_is_unavailable() {
        let page = PageSession::with_body("<html><body><p>bare page</p></body></html>");
        let link = JobLink::new("1", "t", "https://x/1", Site::Careerviet);

        let outcome = extract_current_page(&page, &link).unwrap();
        assert!(matches!(outcome, DetailOutcome::Unavailable { .. }));
    }

    #[test]
    fn test_extract_missing_description_gets_placeholder() {
        let page = PageSession::with_body(
            r#"<html><head><title>Tuyển dụng A tại B - CareerViet.vn</title></head>
            <body><p>thin page</p></body></html>"#,
        );
        let link = JobLink::new("1", "A", "https://x/1", Site::Careerviet);

        let details = match extract_current_page(&page, &link).unwrap() {
            DetailOutcome::Extracted(d) => d,
            DetailOutcome::Unavailable { reason } => panic!("unexpected skip: {}", reason),
        };
        assert_eq!(details.description, UNSPECIFIED);
        assert_eq!(details.location, None);
        assert_eq!(details.salary_information, None);
    }

    #[test]
    fn test_alternate_salary_fallback() {
        let page = PageSession::with_body(
            r#"<html><head><title>Tuyển dụng A tại B - CareerViet.vn</title></head>
            <body>
                <table class="jobs-detail-table">
                    <tr class="salary"><td><p>Thỏa thuận</p></td></tr>
                </table>
            </body></html>"#,
        );
        let link = JobLink::new("1", "A", "https://x/1", Site::Careerviet);

        let details = match extract_current_page(&page, &link).unwrap() {
            DetailOutcome::Extracted(d) => d,
            DetailOutcome::Unavailable { reason } => panic!("unexpected skip: {}", reason),
        };
        assert_eq!(details.salary_information.as_deref(), Some("Thỏa thuận"));
    }
}
