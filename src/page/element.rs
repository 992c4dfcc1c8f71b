//! Locators and owned element snapshots
//!
//! `scraper::Html` is not `Send`, so documents are parsed inside the
//! synchronous helpers here and only owned data crosses back into the
//! async strategies.

use crate::page::{PageError, PageResult};
use scraper::{Html, Selector};

/// A named CSS selector pointing at one kind of page element
///
/// Locators are per-site coordinate data, declared as constants next to
/// the strategy that uses them. The name shows up in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub name: &'static str,
    pub selector: &'static str,
}

impl Locator {
    pub const fn new(name: &'static str, selector: &'static str) -> Self {
        Self { name, selector }
    }

    fn compile(&self) -> PageResult<Selector> {
        Selector::parse(self.selector).map_err(|_| PageError::InvalidLocator {
            name: self.name,
            selector: self.selector,
        })
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Owned snapshot of one matched element: its text content plus attributes
#[derive(Debug, Clone)]
pub struct PageElement {
    text: String,
    attributes: Vec<(String, String)>,
}

impl PageElement {
    /// Whitespace-normalized text content of the element and its children
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reads an attribute value; None when the element does not carry it
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Reads an attribute that the calling strategy requires to be present
    pub fn require_attr(&self, locator: &Locator, attribute: &'static str) -> PageResult<&str> {
        self.attr(attribute).ok_or(PageError::MissingAttribute {
            locator: locator.name,
            attribute,
        })
    }
}

/// Runs a locator against a raw HTML body, snapshotting every match
pub(crate) fn select_all(body: &str, locator: &Locator) -> PageResult<Vec<PageElement>> {
    let selector = locator.compile()?;
    let document = Html::parse_document(body);

    Ok(document
        .select(&selector)
        .map(|element| PageElement {
            text: element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            attributes: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: Locator = Locator::new("item", "a.job");
    const BROKEN: Locator = Locator::new("broken", "a[[[");

    #[test]
    fn test_select_all_matches() {
        let body = r#"<html><body>
            <a class="job" href="/a" title="A">First</a>
            <a class="job" href="/b" title="B">Second</a>
            <a class="other" href="/c">Other</a>
        </body></html>"#;

        let elements = select_all(body, &ITEM).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].attr("href"), Some("/a"));
        assert_eq!(elements[1].attr("title"), Some("B"));
    }

    #[test]
    fn test_select_all_no_matches() {
        let elements = select_all("<html><body></body></html>", &ITEM).unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn test_text_is_whitespace_normalized() {
        let body = r#"<a class="job">  Senior
                Engineer  </a>"#;
        let elements = select_all(body, &ITEM).unwrap();
        assert_eq!(elements[0].text(), "Senior Engineer");
    }

    #[test]
    fn test_missing_attribute() {
        let body = r#"<a class="job">No href</a>"#;
        let elements = select_all(body, &ITEM).unwrap();
        assert_eq!(elements[0].attr("href"), None);
        assert!(matches!(
            elements[0].require_attr(&ITEM, "href"),
            Err(PageError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_invalid_locator() {
        let result = select_all("<html></html>", &BROKEN);
        assert!(matches!(result, Err(PageError::InvalidLocator { .. })));
    }
}
