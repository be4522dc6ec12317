//! Document query adapter over the HTML backend.
//!
//! Every extractor reads its page exclusively through this module:
//! select-one, select-all, attribute read, text read and child iteration,
//! each absence surfaced as a typed error instead of a silent miss.
//! Swapping the HTML-parsing backend means rewriting this file and nothing
//! else.

use scraper::{ElementRef, Selector};

use crate::error::{ExtractError, Result};

/// A compiled CSS selector that remembers its source text for diagnostics.
pub struct Sel {
    css: &'static str,
    selector: Selector,
}

impl Sel {
    pub fn new(css: &'static str) -> Self {
        Sel {
            css,
            selector: Selector::parse(css).expect("hardcoded selector"),
        }
    }

    pub fn css(&self) -> &'static str {
        self.css
    }

    /// All matches under `scope`, in document order.
    pub fn all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        scope.select(&self.selector).collect()
    }

    /// First match under `scope`, if any.
    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).next()
    }

    /// First match under `scope`, required.
    pub fn one<'a>(&self, scope: ElementRef<'a>, context: &'static str) -> Result<ElementRef<'a>> {
        self.first(scope).ok_or_else(|| ExtractError::MissingElement {
            context,
            selector: self.css.to_string(),
        })
    }
}

/// Required attribute read; `what` names the element for the error message.
pub fn attr<'a>(
    el: ElementRef<'a>,
    what: &str,
    name: &'static str,
    context: &'static str,
) -> Result<&'a str> {
    el.value()
        .attr(name)
        .ok_or_else(|| ExtractError::MissingAttribute {
            context,
            selector: what.to_string(),
            name,
        })
}

/// Concatenated descendant text of an element.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Direct element children, skipping text and comment nodes.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// First element child, required. The listing pages stash their timestamp
/// on a marker element sitting first inside a fixed cell.
pub fn first_child<'a>(
    el: ElementRef<'a>,
    what: &str,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    child_elements(el)
        .next()
        .ok_or_else(|| ExtractError::MissingElement {
            context,
            selector: format!("{what} > :first-child"),
        })
}

/// Positional pick out of an already-selected sequence, required.
pub fn nth<'a>(
    items: &[ElementRef<'a>],
    index: usize,
    what: &str,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    items
        .get(index)
        .copied()
        .ok_or_else(|| ExtractError::MissingElement {
            context,
            selector: format!("{what}[{index}]"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_one_reports_selector_and_context() {
        let doc = Html::parse_document("<div id=\"other\"></div>");
        let sel = Sel::new("#main");
        let err = sel.one(doc.root_element(), "announcement list").unwrap_err();
        match err {
            ExtractError::MissingElement { context, selector } => {
                assert_eq!(context, "announcement list");
                assert_eq!(selector, "#main");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_all_preserves_document_order() {
        let doc = Html::parse_document("<ul><li>a</li><li>b</li><li>c</li></ul>");
        let sel = Sel::new("li");
        let texts: Vec<String> = sel
            .all(doc.root_element())
            .into_iter()
            .map(text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_attr_missing_is_typed() {
        let doc = Html::parse_document("<a>link</a>");
        let a = Sel::new("a").one(doc.root_element(), "test").unwrap();
        let err = attr(a, "a", "href", "test").unwrap_err();
        assert!(matches!(err, ExtractError::MissingAttribute { name: "href", .. }));
    }

    #[test]
    fn test_first_child_skips_text_nodes() {
        let doc = Html::parse_document(
            "<table><tr><td> leading text <span title=\"x\"></span></td></tr></table>",
        );
        let td = Sel::new("td").one(doc.root_element(), "test").unwrap();
        let child = first_child(td, "td", "test").unwrap();
        assert_eq!(child.value().name(), "span");
    }

    #[test]
    fn test_nth_out_of_range() {
        let doc = Html::parse_document("<table><tr><td>only</td></tr></table>");
        let cells = Sel::new("td").all(doc.root_element());
        assert!(nth(&cells, 0, "td", "test").is_ok());
        let err = nth(&cells, 3, "td", "test").unwrap_err();
        match err {
            ExtractError::MissingElement { selector, .. } => assert_eq!(selector, "td[3]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
