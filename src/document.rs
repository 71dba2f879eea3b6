//! A thin query layer over a parsed markup tree.
//!
//! Extraction code only ever needs two operations: the first descendant that
//! matches a marker, and every descendant that does. [`NodeQuery`] provides
//! both for a whole [`Document`] and for any element inside it, so the same
//! helpers work at page level and at item level.

use scraper::{ElementRef, Html, Selector};

/// Parsed markup, either a full page or a fragment.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a complete HTML page.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Parse a snippet that is not a full page (a link, a stray element...).
    pub fn parse_fragment(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// Find-first / find-all over the descendants of a node.
pub trait NodeQuery<'a> {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>>;

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>>;
}

impl<'a> NodeQuery<'a> for ElementRef<'a> {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }
}

impl<'a> NodeQuery<'a> for &'a Document {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }
}

/// All text below `element`, concatenated and trimmed at both ends.
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Value of attribute `name`, if the element carries it.
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul class="list">
            <li class="entry"><a href="/a">  First </a></li>
            <li class="entry"><a>Second</a></li>
            <li class="other">Third</li>
          </ul>
        </body></html>
    "#;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn test_find_all_on_document_keeps_order() {
        let doc = Document::parse(PAGE);
        let entries = (&doc).find_all(&sel("li.entry"));
        let texts: Vec<String> = entries.iter().map(stripped_text).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }

    #[test]
    fn test_find_first_on_element() {
        let doc = Document::parse(PAGE);
        let second = (&doc).find_all(&sel("li.entry"))[1];
        let link = second.find_first(&sel("a")).unwrap();
        assert_eq!(stripped_text(&link), "Second");
        assert_eq!(attr(&link, "href"), None);
    }

    #[test]
    fn test_find_first_missing() {
        let doc = Document::parse(PAGE);
        assert!((&doc).find_first(&sel("div.nothing")).is_none());
        assert!(doc.root().find_first(&sel("div.nothing")).is_none());
    }

    #[test]
    fn test_attr_present() {
        let doc = Document::parse(PAGE);
        let link = doc.root().find_first(&sel("a")).unwrap();
        assert_eq!(attr(&link, "href"), Some("/a"));
    }

    #[test]
    fn test_fragment_plain_text_has_no_elements() {
        let doc = Document::parse_fragment("https://oleoscope.com/news/12345");
        assert!(doc.root().find_first(&sel("div")).is_none());
    }
}
