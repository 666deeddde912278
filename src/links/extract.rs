//! Anchor extraction from parsed pages.

use std::sync::LazyLock;

use scraper::Selector;

use crate::fetch::ParsedPage;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static anchor selector"));

/// `type` attribute value kept regardless of href suffix.
const ZIP_TYPE: &str = "zip";

/// Which anchors to keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkFilter {
    /// Every anchor with a non-empty href.
    #[default]
    All,
    /// Anchors whose href ends in one of these suffixes (exact, case-sensitive),
    /// plus anchors declaring `type="zip"`.
    Suffixes(Vec<String>),
}

impl LinkFilter {
    /// An empty suffix list means "everything".
    pub fn from_suffixes<S: AsRef<str>>(suffixes: &[S]) -> Self {
        if suffixes.is_empty() {
            LinkFilter::All
        } else {
            LinkFilter::Suffixes(suffixes.iter().map(|s| s.as_ref().to_string()).collect())
        }
    }

    fn accepts(&self, href: &str, link_type: Option<&str>) -> bool {
        match self {
            LinkFilter::All => true,
            LinkFilter::Suffixes(suffixes) => {
                suffixes.iter().any(|suffix| href.ends_with(suffix.as_str()))
                    || link_type == Some(ZIP_TYPE)
            }
        }
    }
}

/// Raw hrefs of the page's anchors that pass `filter`, in document order.
///
/// Duplicates are kept; the downloader's existence check absorbs them.
pub fn extract_links(page: &ParsedPage, filter: &LinkFilter) -> Vec<String> {
    page.document()
        .select(&ANCHOR)
        .filter_map(|anchor| {
            let element = anchor.value();
            let href = element.attr("href").filter(|href| !href.is_empty())?;
            filter
                .accepts(href, element.attr("type"))
                .then(|| href.to_string())
        })
        .collect()
}

/// Every non-empty href on the page.
pub fn all_links(page: &ParsedPage) -> Vec<String> {
    extract_links(page, &LinkFilter::All)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(body: &str) -> ParsedPage {
        ParsedPage::parse(
            Url::parse("https://example.org/data/").unwrap(),
            &format!("<html><body>{}</body></html>", body),
        )
    }

    #[test]
    fn test_suffix_filter_is_exact_and_case_sensitive() {
        let page = page(
            r#"<a href="a.zip">a</a>
               <a href="b.ZIP">b</a>
               <a href="c.pdf">c</a>
               <a href="d.pdf.html">d</a>"#,
        );
        let filter = LinkFilter::from_suffixes(&[".zip", ".pdf"]);
        assert_eq!(extract_links(&page, &filter), vec!["a.zip", "c.pdf"]);
    }

    #[test]
    fn test_zip_type_attribute_always_kept() {
        let page = page(
            r#"<a href="/download?id=7" type="zip">zip</a>
               <a href="/download?id=8" type="ZIP">not exact</a>"#,
        );
        let filter = LinkFilter::from_suffixes(&[".pdf"]);
        assert_eq!(extract_links(&page, &filter), vec!["/download?id=7"]);
    }

    #[test]
    fn test_all_filter_skips_empty_and_missing_href() {
        let page = page(
            r##"<a href="">empty</a>
               <a name="anchor">no href</a>
               <a href="/page/23">page</a>
               <a href="#top">top</a>"##,
        );
        assert_eq!(all_links(&page), vec!["/page/23", "#top"]);
        let empty: [&str; 0] = [];
        assert_eq!(LinkFilter::from_suffixes(&empty), LinkFilter::All);
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let page = page(
            r#"<a href="b.csv">b</a>
               <div><a href="a.csv">a</a></div>
               <a href="b.csv">b again</a>"#,
        );
        let filter = LinkFilter::from_suffixes(&[".csv"]);
        assert_eq!(
            extract_links(&page, &filter),
            vec!["b.csv", "a.csv", "b.csv"]
        );
    }
}
