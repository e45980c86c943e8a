//! Line-oriented scraping of reader pages
//!
//! Reader pages mark each scrambled image with a `data-ptimg` attribute
//! holding the relative link to its metadata document. A line scan is
//! deliberate: the markup of interest is simple and a full HTML parser
//! buys nothing here.

use crate::io::configuration::{IMAGE_SUFFIX, METADATA_SUFFIX, PTIMG_ATTRIBUTE};

const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";

/// Everything extracted from one reader page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderPage {
    /// Page title, used for archive folder naming when present
    pub title: Option<String>,
    /// Relative `.ptimg.json` links in document order
    pub metadata_links: Vec<String>,
}

impl ReaderPage {
    /// Scan reader HTML for the title and all metadata links
    pub fn parse(html: &str) -> Self {
        let mut title = None;
        let mut metadata_links = Vec::new();

        for line in html.lines() {
            if title.is_none() {
                title = extract_title(line);
            }
            collect_ptimg_links(line, &mut metadata_links);
        }

        Self {
            title,
            metadata_links,
        }
    }
}

/// Derive the scrambled image link from its metadata link
///
/// The reader serves `<page>.ptimg.json` next to `<page>.jpg`.
pub fn image_link_for(metadata_link: &str) -> String {
    metadata_link.replace(METADATA_SUFFIX, IMAGE_SUFFIX)
}

fn extract_title(line: &str) -> Option<String> {
    let start = line.find(TITLE_OPEN)? + TITLE_OPEN.len();
    let end = line.rfind(TITLE_CLOSE)?;
    let text = line.get(start..end)?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn collect_ptimg_links(line: &str, links: &mut Vec<String>) {
    let mut rest = line;
    while let Some(position) = rest.find(PTIMG_ATTRIBUTE) {
        rest = rest.get(position + PTIMG_ATTRIBUTE.len()..).unwrap_or_default();
        let Some(quoted) = rest.strip_prefix('"') else {
            // Unquoted attribute values are not produced by the reader
            continue;
        };
        let Some(end) = quoted.find('"') else {
            break;
        };
        if let Some(value) = quoted.get(..end)
            && !value.is_empty()
        {
            links.push(value.to_string());
        }
        rest = quoted.get(end + 1..).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html>
<head>
  <title> Example Comic Chapter 25 </title>
</head>
<body>
  <div id="content">
    <p class="page" data-ptimg="data/ptimg/0001.ptimg.json"></p>
    <p class="page" data-ptimg="data/ptimg/0002.ptimg.json"></p>
  </div>
</body>
</html>"#;

    #[test]
    fn test_parse_extracts_title_and_links_in_order() {
        let page = ReaderPage::parse(SAMPLE);
        assert_eq!(page.title.as_deref(), Some("Example Comic Chapter 25"));
        assert_eq!(
            page.metadata_links,
            vec![
                "data/ptimg/0001.ptimg.json".to_string(),
                "data/ptimg/0002.ptimg.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_handles_multiple_links_on_one_line() {
        let html = r#"<p data-ptimg="a.ptimg.json"></p><p data-ptimg="b.ptimg.json"></p>"#;
        let page = ReaderPage::parse(html);
        assert_eq!(
            page.metadata_links,
            vec!["a.ptimg.json".to_string(), "b.ptimg.json".to_string()]
        );
    }

    #[test]
    fn test_parse_without_links_yields_empty_list() {
        let page = ReaderPage::parse("<html><body>nothing here</body></html>");
        assert!(page.metadata_links.is_empty());
        assert!(page.title.is_none());
    }

    #[test]
    fn test_image_link_swaps_suffix() {
        assert_eq!(
            image_link_for("data/ptimg/0001.ptimg.json"),
            "data/ptimg/0001.jpg"
        );
    }
}
