/*!
 * HTML rendering of easy-read documents.
 *
 * The renderer is a pure function from a document (plus its pictogram refs)
 * to a standalone HTML page: same inputs, same output, no state. One row per
 * item, pictogram on the left, sentence on the right. All dynamic text goes
 * through `escape_html`; model output and search results are untrusted.
 */

use crate::document::{EasyReadDocument, PictogramRef};

/// Inline stylesheet for the standalone page.
const PAGE_STYLE: &str = "\
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
h1 { font-size: 1.4rem; }
.easyread-item { display: flex; align-items: center; gap: 1rem; margin-bottom: 1rem; }
.easyread-pictogram { width: 90px; height: 90px; flex-shrink: 0; object-fit: contain; }
.easyread-placeholder { width: 90px; height: 90px; flex-shrink: 0; border: 2px dashed #bbb; border-radius: 8px; }
.easyread-sentence { font-size: 1.3rem; line-height: 1.5; }";

/// Renderer producing a standalone easy-read page
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    /// Page title, shown as the document heading
    title: String,
}

impl HtmlRenderer {
    /// Create a renderer with a page title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render a document and its positional pictogram refs to a full page.
    ///
    /// `refs` is keyed by item position; a missing or `None` slot renders
    /// the placeholder box instead of an image.
    pub fn render(&self, document: &EasyReadDocument, refs: &[Option<PictogramRef>]) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        page.push_str(&format!("<style>\n{}\n</style>\n", PAGE_STYLE));
        page.push_str("</head>\n<body>\n");
        page.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.title)));

        for (index, item) in document.items.iter().enumerate() {
            page.push_str(&self.render_item(&item.sentence, refs.get(index).and_then(|r| r.as_ref())));
        }

        page.push_str("</body>\n</html>\n");
        page
    }

    /// Render one item row.
    fn render_item(&self, sentence: &str, pictogram: Option<&PictogramRef>) -> String {
        let visual = match pictogram {
            Some(reference) => format!(
                "<img class=\"easyread-pictogram\" src=\"{}\" alt=\"\">",
                escape_html(reference.url())
            ),
            None => "<div class=\"easyread-placeholder\"></div>".to_string(),
        };
        format!(
            "<div class=\"easyread-item\">{}<p class=\"easyread-sentence\">{}</p></div>\n",
            visual,
            escape_html(sentence)
        )
    }
}

/// Escape text for safe embedding in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
