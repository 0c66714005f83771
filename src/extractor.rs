/*!
 * Text extraction from tagged page content.
 *
 * The extractor walks an HTML page for elements carrying a stable
 * content-identifier attribute, takes their inner text in document order,
 * and produces the `SourceText` for one generation request. An empty result
 * is a terminal condition for the caller, never retried here.
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::SourceText;

/// Default attribute marking page elements as generation input.
pub const DEFAULT_CONTENT_ATTRIBUTE: &str = "data-content-id";

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Strips any markup left inside a tagged element's content.
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Collapses runs of whitespace left behind by markup removal.
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extractor for attribute-tagged text content.
pub struct TextExtractor {
    /// Attribute that marks an element as a text source
    attribute: String,
    /// Matches opening tags that carry the content attribute
    tag_open_regex: Regex,
    /// Optional id of the root container to scope extraction to
    container_id: Option<String>,
}

impl TextExtractor {
    /// Create an extractor for the given content attribute.
    pub fn new(attribute: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?is)<([a-z][a-z0-9-]*)\b[^>]*\b{}\b[^>]*>"#,
            regex::escape(attribute)
        );
        let tag_open_regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid content attribute: {}", attribute))?;

        Ok(Self {
            attribute: attribute.to_string(),
            tag_open_regex,
            container_id: None,
        })
    }

    /// Create an extractor with the default content attribute.
    pub fn with_defaults() -> Self {
        // The default attribute is a valid pattern, so this cannot fail
        Self::new(DEFAULT_CONTENT_ATTRIBUTE).expect("default content attribute must compile")
    }

    /// Scope extraction to the element with the given id.
    pub fn container(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// The configured content attribute.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Extract the source text from a page.
    ///
    /// Returns an empty `SourceText` when the container is missing, no
    /// element carries the attribute, or every tagged element is blank.
    pub fn extract(&self, html: &str) -> SourceText {
        let scope = match &self.container_id {
            Some(id) => match container_inner(html, id) {
                Some(inner) => inner,
                None => return SourceText::from_segments(Vec::<String>::new()),
            },
            None => html,
        };

        let mut segments = Vec::new();
        for capture in self.tag_open_regex.captures_iter(scope) {
            let whole = capture.get(0).expect("capture 0 always present");
            let tag = capture.get(1).expect("tag name group").as_str();

            // Self-closing and void elements carry no text
            if whole.as_str().trim_end_matches('>').ends_with('/')
                || VOID_TAGS.contains(&tag.to_ascii_lowercase().as_str())
            {
                continue;
            }

            if let Some(inner) = element_inner(scope, tag, whole.end()) {
                segments.push(clean_text(inner));
            }
        }

        SourceText::from_segments(segments)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Find the inner HTML of the element with the given id.
fn container_inner<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let pattern = format!(
        r#"(?is)<([a-z][a-z0-9-]*)\b[^>]*\bid\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(id)
    );
    let re = Regex::new(&pattern).ok()?;
    let capture = re.captures(html)?;
    let whole = capture.get(0)?;
    let tag = capture.get(1)?.as_str();
    element_inner(html, tag, whole.end())
}

/// Scan forward from `content_start` for the matching close of `tag`,
/// tracking same-name nesting. Returns the inner content slice, or the rest
/// of the input when the document is truncated before the close.
fn element_inner<'a>(html: &'a str, tag: &str, content_start: usize) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let open_token = format!("<{}", tag);
    let close_token = format!("</{}", tag);

    let mut depth = 1usize;
    let mut pos = content_start;

    loop {
        let next_open = find_token(&lower, pos, &open_token);
        let next_close = find_token(&lower, pos, &close_token);

        match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => {
                // A self-closing `<tag ... />` opens no nesting level
                if !is_self_closing_at(&lower, open) {
                    depth += 1;
                }
                pos = open + open_token.len();
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return Some(&html[content_start..close]);
                }
                pos = close + close_token.len();
            }
            // Unclosed element: take everything that follows
            _ => return Some(&html[content_start..]),
        }
    }
}

/// Whether the tag starting at `at` ends in `/>`.
fn is_self_closing_at(lower: &str, at: usize) -> bool {
    match lower[at..].find('>') {
        Some(end) => lower[at..at + end].trim_end().ends_with('/'),
        None => false,
    }
}

/// Find the next occurrence of `token` at `from` or later that is a complete
/// tag name, not a prefix of a longer one (e.g. `<p` inside `<pre`).
fn find_token(lower: &str, from: usize, token: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = lower[pos..].find(token) {
        let at = pos + i;
        let boundary = match lower.as_bytes().get(at + token.len()) {
            Some(b) => !b.is_ascii_alphanumeric() && *b != b'-',
            None => true,
        };
        if boundary {
            return Some(at);
        }
        pos = at + token.len();
    }
    None
}

/// Strip markup, decode common entities, and collapse whitespace.
fn clean_text(inner: &str) -> String {
    let stripped = TAG_REGEX.replace_all(inner, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// Decode the handful of entities that commonly appear in page text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
