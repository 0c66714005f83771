/*!
 * Data model for easy-read documents.
 *
 * A generation run captures the page text once as a `SourceText`, turns it
 * into an ordered `EasyReadDocument`, and optionally attaches one
 * `PictogramRef` per item during enrichment.
 */

use serde::{Deserialize, Serialize};

/// Page text captured for one generation request.
///
/// Holds one trimmed, non-empty string per tagged page element, in document
/// order. Immutable once captured: there is no API to add or edit segments
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    segments: Vec<String>,
}

impl SourceText {
    /// Build a source text from raw segments, trimming each and dropping
    /// the ones that end up empty.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { segments }
    }

    /// The captured segments in document order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of captured segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing usable was captured.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The form sent to the generation API: segments joined with newlines.
    pub fn joined(&self) -> String {
        self.segments.join("\n")
    }
}

/// One simplified sentence with its illustratable keywords.
///
/// The first keyword is the primary one used for pictogram lookup. An empty
/// keyword list is valid; such items are rendered without an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasyReadItem {
    /// The simplified sentence (non-empty)
    pub sentence: String,

    /// Keywords suitable for image lookup, most important first
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl EasyReadItem {
    /// Create a new item.
    pub fn new(sentence: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            sentence: sentence.into(),
            keywords,
        }
    }

    /// The keyword used for pictogram lookup, if the item has any.
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords.first().map(|k| k.as_str())
    }
}

/// Ordered collection of easy-read items for one page view.
///
/// Order is presentation order. Sentences and keywords carry no uniqueness
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasyReadDocument {
    /// Items in presentation order
    pub items: Vec<EasyReadItem>,
}

impl EasyReadDocument {
    /// Create a document from items.
    pub fn new(items: Vec<EasyReadItem>) -> Self {
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the document has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolved display reference for a pictogram.
///
/// Opaque beyond its URL. Absence of a ref for an item is a valid terminal
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictogramRef {
    url: String,
}

impl PictogramRef {
    /// Wrap a display URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The display URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}
