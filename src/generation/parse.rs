/*!
 * Parsing of easy-read items out of free-form model output.
 *
 * Models wrap their JSON in prose and markdown fences often enough that the
 * response can never be assumed to be pure JSON. Extraction is a pure
 * function over the response text so it can be tested without a provider.
 */

use log::warn;

use crate::document::{EasyReadDocument, EasyReadItem};
use crate::errors::GenerationError;

/// Locate the first `[...]` span in a response.
///
/// Scans from the first `[` to its matching `]`, tracking bracket depth and
/// skipping brackets inside JSON string literals (including escaped quotes).
///
/// Failure modes, both `MalformedResponse`:
/// - the response contains no `[`
/// - the span is never closed (truncated output)
pub fn extract_json_array(response: &str) -> Result<&str, GenerationError> {
    let start = response.find('[').ok_or_else(|| {
        GenerationError::MalformedResponse("No JSON array found in model output".to_string())
    })?;

    let bytes = response.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&response[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(GenerationError::MalformedResponse(
        "JSON array in model output is not closed".to_string(),
    ))
}

/// Parse an `EasyReadDocument` out of free-form model output.
///
/// The first bracketed span is extracted and parsed as a JSON array.
/// Malformed individual entries (not an object, missing or empty sentence)
/// are rejected and skipped with a warning rather than failing the batch;
/// non-string keywords are dropped the same way. A response that yields no
/// valid entry at all is `MalformedResponse`.
pub fn parse_items(response: &str) -> Result<EasyReadDocument, GenerationError> {
    let span = extract_json_array(response)?;

    let entries: Vec<serde_json::Value> = serde_json::from_str(span).map_err(|e| {
        GenerationError::MalformedResponse(format!("Failed to parse JSON array: {}", e))
    })?;

    let total = entries.len();
    let mut items = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        match parse_entry(&entry) {
            Some(item) => items.push(item),
            None => warn!("Skipping malformed easy-read entry at index {}", index),
        }
    }

    if items.is_empty() {
        return Err(GenerationError::MalformedResponse(format!(
            "No valid entries among {} in model output",
            total
        )));
    }

    Ok(EasyReadDocument::new(items))
}

/// Parse one array entry; `None` rejects the entry.
fn parse_entry(entry: &serde_json::Value) -> Option<EasyReadItem> {
    let sentence = entry.get("sentence")?.as_str()?.trim();
    if sentence.is_empty() {
        return None;
    }

    let keywords = entry
        .get("keywords")
        .and_then(|k| k.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Some(EasyReadItem::new(sentence, keywords))
}
