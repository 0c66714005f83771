/*!
 * Tests for text extraction from tagged page content
 */

use easyread::extractor::TextExtractor;

use crate::common::sample_page;

/// Test extraction from a realistic page
#[test]
fn test_extract_samplePage_shouldCaptureTaggedElementsInOrder() {
    let extractor = TextExtractor::with_defaults();

    let source = extractor.extract(sample_page());

    assert_eq!(source.len(), 3);
    assert_eq!(source.segments()[0], "New swimming pool opens");
    assert!(source.segments()[1].starts_with("The municipality"));
    assert!(source.segments()[2].starts_with("Admission"));
}

/// Test that untagged boilerplate never leaks into the capture
#[test]
fn test_extract_samplePage_shouldIgnoreUntaggedElements() {
    let extractor = TextExtractor::with_defaults();

    let source = extractor.extract(sample_page());

    assert!(!source.joined().contains("Not content"));
}

/// Test blank and whitespace-only elements
#[test]
fn test_extract_blankElements_shouldBeDropped() {
    let html = r#"
        <p data-content-id="a">A</p>
        <p data-content-id="b"></p>
        <p data-content-id="c">  B  </p>
    "#;

    let extractor = TextExtractor::with_defaults();
    assert_eq!(extractor.extract(html).joined(), "A\nB");
}

/// Test a page with no tagged content at all
#[test]
fn test_extract_untaggedPage_shouldReturnEmptySource() {
    let extractor = TextExtractor::with_defaults();

    let source = extractor.extract("<html><body><p>Nothing tagged</p></body></html>");

    assert!(source.is_empty());
}

/// Test attribute values and nested inline markup
#[test]
fn test_extract_nestedInlineMarkup_shouldFlattenToText() {
    let html = r#"<p data-content-id="x">Opening <em>very</em> soon &amp; free</p>"#;

    let extractor = TextExtractor::with_defaults();
    assert_eq!(extractor.extract(html).joined(), "Opening very soon & free");
}

/// Test scoping extraction to a container element
#[test]
fn test_extract_withContainerId_shouldOnlyCaptureInside() {
    let html = r#"
        <header><p data-content-id="skip">Banner</p></header>
        <article id="story">
            <p data-content-id="keep">Story text</p>
        </article>
    "#;

    let extractor = TextExtractor::with_defaults().container("story");
    assert_eq!(extractor.extract(html).joined(), "Story text");
}

/// Test a custom content attribute
#[test]
fn test_extract_customAttribute_shouldUseIt() {
    let html = r#"<p data-simplify="1">Custom tagged</p><p data-content-id="2">Default tagged</p>"#;

    let extractor = TextExtractor::new("data-simplify").unwrap();
    assert_eq!(extractor.extract(html).joined(), "Custom tagged");
}
