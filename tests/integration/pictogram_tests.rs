/*!
 * Integration tests for pictogram enrichment.
 *
 * Enrichment is best-effort by contract: whatever the search does, the
 * document comes back with one ref slot per item and generation never fails.
 */

use easyread::document::{EasyReadDocument, EasyReadItem};
use easyread::pictograms::PictogramResolver;
use easyread::providers::mock::MockPictogramSearch;

fn three_item_document() -> EasyReadDocument {
    EasyReadDocument::new(vec![
        EasyReadItem::new("The dog runs.", vec!["dog".to_string(), "run".to_string()]),
        EasyReadItem::new("It rains.", Vec::new()),
        EasyReadItem::new("The cat sleeps.", vec!["cat".to_string()]),
    ])
}

/// Test that every item gets exactly one ref slot, in order
#[tokio::test]
async fn test_resolveDocument_shouldReturnOneSlotPerItem() {
    let resolver = PictogramResolver::new(MockPictogramSearch::with_hits(vec![11]), "en");

    let refs = resolver.resolve_document(&three_item_document()).await;

    assert_eq!(refs.len(), 3);
    assert!(refs[0].is_some());
    assert!(refs[1].is_none()); // no keywords, no lookup
    assert!(refs[2].is_some());
}

/// Test that only the primary keyword is looked up per item
#[tokio::test]
async fn test_resolveDocument_shouldOnlySearchPrimaryKeywords() {
    let search = MockPictogramSearch::with_hits(vec![11]);
    let resolver = PictogramResolver::new(search.clone(), "en");

    resolver.resolve_document(&three_item_document()).await;

    // Two items have keywords; "run" is never searched
    assert_eq!(search.call_count(), 2);
}

/// Test that search failures degrade to missing refs, never errors
#[tokio::test]
async fn test_resolveDocument_failingSearch_shouldYieldAllNone() {
    let resolver = PictogramResolver::new(MockPictogramSearch::failing(), "en");

    let refs = resolver.resolve_document(&three_item_document()).await;

    assert_eq!(refs.len(), 3);
    assert!(refs.iter().all(|r| r.is_none()));
}

/// Test that empty search results behave like failures
#[tokio::test]
async fn test_resolveDocument_emptyResults_shouldYieldAllNone() {
    let resolver = PictogramResolver::new(MockPictogramSearch::empty(), "en");

    let refs = resolver.resolve_document(&three_item_document()).await;

    assert!(refs.iter().all(|r| r.is_none()));
}

/// Test the display URL shape for resolved refs
#[tokio::test]
async fn test_resolve_shouldBuildStableDisplayUrl() {
    let resolver = PictogramResolver::new(MockPictogramSearch::with_hits(vec![8223]), "es")
        .static_endpoint("https://static.example.org");

    let resolved = resolver.resolve("perro").await.unwrap();

    assert_eq!(
        resolved.url(),
        "https://static.example.org/pictograms/8223/8223_300.png?download=false"
    );
}
