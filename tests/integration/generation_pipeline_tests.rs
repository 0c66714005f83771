/*!
 * Integration tests for the full easy-read generation pipeline.
 *
 * The pipeline is driven end to end through `Controller::run_view` with
 * mock providers, from a tagged HTML page to the rendered output.
 */

use easyread::app_config::Config;
use easyread::app_controller::Controller;
use easyread::errors::GenerationError;
use easyread::generation::ContentGenerator;
use easyread::pictograms::PictogramResolver;
use easyread::providers::mock::{MockChatProvider, MockPictogramSearch};
use easyread::session::{GenerationPhase, ViewSession};

use crate::common::{create_temp_dir, create_test_file, sample_model_reply, sample_page};

fn test_controller() -> Controller {
    Controller::with_config(Config::default(), "test-key").unwrap()
}

fn no_resolver() -> Option<&'static PictogramResolver<MockPictogramSearch>> {
    None
}

/// Test the full pipeline: extract, generate, enrich, render
#[tokio::test]
async fn test_runView_fullPipeline_shouldRenderAllSentencesWithPictograms() {
    let controller = test_controller();
    let generator = ContentGenerator::new(MockChatProvider::replying(sample_model_reply()), "m");
    let resolver = PictogramResolver::new(MockPictogramSearch::with_hits(vec![2462]), "en");
    let mut session = ViewSession::new();

    let page = controller
        .run_view(&mut session, sample_page(), &generator, Some(&resolver))
        .await
        .unwrap();

    assert_eq!(session.phase(), GenerationPhase::Rendered);
    assert!(page.contains("The town has a new swimming pool."));
    assert!(page.contains("The pool opened on Saturday."));
    assert!(page.contains("You can swim for free until September."));
    assert!(page.contains("2462_300.png"));
}

/// Test that a second trigger reuses the cached page without a new API call
#[tokio::test]
async fn test_runView_doubleTrigger_shouldMakeExactlyOneApiCall() {
    let controller = test_controller();
    let provider = MockChatProvider::replying(sample_model_reply());
    let generator = ContentGenerator::new(provider.clone(), "m");
    let mut session = ViewSession::new();

    let first = controller
        .run_view(&mut session, sample_page(), &generator, no_resolver())
        .await
        .unwrap();
    let second = controller
        .run_view(&mut session, sample_page(), &generator, no_resolver())
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(first, second);
}

/// Test that a page without tagged content fails before any API call
#[tokio::test]
async fn test_runView_emptyPage_shouldFailWithoutApiCall() {
    let controller = test_controller();
    let provider = MockChatProvider::replying(sample_model_reply());
    let generator = ContentGenerator::new(provider.clone(), "m");
    let mut session = ViewSession::new();

    let result = controller
        .run_view(&mut session, "<html><body>untagged</body></html>", &generator, no_resolver())
        .await;

    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<GenerationError>(),
        Some(GenerationError::ExtractionEmpty)
    ));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(session.phase(), GenerationPhase::Failed);
}

/// Test that an API error surfaces its message and fails the session
#[tokio::test]
async fn test_runView_apiError_shouldSurfaceMessage() {
    let controller = test_controller();
    let generator = ContentGenerator::new(MockChatProvider::failing(401, "X"), "m");
    let mut session = ViewSession::new();

    let result = controller
        .run_view(&mut session, sample_page(), &generator, no_resolver())
        .await;

    let error = result.unwrap_err();
    assert!(error.to_string().contains("X"));
    assert_eq!(session.phase(), GenerationPhase::Failed);
}

/// Test that a reply without any JSON array fails as malformed
#[tokio::test]
async fn test_runView_unparseableReply_shouldFailAsMalformed() {
    let controller = test_controller();
    let generator = ContentGenerator::new(MockChatProvider::replying("Sorry, no."), "m");
    let mut session = ViewSession::new();

    let result = controller
        .run_view(&mut session, sample_page(), &generator, no_resolver())
        .await;

    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<GenerationError>(),
        Some(GenerationError::MalformedResponse(_))
    ));
}

/// Test that model output is escaped in the rendered page
#[tokio::test]
async fn test_runView_hostileModelOutput_shouldBeEscaped() {
    let controller = test_controller();
    let reply = r#"[{"sentence": "<script>alert(1)</script>", "keywords": []}]"#;
    let generator = ContentGenerator::new(MockChatProvider::replying(reply), "m");
    let mut session = ViewSession::new();

    let page = controller
        .run_view(&mut session, sample_page(), &generator, no_resolver())
        .await
        .unwrap();

    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;"));
}

/// Test that a failed session refuses re-triggering without a reset
#[tokio::test]
async fn test_runView_afterFailure_shouldRefuseUntilReset() {
    let controller = test_controller();
    let failing = ContentGenerator::new(MockChatProvider::failing(500, "down"), "m");
    let working_provider = MockChatProvider::replying(sample_model_reply());
    let working = ContentGenerator::new(working_provider.clone(), "m");
    let mut session = ViewSession::new();

    assert!(
        controller
            .run_view(&mut session, sample_page(), &failing, no_resolver())
            .await
            .is_err()
    );

    // Still failed: the working generator is never consulted
    assert!(
        controller
            .run_view(&mut session, sample_page(), &working, no_resolver())
            .await
            .is_err()
    );
    assert_eq!(working_provider.call_count(), 0);

    session.reset();
    assert!(
        controller
            .run_view(&mut session, sample_page(), &working, no_resolver())
            .await
            .is_ok()
    );
}

/// Test that run() skips work when the output already exists
#[tokio::test]
async fn test_run_existingOutputWithoutForce_shouldSkip() {
    let dir = create_temp_dir().unwrap();
    let dir_path = dir.path().to_path_buf();
    let input = create_test_file(&dir_path, "page.html", sample_page()).unwrap();
    let output = create_test_file(&dir_path, "out.html", "existing").unwrap();

    let controller = test_controller();
    controller
        .run(input, Some(output.clone()), false)
        .await
        .unwrap();

    // Untouched: no network was needed for this to succeed
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "existing");
}
