/*!
 * Tests for error type functionality
 */

use easyread::errors::{AppError, GenerationError, ProviderError};

/// Test provider error display formatting
#[test]
fn test_providerError_display_shouldFormatCorrectly() {
    let error = ProviderError::RequestFailed("connection refused".to_string());
    assert_eq!(error.to_string(), "API request failed: connection refused");

    let error = ProviderError::ApiError {
        status_code: 401,
        message: "invalid key".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 401 - invalid key");

    let error = ProviderError::ParseError("unexpected EOF".to_string());
    assert_eq!(error.to_string(), "Failed to parse API response: unexpected EOF");
}

/// Test generation error display formatting
#[test]
fn test_generationError_display_shouldFormatCorrectly() {
    assert_eq!(
        GenerationError::ExtractionEmpty.to_string(),
        "No text content found on the page"
    );
    assert_eq!(
        GenerationError::MalformedResponse("no array".to_string()).to_string(),
        "Malformed model response: no array"
    );
}

/// Test error conversion chain from provider up to app level
#[test]
fn test_errorConversion_providerToApp_shouldPreserveMessage() {
    let provider_error = ProviderError::ApiError {
        status_code: 500,
        message: "X".to_string(),
    };
    let generation_error: GenerationError = provider_error.into();
    let app_error: AppError = generation_error.into();

    assert!(app_error.to_string().contains("500 - X"));
    assert!(matches!(app_error, AppError::Generation(_)));
}

/// Test io error conversion into file errors
#[test]
fn test_errorConversion_ioToApp_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(_)));
}
