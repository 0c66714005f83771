/*!
 * Common test utilities for the easyread test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small article page with tagged paragraphs
pub fn sample_page() -> &'static str {
    r#"<!DOCTYPE html>
<html>
<head><title>Town news</title></head>
<body>
  <nav>Not content</nav>
  <main>
    <h1 data-content-id="headline">New swimming pool opens</h1>
    <p data-content-id="p1">The municipality inaugurated its renovated aquatic facility on Saturday.</p>
    <p data-content-id="p2">Admission will remain free of charge for residents until September.</p>
  </main>
</body>
</html>"#
}

/// A model reply matching `sample_page`, wrapped in prose and a fence
pub fn sample_model_reply() -> &'static str {
    "Here is the easy-read version:\n```json\n[\n  {\"sentence\": \"The town has a new swimming pool.\", \"keywords\": [\"swimming pool\"]},\n  {\"sentence\": \"The pool opened on Saturday.\", \"keywords\": [\"calendar\"]},\n  {\"sentence\": \"You can swim for free until September.\", \"keywords\": [\"free\"]}\n]\n```"
}
