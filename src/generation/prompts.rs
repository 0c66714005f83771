/*!
 * Prompt template for easy-read simplification.
 *
 * The template embeds the easy-read writing constraints and demands a single
 * JSON array as output, so the response can be parsed without free-text
 * heuristics beyond locating the array.
 */

use crate::document::SourceText;

/// Instructional prompt for easy-read conversion.
#[derive(Debug, Clone)]
pub struct EasyReadPromptBuilder {
    /// Upper bound on words per simplified sentence
    max_words_per_sentence: u32,
}

impl EasyReadPromptBuilder {
    /// The instruction block sent ahead of the source text.
    pub const EASY_READ_INSTRUCTIONS: &'static str = r#"You are an expert in easy-read writing for readers with cognitive or literacy constraints.

Rewrite the text below as an easy-read version.

## Writing Rules
- Use at most {max_words} words per sentence
- Use plain, everyday vocabulary
- Use active voice
- Express one idea per sentence
- Keep the original order of ideas

## Keywords
- For each sentence, pick 1-2 keywords naming concrete things that can be shown as a picture
- Put the most important keyword first
- Use the base form of the word (e.g. "dog", not "dogs")

## Output Requirements
- Return ONLY a JSON array, no other text
- Each element must be an object: {"sentence": "...", "keywords": ["...", "..."]}
- Keep the array in reading order

## Text
"#;

    /// Create a builder with the default sentence length bound.
    pub fn new() -> Self {
        Self {
            max_words_per_sentence: 15,
        }
    }

    /// Set the maximum number of words per simplified sentence.
    pub fn max_words_per_sentence(mut self, max_words: u32) -> Self {
        self.max_words_per_sentence = max_words;
        self
    }

    /// Build the full user prompt: instructions followed by the source text.
    pub fn build(&self, source: &SourceText) -> String {
        let instructions = Self::EASY_READ_INSTRUCTIONS
            .replace("{max_words}", &self.max_words_per_sentence.to_string());
        format!("{}{}", instructions, source.joined())
    }
}

impl Default for EasyReadPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
