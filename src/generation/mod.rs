/*!
 * Easy-read content generation.
 *
 * The generation module turns captured page text into an `EasyReadDocument`
 * through a single prompt-and-parse round trip:
 * - `prompts`: the fixed instructional prompt and its builder
 * - `parse`: pure extraction of the JSON array from free-form model output
 * - `core`: the `ContentGenerator` service driving the provider call
 */

pub mod core;
pub mod parse;
pub mod prompts;

pub use self::core::ContentGenerator;
pub use self::parse::parse_items;
pub use self::prompts::EasyReadPromptBuilder;
