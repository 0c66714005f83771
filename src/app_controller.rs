use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::document::PictogramRef;
use crate::errors::GenerationError;
use crate::extractor::TextExtractor;
use crate::file_utils::FileManager;
use crate::generation::{ContentGenerator, EasyReadPromptBuilder};
use crate::pictograms::{PictogramClient, PictogramResolver, PictogramSearch};
use crate::providers::{ChatProvider, openai::OpenAICompatible};
use crate::render::HtmlRenderer;
use crate::session::ViewSession;

// @module: Application controller for easy-read generation

/// Suffix inserted into the output filename
const OUTPUT_SUFFIX: &str = "easyread";

/// Heading of the generated page
const PAGE_TITLE: &str = "Easy-read version";

/// Main application controller for easy-read generation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Key for the generation service
    api_key: String,
}

impl Controller {
    // @method: Create a new controller with the given configuration and key
    pub fn with_config(config: Config, api_key: impl Into<String>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            api_key: api_key.into(),
        })
    }

    /// Run the main workflow for one input page.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_file
            .unwrap_or_else(|| FileManager::generate_output_path(&input_file, OUTPUT_SUFFIX, "html"));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, easy-read version already exists (use -f to force overwrite)");
            return Ok(());
        }

        let html = FileManager::read_to_string(&input_file)?;

        let generator = self.build_generator();
        let resolver = self.build_resolver();

        let spinner = create_spinner("Generating easy-read version...");

        let mut session = ViewSession::new();
        let result = self
            .run_view(&mut session, &html, &generator, resolver.as_ref())
            .await;
        spinner.finish_and_clear();

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!("Could not generate the easy-read version: {}", e);
                return Err(e);
            }
        };

        FileManager::write_to_file(&output_path, &page)?;

        info!(
            "Easy-read version written to {:?} in {}",
            output_path,
            format_duration(start_time.elapsed())
        );
        Ok(())
    }

    /// Drive one view through the generation pipeline.
    ///
    /// The session is the idempotence guard: a re-trigger on a rendered
    /// session returns the cached page without touching any service; a
    /// re-trigger on an in-flight or failed session is an error.
    pub async fn run_view<P: ChatProvider, S: PictogramSearch>(
        &self,
        session: &mut ViewSession,
        html: &str,
        generator: &ContentGenerator<P>,
        resolver: Option<&PictogramResolver<S>>,
    ) -> Result<String> {
        let extractor = self.build_extractor()?;

        if !session.try_begin() {
            if let Some(page) = session.cached_page() {
                info!("Easy-read version already generated, reusing it");
                return Ok(page.to_string());
            }
            return Err(anyhow!(
                "Generation already in progress or failed for this view (phase: {})",
                session.phase()
            ));
        }

        match self
            .generate_view(session, &extractor, html, generator, resolver)
            .await
        {
            Ok(page) => Ok(page),
            Err(e) => {
                session.mark_failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// The pipeline proper: extract, generate, enrich, render.
    async fn generate_view<P: ChatProvider, S: PictogramSearch>(
        &self,
        session: &mut ViewSession,
        extractor: &TextExtractor,
        html: &str,
        generator: &ContentGenerator<P>,
        resolver: Option<&PictogramResolver<S>>,
    ) -> Result<String, GenerationError> {
        let source = extractor.extract(html);
        if source.is_empty() {
            return Err(GenerationError::ExtractionEmpty);
        }
        info!("Captured {} text segment(s) from the page", source.len());

        session.mark_generating();
        let document = generator.generate(&source).await?;

        session.mark_enriching();
        let refs: Vec<Option<PictogramRef>> = match resolver {
            Some(resolver) => resolver.resolve_document(&document).await,
            None => vec![None; document.len()],
        };
        let found = refs.iter().filter(|r| r.is_some()).count();
        info!("Resolved {} pictogram(s) for {} item(s)", found, document.len());

        let page = HtmlRenderer::new(PAGE_TITLE).render(&document, &refs);
        session.mark_rendered(document, page.clone());

        Ok(page)
    }

    fn build_extractor(&self) -> Result<TextExtractor> {
        let extractor = TextExtractor::new(&self.config.extraction.attribute)?;
        Ok(match &self.config.extraction.container_id {
            Some(id) => extractor.container(id),
            None => extractor,
        })
    }

    fn build_generator(&self) -> ContentGenerator<OpenAICompatible> {
        let provider = OpenAICompatible::with_timeout(
            &self.api_key,
            &self.config.generation.endpoint,
            self.config.generation.timeout_secs,
        );
        ContentGenerator::new(provider, &self.config.generation.model)
            .prompt(
                EasyReadPromptBuilder::new()
                    .max_words_per_sentence(self.config.generation.max_words_per_sentence),
            )
            .temperature(self.config.generation.temperature)
            .max_tokens(self.config.generation.max_tokens)
    }

    fn build_resolver(&self) -> Option<PictogramResolver<PictogramClient>> {
        if !self.config.pictograms.enabled {
            return None;
        }
        let client = PictogramClient::with_timeout(
            &self.config.pictograms.search_endpoint,
            self.config.pictograms.timeout_secs,
        );
        Some(
            PictogramResolver::new(client, &self.config.language)
                .static_endpoint(&self.config.pictograms.static_endpoint),
        )
    }
}

/// Spinner shown while the round trip is in flight.
fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an elapsed duration as a short human-readable string.
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}.{}s", secs, elapsed.subsec_millis() / 100)
    }
}
