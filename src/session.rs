/*!
 * Per-view generation session state.
 *
 * One `ViewSession` tracks one page view through the generation pipeline.
 * A run moves strictly forward through the phases; `Rendered` and `Failed`
 * are terminal until an explicit reset. The session is the idempotence
 * guard: a second trigger while a run is in flight or already rendered must
 * not start another round trip.
 */

use std::fmt;

use crate::document::EasyReadDocument;

/// Phase of a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    /// No run started for this view
    #[default]
    Idle,
    /// Capturing text from the page
    Extracting,
    /// Waiting on the chat completion
    Generating,
    /// Looking up pictograms
    Enriching,
    /// Output produced and cached
    Rendered,
    /// Run failed; terminal until reset
    Failed,
}

impl GenerationPhase {
    /// Whether the run has reached a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rendered | Self::Failed)
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Extracting => "extracting",
            Self::Generating => "generating",
            Self::Enriching => "enriching",
            Self::Rendered => "rendered",
            Self::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Session state for one page view
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    phase: GenerationPhase,
    /// Generated document, kept once a run reaches `Rendered`
    document: Option<EasyReadDocument>,
    /// Rendered page, kept for idempotent re-triggers
    page: Option<String>,
    /// Message of the failure that ended the last run
    last_error: Option<String>,
}

impl ViewSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Try to start a run. Only an idle session may start; any other phase
    /// (in flight or terminal) refuses.
    pub fn try_begin(&mut self) -> bool {
        if self.phase == GenerationPhase::Idle {
            self.phase = GenerationPhase::Extracting;
            true
        } else {
            false
        }
    }

    /// Move to the generation phase.
    pub fn mark_generating(&mut self) {
        self.phase = GenerationPhase::Generating;
    }

    /// Move to the enrichment phase.
    pub fn mark_enriching(&mut self) {
        self.phase = GenerationPhase::Enriching;
    }

    /// Complete the run, caching its outputs.
    pub fn mark_rendered(&mut self, document: EasyReadDocument, page: String) {
        self.document = Some(document);
        self.page = Some(page);
        self.phase = GenerationPhase::Rendered;
    }

    /// Fail the run, keeping the message. The session stays failed until
    /// reset.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.phase = GenerationPhase::Failed;
    }

    /// Message of the failure that ended the last run, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The cached rendered page, once a run completed.
    pub fn cached_page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// The generated document, once a run completed.
    pub fn document(&self) -> Option<&EasyReadDocument> {
        self.document.as_ref()
    }

    /// Discard all run state and return to idle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
