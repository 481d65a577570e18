//! Live preview pipeline state.
//!
//! Every text change submits a new generation; the debounce timer and the
//! compile both re-check the generation before acting, so only the result of
//! the most recently submitted text is ever displayed. Superseded responses
//! are discarded on arrival, never merged. Last-submitted-wins.

use crate::core::compile::{CompileError, CompiledPreview};

/// What the preview pane currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PreviewDisplay {
    /// Nothing to render (no document, or blank text).
    #[default]
    Empty,
    /// The compiled result of the current generation.
    Ready(CompiledPreview),
    /// Compilation failed; shown inline in place of the preview.
    Failed(String),
}

/// Debounced, cancelable compile pipeline for the open document's text.
#[derive(Clone, Debug, Default)]
pub struct PreviewPipeline {
    generation: u64,
    display: PreviewDisplay,
    /// Text of the latest submission, so replays of unchanged text (a save
    /// toggling session flags, for instance) never schedule a recompile.
    last_text: Option<String>,
}

impl PreviewPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &PreviewDisplay {
        &self.display
    }

    /// Register a text change. Bumps the generation, superseding any pending
    /// timer or in-flight compile. Blank text clears the display immediately
    /// and returns `None`: the compiler is never contacted for it. Text equal
    /// to the latest submission also returns `None`, leaving the shown result
    /// current.
    pub fn submit(&mut self, text: &str) -> Option<u64> {
        if self.last_text.as_deref() == Some(text) {
            return None;
        }
        self.last_text = Some(text.to_string());
        self.generation += 1;
        if text.trim().is_empty() {
            self.display = PreviewDisplay::Empty;
            None
        } else {
            Some(self.generation)
        }
    }

    /// Whether a generation tag still refers to the latest submitted text.
    /// Checked after the debounce delay so a burst of changes compiles once.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Apply a compile result, unless its generation was superseded while the
    /// compile was outstanding. Returns whether the display changed.
    pub fn apply(&mut self, generation: u64, result: Result<CompiledPreview, CompileError>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.display = match result {
            Ok(preview) => PreviewDisplay::Ready(preview),
            Err(err) => PreviewDisplay::Failed(err.to_string()),
        };
        true
    }

    /// Reset to idle (document closed).
    pub fn reset(&mut self) {
        self.generation += 1;
        self.display = PreviewDisplay::Empty;
        self.last_text = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(html: &str) -> CompiledPreview {
        CompiledPreview {
            html: html.to_string(),
            front_matter: Vec::new(),
        }
    }

    #[test]
    fn test_latest_submission_wins() {
        let mut pipeline = PreviewPipeline::new();
        let first = pipeline.submit("one").expect("non-blank");
        let second = pipeline.submit("two").expect("non-blank");

        // T2's compile resolves first.
        assert!(pipeline.apply(second, Ok(compiled("<p>two</p>"))));
        // T1's result arrives after T2 was submitted: discarded.
        assert!(!pipeline.apply(first, Ok(compiled("<p>one</p>"))));

        assert_eq!(
            pipeline.display(),
            &PreviewDisplay::Ready(compiled("<p>two</p>"))
        );
    }

    #[test]
    fn test_burst_compiles_only_final_text() {
        let mut pipeline = PreviewPipeline::new();
        let generations: Vec<u64> = ["a", "ab", "abc", "abcd"]
            .iter()
            .map(|t| pipeline.submit(t).expect("non-blank"))
            .collect();

        // When each debounce timer fires it checks currency first; only the
        // last change in the burst is allowed to compile.
        let live: Vec<u64> = generations
            .iter()
            .copied()
            .filter(|g| pipeline.is_current(*g))
            .collect();
        assert_eq!(live, vec![*generations.last().unwrap()]);
    }

    #[test]
    fn test_blank_text_clears_without_compiling() {
        let mut pipeline = PreviewPipeline::new();
        let generation = pipeline.submit("content").expect("non-blank");
        pipeline.apply(generation, Ok(compiled("<p>content</p>")));

        assert!(pipeline.submit("   \n").is_none());
        assert_eq!(pipeline.display(), &PreviewDisplay::Empty);
        // The old compile is also superseded.
        assert!(!pipeline.is_current(generation));
    }

    #[test]
    fn test_failure_shows_inline_error() {
        let mut pipeline = PreviewPipeline::new();
        let generation = pipeline.submit("---\nbad").expect("non-blank");
        pipeline.apply(
            generation,
            Err(CompileError::FrontMatter("bad".to_string())),
        );
        assert!(matches!(pipeline.display(), PreviewDisplay::Failed(_)));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut pipeline = PreviewPipeline::new();
        let first = pipeline.submit("one").expect("non-blank");
        let second = pipeline.submit("two").expect("non-blank");
        pipeline.apply(second, Ok(compiled("<p>two</p>")));

        assert!(!pipeline.apply(first, Err(CompileError::FrontMatter("x".to_string()))));
        assert_eq!(
            pipeline.display(),
            &PreviewDisplay::Ready(compiled("<p>two</p>"))
        );
    }

    #[test]
    fn test_unchanged_text_is_not_recompiled() {
        let mut pipeline = PreviewPipeline::new();
        let generation = pipeline.submit("content").expect("non-blank");
        pipeline.apply(generation, Ok(compiled("<p>content</p>")));

        // A session flag flip replays the same text: nothing is scheduled
        // and the shown result stays current.
        assert!(pipeline.submit("content").is_none());
        assert!(pipeline.is_current(generation));
        assert_eq!(
            pipeline.display(),
            &PreviewDisplay::Ready(compiled("<p>content</p>"))
        );
    }

    #[test]
    fn test_reset_supersedes_everything() {
        let mut pipeline = PreviewPipeline::new();
        let generation = pipeline.submit("content").expect("non-blank");
        pipeline.reset();
        assert!(!pipeline.apply(generation, Ok(compiled("<p>late</p>"))));
        assert_eq!(pipeline.display(), &PreviewDisplay::Empty);
    }
}
