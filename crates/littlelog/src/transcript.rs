//! Transcript to bullet-point segmentation.
//!
//! A voice note summary is the transcript split at sentence terminators.
//! There is no abbreviation handling or locale awareness: `Dr. Smith` becomes
//! two fragments.

use std::sync::OnceLock;

use regex::Regex;

/// Runs of one or more sentence terminators.
const TERMINATORS: &str = r"[.!?]+";

/// Splits transcripts into trimmed, non-empty sentence fragments.
#[derive(Debug, Clone)]
pub struct Segmenter {
    terminators: Regex,
}

impl Segmenter {
    /// Create a new segmenter.
    ///
    /// # Panics
    ///
    /// Panics if the built-in terminator pattern fails to compile, which
    /// would be a bug in this crate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminators: Regex::new(TERMINATORS).expect("Invalid terminator pattern"),
        }
    }

    /// Split `text` into fragments, in order of appearance.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.fragments(text).into_iter().map(str::to_string).collect()
    }

    /// Borrowing variant of [`Segmenter::segment`].
    #[must_use]
    pub fn fragments<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.terminators
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn shared() -> &'static Segmenter {
    static SEGMENTER: OnceLock<Segmenter> = OnceLock::new();
    SEGMENTER.get_or_init(Segmenter::new)
}

/// Split a transcript into bullet points.
///
/// Never fails; empty or whitespace-only input yields an empty list.
///
/// ```
/// let bullets = littlelog::transcript::segment("Had pasta. Ate it all!");
/// assert_eq!(bullets, vec!["Had pasta", "Ate it all"]);
/// ```
#[must_use]
pub fn segment(text: &str) -> Vec<String> {
    shared().segment(text)
}
