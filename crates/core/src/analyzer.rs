//! Per-document metric calculation.
//!
//! The [`Analyzer`] ties tokenization, a [`Scorer`] and the readability
//! calculator together and always yields a full [`ScoreVector`].
//!
//! # Example
//!
//! ```rust
//! use textmetrics_core::{Analyzer, AnalyzerConfig, Lexicon, LexiconScorer};
//!
//! let lexicon = Lexicon::builtin();
//! let scorer = LexiconScorer::new(&lexicon);
//! let analyzer = Analyzer::new(&scorer, &lexicon, AnalyzerConfig::default());
//!
//! let scores = analyzer.calculate_scores("This is great. This is bad.");
//! assert_eq!(scores.positive_score, 1.0);
//! ```

use crate::lexicon::Lexicon;
use crate::model::DEFAULT_MAX_TOKENS;
use crate::readability::ReadabilityMetrics;
use crate::scorer::{EPSILON, LexiconScorer, Scorer, ScorerKind, SentimentScores};
use crate::scores::ScoreVector;
use crate::tokenize::{StopwordFiltering, clean_tokens, tokenize_sentences, tokenize_words};

/// Configuration for a scoring run.
///
/// # Example
///
/// ```rust
/// use textmetrics_core::{AnalyzerConfig, ScorerKind, StopwordFiltering};
///
/// let config = AnalyzerConfig::builder()
///     .scorer(ScorerKind::Model)
///     .stopword_filtering(StopwordFiltering::Enabled)
///     .build();
/// assert_eq!(config.stopword_filtering, StopwordFiltering::Enabled);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Which sentiment scorer to use (default: lexicon).
    pub scorer: ScorerKind,

    /// Stopword handling for the cleaned token list (default: follows the scorer).
    pub stopword_filtering: StopwordFiltering,

    /// Smoothing term for the lexicon ratios (default: 1e-6).
    pub epsilon: f64,

    /// Model input limit in tokens (default: 512).
    pub max_model_tokens: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Lexicon,
            stopword_filtering: ScorerKind::Lexicon.default_stopword_filtering(),
            epsilon: EPSILON,
            max_model_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AnalyzerConfig {
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for [`AnalyzerConfig`].
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
    filtering_set: bool,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default(), filtering_set: false }
    }

    /// Sets the scorer. Stopword filtering follows it unless set explicitly.
    pub fn scorer(mut self, value: ScorerKind) -> Self {
        self.config.scorer = value;
        self
    }

    /// Overrides stopword filtering.
    pub fn stopword_filtering(mut self, value: StopwordFiltering) -> Self {
        self.config.stopword_filtering = value;
        self.filtering_set = true;
        self
    }

    /// Sets the smoothing term.
    pub fn epsilon(mut self, value: f64) -> Self {
        self.config.epsilon = value;
        self
    }

    /// Sets the model input limit.
    pub fn max_model_tokens(mut self, value: usize) -> Self {
        self.config.max_model_tokens = value;
        self
    }

    /// Builds the config.
    pub fn build(mut self) -> AnalyzerConfig {
        if !self.filtering_set {
            self.config.stopword_filtering = self.config.scorer.default_stopword_filtering();
        }
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes score vectors for documents.
pub struct Analyzer<'a> {
    scorer: &'a dyn Scorer,
    lexicon: &'a Lexicon,
    config: AnalyzerConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(scorer: &'a dyn Scorer, lexicon: &'a Lexicon, config: AnalyzerConfig) -> Self {
        if scorer.stopword_filtering() != config.stopword_filtering {
            tracing::debug!(
                scorer = scorer.name(),
                "Stopword filtering overridden to {:?}",
                config.stopword_filtering
            );
        }
        Self { scorer, lexicon, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Scores one document.
    ///
    /// Text without cleaned tokens or without sentences yields the zero
    /// vector. A scorer error is logged and zeroes only the four sentiment
    /// fields; the readability fields are kept.
    pub fn calculate_scores(&self, text: &str) -> ScoreVector {
        let words = tokenize_words(text);
        let cleaned = clean_tokens(words.iter(), self.lexicon.stopwords(), self.config.stopword_filtering);
        let sentences = tokenize_sentences(text);

        let Some(readability) = ReadabilityMetrics::calculate(&cleaned, sentences.len(), text) else {
            return ScoreVector::zero();
        };

        match self.scorer.score(text, &cleaned) {
            Ok(sentiment) => ScoreVector::assemble(sentiment, readability),
            Err(e) => {
                tracing::warn!(scorer = self.scorer.name(), "Error calculating sentiment: {e}");
                ScoreVector::assemble(SentimentScores::default(), readability)
            }
        }
    }
}

/// Scores `text` with the lexicon scorer and default configuration.
pub fn calculate_scores(text: &str, lexicon: &Lexicon) -> ScoreVector {
    let config = AnalyzerConfig::default();
    let scorer = LexiconScorer::new(lexicon).with_epsilon(config.epsilon);
    Analyzer::new(&scorer, lexicon, config).calculate_scores(text)
}
