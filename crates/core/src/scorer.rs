//! Sentiment scoring.
//!
//! A [`Scorer`] turns a document into four sentiment figures: positive,
//! negative, polarity and subjectivity. Two implementations exist: the
//! word-counting [`LexiconScorer`] here and the model-backed
//! [`ModelScorer`](crate::model::ModelScorer).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::tokenize::StopwordFiltering;
use crate::Result;

/// Smoothing term that keeps the lexicon ratios finite.
pub const EPSILON: f64 = 1e-6;

/// Sentiment part of a score vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// A sentiment scoring strategy.
pub trait Scorer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Stopword handling this scorer expects for the cleaned token list.
    fn stopword_filtering(&self) -> StopwordFiltering;

    /// Scores a document given its raw text and cleaned tokens.
    fn score(&self, text: &str, cleaned: &[&str]) -> Result<SentimentScores>;
}

/// Which scorer a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerKind {
    #[default]
    Lexicon,
    Model,
}

impl ScorerKind {
    /// Lexicon scoring drops stopwords, the model reads everything.
    pub fn default_stopword_filtering(self) -> StopwordFiltering {
        match self {
            ScorerKind::Lexicon => StopwordFiltering::Enabled,
            ScorerKind::Model => StopwordFiltering::Disabled,
        }
    }
}

impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicon" | "dictionary" => Ok(Self::Lexicon),
            "model" | "bert" => Ok(Self::Model),
            _ => Err(format!("Invalid scorer: {}. Valid options: lexicon, model", s)),
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::Lexicon => write!(f, "lexicon"),
            ScorerKind::Model => write!(f, "model"),
        }
    }
}

/// Counts positive and negative words from a [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct LexiconScorer<'a> {
    lexicon: &'a Lexicon,
    epsilon: f64,
}

impl<'a> LexiconScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon, epsilon: EPSILON }
    }

    /// Overrides the smoothing term.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Scorer for LexiconScorer<'_> {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn stopword_filtering(&self) -> StopwordFiltering {
        StopwordFiltering::Enabled
    }

    fn score(&self, _text: &str, cleaned: &[&str]) -> Result<SentimentScores> {
        let positive = cleaned.iter().filter(|w| self.lexicon.is_positive(w)).count() as f64;
        let negative = cleaned.iter().filter(|w| self.lexicon.is_negative(w)).count() as f64;

        Ok(SentimentScores {
            positive,
            negative,
            polarity: (positive - negative) / (positive + negative + self.epsilon),
            subjectivity: (positive + negative) / (cleaned.len() as f64 + self.epsilon),
        })
    }
}
