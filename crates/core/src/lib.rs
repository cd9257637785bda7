pub mod analyzer;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod lexicon;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod readability;
pub mod scorer;
pub mod scores;
pub mod tokenize;
pub mod workbook;

pub use analyzer::{Analyzer, AnalyzerConfig, AnalyzerConfigBuilder, calculate_scores};
pub use error::{MetricsError, Result};
pub use extract::article_text;
pub use fetch::{fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, HttpSource, fetch_url};
pub use lexicon::{Lexicon, LexiconPaths, ensure_word_lists};
#[cfg(feature = "model")]
pub use model::OnnxStarClassifier;
pub use model::{ModelScorer, StarClassifier, StarProbabilities, scores_from_stars};
pub use parse::Document;
pub use pipeline::{AnalyzedRecord, Pipeline, RecordOutcome, TextSource};
pub use readability::{ReadabilityMetrics, personal_pronoun_count, syllable_count};
pub use scorer::{LexiconScorer, Scorer, ScorerKind, SentimentScores};
pub use scores::{FIELD_COUNT, FIELD_NAMES, ScoreVector};
pub use tokenize::{StopwordFiltering, WordTokens, clean_tokens, tokenize_sentences, tokenize_words};
pub use workbook::{InputRecord, Workbook};
