//! The 13-field score vector.
//!
//! Field order is fixed and mirrors the output columns. The average
//! sentence length appears twice: once as "AVG SENTENCE LENGTH" and once as
//! "AVG NUMBER OF WORDS PER SENTENCE". Both columns are kept.

use serde::Serialize;

use crate::readability::ReadabilityMetrics;
use crate::scorer::SentimentScores;
use crate::{MetricsError, Result};

/// Number of metric fields in every score vector.
pub const FIELD_COUNT: usize = 13;

/// Column headers for the metric fields, in output order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVG SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "SYLLABLE PER WORD",
    "PERSONAL PRONOUNS",
    "AVG WORD LENGTH",
];

/// Metric values for one document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreVector {
    pub positive_score: f64,
    pub negative_score: f64,
    pub polarity_score: f64,
    pub subjectivity_score: f64,
    pub avg_sentence_length: f64,
    pub percentage_of_complex_words: f64,
    pub fog_index: f64,
    pub avg_number_of_words_per_sentence: f64,
    pub complex_word_count: f64,
    pub word_count: f64,
    pub syllables_per_word: f64,
    pub personal_pronouns: f64,
    pub avg_word_length: f64,
}

impl ScoreVector {
    /// All fields zero. Returned for degenerate input and scoring failures.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn assemble(sentiment: SentimentScores, readability: ReadabilityMetrics) -> Self {
        Self {
            positive_score: sentiment.positive,
            negative_score: sentiment.negative,
            polarity_score: sentiment.polarity,
            subjectivity_score: sentiment.subjectivity,
            avg_sentence_length: readability.avg_sentence_length,
            percentage_of_complex_words: readability.percentage_complex_words,
            fog_index: readability.fog_index,
            avg_number_of_words_per_sentence: readability.avg_sentence_length,
            complex_word_count: readability.complex_word_count as f64,
            word_count: readability.word_count as f64,
            syllables_per_word: readability.avg_syllables_per_word,
            personal_pronouns: readability.personal_pronouns as f64,
            avg_word_length: readability.avg_word_length,
        }
    }

    /// Values in output column order.
    pub fn to_array(&self) -> [f64; FIELD_COUNT] {
        [
            self.positive_score,
            self.negative_score,
            self.polarity_score,
            self.subjectivity_score,
            self.avg_sentence_length,
            self.percentage_of_complex_words,
            self.fog_index,
            self.avg_number_of_words_per_sentence,
            self.complex_word_count,
            self.word_count,
            self.syllables_per_word,
            self.personal_pronouns,
            self.avg_word_length,
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|v| *v == 0.0)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| MetricsError::ScoringError(e.to_string()))
    }
}

/// Cells for one output row: a full vector, or thirteen nulls.
pub fn row_cells(scores: Option<&ScoreVector>) -> [Option<f64>; FIELD_COUNT] {
    match scores {
        Some(vector) => vector.to_array().map(Some),
        None => [None; FIELD_COUNT],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoreVector {
        let sentiment = SentimentScores { positive: 3.0, negative: 1.0, polarity: 0.5, subjectivity: 0.2 };
        let readability = ReadabilityMetrics {
            avg_sentence_length: 10.0,
            percentage_complex_words: 0.25,
            fog_index: 4.1,
            complex_word_count: 5,
            word_count: 20,
            avg_syllables_per_word: 1.8,
            personal_pronouns: 2,
            avg_word_length: 5.5,
        };
        ScoreVector::assemble(sentiment, readability)
    }

    #[test]
    fn test_field_order() {
        assert_eq!(
            sample().to_array(),
            [3.0, 1.0, 0.5, 0.2, 10.0, 0.25, 4.1, 10.0, 5.0, 20.0, 1.8, 2.0, 5.5]
        );
    }

    #[test]
    fn test_duplicate_sentence_length_columns() {
        let vector = sample();
        assert_eq!(vector.avg_sentence_length, vector.avg_number_of_words_per_sentence);
        assert_eq!(FIELD_NAMES[4], "AVG SENTENCE LENGTH");
        assert_eq!(FIELD_NAMES[7], "AVG NUMBER OF WORDS PER SENTENCE");
    }

    #[test]
    fn test_zero_vector() {
        assert!(ScoreVector::zero().is_zero());
        assert!(!sample().is_zero());
    }

    #[test]
    fn test_row_cells_length() {
        assert_eq!(row_cells(None), [None; FIELD_COUNT]);
        let cells = row_cells(Some(&sample()));
        assert_eq!(cells.len(), FIELD_COUNT);
        assert!(cells.iter().all(Option::is_some));
    }

    #[test]
    fn test_to_json_names_fields() {
        let json = sample().to_json().unwrap();
        assert_eq!(json["fog_index"], 4.1);
        assert_eq!(json.as_object().unwrap().len(), FIELD_COUNT);
    }
}
