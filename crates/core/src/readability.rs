//! Readability metrics: syllables, complex words, Fog Index, pronouns.
//!
//! All ratios are taken over the *cleaned* token list (alphanumeric tokens,
//! stopwords removed when filtering is on). Personal pronouns are the
//! exception and are counted on the raw text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PERSONAL_PRONOUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(I|we|my|ours|us)\b").expect("valid pronoun regex"));

/// Words with more syllables than this count as complex.
pub const COMPLEX_SYLLABLE_THRESHOLD: usize = 2;

/// Weight applied to the sum in the Gunning Fog formula.
pub const FOG_WEIGHT: f64 = 0.4;

/// Counts syllables with a vowel-letter heuristic.
///
/// Every `a e i o u y` counts once, a trailing `es` or `ed` takes one away,
/// and the result never drops below 1.
pub fn syllable_count(word: &str) -> usize {
    let word = word.to_lowercase();
    let vowels = word.chars().filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')).count();
    let count = if word.ends_with("es") || word.ends_with("ed") { vowels.saturating_sub(1) } else { vowels };
    count.max(1)
}

/// Counts whole-word, case-insensitive matches of I, we, my, ours and us.
pub fn personal_pronoun_count(text: &str) -> usize {
    PERSONAL_PRONOUNS.find_iter(text).count()
}

/// Readability figures for one document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReadabilityMetrics {
    pub avg_sentence_length: f64,
    pub percentage_complex_words: f64,
    pub fog_index: f64,
    pub complex_word_count: usize,
    pub word_count: usize,
    pub avg_syllables_per_word: f64,
    pub personal_pronouns: usize,
    pub avg_word_length: f64,
}

impl ReadabilityMetrics {
    /// Computes the metrics, or `None` when there are no tokens or no sentences.
    pub fn calculate(cleaned: &[&str], sentence_count: usize, raw_text: &str) -> Option<Self> {
        if cleaned.is_empty() || sentence_count == 0 {
            return None;
        }

        let word_count = cleaned.len();
        let words = word_count as f64;

        let syllables: Vec<usize> = cleaned.iter().map(|w| syllable_count(w)).collect();
        let complex_word_count = syllables.iter().filter(|&&s| s > COMPLEX_SYLLABLE_THRESHOLD).count();

        let avg_sentence_length = words / sentence_count as f64;
        let percentage_complex_words = complex_word_count as f64 / words;
        let fog_index = FOG_WEIGHT * (avg_sentence_length + percentage_complex_words);

        let total_chars: usize = cleaned.iter().map(|w| w.chars().count()).sum();
        let total_syllables: usize = syllables.iter().sum();

        Some(Self {
            avg_sentence_length,
            percentage_complex_words,
            fog_index,
            complex_word_count,
            word_count,
            avg_syllables_per_word: total_syllables as f64 / words,
            personal_pronouns: personal_pronoun_count(raw_text),
            avg_word_length: total_chars as f64 / words,
        })
    }
}
