//! Word and sentence tokenization.
//!
//! Both tokenizers are deliberately simple regex rules rather than
//! linguistic parsers. Every downstream metric is defined in terms of
//! these exact rules, so changing them changes the numbers.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// Terminal punctuation run, whitespace, then the capital that opens the next sentence.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+[A-Z]").expect("valid sentence regex"));

/// Whether stopwords are removed before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwordFiltering {
    /// Drop tokens found in the stopword set.
    #[default]
    Enabled,
    /// Keep every alphanumeric token.
    Disabled,
}

impl FromStr for StopwordFiltering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enabled" | "on" | "true" => Ok(Self::Enabled),
            "disabled" | "off" | "false" => Ok(Self::Disabled),
            _ => Err(format!("Invalid stopword filtering: {}. Valid options: enabled, disabled", s)),
        }
    }
}

/// Lower-cased word tokens of a document.
///
/// Holds the lower-cased text and yields tokens lazily. The sequence can be
/// walked any number of times with [`WordTokens::iter`].
#[derive(Debug, Clone)]
pub struct WordTokens {
    lowered: String,
}

impl WordTokens {
    /// Iterates over the tokens in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        WORD_REGEX.find_iter(&self.lowered).map(|m| m.as_str())
    }

    /// Number of tokens.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &'a WordTokens {
    type Item = &'a str;
    type IntoIter = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Splits text into lower-cased `\w+` tokens.
pub fn tokenize_words(text: &str) -> WordTokens {
    WordTokens { lowered: text.to_lowercase() }
}

/// Splits text into sentences.
///
/// A boundary is one or more of `.`, `!`, `?` followed by whitespace and an
/// upper-case ASCII letter. The punctuation and whitespace are dropped, the
/// capital letter opens the next sentence. Pieces are trimmed and empty
/// ones discarded.
pub fn tokenize_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        sentences.push(&text[start..boundary.start()]);
        // The capital is a single ASCII byte at the end of the match.
        start = boundary.end() - 1;
    }
    sentences.push(&text[start..]);

    sentences.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Keeps purely alphanumeric tokens, optionally dropping stopwords.
pub fn clean_tokens<'a, I>(words: I, stopwords: &HashSet<String>, filtering: StopwordFiltering) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .filter(|word| word.chars().all(char::is_alphanumeric))
        .filter(|word| match filtering {
            StopwordFiltering::Enabled => !stopwords.contains(*word),
            StopwordFiltering::Disabled => true,
        })
        .collect()
}
