//! Positive, negative and stopword lists.
//!
//! A [`Lexicon`] is built once at startup and shared by reference for the
//! rest of the run. It reads flat newline-delimited word lists from disk
//! and falls back to the built-in lists when a source is missing, unreadable
//! or empty.
//!
//! # Layout
//!
//! ```text
//! <base>/MasterDictionary/positive-words.txt
//! <base>/MasterDictionary/negative-words.txt
//! <base>/StopWords/*            (every file is a stopword list)
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Built-in positive words.
pub const DEFAULT_POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "outstanding", "wonderful", "amazing", "awesome",
    "superb", "fantastic", "brilliant", "exceptional", "marvelous", "terrific", "phenomenal",
    "impressive", "remarkable", "splendid", "fabulous", "delightful", "perfect", "magnificent",
    "extraordinary", "superior", "admirable", "favorable", "beneficial", "effective", "efficient",
    "successful",
];

/// Built-in negative words.
pub const DEFAULT_NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "negative", "terrible", "horrible", "awful", "unpleasant", "disappointing",
    "inferior", "inadequate", "unsatisfactory", "unfavorable", "deficient", "defective", "faulty",
    "flawed", "problematic", "ineffective", "inefficient", "unsuccessful", "fail", "failure",
    "worse", "worst", "mediocre", "subpar", "frustrating", "concerning", "troublesome",
];

/// Built-in stopwords.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "would",
    "should", "could", "might", "must", "shall", "will", "can", "a", "an", "the", "and", "but",
    "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how",
];

const POSITIVE_FILE: &str = "positive-words.txt";
const NEGATIVE_FILE: &str = "negative-words.txt";
const STOPWORD_FILE: &str = "stopwords.txt";

/// Where the word lists live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconPaths {
    /// Directory holding `positive-words.txt` and `negative-words.txt`.
    pub master_dictionary: PathBuf,
    /// Directory whose files are all read as stopword lists.
    pub stopwords: PathBuf,
}

impl LexiconPaths {
    /// Standard layout under a base directory.
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self { master_dictionary: base.join("MasterDictionary"), stopwords: base.join("StopWords") }
    }

    /// Standard layout under the user data directory (`<data_dir>/textmetrics`).
    pub fn user_default() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::in_dir(dir.join("textmetrics")))
    }

    pub fn positive_file(&self) -> PathBuf {
        self.master_dictionary.join(POSITIVE_FILE)
    }

    pub fn negative_file(&self) -> PathBuf {
        self.master_dictionary.join(NEGATIVE_FILE)
    }

    pub fn stopword_file(&self) -> PathBuf {
        self.stopwords.join(STOPWORD_FILE)
    }
}

/// Creates the lexicon directories and writes the built-in lists for any
/// file that does not exist yet. Existing files are never touched.
pub fn ensure_word_lists(paths: &LexiconPaths) -> Result<()> {
    fs::create_dir_all(&paths.master_dictionary)?;
    fs::create_dir_all(&paths.stopwords)?;

    for (path, words) in [
        (paths.positive_file(), DEFAULT_POSITIVE_WORDS),
        (paths.negative_file(), DEFAULT_NEGATIVE_WORDS),
        (paths.stopword_file(), DEFAULT_STOPWORDS),
    ] {
        if !path.exists() {
            tracing::info!("Writing default word list to {}", path.display());
            fs::write(&path, words.join("\n"))?;
        }
    }

    Ok(())
}

/// Immutable word sets used by the lexicon scorer and the stopword filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    stopwords: HashSet<String>,
}

impl Lexicon {
    /// Builds a lexicon from explicit word lists.
    ///
    /// Entries are trimmed and lower-cased. A word listed as both positive
    /// and negative is removed from both sets so the two stay disjoint.
    pub fn new<P, N, S>(positive: P, negative: N, stopwords: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut positive = normalize(positive);
        let mut negative = normalize(negative);

        let overlap: Vec<String> = positive.intersection(&negative).cloned().collect();
        if !overlap.is_empty() {
            tracing::warn!(count = overlap.len(), "Dropping words listed as both positive and negative");
            for word in &overlap {
                positive.remove(word);
                negative.remove(word);
            }
        }

        Self { positive, negative, stopwords: normalize(stopwords) }
    }

    /// The built-in word lists.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_POSITIVE_WORDS, DEFAULT_NEGATIVE_WORDS, DEFAULT_STOPWORDS)
    }

    /// Loads word lists from disk.
    ///
    /// The positive/negative pair and the stopword set fall back to the
    /// built-in lists independently, with a warning, if reading fails or
    /// yields no words.
    pub fn load(paths: &LexiconPaths) -> Self {
        let (positive, negative) = match load_master_dictionary(paths) {
            Ok((pos, neg)) if !pos.is_empty() && !neg.is_empty() => (pos, neg),
            Ok(_) => {
                tracing::warn!(
                    "Master dictionary at {} is empty, using default word lists",
                    paths.master_dictionary.display()
                );
                (normalize(DEFAULT_POSITIVE_WORDS), normalize(DEFAULT_NEGATIVE_WORDS))
            }
            Err(e) => {
                tracing::warn!("Error loading master dictionary: {e}. Using default word lists");
                (normalize(DEFAULT_POSITIVE_WORDS), normalize(DEFAULT_NEGATIVE_WORDS))
            }
        };

        let stopwords = match load_stopwords(&paths.stopwords) {
            Ok(words) if !words.is_empty() => words,
            Ok(_) => {
                tracing::warn!("No stopwords found in {}, using defaults", paths.stopwords.display());
                normalize(DEFAULT_STOPWORDS)
            }
            Err(e) => {
                tracing::warn!("Error loading stopwords: {e}. Using default stopwords");
                normalize(DEFAULT_STOPWORDS)
            }
        };

        Self::new(positive, negative, stopwords)
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Reads one word per line. Bytes are decoded lossily since published
/// dictionaries are often Latin-1.
fn read_word_list(path: &Path) -> Result<HashSet<String>> {
    let bytes = fs::read(path)?;
    Ok(normalize(String::from_utf8_lossy(&bytes).lines()))
}

fn load_master_dictionary(paths: &LexiconPaths) -> Result<(HashSet<String>, HashSet<String>)> {
    let positive = read_word_list(&paths.positive_file())?;
    let negative = read_word_list(&paths.negative_file())?;
    Ok((positive, negative))
}

fn load_stopwords(dir: &Path) -> Result<HashSet<String>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut stopwords = HashSet::new();
    for file in files {
        stopwords.extend(read_word_list(&file)?);
    }
    Ok(stopwords)
}
