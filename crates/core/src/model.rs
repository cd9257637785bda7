//! Model-backed sentiment scoring.
//!
//! A five-class star-rating classifier (1 to 5 stars) is remapped onto the
//! same four figures the lexicon scorer produces:
//!
//! - positive = p(4) + p(5)
//! - negative = p(1) + p(2)
//! - polarity = (positive - negative) / (positive + negative + p(3))
//! - subjectivity = |polarity|
//!
//! The classifier reads raw text, so this scorer asks for stopword
//! filtering to be disabled. The ONNX implementation is behind the `model`
//! feature; [`StarClassifier`] is the seam for anything else.

use crate::scorer::{Scorer, SentimentScores};
use crate::tokenize::StopwordFiltering;
use crate::{MetricsError, Result};

/// Probability mass for 1 through 5 stars.
pub type StarProbabilities = [f64; 5];

/// Maximum number of model tokens per document; longer input is truncated.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// A five-class star-rating classifier.
pub trait StarClassifier {
    /// Returns the probability of each star rating for `text`.
    fn classify(&self, text: &str) -> Result<StarProbabilities>;
}

/// Converts logits to probabilities.
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Folds a star distribution into sentiment scores.
pub fn scores_from_stars(stars: &StarProbabilities) -> SentimentScores {
    let negative = stars[0] + stars[1];
    let neutral = stars[2];
    let positive = stars[3] + stars[4];

    let total = positive + negative + neutral;
    let compound = if total == 0.0 { 0.0 } else { (positive - negative) / total };
    let compound = if compound.is_finite() { compound } else { 0.0 };

    SentimentScores { positive, negative, polarity: compound, subjectivity: compound.abs() }
}

/// Scores documents with a [`StarClassifier`].
pub struct ModelScorer<C> {
    classifier: C,
}

impl<C: StarClassifier> ModelScorer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: StarClassifier> Scorer for ModelScorer<C> {
    fn name(&self) -> &str {
        "model"
    }

    fn stopword_filtering(&self) -> StopwordFiltering {
        StopwordFiltering::Disabled
    }

    fn score(&self, text: &str, _cleaned: &[&str]) -> Result<SentimentScores> {
        let stars = self.classifier.classify(text)?;
        if stars.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(MetricsError::ScoringError(format!("Classifier returned invalid probabilities: {stars:?}")));
        }
        Ok(scores_from_stars(&stars))
    }
}

#[cfg(feature = "model")]
mod onnx {
    use super::{StarClassifier, StarProbabilities, softmax};
    use crate::{MetricsError, Result};
    use ort::session::Session;
    use std::path::Path;
    use std::sync::Mutex;
    use tokenizers::{Tokenizer, TruncationParams};

    /// Star-rating classifier running an exported BERT model on ONNX Runtime.
    ///
    /// The model directory must hold `model.onnx` and `tokenizer.json`
    /// (e.g. an ONNX export of `nlptown/bert-base-multilingual-uncased-sentiment`).
    ///
    /// `Session::run` needs `&mut self`, hence the `Mutex`.
    pub struct OnnxStarClassifier {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
    }

    impl OnnxStarClassifier {
        /// Load the model and tokenizer, truncating input to `max_tokens`.
        pub fn load(model_dir: &Path, max_tokens: usize) -> Result<Self> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(MetricsError::FileNotFound(model_path));
            }
            if !tokenizer_path.exists() {
                return Err(MetricsError::FileNotFound(tokenizer_path));
            }

            let session = Session::builder()
                .map_err(|e: ort::Error| MetricsError::ModelInit(e.to_string()))?
                .with_intra_threads(1)
                .map_err(|e: ort::Error| MetricsError::ModelInit(e.to_string()))?
                .commit_from_file(&model_path)
                .map_err(|e: ort::Error| MetricsError::ModelInit(format!("ONNX load failed: {e}")))?;

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| MetricsError::ModelInit(format!("Tokenizer load failed: {e}")))?;
            tokenizer
                .with_truncation(Some(TruncationParams { max_length: max_tokens, ..Default::default() }))
                .map_err(|e| MetricsError::ModelInit(format!("Tokenizer truncation: {e}")))?;
            tokenizer.with_padding(None);

            tracing::info!("Sentiment model loaded from {}", model_dir.display());

            Ok(Self { session: Mutex::new(session), tokenizer })
        }
    }

    impl StarClassifier for OnnxStarClassifier {
        fn classify(&self, text: &str) -> Result<StarProbabilities> {
            use ort::value::TensorRef;

            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| MetricsError::Tokenization(e.to_string()))?;

            let to_i64 = |values: &[u32]| values.iter().map(|&v| v as i64).collect::<Vec<i64>>();
            let seq_len = encoding.get_ids().len();

            let ids = ndarray::Array2::from_shape_vec((1, seq_len), to_i64(encoding.get_ids()))
                .map_err(|e| MetricsError::ScoringError(e.to_string()))?;
            let mask = ndarray::Array2::from_shape_vec((1, seq_len), to_i64(encoding.get_attention_mask()))
                .map_err(|e| MetricsError::ScoringError(e.to_string()))?;
            let types = ndarray::Array2::from_shape_vec((1, seq_len), to_i64(encoding.get_type_ids()))
                .map_err(|e| MetricsError::ScoringError(e.to_string()))?;

            let ids_tensor =
                TensorRef::from_array_view(&ids).map_err(|e| MetricsError::ScoringError(e.to_string()))?;
            let mask_tensor =
                TensorRef::from_array_view(&mask).map_err(|e| MetricsError::ScoringError(e.to_string()))?;
            let types_tensor =
                TensorRef::from_array_view(&types).map_err(|e| MetricsError::ScoringError(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| MetricsError::ScoringError("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, types_tensor])
                .map_err(|e| MetricsError::ScoringError(format!("ONNX inference failed: {e}")))?;

            // Logits shape: [1, 5]
            let (shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| MetricsError::ScoringError(format!("Output extraction: {e}")))?;

            if logits.len() != 5 {
                return Err(MetricsError::ScoringError(format!(
                    "Unexpected output shape: {shape:?}, expected [1, 5]"
                )));
            }

            let probs = softmax(logits);
            Ok([probs[0], probs[1], probs[2], probs[3], probs[4]])
        }
    }
}

#[cfg(feature = "model")]
pub use onnx::OnnxStarClassifier;

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier(StarProbabilities);

    impl StarClassifier for FixedClassifier {
        fn classify(&self, _text: &str) -> Result<StarProbabilities> {
            Ok(self.0)
        }
    }

    struct FailingClassifier;

    impl StarClassifier for FailingClassifier {
        fn classify(&self, _text: &str) -> Result<StarProbabilities> {
            Err(MetricsError::Tokenization("sequence too long".to_string()))
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_softmax_large_logits_stable() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_from_stars() {
        let scores = scores_from_stars(&[0.1, 0.1, 0.2, 0.3, 0.3]);
        assert!((scores.positive - 0.6).abs() < 1e-12);
        assert!((scores.negative - 0.2).abs() < 1e-12);
        assert!((scores.polarity - 0.4).abs() < 1e-12);
        assert!((scores.subjectivity - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_scores_negative_subjectivity_is_absolute() {
        let scores = scores_from_stars(&[0.7, 0.1, 0.2, 0.0, 0.0]);
        assert!(scores.polarity < 0.0);
        assert_eq!(scores.subjectivity, scores.polarity.abs());
    }

    #[test]
    fn test_scores_zero_mass_is_zero() {
        assert_eq!(scores_from_stars(&[0.0; 5]), SentimentScores::default());
    }

    #[test]
    fn test_model_scorer_ignores_cleaned_tokens() {
        let scorer = ModelScorer::new(FixedClassifier([0.0, 0.0, 0.0, 0.5, 0.5]));
        let scores = scorer.score("Loved it", &[]).unwrap();
        assert_eq!(scores.polarity, 1.0);
        assert_eq!(scorer.stopword_filtering(), StopwordFiltering::Disabled);
    }

    #[test]
    fn test_model_scorer_rejects_nan() {
        let scorer = ModelScorer::new(FixedClassifier([f64::NAN, 0.0, 0.0, 0.5, 0.5]));
        assert!(matches!(scorer.score("text", &[]), Err(MetricsError::ScoringError(_))));
    }

    #[test]
    fn test_model_scorer_propagates_classifier_error() {
        let scorer = ModelScorer::new(FailingClassifier);
        assert!(matches!(scorer.score("text", &[]), Err(MetricsError::Tokenization(_))));
    }
}
