use std::sync::Arc;

use tracing::debug;

use super::model::SentimentModel;
use super::vocab::Vocabulary;
use crate::error::{PipelineError, Result};
use crate::pipelines::stats::PipelineStats;
use crate::text;
use crate::video::Comment;

/// Number of sentiment classes the model scores.
pub const CLASS_COUNT: usize = 3;

// ============ Output types ============

/// Discrete sentiment classes, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// Class 0.
    Negative = 0,
    /// Class 1. Also the fixed result for emoji-gated comments.
    Neutral = 1,
    /// Class 2.
    Positive = 2,
}

impl Sentiment {
    /// All classes in model output order.
    pub const ALL: [Sentiment; CLASS_COUNT] =
        [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        };
        write!(f, "{name}")
    }
}

/// A single classification outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class.
    pub sentiment: Sentiment,
    /// Highest per-class score, in `[0, 1]`. Exactly `0.0` for emoji-gated
    /// comments — a policy marker, not a probability.
    pub confidence: f32,
}

impl Prediction {
    /// The fixed result assigned to emoji-gated comments.
    pub(crate) const GATED: Prediction = Prediction {
        sentiment: Sentiment::Neutral,
        confidence: 0.0,
    };

    /// Reduces one model score vector to a class and confidence.
    ///
    /// The class is the first maximum (ties break toward the lower class
    /// index) and the confidence is that maximum. Vectors that are not
    /// exactly [`CLASS_COUNT`] finite scores are rejected with
    /// [`PipelineError::Classification`] rather than mapped to a class.
    pub fn from_scores(scores: &[f32]) -> Result<Prediction> {
        if scores.len() != CLASS_COUNT {
            return Err(PipelineError::Classification(format!(
                "Model returned {} scores per row, expected {}",
                scores.len(),
                CLASS_COUNT
            )));
        }

        let mut best = 0usize;
        for (i, &score) in scores.iter().enumerate() {
            if !score.is_finite() {
                return Err(PipelineError::Classification(format!(
                    "Model returned a non-finite score for class {i}"
                )));
            }
            if score > scores[best] {
                best = i;
            }
        }

        Ok(Prediction {
            sentiment: Sentiment::ALL[best],
            confidence: scores[best],
        })
    }
}

/// Order-parallel classification results for one comment batch.
///
/// `classes()[i]` and `confidences()[i]` describe the i-th input comment;
/// both sequences always have the input batch's length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPrediction {
    classes: Vec<Sentiment>,
    confidences: Vec<f32>,
}

impl BatchPrediction {
    /// Assembles a batch prediction from its two parallel sequences.
    ///
    /// # Errors
    ///
    /// Rejects sequences of different lengths — they cannot be index-aligned.
    pub fn from_parts(classes: Vec<Sentiment>, confidences: Vec<f32>) -> Result<Self> {
        if classes.len() != confidences.len() {
            return Err(PipelineError::Unexpected(format!(
                "Parallel result sequences differ in length: {} classes vs {} confidences",
                classes.len(),
                confidences.len()
            )));
        }
        Ok(Self {
            classes,
            confidences,
        })
    }

    /// Classes, index-aligned with the input batch.
    pub fn classes(&self) -> &[Sentiment] {
        &self.classes
    }

    /// Confidences, index-aligned with the input batch.
    pub fn confidences(&self) -> &[f32] {
        &self.confidences
    }

    /// Number of classified inputs.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Per-comment predictions in input order.
    pub fn iter(&self) -> impl Iterator<Item = Prediction> + '_ {
        self.classes
            .iter()
            .zip(&self.confidences)
            .map(|(&sentiment, &confidence)| Prediction {
                sentiment,
                confidence,
            })
    }
}

/// Batch output: order-aligned predictions plus execution statistics.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Order-aligned predictions.
    pub prediction: BatchPrediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Pipeline ============

/// Classifies comment sentiment with a pretrained model.
///
/// Construct with [`SentimentPipelineBuilder`](super::SentimentPipelineBuilder),
/// or inject an already-loaded model and vocabulary with [`Self::with_parts`].
///
/// # Examples
///
/// ```rust,no_run
/// # use tube_pipelines::sentiment::{ClassifierAssets, SentimentPipelineBuilder};
/// # fn main() -> tube_pipelines::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::embedding(ClassifierAssets::HfHub {
///     repo_id: "tube-intel/comment-sentiment".into(),
/// })
/// .build()?;
///
/// let output = pipeline.classify("I absolutely love this video!")?;
/// println!("{}: {:.2}", output.sentiment, output.confidence);
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipeline<M: SentimentModel> {
    pub(crate) model: Arc<M>,
    pub(crate) vocabulary: Vocabulary,
}

impl<M: SentimentModel> SentimentPipeline<M> {
    /// Builds a pipeline from an already-loaded model and vocabulary.
    ///
    /// This is the injection point for sharing process-lifetime assets across
    /// pipelines without going through the builder.
    ///
    /// # Errors
    ///
    /// [`PipelineError::DependencyUnavailable`] when the vocabulary is empty:
    /// an empty map would silently encode every comment to padding.
    pub fn with_parts(model: Arc<M>, vocabulary: Vocabulary) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(PipelineError::DependencyUnavailable(
                "Vocabulary is empty; load the tokenizer artifact that matches the model".into(),
            ));
        }
        Ok(Self { model, vocabulary })
    }

    /// Classifies a single piece of text.
    ///
    /// Applies the same emoji gate as the batch path: emoji-bearing text
    /// returns `(Neutral, 0.0)` without touching the model.
    pub fn classify(&self, input: &str) -> Result<Prediction> {
        if text::contains_emoji(input) {
            return Ok(Prediction::GATED);
        }

        let encoded = self.vocabulary.encode(&text::normalize(input));
        let scores = self
            .model
            .predict(&[encoded])
            .map_err(|e| PipelineError::Classification(format!("Model invocation failed: {e}")))?;
        let row = scores.first().ok_or_else(|| {
            PipelineError::Classification("Model returned no scores for a one-row batch".into())
        })?;

        Prediction::from_scores(row)
    }

    /// Classifies every comment, preserving input order.
    ///
    /// Emoji-bearing comments never reach the model: they are assigned
    /// `(Neutral, 0.0)` by policy. All remaining comments are normalized,
    /// encoded, and scored in one batched model call, then the results are
    /// slotted back into their original positions.
    ///
    /// # Errors
    ///
    /// A model failure or malformed score vector abandons the whole batch
    /// with [`PipelineError::Classification`]; partial results are never
    /// returned.
    pub fn run(&self, comments: &[Comment]) -> Result<BatchOutput> {
        let stats_builder = PipelineStats::start();

        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        let (prediction, gated) = self.predict_texts(&texts)?;

        let processed = prediction.len();
        Ok(BatchOutput {
            prediction,
            stats: stats_builder.finish(processed, gated),
        })
    }

    /// Gate, normalize, encode, and score; returns the aligned results and
    /// the number of gated entries.
    fn predict_texts(&self, texts: &[&str]) -> Result<(BatchPrediction, usize)> {
        // Gated entries keep these defaults and are never normalized,
        // encoded, or scored.
        let mut classes = vec![Prediction::GATED.sentiment; texts.len()];
        let mut confidences = vec![Prediction::GATED.confidence; texts.len()];

        let mut live = Vec::with_capacity(texts.len());
        let mut encoded = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            if text::contains_emoji(text) {
                continue;
            }
            encoded.push(self.vocabulary.encode(&text::normalize(text)));
            live.push(i);
        }

        let gated = texts.len() - live.len();
        debug!(total = texts.len(), gated, "classifying comment batch");

        if !encoded.is_empty() {
            let scores = self.model.predict(&encoded).map_err(|e| {
                PipelineError::Classification(format!("Model invocation failed: {e}"))
            })?;
            if scores.len() != encoded.len() {
                return Err(PipelineError::Classification(format!(
                    "Model returned {} score rows for a batch of {}",
                    scores.len(),
                    encoded.len()
                )));
            }

            for (&i, row) in live.iter().zip(&scores) {
                let prediction = Prediction::from_scores(row)?;
                classes[i] = prediction.sentiment;
                confidences[i] = prediction.confidence;
            }
        }

        Ok((
            BatchPrediction {
                classes,
                confidences,
            },
            gated,
        ))
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_highest_score() {
        let p = Prediction::from_scores(&[0.1, 0.2, 0.7]).unwrap();
        assert_eq!(p.sentiment, Sentiment::Positive);
        assert!((p.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn argmax_ties_break_toward_lower_class() {
        let p = Prediction::from_scores(&[0.5, 0.5, 0.0]).unwrap();
        assert_eq!(p.sentiment, Sentiment::Negative);
        assert!((p.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn wrong_score_count_is_rejected() {
        assert!(matches!(
            Prediction::from_scores(&[0.5, 0.5]),
            Err(PipelineError::Classification(_))
        ));
        assert!(matches!(
            Prediction::from_scores(&[0.1, 0.2, 0.3, 0.4]),
            Err(PipelineError::Classification(_))
        ));
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        assert!(matches!(
            Prediction::from_scores(&[0.1, f32::NAN, 0.2]),
            Err(PipelineError::Classification(_))
        ));
        assert!(matches!(
            Prediction::from_scores(&[f32::INFINITY, 0.0, 0.0]),
            Err(PipelineError::Classification(_))
        ));
    }

    #[test]
    fn batch_prediction_rejects_misaligned_parts() {
        assert!(BatchPrediction::from_parts(vec![Sentiment::Neutral], vec![]).is_err());
    }

    #[test]
    fn batch_prediction_iterates_in_order() {
        let batch = BatchPrediction::from_parts(
            vec![Sentiment::Negative, Sentiment::Positive],
            vec![0.8, 0.9],
        )
        .unwrap();

        let items: Vec<Prediction> = batch.iter().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sentiment, Sentiment::Negative);
        assert_eq!(items[1].sentiment, Sentiment::Positive);
    }
}
