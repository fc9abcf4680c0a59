use candle_core::Device;

use super::vocab::{EncodedSequence, Vocabulary};
use crate::error::Result;

/// The externally supplied classification model behind the sentiment
/// pipeline.
///
/// Implementations are pretrained and opaque: the pipeline hands them a batch
/// of encoded sequences and expects one probability-like score vector of
/// [`CLASS_COUNT`](super::CLASS_COUNT) entries per input row, in input order.
/// Loading happens once per process through the shared model cache; calls are
/// synchronous and side-effect-free.
pub trait SentimentModel {
    /// Options selecting and locating a concrete pretrained artifact.
    type Options: std::fmt::Debug + Clone;

    /// Loads the model onto `device`.
    fn new(options: Self::Options, device: Device) -> Result<Self>
    where
        Self: Sized;

    /// Scores a batch of encoded sequences, one score vector per row.
    fn predict(&self, batch: &[EncodedSequence]) -> Result<Vec<Vec<f32>>>;

    /// Loads the vocabulary matching this model's training tokenizer.
    fn load_vocabulary(options: Self::Options) -> Result<Vocabulary>;

    /// The device the model is resident on.
    fn device(&self) -> &Device;
}
