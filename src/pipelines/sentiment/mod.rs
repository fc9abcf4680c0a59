//! Sentiment analysis pipeline for video comments.
//!
//! Classifies each comment as `Negative`, `Neutral`, or `Positive` and
//! returns a confidence score alongside every class. Comments containing
//! emoji are never shown to the model; they are assigned `(Neutral, 0.0)` by
//! policy because the model was not trained on emoji-bearing text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tube_pipelines::sentiment::{ClassifierAssets, SentimentPipelineBuilder};
//!
//! # fn main() -> tube_pipelines::error::Result<()> {
//! let pipeline = SentimentPipelineBuilder::embedding(ClassifierAssets::HfHub {
//!     repo_id: "tube-intel/comment-sentiment".into(),
//! })
//! .build()?;
//!
//! let prediction = pipeline.classify("Best tutorial on this topic, period.")?;
//! println!("{} ({:.2})", prediction.sentiment, prediction.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! Comment batches are classified in a single model call and the results come
//! back as two sequences index-aligned with the input:
//!
//! ```rust,no_run
//! # use tube_pipelines::sentiment::{ClassifierAssets, SentimentPipelineBuilder};
//! # use tube_pipelines::video::Comment;
//! # fn main() -> tube_pipelines::error::Result<()> {
//! # let pipeline = SentimentPipelineBuilder::embedding(ClassifierAssets::HfHub {
//! #     repo_id: "tube-intel/comment-sentiment".into(),
//! # })
//! # .build()?;
//! let comments: Vec<Comment> = vec![/* fetched upstream */];
//!
//! let output = pipeline.run(&comments)?;
//! for (comment, prediction) in comments.iter().zip(output.prediction.iter()) {
//!     println!("{}: {} ({:.2})", comment.author, prediction.sentiment, prediction.confidence);
//! }
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;
pub(crate) mod vocab;

// ============ Public API ============

pub use crate::models::{ClassifierAssets, EmbeddingClassifierModel};
pub use crate::pipelines::stats::PipelineStats;
pub use builder::SentimentPipelineBuilder;
pub use model::SentimentModel;
pub use pipeline::{
    BatchOutput, BatchPrediction, Prediction, Sentiment, SentimentPipeline, CLASS_COUNT,
};
pub use vocab::{EncodedSequence, Vocabulary, MAX_LEN};
