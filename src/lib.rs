//! Comment-intelligence pipelines for YouTube video dashboards.
//!
//! Powered by [Candle](https://github.com/huggingface/candle). Classifies
//! comment sentiment with a pretrained text-classification model and computes
//! the aggregate statistics and keyword rankings a dashboard renders on top.
//! Fetching video data and drawing charts stay outside this crate; their
//! boundaries live in [`video`].

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod analysis;
pub mod error;
pub mod text;
pub mod video;

pub use pipelines::sentiment;
