use super::model::SentimentModel;
use super::pipeline::SentimentPipeline;
use crate::error::Result;
use crate::models::{ClassifierAssets, EmbeddingClassifierModel};
use crate::pipelines::cache::{global_cache, ModelOptions};
use crate::pipelines::utils::{build_cache_key, DeviceRequest};

/// Builder for creating [`SentimentPipeline`] instances.
///
/// Use [`Self::embedding`] as the entry point.
///
/// # Examples
///
/// ```rust,no_run
/// # use std::path::PathBuf;
/// # use tube_pipelines::sentiment::{ClassifierAssets, SentimentPipelineBuilder};
/// # fn main() -> tube_pipelines::error::Result<()> {
/// let pipeline =
///     SentimentPipelineBuilder::embedding(ClassifierAssets::LocalDir(PathBuf::from("assets")))
///         .cuda(0)
///         .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipelineBuilder<M: SentimentModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: SentimentModel> SentimentPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Cpu,
        }
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Builds the pipeline with the configured settings.
    ///
    /// The model is loaded through the process-wide cache, so pipelines built
    /// from the same assets on the same device share one model instance.
    ///
    /// # Errors
    ///
    /// Returns an error if device initialization, model loading, or
    /// vocabulary loading fails.
    pub fn build(self) -> Result<SentimentPipeline<M>>
    where
        M: Send + Sync + 'static,
        M::Options: ModelOptions,
    {
        let device = self.device_request.resolve()?;
        let key = build_cache_key(&self.options, &device);

        let options = self.options.clone();
        let model = global_cache().get_or_create(&key, move || M::new(options, device))?;

        let vocabulary = M::load_vocabulary(self.options)?;

        SentimentPipeline::with_parts(model, vocabulary)
    }
}

impl SentimentPipelineBuilder<EmbeddingClassifierModel> {
    /// Creates a builder for the bundled pooled-embedding classifier.
    pub fn embedding(assets: ClassifierAssets) -> Self {
        Self::new(assets)
    }
}
