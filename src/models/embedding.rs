use std::path::PathBuf;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{Embedding, Linear, Module, VarBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::loaders::HfLoader;
use crate::pipelines::cache::ModelOptions;
use crate::pipelines::sentiment::model::SentimentModel;
use crate::pipelines::sentiment::vocab::{EncodedSequence, Vocabulary, MAX_LEN};
use crate::pipelines::sentiment::CLASS_COUNT;

/// Where a pretrained classifier artifact lives.
///
/// An artifact directory (or hub repo) holds `config.json`,
/// `model.safetensors`, and either a word-level `tokenizer.json` or the raw
/// `word_index.json` exported with the model.
#[derive(Debug, Clone)]
pub enum ClassifierAssets {
    /// A Hugging Face Hub model repo, e.g. `"tube-intel/comment-sentiment"`.
    HfHub {
        /// Repo id in `owner/name` form.
        repo_id: String,
    },
    /// A local directory holding the exported artifact files.
    LocalDir(PathBuf),
}

impl ClassifierAssets {
    fn locate(&self, filename: &str) -> Result<PathBuf> {
        match self {
            ClassifierAssets::HfHub { repo_id } => HfLoader::new(repo_id, filename).load(),
            ClassifierAssets::LocalDir(dir) => {
                let path = dir.join(filename);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(PipelineError::DependencyUnavailable(format!(
                        "Missing '{}' in '{}'",
                        filename,
                        dir.display()
                    )))
                }
            }
        }
    }

    fn locate_first(&self, filenames: &[&str]) -> Result<PathBuf> {
        for filename in filenames {
            if let Ok(path) = self.locate(filename) {
                return Ok(path);
            }
        }
        Err(PipelineError::DependencyUnavailable(format!(
            "None of [{}] found in {:?}",
            filenames.join(", "),
            self
        )))
    }
}

impl ModelOptions for ClassifierAssets {
    fn cache_key(&self) -> String {
        match self {
            ClassifierAssets::HfHub { repo_id } => format!("hf:{repo_id}"),
            ClassifierAssets::LocalDir(dir) => format!("dir:{}", dir.display()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClassifierConfig {
    vocab_size: usize,
    embedding_dim: usize,
    hidden_dim: usize,
    num_classes: usize,
    max_len: usize,
}

/// Pooled-embedding sentiment classifier loaded from an exported artifact.
///
/// Forward pass: embedding lookup, mean pooling over the sequence, one hidden
/// layer with ReLU, an output projection, softmax. The resulting rows are the
/// probability-like score vectors the pipeline reduces to `(class,
/// confidence)`.
#[derive(Clone)]
pub struct EmbeddingClassifierModel {
    embedding: Embedding,
    hidden: Linear,
    output: Linear,
    device: Device,
}

impl EmbeddingClassifierModel {
    fn load(assets: &ClassifierAssets, device: &Device) -> Result<Self> {
        let config_path = assets.locate("config.json")?;
        let config: ClassifierConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        if config.num_classes != CLASS_COUNT {
            return Err(PipelineError::DependencyUnavailable(format!(
                "Artifact scores {} classes, this pipeline expects {}",
                config.num_classes, CLASS_COUNT
            )));
        }
        if config.max_len != MAX_LEN {
            return Err(PipelineError::DependencyUnavailable(format!(
                "Artifact was trained with max_len {}, this pipeline encodes to {}",
                config.max_len, MAX_LEN
            )));
        }

        let weights_path = assets.locate("model.safetensors")?;
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let embedding =
            candle_nn::embedding(config.vocab_size, config.embedding_dim, vb.pp("embedding"))?;
        let hidden = candle_nn::linear(config.embedding_dim, config.hidden_dim, vb.pp("hidden"))?;
        let output = candle_nn::linear(config.hidden_dim, config.num_classes, vb.pp("classifier"))?;

        debug!(
            vocab_size = config.vocab_size,
            embedding_dim = config.embedding_dim,
            "loaded sentiment classifier weights"
        );

        Ok(Self {
            embedding,
            hidden,
            output,
            device: device.clone(),
        })
    }
}

impl SentimentModel for EmbeddingClassifierModel {
    type Options = ClassifierAssets;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        Self::load(&options, &device)
    }

    fn predict(&self, batch: &[EncodedSequence]) -> Result<Vec<Vec<f32>>> {
        if batch.is_empty() {
            return Ok(vec![]);
        }

        let mut flat = Vec::with_capacity(batch.len() * MAX_LEN);
        for sequence in batch {
            flat.extend_from_slice(sequence);
        }

        let ids = Tensor::from_vec(flat, (batch.len(), MAX_LEN), &self.device)?;
        let embedded = self.embedding.forward(&ids)?;
        let pooled = embedded.mean(1)?;
        let hidden = self.hidden.forward(&pooled)?.relu()?;
        let logits = self.output.forward(&hidden)?;
        let probs = softmax(&logits, D::Minus1)?;

        Ok(probs.to_vec2::<f32>()?)
    }

    fn load_vocabulary(options: Self::Options) -> Result<Vocabulary> {
        // tokenizer.json is the preferred export; word_index.json is the raw
        // training-time map kept for older artifacts.
        let path = options.locate_first(&["tokenizer.json", "word_index.json"])?;
        if path.file_name().is_some_and(|n| n == "tokenizer.json") {
            Vocabulary::from_tokenizer_file(&path)
        } else {
            Vocabulary::from_word_index_file(&path)
        }
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
