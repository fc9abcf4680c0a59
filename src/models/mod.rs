// ============ Model implementations ============

pub(crate) mod embedding;

// Public model structs and asset options (for type annotations)
pub use embedding::{ClassifierAssets, EmbeddingClassifierModel};
