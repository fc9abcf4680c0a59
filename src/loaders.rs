use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{PipelineError, Result};

/// Fetches a single file from a Hugging Face model repo through the hub's
/// local cache. Classification assets are small, so the plain sync API is
/// enough here.
#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let api = hf_hub::api::sync::Api::new()?;
        let repo = api.model(self.repo.clone());

        debug!(repo = %self.repo, filename = %self.filename, "resolving hub asset");

        let max_retries = 3;
        let mut attempts = 0u32;

        for attempt in 0..max_retries {
            match repo.get(self.filename.as_str()) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    attempts = attempt + 1;
                    // Concurrent pipelines may race on the hub cache lock.
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        std::thread::sleep(Duration::from_millis(100 * (1 << attempt)));
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download failed for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, attempts
        )))
    }
}
