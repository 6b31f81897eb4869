use crate::models::prompt::Prompt;
use crate::storage::PromptStore;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

pub const STORAGE_DIR_NAME: &str = ".prompt_storage";
pub const STORAGE_FILE_NAME: &str = "prompts.json";

/// Keeps the whole collection as a single pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file: PathBuf,
}

impl JsonFileStore {
    /// Creates the store, making `dir` (and its parents) if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create prompt directory '{}'", dir.display()))?;
        Ok(Self {
            file: dir.join(STORAGE_FILE_NAME),
        })
    }

    /// `~/.prompt_storage`
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home.join(STORAGE_DIR_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.file
    }
}

#[async_trait]
impl PromptStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Prompt>> {
        let contents = match fs::read(&self.file).await {
            Ok(contents) => contents,
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.file.display(), "Prompt file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read prompt file: {}", self.file.display()))
            }
        };

        match serde_json::from_slice::<Vec<Prompt>>(&contents) {
            Ok(prompts) => Ok(prompts),
            Err(e) => {
                // Unreadable contents are treated as no data; the next save overwrites them.
                warn!(path = %self.file.display(), error = %e, "Prompt file is not a JSON list of objects, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, prompts: &[Prompt]) -> Result<()> {
        let mut contents = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut contents, PrettyFormatter::with_indent(b"    "));
        prompts
            .serialize(&mut serializer)
            .context("Failed to serialize prompts")?;

        fs::write(&self.file, contents)
            .await
            .with_context(|| format!("Failed to write prompt file: {}", self.file.display()))?;
        debug!(path = %self.file.display(), count = prompts.len(), "Saved prompts");
        Ok(())
    }
}
