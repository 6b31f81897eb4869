use crate::models::prompt::Prompt;
use anyhow::Result;
use async_trait::async_trait;

pub mod filesystem;

pub use filesystem::JsonFileStore;

/// Trait defining the interface for prompt storage backends.
///
/// Backends hold the whole collection as one unit: every call reads or
/// rewrites all of it, and nothing is cached between calls.
#[async_trait]
pub trait PromptStore: Send + Sync + 'static { // Send + Sync for Arc<dyn T>
    /// Loads the full collection in stored order.
    async fn load(&self) -> Result<Vec<Prompt>>;

    /// Replaces the stored collection with `prompts`.
    async fn save(&self, prompts: &[Prompt]) -> Result<()>;
}
