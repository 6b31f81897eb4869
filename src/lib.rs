pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod storage;

pub use handlers::{configure, cors, AppState};
pub use models::Prompt;
pub use storage::{JsonFileStore, PromptStore};
