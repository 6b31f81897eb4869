use crate::storage::JsonFileStore;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to run the server on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Directory holding prompts.json (defaults to ~/.prompt_storage)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Directory with the built front-end served at `/`
    #[arg(long, default_value = "build")]
    pub static_dir: PathBuf,
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let storage_dir = match cli.storage_dir {
            Some(dir) => dir,
            None => JsonFileStore::default_dir()?,
        };
        Ok(Self {
            host: cli.host,
            port: cli.port,
            storage_dir,
            static_dir: cli.static_dir,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
