//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use makerset_data::{FetchClient, MakerSetApi};
use makerset_store::FileStore;
use serde::de::DeserializeOwned;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the loaded config file, if any. Relative paths in the
    /// config resolve against it.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let found = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };
        let (config, config_dir) = match found {
            Some(path) => {
                let config = CliConfig::load(&path)?;
                (config, path.parent().map(Path::to_path_buf))
            }
            None => (CliConfig::default(), None),
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// Backend API client built from `[api]`.
    pub fn api(&self) -> MakerSetApi {
        let api = &self.config.api;
        let mut client = FetchClient::new(api.base_url.clone(), api.fetch_policy());
        if let Some(token) = &api.token {
            client = client.with_token(token.clone());
        }
        MakerSetApi::new(client)
    }

    /// Local key-value store under `[storage] dir`.
    pub fn store(&self) -> Result<FileStore> {
        let base = self.config_dir.as_deref().unwrap_or(&self.cwd);
        let dir = resolve(base, &self.config.storage.dir);
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open local storage at {}", dir.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Read a text file given on the command line.
    pub fn read_text(&self, path: &str) -> Result<String> {
        let path = self.resolve_path(path);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Read and decode a JSON file given on the command line.
    pub fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let content = self.read_text(path)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {path}"))
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Find a config file in the directory tree, nearest first.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}
