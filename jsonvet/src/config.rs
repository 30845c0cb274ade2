use std::path::Path;

use anyhow::{bail, Context};
use confique::Config as DeriveConfig;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "jsonvet.toml";

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// How many objects and lists may be open at once before a document is rejected. The
    /// top-level object counts as the first level.
    #[config(default = 512)]
    pub max_depth: usize,

    /// Print each input's token stream as JSON lines on stdout before validating it.
    #[config(default = false)]
    pub dump_tokens: bool,
}

impl Config {
    /// Load from `path` if given, which must then exist, or from [`DEFAULT_CONFIG_FILE`] if it
    /// happens to be present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let builder = match path {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file `{}` does not exist", path.display());
                }
                Config::builder().file(path)
            }
            None => Config::builder().file(DEFAULT_CONFIG_FILE),
        };

        let config: Self = builder.load().context("failed to load configuration")?;
        if config.max_depth == 0 {
            bail!("`max_depth` must be at least 1");
        }
        Ok(config)
    }
}
