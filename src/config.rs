use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::catalog::PoolTarget;

#[derive(Debug, Clone, Deserialize)]
pub struct HttpCfg {
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputCfg {
    pub json_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub http: Option<HttpCfg>,
    pub output: Option<OutputCfg>,
    /// Replaces the built-in benchmark list when non-empty.
    #[serde(default)]
    pub pools: Vec<PoolTarget>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse Config.toml")?;
        Ok(cfg)
    }
}
