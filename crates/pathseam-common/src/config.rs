//! Configuration loading for Pathseam.
//! Reads pathseam.toml from the current directory or the path in the
//! PATHSEAM_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PathseamError, Result};

pub const CONFIG_ENV_VAR: &str = "PATHSEAM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "pathseam.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathseamConfig {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub kegg: KeggConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Query ─────────────────────────────────────────────────────────────────────

/// The two query genes and the KEGG organism code they are looked up in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_gene_a")]
    pub gene_a: String,
    #[serde(default = "default_gene_z")]
    pub gene_z: String,
    #[serde(default = "default_organism")]
    pub organism: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            gene_a: default_gene_a(),
            gene_z: default_gene_z(),
            organism: default_organism(),
        }
    }
}

fn default_gene_a()   -> String { "hmgcr".to_string() }
fn default_gene_z()   -> String { "ace".to_string() }
fn default_organism() -> String { "dme".to_string() }

// ── KEGG ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeggConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl KeggConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for KeggConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url()     -> String { "https://rest.kegg.jp".to_string() }
fn default_timeout_secs() -> u64    { 30 }

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Skip (and record) pathways whose KGML cannot be fetched instead of
    /// aborting the whole aggregation.
    #[serde(default)]
    pub isolate_pathway_failures: bool,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

fn default_output_dir() -> PathBuf { PathBuf::from("outputs") }

impl PathseamConfig {
    /// Load configuration from pathseam.toml.
    ///
    /// Checks PATHSEAM_CONFIG first, then the current directory. A missing
    /// file is not an error: the built-in defaults are returned instead.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        if !Path::new(&path).exists() {
            tracing::warn!("Config file not found: {path}; using built-in defaults");
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PathseamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let q = &self.query;
        if q.gene_a.trim().is_empty() || q.gene_z.trim().is_empty() {
            return Err(PathseamError::Config("query genes must not be empty".into()));
        }
        if q.organism.trim().is_empty() {
            return Err(PathseamError::Config("query organism must not be empty".into()));
        }
        if self.kegg.timeout_secs == 0 {
            return Err(PathseamError::Config("kegg.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
