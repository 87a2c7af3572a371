//! Configuration loading for the BioModels DAG builder.
//! Reads biomodels.toml from the current directory or path in BIOMODELS_CONFIG env var.

use std::path::{Path, PathBuf};
use std::time::Duration;

use biomodels_ingestion::extract::Policy;
use biomodels_ingestion::normalise::ResolverConfig;
use biomodels_ingestion::paths::DEFAULT_CURATED_DIR;
use biomodels_ingestion::pipeline::PipelineJob;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "BIOMODELS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "biomodels.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub ontology: OntologyConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_curated_dir")]
    pub curated_dir: PathBuf,
}

fn default_curated_dir() -> PathBuf { PathBuf::from(DEFAULT_CURATED_DIR) }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { curated_dir: default_curated_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_golr_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true()         -> bool   { true }
fn default_golr_url()     -> String { biomodels_ingestion::normalise::go::GOLR_SELECT_URL.to_string() }
fn default_timeout_secs() -> u64    { 30 }

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_golr_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OntologyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_policies")]
    pub policies: Vec<Policy>,
    #[serde(default = "default_true")]
    pub skip_single_compartment_models: bool,
}

fn default_policies() -> Vec<Policy> { Policy::ALL.to_vec() }

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            policies: default_policies(),
            skip_single_compartment_models: default_true(),
        }
    }
}

/// Where the config was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the path; built-in defaults are used.
    Defaults(PathBuf),
}

impl Config {
    /// Load configuration from biomodels.toml.
    /// Checks BIOMODELS_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<(Self, ConfigSource)> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<(Self, ConfigSource)> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Pipeline parameters for this configuration.
    pub fn job(&self) -> PipelineJob {
        PipelineJob {
            curated_dir: self.corpus.curated_dir.clone(),
            policies: self.extraction.policies.clone(),
            skip_single_compartment_models: self.extraction.skip_single_compartment_models,
            resolver: self.resolver,
        }
    }
}
