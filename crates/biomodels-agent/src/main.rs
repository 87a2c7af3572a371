//! biomodels-dag: builds the relationship graph of a curated BioModels corpus.
//! Entry point for the pipeline binary.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use biomodels_ingestion::extract::Policy;
use biomodels_ingestion::normalise::{CachedLookup, GolrClient, OfflineLookup, OntologyLookup};
use biomodels_ingestion::pipeline::{run_pipeline, PipelineJob};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigSource};

#[derive(Parser, Debug)]
#[command(name = "biomodels-dag")]
#[command(about = "Build a relationship graph from curated SBML models", long_about = None)]
struct Cli {
    /// Curated model directory (overrides corpus.curated_dir)
    #[arg(long, env = "BIOMODELS_CURATED_DIR")]
    curated: Option<PathBuf>,

    /// Extraction policy to run; repeat for several (overrides extraction.policies)
    #[arg(long = "policy", value_name = "NAME")]
    policies: Vec<Policy>,

    /// Skip GO label lookups; compartments resolve by fuzzy match or verbatim
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn apply(&self, job: &mut PipelineJob) {
        if let Some(ref dir) = self.curated {
            job.curated_dir = dir.clone();
        }
        if !self.policies.is_empty() {
            job.policies = self.policies.clone();
        }
    }
}

fn build_lookup(config: &Config, offline: bool) -> Box<dyn OntologyLookup> {
    if offline || !config.ontology.enabled {
        info!("GO lookups disabled; running offline");
        return Box::new(OfflineLookup);
    }

    match GolrClient::new(&config.ontology.base_url, config.ontology.timeout()) {
        Ok(client) => {
            info!("GO lookups via {}", config.ontology.base_url);
            Box::new(CachedLookup::new(client))
        }
        Err(e) => {
            warn!("Could not build GOlr client ({e}); running offline");
            Box::new(OfflineLookup)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("biomodels=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    info!("biomodels-dag {}", env!("CARGO_PKG_VERSION"));

    let (config, source) = Config::load().context("Failed to load configuration")?;
    match source {
        ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigSource::Defaults(path) => {
            warn!("{} not found; using built-in defaults", path.display());
        }
    }

    let mut job = config.job();
    cli.apply(&mut job);
    info!(
        "Curated dir: {}, policies: [{}]",
        job.curated_dir.display(),
        job.policies.iter().map(Policy::as_str).collect::<Vec<_>>().join(", ")
    );

    let lookup = build_lookup(&config, cli.offline);
    let result = run_pipeline(&job, lookup.as_ref())
        .with_context(|| format!("Pipeline failed for {}", job.curated_dir.display()))?;

    let graph = &result.graph;
    info!(
        "Graph built: {} nodes, {} edges from {} of {} models",
        graph.node_count(),
        graph.edge_count(),
        result.models_parsed,
        result.models_found
    );
    for (color, count) in graph.nodes_by_color() {
        info!("  nodes[{color}] = {count}");
    }
    for (label, count) in graph.edges_by_label() {
        info!("  edges[{label}] = {count}");
    }
    for error in &result.errors {
        warn!("  skipped: {error}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_job() {
        let cli = Cli::try_parse_from([
            "biomodels-dag", "--curated", "/tmp/models", "--policy", "species", "--policy", "derivation",
        ])
        .unwrap();
        let mut job = PipelineJob::default();
        cli.apply(&mut job);
        assert_eq!(job.curated_dir, PathBuf::from("/tmp/models"));
        assert_eq!(job.policies, vec![Policy::Species, Policy::Derivation]);
    }

    #[test]
    fn test_cli_without_flags_keeps_config() {
        let cli = Cli::try_parse_from(["biomodels-dag", "--offline"]).unwrap();
        assert!(cli.offline);
        let mut job = Config::default().job();
        cli.apply(&mut job);
        assert_eq!(job.policies, Policy::ALL.to_vec());
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["biomodels-dag", "--policy", "reactions"]).is_err());
    }

    #[test]
    fn test_offline_lookup_selected() {
        let lookup = build_lookup(&Config::default(), true);
        let id = biomodels_ingestion::normalise::GoId::parse("GO:0005737").unwrap();
        assert_eq!(lookup.label_for(&id).unwrap(), None);
    }
}
