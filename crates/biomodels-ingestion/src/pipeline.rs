//! End-to-end pipeline.
//!
//! Orchestrates one run over a curated model directory:
//!   1. Enumerate model files
//!   2. Parse each SBML model (unparsable models are logged and skipped)
//!   3. Build the GO reference set (only when compartments are extracted)
//!   4. Run every enabled extraction policy on every model
//!   5. Fold all tuples into one relation graph

use std::path::PathBuf;
use std::time::Instant;

use biomodels_common::error::Result;
use biomodels_kg::RelationGraph;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::extract::{extract, ExtractionContext, Policy};
use crate::normalise::{go_compartment_names_from_docs, NameResolver, OntologyLookup, ResolverConfig};
use crate::paths::{model_paths, DEFAULT_CURATED_DIR};
use crate::sbml::SbmlDocument;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineJob {
    pub curated_dir: PathBuf,
    pub policies: Vec<Policy>,
    pub skip_single_compartment_models: bool,
    pub resolver: ResolverConfig,
}

impl Default for PipelineJob {
    fn default() -> Self {
        Self {
            curated_dir: PathBuf::from(DEFAULT_CURATED_DIR),
            policies: Policy::ALL.to_vec(),
            skip_single_compartment_models: true,
            resolver: ResolverConfig::default(),
        }
    }
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct PipelineResult {
    pub graph: RelationGraph,
    pub models_found: usize,
    pub models_parsed: usize,
    pub reference_names: usize,
    pub tuples_folded: usize,
    /// One entry per skipped model.
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Run the pipeline for `job`, resolving GO identifiers through `lookup`.
///
/// Unreadable models are recorded in `errors` and skipped. A tuple without a
/// node name aborts the run.
#[instrument(skip_all, fields(dir = %job.curated_dir.display()))]
pub fn run_pipeline(job: &PipelineJob, lookup: &dyn OntologyLookup) -> Result<PipelineResult> {
    let started = Instant::now();
    let mut errors = Vec::new();

    let paths: Vec<PathBuf> = model_paths(&job.curated_dir)?.collect();
    info!("Found {} curated models", paths.len());

    let mut docs = Vec::with_capacity(paths.len());
    for path in &paths {
        match SbmlDocument::from_path(path) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    let reference = if job.policies.contains(&Policy::Compartments) {
        go_compartment_names_from_docs(&docs, lookup)
    } else {
        Default::default()
    };
    info!("GO reference set: {} names", reference.len());

    let ctx = ExtractionContext {
        resolver: NameResolver::new(lookup, &reference, job.resolver),
        skip_single_compartment_models: job.skip_single_compartment_models,
    };

    let mut graph = RelationGraph::new();
    for doc in &docs {
        for &policy in &job.policies {
            graph.extend_from(extract(policy, doc, &ctx))?;
        }
    }

    let result = PipelineResult {
        models_found: paths.len(),
        models_parsed: docs.len(),
        reference_names: reference.len(),
        tuples_folded: graph.tuples_folded(),
        errors,
        duration_ms: started.elapsed().as_millis() as u64,
        graph,
    };
    info!(
        models = result.models_parsed,
        tuples = result.tuples_folded,
        nodes = result.graph.node_count(),
        edges = result.graph.edge_count(),
        skipped = result.errors.len(),
        "Pipeline finished in {}ms",
        result.duration_ms
    );
    Ok(result)
}
