//! Compartment name canonicalisation.
//!
//! Resolution order:
//!   1. GO identifier annotation → label from the ontology lookup
//!   2. Declared name (or id), lower-cased → closest reference GO name
//!   3. Declared name (or id), verbatim
//!
//! Every failure in steps 1 and 2 falls through to the next step; resolution
//! itself never fails.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalise::go::{GoId, OntologyLookup};
use crate::normalise::similarity::{closest_match, SimilarityMetric, DEFAULT_CUTOFF};
use crate::sbml::SbmlCompartment;

/// Fuzzy-matching settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub metric: SimilarityMetric,
    #[serde(default = "default_cutoff")]
    pub similarity_cutoff: f64,
}

fn default_cutoff() -> f64 { DEFAULT_CUTOFF }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            metric: SimilarityMetric::default(),
            similarity_cutoff: default_cutoff(),
        }
    }
}

/// Which step produced a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Ontology,
    FuzzyMatch,
    Verbatim,
}

/// Resolves compartment tags against a lookup service and a reference set.
pub struct NameResolver<'a> {
    lookup: &'a dyn OntologyLookup,
    reference_names: &'a BTreeSet<String>,
    config: ResolverConfig,
}

impl<'a> NameResolver<'a> {
    pub fn new(
        lookup: &'a dyn OntologyLookup,
        reference_names: &'a BTreeSet<String>,
        config: ResolverConfig,
    ) -> Self {
        Self { lookup, reference_names, config }
    }

    /// Canonical name for `compartment`.
    pub fn resolve(&self, compartment: &SbmlCompartment) -> String {
        self.resolve_with_source(compartment).0
    }

    /// Canonical name plus the step that produced it.
    pub fn resolve_with_source(&self, compartment: &SbmlCompartment) -> (String, Resolution) {
        if let Some(label) = self.ontology_label(compartment) {
            return (label, Resolution::Ontology);
        }

        let raw = compartment.display_name();
        let lowered = raw.to_lowercase();
        if let Some(matched) = closest_match(
            &lowered,
            self.reference_names,
            self.config.metric,
            self.config.similarity_cutoff,
        ) {
            debug!(raw, matched, "Compartment fuzzy-matched to GO name");
            return (matched.to_string(), Resolution::FuzzyMatch);
        }

        (raw.to_string(), Resolution::Verbatim)
    }

    fn ontology_label(&self, compartment: &SbmlCompartment) -> Option<String> {
        let raw_id = compartment.identifier()?;
        let id = match GoId::parse(raw_id) {
            Ok(id) => id,
            Err(e) => {
                debug!(compartment = %compartment.id, "{}", e);
                return None;
            }
        };
        match self.lookup.label_for(&id) {
            Ok(label) => label,
            Err(e) => {
                debug!(compartment = %compartment.id, "GO lookup failed, falling back: {}", e);
                None
            }
        }
    }
}

/// One-shot resolution of `compartment` against `reference_names`.
pub fn resolve_name(
    compartment: &SbmlCompartment,
    reference_names: &BTreeSet<String>,
    lookup: &dyn OntologyLookup,
    config: ResolverConfig,
) -> String {
    NameResolver::new(lookup, reference_names, config).resolve(compartment)
}
