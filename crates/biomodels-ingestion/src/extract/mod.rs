//! Relationship extraction policies.
//!
//! Each policy reads one [`SbmlDocument`] and lazily yields
//! `(child, label, parent)` tuples for the graph builder. The iterators are
//! single-pass; re-run the policy on the document to regenerate them.

pub mod compartments;
pub mod derivation;
pub mod species;

use std::fmt;
use std::str::FromStr;

use biomodels_kg::{Color, Descriptor, RelationTuple};
use serde::{Deserialize, Serialize};

use crate::date::format_date;
use crate::normalise::NameResolver;
use crate::sbml::SbmlDocument;

pub use compartments::compartment_tuples;
pub use derivation::{derivation_tuples, split_reference};
pub use species::species_tuples;

/// Provider of every curated model.
pub const BIOMODELS_PROVIDER: &str = "biomodels.db";
/// Prefix of model and reference URIs.
pub const IDENTIFIERS_ORG: &str = "http://identifiers.org/";

/// Which relationships to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Model → compartment (`isPartOf`)
    Compartments,
    /// Model → parent model or publication (`isDerivedFrom`)
    Derivation,
    /// Species → model (`isContainedIn`)
    Species,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Compartments, Policy::Derivation, Policy::Species];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Compartments => "compartments",
            Policy::Derivation   => "derivation",
            Policy::Species      => "species",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compartments" | "compartment" => Ok(Policy::Compartments),
            "derivation" | "derived"       => Ok(Policy::Derivation),
            "species"                      => Ok(Policy::Species),
            other => Err(format!("unknown extraction policy '{}'", other)),
        }
    }
}

/// Reference data shared by all policies for one run.
pub struct ExtractionContext<'a> {
    pub resolver: NameResolver<'a>,
    /// Compartment policy skips models with fewer than two compartments.
    pub skip_single_compartment_models: bool,
}

/// Run `policy` over `doc`.
pub fn extract<'a>(
    policy: Policy,
    doc: &'a SbmlDocument,
    ctx: &'a ExtractionContext<'a>,
) -> Box<dyn Iterator<Item = RelationTuple> + 'a> {
    match policy {
        Policy::Compartments => Box::new(compartment_tuples(
            doc,
            &ctx.resolver,
            ctx.skip_single_compartment_models,
        )),
        Policy::Derivation => Box::new(derivation_tuples(doc)),
        Policy::Species    => Box::new(species_tuples(doc)),
    }
}

/// `http://identifiers.org/biomodels.db/<name>`.
pub fn model_uri(model_name: &str) -> String {
    format!("{}{}/{}", IDENTIFIERS_ORG, BIOMODELS_PROVIDER, model_name)
}

/// Descriptor of the curated model itself: provider, URI, creation date, green.
pub fn model_descriptor(doc: &SbmlDocument) -> Descriptor {
    let mut d = Descriptor::named(doc.model_name.as_str())
        .with("provider", BIOMODELS_PROVIDER)
        .with("URI", model_uri(&doc.model_name));
    if let Some(created) = doc.created {
        d.insert("created", format_date(created));
    }
    d.with("color", Color::Green)
}
