//! Reference set of canonical GO compartment names.
//!
//! Built from a corpus of curated models: every GO-annotated compartment of
//! every multi-compartment model is resolved through the ontology lookup and
//! its label collected. Single-compartment models do not contribute.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use crate::normalise::go::{GoId, OntologyLookup};
use crate::sbml::SbmlDocument;

/// Collect GO labels from already parsed documents.
pub fn go_compartment_names_from_docs<'a, I>(docs: I, lookup: &dyn OntologyLookup) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a SbmlDocument>,
{
    let mut names = BTreeSet::new();
    for doc in docs {
        if !doc.is_multi_compartment() {
            continue;
        }
        for compartment in &doc.compartments {
            let Some(id) = compartment.identifier().and_then(|raw| GoId::parse(raw).ok()) else {
                continue;
            };
            match lookup.label_for(&id) {
                Ok(Some(label)) => { names.insert(label); }
                Ok(None) => {}
                Err(e) => warn!("GO lookup for {} failed: {}", id, e),
            }
        }
    }
    names
}

/// Read every model at `paths` and collect their GO compartment labels.
/// Unreadable or unparsable models are logged and skipped.
pub fn go_compartment_names<P, I>(paths: I, lookup: &dyn OntologyLookup) -> BTreeSet<String>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = P>,
{
    let mut docs = Vec::new();
    for path in paths {
        match SbmlDocument::from_path(path.as_ref()) {
            Ok(doc) => docs.push(doc),
            Err(e) => warn!("Skipping {} for GO reference set: {}", path.as_ref().display(), e),
        }
    }
    let names = go_compartment_names_from_docs(&docs, lookup);
    info!("GO reference set built: {} names from {} models", names.len(), docs.len());
    names
}
