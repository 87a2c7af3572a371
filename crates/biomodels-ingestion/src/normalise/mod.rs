//! Compartment normalisation.
//!
//! - `go`: GO identifier parsing and label lookup (GOlr, cached, offline)
//! - `similarity`: fuzzy string metrics for name matching
//! - `resolver`: the identifier → fuzzy → verbatim resolution chain
//! - `reference`: the corpus-wide set of canonical GO compartment names

pub mod go;
pub mod reference;
pub mod resolver;
pub mod similarity;

pub use go::{CachedLookup, GoId, GolrClient, OfflineLookup, OntologyLookup, StaticLookup};
pub use reference::{go_compartment_names, go_compartment_names_from_docs};
pub use resolver::{resolve_name, NameResolver, Resolution, ResolverConfig};
pub use similarity::SimilarityMetric;
