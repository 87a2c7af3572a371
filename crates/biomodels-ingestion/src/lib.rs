//! biomodels-ingestion: SBML model ingestion.
//! - Curated model discovery
//! - SBML annotation reading
//! - GO compartment normalisation (identifier lookup, fuzzy matching)
//! - Relationship extraction policies
//! - End-to-end pipeline into a relation graph

pub mod date;
pub mod extract;
pub mod normalise;
pub mod paths;
pub mod pipeline;
pub mod sbml;
