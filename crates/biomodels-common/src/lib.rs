//! biomodels-common: Shared error type and HTTP client policy used across all BioModels DAG crates.

pub mod error;
pub mod sandbox;

pub use error::{BioModelsError, Result};
pub use sandbox::SandboxClient;
