use reqwest::blocking::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;
use url::Url;
use crate::error::BioModelsError;

/// Default request timeout for ontology lookups.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A blocking HTTP client that only allows requests to approved domains.
/// Every outbound call made while resolving model annotations goes through here.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist of ontology services.
    pub fn new() -> Result<Self, BioModelsError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Same as [`SandboxClient::new`] with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BioModelsError> {
        let domains = [
            "golr.geneontology.org",     // GO Solr
            "golr-aux.geneontology.io",  // GO Solr mirror
            "www.ebi.ac.uk",             // QuickGO
            "identifiers.org",           // identifiers.org resolver
        ];
        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| BioModelsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else { return false };
        let Some(host) = parsed.host_str() else { return false };
        // Exact match or a subdomain of an allowed domain
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    /// Exposes the inner `reqwest` builder for GET requests on allowed hosts.
    pub fn get(&self, url: &str) -> Result<reqwest::blocking::RequestBuilder, BioModelsError> {
        if !self.is_allowed(url) {
            warn!("Blocked outbound request to {}", url);
            return Err(BioModelsError::SecurityError(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
