//! Gene Ontology identifier lookup.
//!
//! Resolves a GO identifier (e.g. `GO:0005737`) to its canonical term label
//! (`cytoplasm`) through the GO Solr service. Lookups are blocking and go
//! through the allowlisted [`SandboxClient`].
//!
//! Usage:
//! ```ignore
//! let lookup = CachedLookup::new(GolrClient::new(GOLR_SELECT_URL, Duration::from_secs(30))?);
//! let label = lookup.label_for(&GoId::parse("GO:0005737")?)?;  // Some("cytoplasm")
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use biomodels_common::error::{BioModelsError, Result};
use biomodels_common::sandbox::SandboxClient;
use regex::Regex;
use tracing::{debug, instrument, warn};

/// GO Solr select endpoint.
pub const GOLR_SELECT_URL: &str = "https://golr.geneontology.org/solr/select";

/// A well-formed GO identifier, `GO:` followed by seven digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoId(String);

impl GoId {
    /// Parse an annotation identifier into a GO id.
    ///
    /// Accepts `GO:0005737`, the percent-encoded `GO%3A0005737` and
    /// MIRIAM URNs such as `urn:miriam:obo.go:GO%3A0005737`. Identifiers from
    /// other ontologies (`FMA:20394`) are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let decoded = raw.trim().replace("%3A", ":").replace("%3a", ":");
        let candidate = match decoded.rfind("GO:") {
            Some(pos) => &decoded[pos..],
            None => decoded.as_str(),
        };
        if go_id_regex().is_match(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(BioModelsError::Lookup(format!("malformed GO identifier '{}'", raw)))
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn go_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^GO:\d{7}$").expect("valid GO id regex"))
}

// ── Lookup seam ───────────────────────────────────────────────────────────────

/// Resolves GO identifiers to canonical labels.
///
/// `Ok(None)` means the service has no term for the identifier. Callers treat
/// errors exactly like a miss.
pub trait OntologyLookup {
    fn label_for(&self, id: &GoId) -> Result<Option<String>>;
}

impl<L: OntologyLookup + ?Sized> OntologyLookup for &L {
    fn label_for(&self, id: &GoId) -> Result<Option<String>> {
        (**self).label_for(id)
    }
}

impl<L: OntologyLookup + ?Sized> OntologyLookup for Box<L> {
    fn label_for(&self, id: &GoId) -> Result<Option<String>> {
        (**self).label_for(id)
    }
}

/// Lookup that never resolves anything. Used when running offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl OntologyLookup for OfflineLookup {
    fn label_for(&self, _id: &GoId) -> Result<Option<String>> {
        Ok(None)
    }
}

/// In-memory table of id → label, for fixtures and pre-fetched term lists.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    labels: HashMap<GoId, String>,
}

impl StaticLookup {
    pub fn new() -> Self { Self::default() }

    /// Add an entry. Malformed identifiers are ignored.
    pub fn with(mut self, id: &str, label: &str) -> Self {
        if let Ok(id) = GoId::parse(id) {
            self.labels.insert(id, label.to_string());
        }
        self
    }
}

impl OntologyLookup for StaticLookup {
    fn label_for(&self, id: &GoId) -> Result<Option<String>> {
        Ok(self.labels.get(id).cloned())
    }
}

// ── GO Solr client ────────────────────────────────────────────────────────────

/// Blocking client for the GO Solr (GOlr) service.
pub struct GolrClient {
    client: SandboxClient,
    base_url: String,
}

impl GolrClient {
    /// Build a client for `base_url`. The endpoint's host is added to the
    /// sandbox allowlist.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut client = SandboxClient::with_timeout(timeout)?;
        let host = reqwest::Url::parse(base_url)
            .map_err(|e| BioModelsError::Config(format!("invalid ontology URL '{}': {}", base_url, e)))?
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| BioModelsError::Config(format!("ontology URL '{}' has no host", base_url)))?;
        client.allow_domain(&host);
        Ok(Self { client, base_url: base_url.to_string() })
    }
}

impl OntologyLookup for GolrClient {
    #[instrument(skip(self), fields(id = %id))]
    fn label_for(&self, id: &GoId) -> Result<Option<String>> {
        let params = [
            ("q", format!("annotation_class:\"{}\"", id)),
            ("fq", "document_category:\"ontology_class\"".to_string()),
            ("fl", "annotation_class,annotation_class_label".to_string()),
            ("rows", "1".to_string()),
            ("wt", "json".to_string()),
        ];

        let resp: serde_json::Value = self.client
            .get(&self.base_url)?
            .query(&params)
            .send()?
            .error_for_status()?
            .json()?;

        let label = label_from_response(&resp);
        debug!(?label, "GOlr lookup returned");
        Ok(label)
    }
}

/// Extract `response.docs[0].annotation_class_label` from a GOlr response.
pub fn label_from_response(resp: &serde_json::Value) -> Option<String> {
    resp["response"]["docs"][0]["annotation_class_label"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

// ── Caching ───────────────────────────────────────────────────────────────────

/// Memoises another lookup per identifier.
///
/// Both hits and misses are cached. A failed call is logged and cached as a
/// miss, so one corpus run never asks the service about the same id twice.
pub struct CachedLookup<L> {
    inner: L,
    cache: RefCell<HashMap<GoId, Option<String>>>,
}

impl<L: OntologyLookup> CachedLookup<L> {
    pub fn new(inner: L) -> Self {
        Self { inner, cache: RefCell::new(HashMap::new()) }
    }

    /// Number of identifiers looked up so far.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<L: OntologyLookup> OntologyLookup for CachedLookup<L> {
    fn label_for(&self, id: &GoId) -> Result<Option<String>> {
        if let Some(hit) = self.cache.borrow().get(id) {
            return Ok(hit.clone());
        }
        let label = match self.inner.label_for(id) {
            Ok(label) => label,
            Err(e) => {
                warn!("GO lookup for {} failed: {}", id, e);
                None
            }
        };
        self.cache.borrow_mut().insert(id.clone(), label.clone());
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parse_plain_and_encoded_ids() {
        assert_eq!(GoId::parse("GO:0005737").unwrap().as_str(), "GO:0005737");
        assert_eq!(GoId::parse("GO%3A0005634").unwrap().as_str(), "GO:0005634");
        assert_eq!(
            GoId::parse("urn:miriam:obo.go:GO%3A0005829").unwrap().as_str(),
            "GO:0005829"
        );
    }

    #[test]
    fn test_parse_rejects_other_ontologies() {
        assert!(GoId::parse("FMA:20394").is_err());
        assert!(GoId::parse("GO:123").is_err());
        assert!(GoId::parse("").is_err());
    }

    #[test]
    fn test_label_from_golr_response() {
        let resp = serde_json::json!({
            "response": {
                "numFound": 1,
                "docs": [{"annotation_class": "GO:0005737", "annotation_class_label": "cytoplasm"}]
            }
        });
        assert_eq!(label_from_response(&resp).as_deref(), Some("cytoplasm"));
    }

    #[test]
    fn test_label_from_empty_response() {
        let resp = serde_json::json!({"response": {"numFound": 0, "docs": []}});
        assert_eq!(label_from_response(&resp), None);
        assert_eq!(label_from_response(&serde_json::json!({})), None);
    }

    struct CountingLookup {
        calls: Cell<usize>,
        fail: bool,
    }

    impl OntologyLookup for CountingLookup {
        fn label_for(&self, _id: &GoId) -> Result<Option<String>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(BioModelsError::Lookup("service unavailable".to_string()))
            } else {
                Ok(Some("nucleus".to_string()))
            }
        }
    }

    #[test]
    fn test_cached_lookup_calls_inner_once() {
        let cached = CachedLookup::new(CountingLookup { calls: Cell::new(0), fail: false });
        let id = GoId::parse("GO:0005634").unwrap();
        assert_eq!(cached.label_for(&id).unwrap().as_deref(), Some("nucleus"));
        assert_eq!(cached.label_for(&id).unwrap().as_deref(), Some("nucleus"));
        assert_eq!(cached.inner.calls.get(), 1);
        assert_eq!(cached.cached_len(), 1);
    }

    #[test]
    fn test_cached_lookup_turns_failures_into_misses() {
        let cached = CachedLookup::new(CountingLookup { calls: Cell::new(0), fail: true });
        let id = GoId::parse("GO:0005634").unwrap();
        assert_eq!(cached.label_for(&id).unwrap(), None);
        assert_eq!(cached.label_for(&id).unwrap(), None);
        assert_eq!(cached.inner.calls.get(), 1);
    }

    #[test]
    fn test_static_lookup() {
        let lookup = StaticLookup::new().with("GO:0005737", "cytoplasm").with("bogus", "x");
        let id = GoId::parse("GO:0005737").unwrap();
        assert_eq!(lookup.label_for(&id).unwrap().as_deref(), Some("cytoplasm"));
        assert_eq!(OfflineLookup.label_for(&id).unwrap(), None);
    }

    #[test]
    #[ignore] // Requires network access
    fn test_golr_live_lookup() {
        let client = GolrClient::new(GOLR_SELECT_URL, Duration::from_secs(30)).unwrap();
        let label = client.label_for(&GoId::parse("GO:0005737").unwrap()).unwrap();
        assert_eq!(label.as_deref(), Some("cytoplasm"));
    }
}
