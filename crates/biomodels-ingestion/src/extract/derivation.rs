//! Model → parent derivation lineage (`isDerivedFrom`).

use biomodels_kg::{Color, Descriptor, Relation, RelationTuple};

use crate::extract::{model_descriptor, BIOMODELS_PROVIDER};
use crate::sbml::SbmlDocument;

const PUBMED_PROVIDER: &str = "pubmed";
const MIRIAM_URN: &str = "urn:miriam:";

/// One tuple per `bqmodel:isDerivedFrom` reference of the model.
pub fn derivation_tuples(doc: &SbmlDocument) -> impl Iterator<Item = RelationTuple> + '_ {
    doc.derived_from.iter().map(move |uri| {
        let (provider, name) = split_reference(uri);
        let mut parent = Descriptor::named(name)
            .with("provider", provider)
            .with("URI", uri.as_str());
        match provider {
            BIOMODELS_PROVIDER => parent.insert("color", Color::Green),
            PUBMED_PROVIDER    => parent.insert("color", Color::Red),
            _ => {}
        }
        RelationTuple::new(model_descriptor(doc), Relation::IsDerivedFrom, parent)
    })
}

/// Split a reference URI into `(provider, name)`.
///
/// - `http(s)://identifiers.org/pubmed/8983160` → `("pubmed", "8983160")`
/// - `urn:miriam:biomodels.db:BIOMD0000000010` → `("biomodels.db", "BIOMD0000000010")`
///
/// Anything else splits on `/`: first segment as provider, last as name.
pub fn split_reference(uri: &str) -> (&str, &str) {
    if let Some(rest) = uri.strip_prefix(MIRIAM_URN) {
        let provider = rest.split(':').next().unwrap_or(rest);
        let name = rest.rsplit(':').next().unwrap_or(rest);
        return (provider, name);
    }

    let path = uri.rsplit("identifiers.org/").next().unwrap_or(uri);
    let provider = path.split('/').next().unwrap_or(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    (provider, name)
}
