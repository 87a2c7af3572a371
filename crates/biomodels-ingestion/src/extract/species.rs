//! Species → model containment (`isContainedIn`).

use biomodels_kg::{Color, Descriptor, Relation, RelationTuple};

use crate::extract::model_descriptor;
use crate::sbml::SbmlDocument;

/// One tuple per declared species. The species node carries every annotation
/// resource of the species as a `", "`-joined `identifiers` attribute.
pub fn species_tuples(doc: &SbmlDocument) -> impl Iterator<Item = RelationTuple> + '_ {
    doc.species.iter().map(move |species| {
        let child = Descriptor::named(species.display_name())
            .with("identifiers", species.resources.join(", "))
            .with("color", Color::Blue);
        RelationTuple::new(child, Relation::IsContainedIn, model_descriptor(doc))
    })
}
