//! Model → compartment membership (`isPartOf`).

use biomodels_kg::{Color, Descriptor, Relation, RelationTuple};

use crate::extract::model_descriptor;
use crate::normalise::NameResolver;
use crate::sbml::SbmlDocument;

/// One tuple per declared compartment. With `skip_single_compartment_models`
/// a model with fewer than two compartments yields nothing.
///
/// The compartment node name is the resolved canonical name, lower-cased.
pub fn compartment_tuples<'a>(
    doc: &'a SbmlDocument,
    resolver: &'a NameResolver<'a>,
    skip_single_compartment_models: bool,
) -> impl Iterator<Item = RelationTuple> + 'a {
    let take = if skip_single_compartment_models && !doc.is_multi_compartment() {
        0
    } else {
        doc.compartments.len()
    };

    doc.compartments.iter().take(take).map(move |compartment| {
        let mut child = Descriptor::named(resolver.resolve(compartment).to_lowercase())
            .with("color", Color::Yellow);
        if let Some(id) = compartment.identifier() {
            child.insert("identifier", id);
        }
        RelationTuple::new(model_descriptor(doc), Relation::IsPartOf, child)
    })
}
