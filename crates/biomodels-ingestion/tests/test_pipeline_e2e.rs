//! End-to-end pipeline over a synthetic curated directory.
//!
//! Run with: cargo test --package biomodels-ingestion --test test_pipeline_e2e

use std::path::Path;

use biomodels_ingestion::extract::Policy;
use biomodels_ingestion::normalise::{
    go_compartment_names, CachedLookup, OfflineLookup, StaticLookup,
};
use biomodels_ingestion::paths::model_paths;
use biomodels_ingestion::pipeline::{run_pipeline, PipelineJob};
use biomodels_kg::{AttrValue, Relation};

fn model_xml(created: &str, compartments: &str, species: &str, derived: &str) -> String {
    format!(r##"<?xml version="1.0" encoding="UTF-8"?>
<sbml xmlns="http://www.sbml.org/sbml/level2/version4" level="2" version="4">
  <model id="model">
    <annotation>
      <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
               xmlns:dcterms="http://purl.org/dc/terms/"
               xmlns:bqmodel="http://biomodels.net/model-qualifiers/">
        <rdf:Description rdf:about="#model">
          <dcterms:created rdf:parseType="Resource">
            <dcterms:W3CDTF>{created}</dcterms:W3CDTF>
          </dcterms:created>
          <bqmodel:isDerivedFrom><rdf:Bag>{derived}</rdf:Bag></bqmodel:isDerivedFrom>
        </rdf:Description>
      </rdf:RDF>
    </annotation>
    <listOfCompartments>{compartments}</listOfCompartments>
    <listOfSpecies>{species}</listOfSpecies>
  </model>
</sbml>"##)
}

fn go_compartment(id: &str, name: &str, go: &str) -> String {
    format!(r##"<compartment id="{id}" name="{name}">
  <annotation><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about="#{id}"><bqbiol:is xmlns:bqbiol="http://biomodels.net/biology-qualifiers/">
      <rdf:Bag><rdf:li rdf:resource="http://identifiers.org/go/{go}"/></rdf:Bag>
    </bqbiol:is></rdf:Description>
  </rdf:RDF></annotation>
</compartment>"##)
}

fn species(id: &str, name: &str, resource: &str) -> String {
    format!(r##"<species id="{id}" name="{name}" compartment="c1">
  <annotation><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about="#{id}"><bqbiol:is xmlns:bqbiol="http://biomodels.net/biology-qualifiers/">
      <rdf:Bag><rdf:li rdf:resource="{resource}"/></rdf:Bag>
    </bqbiol:is></rdf:Description>
  </rdf:RDF></annotation>
</species>"##)
}

fn write_corpus(dir: &Path) {
    // Three GO-annotated compartments
    std::fs::write(
        dir.join("BIOMD0000000001.xml"),
        model_xml(
            "2005-02-02T14:56:11Z",
            &[
                go_compartment("c1", "Cytoplasm", "GO:0005737"),
                go_compartment("c2", "Nucleus", "GO:0005634"),
                go_compartment("c3", "Mitochondrion", "GO:0005739"),
            ].concat(),
            &species("s1", "ERK", "http://identifiers.org/uniprot/P28482"),
            r#"<rdf:li rdf:resource="http://identifiers.org/pubmed/8983160"/>"#,
        ),
    ).unwrap();

    // Free-text compartment names only; derived from model 1
    std::fs::write(
        dir.join("BIOMD0000000002.xml"),
        model_xml(
            "2006-03-04T10:00:00Z",
            r#"<compartment id="cyt" name="Cytosol"/><compartment id="mito" name="Mitochondria"/>"#,
            &species("s2", "ATP", "http://identifiers.org/chebi/CHEBI:15422"),
            r#"<rdf:li rdf:resource="http://identifiers.org/biomodels.db/BIOMD0000000001"/>"#,
        ),
    ).unwrap();

    // Single compartment: contributes nothing to the reference set or compartments
    std::fs::write(
        dir.join("BIOMD0000000003.xml"),
        model_xml(
            "2007-01-01T00:00:00Z",
            &go_compartment("c", "Golgi", "GO:0005794"),
            "",
            "",
        ),
    ).unwrap();

    // Unparsable
    std::fs::write(dir.join("broken.xml"), "<sbml><model></sbml>").unwrap();
}

fn lookup() -> StaticLookup {
    StaticLookup::new()
        .with("GO:0005737", "cytoplasm")
        .with("GO:0005634", "nucleus")
        .with("GO:0005739", "mitochondrion")
        .with("GO:0005794", "golgi apparatus")
}

#[test]
fn test_reference_set_from_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());

    let names = go_compartment_names(model_paths(dir.path()).unwrap(), &lookup());
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    // golgi apparatus only appears in a single-compartment model
    assert_eq!(names, vec!["cytoplasm", "mitochondrion", "nucleus"]);
}

#[test]
fn test_full_pipeline_builds_expected_graph() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());

    let lookup = CachedLookup::new(lookup());
    let job = PipelineJob { curated_dir: dir.path().to_path_buf(), ..Default::default() };
    let result = run_pipeline(&job, &lookup).unwrap();
    let g = &result.graph;

    assert_eq!(result.models_found, 4);
    assert_eq!(result.models_parsed, 3);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.reference_names, 3);

    // Compartments: model 1 via GO ids, model 2 via fuzzy match / verbatim
    assert_eq!(g.edge("BIOMD0000000001", "cytoplasm"), Some(&Relation::IsPartOf));
    assert_eq!(g.edge("BIOMD0000000001", "nucleus"), Some(&Relation::IsPartOf));
    assert_eq!(g.edge("BIOMD0000000001", "mitochondrion"), Some(&Relation::IsPartOf));
    assert_eq!(g.edge("BIOMD0000000002", "mitochondrion"), Some(&Relation::IsPartOf));
    assert_eq!(g.edge("BIOMD0000000002", "cytosol"), Some(&Relation::IsPartOf));
    assert!(g.edge("BIOMD0000000002", "cytoplasm").is_none());
    assert!(!g.contains_node("golgi apparatus"));

    // Derivation lineage
    assert_eq!(g.edge("BIOMD0000000001", "8983160"), Some(&Relation::IsDerivedFrom));
    assert_eq!(g.edge("BIOMD0000000002", "BIOMD0000000001"), Some(&Relation::IsDerivedFrom));
    assert_eq!(g.node("8983160").unwrap().color(), Some("red"));

    // Species containment
    assert_eq!(g.edge("ERK", "BIOMD0000000001"), Some(&Relation::IsContainedIn));
    assert_eq!(g.node("ATP").unwrap().color(), Some("blue"));

    // Model 1 is both a parent (from model 2) and a child; attributes merged
    let m1 = g.node("BIOMD0000000001").unwrap();
    assert_eq!(m1.color(), Some("green"));
    assert_eq!(m1.attributes.get("created").and_then(AttrValue::as_str), Some("2005-02-02"));
    assert_eq!(m1.attributes.get("provider").and_then(AttrValue::as_str), Some("biomodels.db"));

    let cytoplasm = g.node("cytoplasm").unwrap();
    assert_eq!(cytoplasm.color(), Some("yellow"));
    assert_eq!(cytoplasm.attributes.get("identifier").and_then(AttrValue::as_str), Some("GO:0005737"));

    // Every edge endpoint is a node
    for (child, parent, _) in g.edges() {
        assert!(g.contains_node(child) && g.contains_node(parent));
    }
    assert_eq!(result.tuples_folded, 9);
}

#[test]
fn test_pipeline_with_selected_policies_offline() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());

    let job = PipelineJob {
        curated_dir: dir.path().to_path_buf(),
        policies: vec![Policy::Derivation],
        ..Default::default()
    };
    let result = run_pipeline(&job, &OfflineLookup).unwrap();

    assert_eq!(result.reference_names, 0);
    assert_eq!(result.graph.edge_count(), 2);
    assert_eq!(result.graph.edges_by_label().get("isDerivedFrom"), Some(&2));
}

#[test]
fn test_pipeline_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let job = PipelineJob { curated_dir: dir.path().join("nope"), ..Default::default() };
    assert!(run_pipeline(&job, &OfflineLookup).is_err());
}
