//! SBML annotation reader.
//!
//! Scans an SBML document once and keeps only what relationship extraction
//! needs: declared compartments and species with their RDF annotation
//! resources, `bqmodel:isDerivedFrom` references and the model creation date.
//! Element and attribute names are matched case-insensitively.

use std::path::Path;

use biomodels_common::error::{BioModelsError, Result};
use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, instrument};

use crate::date::parse_w3cdtf;

/// A declared compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct SbmlCompartment {
    pub id: String,
    pub name: Option<String>,
    /// `rdf:resource` of the first `rdf:li` in the compartment's annotation.
    pub resource: Option<String>,
}

impl SbmlCompartment {
    /// Declared name, or the id when no (non-empty) name is declared.
    pub fn display_name(&self) -> &str {
        non_empty_or(self.name.as_deref(), &self.id)
    }

    /// Last `/`-separated segment of the annotation resource.
    pub fn identifier(&self) -> Option<&str> {
        self.resource
            .as_deref()
            .and_then(|r| r.rsplit('/').next())
            .filter(|s| !s.is_empty())
    }
}

/// A declared species.
#[derive(Debug, Clone, PartialEq)]
pub struct SbmlSpecies {
    pub id: String,
    pub name: Option<String>,
    /// Every `rdf:resource` inside the species' `<annotation>`.
    pub resources: Vec<String>,
}

impl SbmlSpecies {
    pub fn display_name(&self) -> &str {
        non_empty_or(self.name.as_deref(), &self.id)
    }
}

/// The parts of one SBML model that relationship extraction reads.
#[derive(Debug, Clone, PartialEq)]
pub struct SbmlDocument {
    /// File stem up to the first `.`, e.g. `BIOMD0000000001`.
    pub model_name: String,
    pub compartments: Vec<SbmlCompartment>,
    pub species: Vec<SbmlSpecies>,
    pub derived_from: Vec<String>,
    pub created: Option<NaiveDate>,
}

impl SbmlDocument {
    /// Read and parse the model file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&model_name_from_path(path), &xml)
    }

    /// Parse SBML text for the model called `model_name`.
    pub fn parse(model_name: &str, xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut doc = SbmlDocument {
            model_name: model_name.to_string(),
            compartments: vec![],
            species: vec![],
            derived_from: vec![],
            created: None,
        };

        // Open element names, lower-cased
        let mut stack: Vec<String> = Vec::new();
        let mut compartment: Option<SbmlCompartment> = None;
        let mut species: Option<SbmlSpecies> = None;
        let mut in_species_annotation = false;
        let mut created_raw: Option<String> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| BioModelsError::Xml(format!(
                    "{} at byte {}: {}", model_name, reader.buffer_position(), e
                )))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    let name = lower_name(e);

                    match name.as_str() {
                        "compartment" => {
                            let c = SbmlCompartment {
                                id: attr(e, "id")?.unwrap_or_default(),
                                name: attr(e, "name")?,
                                resource: None,
                            };
                            if is_empty { doc.compartments.push(c); } else { compartment = Some(c); }
                        }
                        "species" => {
                            let s = SbmlSpecies {
                                id: attr(e, "id")?.unwrap_or_default(),
                                name: attr(e, "name")?,
                                resources: vec![],
                            };
                            if is_empty { doc.species.push(s); } else { species = Some(s); }
                        }
                        "annotation" if species.is_some() => in_species_annotation = !is_empty,
                        _ => {}
                    }

                    let resource = attr(e, "rdf:resource")?;
                    if let Some(resource) = resource {
                        if name == "rdf:li" {
                            if let Some(c) = compartment.as_mut() {
                                c.resource.get_or_insert_with(|| resource.clone());
                            }
                            if stack.iter().any(|n| n == "bqmodel:isderivedfrom") {
                                doc.derived_from.push(resource.clone());
                            }
                        }
                        if in_species_annotation {
                            if let Some(s) = species.as_mut() {
                                s.resources.push(resource);
                            }
                        }
                    }

                    if !is_empty {
                        stack.push(name);
                    }
                }
                Event::Text(ref e) => {
                    if created_raw.is_none() && in_created_timestamp(&stack) {
                        let text = e.unescape().map_err(|e| BioModelsError::Xml(e.to_string()))?;
                        created_raw = Some(text.into_owned());
                    }
                }
                Event::End(_) => {
                    match stack.pop().as_deref() {
                        Some("compartment") => {
                            if let Some(c) = compartment.take() { doc.compartments.push(c); }
                        }
                        Some("species") => {
                            if let Some(s) = species.take() { doc.species.push(s); }
                            in_species_annotation = false;
                        }
                        Some("annotation") => in_species_annotation = false,
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(raw) = created_raw {
            doc.created = Some(parse_w3cdtf(&raw)?);
        }

        debug!(
            model = %doc.model_name,
            compartments = doc.compartments.len(),
            species = doc.species.len(),
            derived_from = doc.derived_from.len(),
            "Parsed SBML model"
        );
        Ok(doc)
    }

    /// Compartment annotations only matter for multi-compartment models.
    pub fn is_multi_compartment(&self) -> bool {
        self.compartments.len() >= 2
    }
}

/// `BIOMD0000000001.xml` → `BIOMD0000000001`.
pub fn model_name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy())
        .and_then(|f| f.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

fn in_created_timestamp(stack: &[String]) -> bool {
    matches!(
        stack,
        [.., parent, leaf] if parent == "dcterms:created" && leaf == "dcterms:w3cdtf"
    )
}

fn lower_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

/// Unescaped value of attribute `key` (case-insensitive), if present.
fn attr(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a.map_err(|e| BioModelsError::Xml(e.to_string()))?;
        if a.key.as_ref().eq_ignore_ascii_case(key.as_bytes()) {
            let value = a.unescape_value().map_err(|e| BioModelsError::Xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn non_empty_or<'a>(name: Option<&'a str>, fallback: &'a str) -> &'a str {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => fallback,
    }
}
