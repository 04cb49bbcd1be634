use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use json_comments::StripComments;
use oxrdf::{Literal, NamedNode};
use serde::{Deserialize, Serialize};

use crate::error::ProcessorError;
use crate::vocab::namespaced;

mod rule;
mod template;

pub(crate) use rule::{CompiledRule, CompiledValue};
pub use template::{Template, BASIC_MAPPING, STANDARD_MAPPING};

pub const MAPPING_TYPE: &str = "HousingMapping";

fn default_delimiter() -> char {
    ';'
}

fn default_min_fields() -> usize {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubjectSection {
    pub namespace: String,
    #[serde(default, rename = "idColumn")]
    pub id_column: usize,
    pub class: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PrefixBinding {
    pub prefix: String,
    pub namespace: String,
}

/// How the raw text of the rule's columns becomes an RDF object.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ValueRule {
    Text,
    Float,
    Integer,
    WktPoint,
    PlaceLookup,
}

impl ValueRule {
    fn expected_columns(&self) -> usize {
        match self {
            ValueRule::WktPoint => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropertyRule {
    pub predicate: String,
    pub columns: Vec<usize>,
    pub value: ValueRule,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Place {
    pub code: String,
    pub iri: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LabelValue {
    #[serde(rename = "@value")]
    pub value: String,
    #[serde(rename = "@language")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetSection {
    pub iri: String,
    #[serde(default, rename = "@type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub labels: Vec<LabelValue>,
}

/// Declarative row-to-triple mapping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Mapping {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: String,
    pub name: String,
    pub description: String,
    pub version: u32,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_min_fields", rename = "minFields")]
    pub min_fields: usize,
    pub subject: SubjectSection,
    #[serde(default)]
    pub prefixes: Vec<PrefixBinding>,
    pub properties: Vec<PropertyRule>,
    #[serde(default)]
    pub places: Vec<Place>,
    pub dataset: Option<DatasetSection>,
}

/// Validated form of a [`Mapping`], with every IRI and literal parsed.
#[derive(Debug, Clone)]
pub struct CompiledMapping {
    pub(crate) subject_namespace: String,
    pub(crate) id_column: usize,
    pub(crate) class: NamedNode,
    pub(crate) min_fields: usize,
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) places: HashMap<String, NamedNode>,
    pub(crate) dataset: Option<CompiledDataset>,
    pub(crate) prefixes: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledDataset {
    pub(crate) iri: NamedNode,
    pub(crate) types: Vec<NamedNode>,
    pub(crate) labels: Vec<Literal>,
}

impl Mapping {
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Result<Self, ProcessorError> {
        let path = path.into();
        tracing::info!("Loading mapping from {:?}", path);
        let file = File::open(&path)?;
        let mapping = Self::from_reader(BufReader::new(file))?;
        tracing::info!("Successfully loaded mapping: {}", path.display());
        Ok(mapping)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProcessorError> {
        Ok(serde_json::from_reader(StripComments::new(reader))?)
    }

    pub fn from_jsonc_str(content: &str) -> Result<Self, ProcessorError> {
        Self::from_reader(content.as_bytes())
    }

    pub fn from_template(template: Template) -> Result<Self, ProcessorError> {
        tracing::debug!("Loading built-in {} mapping", template);
        Self::from_jsonc_str(template.content())
    }

    pub fn validate(&self) -> Result<(), ProcessorError> {
        tracing::info!("Validating mapping...");
        self.compile().map(|_| {
            tracing::info!("Mapping validation successful");
        })
    }

    pub fn compile(&self) -> Result<CompiledMapping, ProcessorError> {
        if self.type_ != MAPPING_TYPE {
            tracing::error!("Invalid mapping type: {}", self.type_);
            return Err(ProcessorError::InvalidMapping(format!(
                "Mapping must have @type of {}",
                MAPPING_TYPE
            )));
        }

        if !self.delimiter.is_ascii() {
            return Err(ProcessorError::InvalidMapping(format!(
                "Delimiter must be a single ASCII character, found {:?}",
                self.delimiter
            )));
        }

        if self.min_fields == 0 {
            return Err(ProcessorError::InvalidMapping(
                "minFields must be at least 1".into(),
            ));
        }

        // Probe the namespace with an empty local name so a bad namespace
        // is reported here rather than on the first row.
        NamedNode::new(namespaced(&self.subject.namespace, "")).map_err(|e| {
            ProcessorError::InvalidMapping(format!(
                "Invalid subject namespace {:?}: {}",
                self.subject.namespace, e
            ))
        })?;
        let class = parse_iri(&self.subject.class, "subject class")?;

        let mut seen_prefixes = HashSet::new();
        let mut prefixes = Vec::with_capacity(self.prefixes.len());
        for binding in &self.prefixes {
            if !seen_prefixes.insert(binding.prefix.as_str()) {
                return Err(ProcessorError::InvalidMapping(format!(
                    "Duplicate prefix: {}",
                    binding.prefix
                )));
            }
            parse_iri(&binding.namespace, &format!("prefix '{}'", binding.prefix))?;
            prefixes.push((binding.prefix.clone(), binding.namespace.clone()));
        }

        let mut rules = Vec::with_capacity(self.properties.len());
        for property in &self.properties {
            let expected = property.value.expected_columns();
            if property.columns.len() != expected {
                return Err(ProcessorError::InvalidMapping(format!(
                    "Rule for {} expects {} column(s), found {:?}",
                    property.predicate, expected, property.columns
                )));
            }
            let predicate = parse_iri(&property.predicate, "predicate")?;
            let value = match property.value {
                ValueRule::Text => CompiledValue::Text(property.columns[0]),
                ValueRule::Float => CompiledValue::Float(property.columns[0]),
                ValueRule::Integer => CompiledValue::Integer(property.columns[0]),
                ValueRule::PlaceLookup => CompiledValue::PlaceLookup(property.columns[0]),
                ValueRule::WktPoint => CompiledValue::WktPoint {
                    lat: property.columns[0],
                    long: property.columns[1],
                },
            };
            rules.push(CompiledRule { predicate, value });
        }

        let mut places = HashMap::with_capacity(self.places.len());
        for place in &self.places {
            let iri = parse_iri(&place.iri, &format!("place '{}'", place.code))?;
            if places.insert(place.code.clone(), iri).is_some() {
                return Err(ProcessorError::InvalidMapping(format!(
                    "Duplicate place code: {}",
                    place.code
                )));
            }
        }

        if places.is_empty() && rules.iter().any(|r| r.is_place_lookup()) {
            tracing::warn!("Mapping has placeLookup rules but no places; they will never match");
        }

        let dataset = match &self.dataset {
            Some(section) => Some(section.compile()?),
            None => None,
        };

        Ok(CompiledMapping {
            subject_namespace: self.subject.namespace.clone(),
            id_column: self.subject.id_column,
            class,
            min_fields: self.min_fields,
            rules,
            places,
            dataset,
            prefixes,
        })
    }
}

impl DatasetSection {
    fn compile(&self) -> Result<CompiledDataset, ProcessorError> {
        let iri = parse_iri(&self.iri, "dataset")?;
        let types = self
            .types
            .iter()
            .map(|t| parse_iri(t, "dataset type"))
            .collect::<Result<Vec<_>, _>>()?;
        let labels = self
            .labels
            .iter()
            .map(|l| Literal::new_language_tagged_literal(l.value.clone(), l.language.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledDataset { iri, types, labels })
    }
}

fn parse_iri(iri: &str, what: &str) -> Result<NamedNode, ProcessorError> {
    NamedNode::new(iri).map_err(|e| {
        ProcessorError::InvalidMapping(format!("Invalid {} IRI {:?}: {}", what, iri, e))
    })
}
