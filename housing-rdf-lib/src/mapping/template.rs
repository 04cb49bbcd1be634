use std::fmt;
use std::str::FromStr;

use crate::error::ProcessorError;

/// Built-in mapping manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    /// Float price, `gn:locatedIn` and a `geo:asWKT` point per listing.
    #[default]
    Standard,
    /// Integer price, `rdfs:locatedIn`, no geometry.
    Basic,
}

impl Template {
    pub fn content(&self) -> &'static str {
        match self {
            Template::Standard => STANDARD_MAPPING,
            Template::Basic => BASIC_MAPPING,
        }
    }
}

impl FromStr for Template {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Template::Standard),
            "basic" => Ok(Template::Basic),
            _ => Err(ProcessorError::InvalidMapping(format!(
                "Invalid template type: {}. Must be either 'standard' or 'basic'",
                s
            ))),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Standard => write!(f, "standard"),
            Template::Basic => write!(f, "basic"),
        }
    }
}

pub const STANDARD_MAPPING: &str = r#"{
  // Must be HousingMapping
  "@type": "HousingMapping",
  // Unique identifier for this mapping
  "@id": "duvel-housing-standard",
  // Human-readable name
  "name": "Duvel housing listings",
  // Description of what this mapping produces
  "description": "Short-term-rental listings with WGS84 coordinates, float prices and a GeoSPARQL point",
  // Bump when the produced statements change
  "version": 2,
  // Field separator of the input extract
  "delimiter": ";",
  // Rows with fewer fields are skipped
  "minFields": 2,

  // Every listing becomes <namespace>/<value of idColumn>, typed with class
  "subject": {
    "namespace": "https://duvel.dev.insee.io/housing",
    "idColumn": 0,
    "class": "https://duvel.dev.insee.io/housing/Housing"
  },

  // Prefixes declared in the Turtle output
  "prefixes": [
    { "prefix": "rdf", "namespace": "http://www.w3.org/1999/02/22-rdf-syntax-ns#" },
    { "prefix": "rdfs", "namespace": "http://www.w3.org/2000/01/rdf-schema#" },
    { "prefix": "xsd", "namespace": "http://www.w3.org/2001/XMLSchema#" },
    { "prefix": "skos", "namespace": "http://www.w3.org/2004/02/skos/core#" },
    { "prefix": "wgs", "namespace": "http://www.w3.org/2003/01/geo/wgs84_pos#" },
    { "prefix": "gn", "namespace": "http://www.geonames.org/ontology#" },
    { "prefix": "duvel", "namespace": "https://duvel.dev.insee.io/housing/" },
    { "prefix": "geo", "namespace": "http://www.opengis.net/ont/geosparql#" },
    { "prefix": "qb", "namespace": "http://purl.org/linked-data/cube#" }
  ],

  // Statements asserted for each row, in order.
  // value is one of: text, float, integer, wktPoint, placeLookup
  // id;name;latitude;longitude;price;number_of_reviews;city
  "properties": [
    { "predicate": "http://www.w3.org/2004/02/skos/core#prefLabel", "columns": [1], "value": "text" },
    { "predicate": "http://www.w3.org/2003/01/geo/wgs84_pos#lat", "columns": [2], "value": "float" },
    { "predicate": "http://www.w3.org/2003/01/geo/wgs84_pos#long", "columns": [3], "value": "float" },
    { "predicate": "https://duvel.dev.insee.io/housing/price", "columns": [4], "value": "float" },
    { "predicate": "https://duvel.dev.insee.io/housing/number_of_reviews", "columns": [5], "value": "text" },
    { "predicate": "http://www.geonames.org/ontology#locatedIn", "columns": [6], "value": "placeLookup" },
    { "predicate": "http://www.opengis.net/ont/geosparql#asWKT", "columns": [2, 3], "value": "wktPoint" }
  ],

  // Geographic codes recognised by placeLookup rules
  "places": [
    // Paris
    {
      "code": "75056",
      "iri": "http://id.insee.fr/geo/commune/6c57acff-e2a9-4304-afc4-10b34d273374"
    }
  ],

  // Data Cube data set resource, added once when requested
  "dataset": {
    "iri": "https://duvel.dev.insee.io/housing/dataset",
    "@type": ["http://purl.org/linked-data/cube#DataSet"],
    "labels": [
      { "@value": "Logements Airbnb à Paris", "@language": "fr" },
      { "@value": "Airbnb housing in Paris", "@language": "en" }
    ]
  }
}"#;

pub const BASIC_MAPPING: &str = r#"{
  // Must be HousingMapping
  "@type": "HousingMapping",
  // Unique identifier for this mapping
  "@id": "duvel-housing-basic",
  // Human-readable name
  "name": "Duvel housing listings (basic)",
  // Description of what this mapping produces
  "description": "Short-term-rental listings with WGS84 coordinates and integer prices, without geometry",
  "version": 1,
  "delimiter": ";",
  "minFields": 2,

  "subject": {
    "namespace": "https://duvel.dev.insee.io/housing",
    "idColumn": 0,
    "class": "https://duvel.dev.insee.io/housing/Housing"
  },

  "prefixes": [
    { "prefix": "rdf", "namespace": "http://www.w3.org/1999/02/22-rdf-syntax-ns#" },
    { "prefix": "rdfs", "namespace": "http://www.w3.org/2000/01/rdf-schema#" },
    { "prefix": "xsd", "namespace": "http://www.w3.org/2001/XMLSchema#" },
    { "prefix": "skos", "namespace": "http://www.w3.org/2004/02/skos/core#" },
    { "prefix": "wgs", "namespace": "http://www.w3.org/2003/01/geo/wgs84_pos#" },
    { "prefix": "duvel", "namespace": "https://duvel.dev.insee.io/housing/" },
    { "prefix": "qb", "namespace": "http://purl.org/linked-data/cube#" }
  ],

  // id;name;latitude;longitude;price;number_of_reviews;city
  "properties": [
    { "predicate": "http://www.w3.org/2004/02/skos/core#prefLabel", "columns": [1], "value": "text" },
    { "predicate": "http://www.w3.org/2003/01/geo/wgs84_pos#lat", "columns": [2], "value": "float" },
    { "predicate": "http://www.w3.org/2003/01/geo/wgs84_pos#long", "columns": [3], "value": "float" },
    { "predicate": "https://duvel.dev.insee.io/housing/price", "columns": [4], "value": "integer" },
    { "predicate": "https://duvel.dev.insee.io/housing/number_of_reviews", "columns": [5], "value": "text" },
    { "predicate": "http://www.w3.org/2000/01/rdf-schema#locatedIn", "columns": [6], "value": "placeLookup" }
  ],

  "places": [
    // Paris
    {
      "code": "75056",
      "iri": "http://id.insee.fr/geo/commune/6c57acff-e2a9-4304-afc4-10b34d273374"
    }
  ],

  "dataset": {
    "iri": "https://duvel.dev.insee.io/housing/dataset",
    "@type": ["http://purl.org/linked-data/cube#DataSet"],
    "labels": [
      { "@value": "Logements Airbnb à Paris", "@language": "fr" },
      { "@value": "Airbnb housing in Paris", "@language": "en" }
    ]
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_str() {
        assert_eq!("standard".parse::<Template>().unwrap(), Template::Standard);
        assert_eq!("BASIC".parse::<Template>().unwrap(), Template::Basic);
        assert!("full".parse::<Template>().is_err());
        assert_eq!(Template::default().to_string(), "standard");
    }
}
