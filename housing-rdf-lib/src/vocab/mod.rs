//! Namespaces and terms used by the housing graph.

pub const RDF_NAMESPACE_URI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NAMESPACE_URI: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SKOS_NAMESPACE_URI: &str = "http://www.w3.org/2004/02/skos/core#";
pub const WGS84_NAMESPACE_URI: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
pub const GN_NAMESPACE_URI: &str = "http://www.geonames.org/ontology#";
pub const GEO_NAMESPACE_URI: &str = "http://www.opengis.net/ont/geosparql#";
pub const QB_NAMESPACE_URI: &str = "http://purl.org/linked-data/cube#";

pub const DUVEL_HOUSING_NAMESPACE_URI: &str = "https://duvel.dev.insee.io/housing";
pub const DATASET_DUVEL_HOUSING_NAMESPACE_URI: &str = "https://duvel.dev.insee.io/housing/dataset";
pub const PARIS_COMMUNE_URI: &str =
    "http://id.insee.fr/geo/commune/6c57acff-e2a9-4304-afc4-10b34d273374";
pub const PARIS_CITY_CODE: &str = "75056";

pub mod geo {
    use oxrdf::NamedNodeRef;

    pub const AS_WKT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#asWKT");

    pub const WKT_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral");
}

pub mod qb {
    use oxrdf::NamedNodeRef;

    pub const DATA_SET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#DataSet");
}

pub mod skos {
    use oxrdf::NamedNodeRef;

    pub const PREF_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
}

pub mod wgs {
    use oxrdf::NamedNodeRef;

    pub const LAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#lat");

    pub const LONG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#long");
}

pub mod duvel {
    use oxrdf::NamedNodeRef;

    pub const HOUSING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://duvel.dev.insee.io/housing/Housing");

    pub const PRICE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://duvel.dev.insee.io/housing/price");

    pub const NUMBER_OF_REVIEWS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://duvel.dev.insee.io/housing/number_of_reviews");
}

pub mod gn {
    use oxrdf::NamedNodeRef;

    pub const LOCATED_IN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.geonames.org/ontology#locatedIn");
}

/// Join a namespace and a local name, inserting `/` when the namespace does
/// not already end with a separator.
pub fn namespaced(namespace: &str, local: &str) -> String {
    if namespace.ends_with('/') || namespace.ends_with('#') {
        format!("{}{}", namespace, local)
    } else {
        format!("{}/{}", namespace, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced() {
        assert_eq!(
            namespaced(DUVEL_HOUSING_NAMESPACE_URI, "A1"),
            "https://duvel.dev.insee.io/housing/A1"
        );
        assert_eq!(namespaced(WGS84_NAMESPACE_URI, "lat"), wgs::LAT.as_str());
        assert_eq!(namespaced("https://example.org/ns/", "x"), "https://example.org/ns/x");
    }

    #[test]
    fn test_dataset_uri_lives_under_housing_namespace() {
        assert_eq!(
            namespaced(DUVEL_HOUSING_NAMESPACE_URI, "dataset"),
            DATASET_DUVEL_HOUSING_NAMESPACE_URI
        );
    }
}
