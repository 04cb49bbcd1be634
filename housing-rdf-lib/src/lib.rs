//! Housing listings to RDF
//!
//! This library converts a semicolon-delimited extract of short-term-rental
//! listings into an RDF graph and serializes it as Turtle, following a
//! declarative mapping manifest.

mod error;
mod graph;
mod mapping;
mod processor;
mod serializer;
mod source;
mod utils;
pub mod vocab;

pub use error::ProcessorError;
pub use graph::{BuildSummary, GraphBuilder, HousingGraph, RowMapper, RowOutcome};
pub use mapping::{
    CompiledMapping, DatasetSection, LabelValue, Mapping, Place, PrefixBinding, PropertyRule,
    SubjectSection, Template, ValueRule, BASIC_MAPPING, MAPPING_TYPE, STANDARD_MAPPING,
};
pub use processor::{Processor, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
pub use serializer::{read_turtle, TurtleWriter};
pub use source::{Row, RowSource};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;
    use tracing::{error, info};

    static INIT: Once = Once::new();

    /// Initialize logging exactly once for all tests
    pub(crate) fn init_logging() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(tracing::Level::DEBUG)
                .init();
        });
    }

    #[test]
    fn test_mapping_loading() {
        init_logging();

        info!("Testing mapping loading");
        let mapping = Mapping::from_file("../test-data/mapping.jsonc").unwrap();
        assert_eq!(mapping.type_, MAPPING_TYPE);

        info!("Validating mapping");
        match mapping.validate() {
            Ok(_) => info!("Mapping validation successful"),
            Err(e) => error!("Mapping validation failed: {}", e),
        }
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn test_custom_mapping_end_to_end() {
        init_logging();

        let mapping = Mapping::from_file("../test-data/mapping.jsonc").unwrap();
        let builder = GraphBuilder::new(&mapping).unwrap().with_dataset(true);
        let mut source = RowSource::open("../test-data/karmeliete-sample.csv", mapping.delimiter)
            .unwrap();
        source.skip_header().unwrap();
        let graph = builder.build(source).unwrap();

        let turtle = TurtleWriter::to_string(&graph).unwrap();
        let parsed = read_turtle(turtle.as_bytes()).unwrap();
        assert_eq!(&parsed, graph.graph());
        assert_eq!(graph.summary().rows_skipped, 1);
    }
}
