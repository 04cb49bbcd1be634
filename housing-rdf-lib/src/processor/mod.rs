use crate::error::ProcessorError;
use crate::graph::{BuildSummary, GraphBuilder};
use crate::mapping::Mapping;
use crate::serializer::TurtleWriter;
use crate::source::RowSource;
use std::path::Path;

pub const DEFAULT_INPUT_FILE: &str = "data/karmeliete-output.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "data/ds-karm-housing-paris.ttl";

/// Runs one conversion: read rows, build the graph, write Turtle.
pub struct Processor {
    mapping: Mapping,
    include_dataset: bool,
}

impl Processor {
    pub fn new(mapping: Mapping) -> Self {
        tracing::info!(
            "Creating processor with mapping '{}' (version {})",
            mapping.name,
            mapping.version
        );
        Self {
            mapping,
            include_dataset: true,
        }
    }

    pub fn with_dataset(mut self, include_dataset: bool) -> Self {
        self.include_dataset = include_dataset;
        self
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<BuildSummary, ProcessorError> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        tracing::info!("Starting processing of {}", input_path.display());

        let builder = GraphBuilder::new(&self.mapping)?.with_dataset(self.include_dataset);

        // The source is moved into the build and dropped with it, closing
        // the input whether or not the build succeeds.
        let mut source = RowSource::open(input_path, self.mapping.delimiter)?;
        source.skip_header()?;
        let graph = builder.build(source)?;

        TurtleWriter::save(&graph, output_path)?;

        tracing::info!("Processing completed successfully");
        Ok(graph.summary())
    }
}
