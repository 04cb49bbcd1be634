use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use oxrdf::Graph;
use oxttl::{TurtleParser, TurtleSerializer};

use crate::error::ProcessorError;
use crate::graph::HousingGraph;

pub struct TurtleWriter;

impl TurtleWriter {
    pub fn write_to<W: Write>(graph: &HousingGraph, writer: W) -> Result<W, ProcessorError> {
        let mut serializer = TurtleSerializer::new();
        for (prefix, namespace) in graph.prefixes() {
            serializer = serializer.with_prefix(prefix.as_str(), namespace.as_str())?;
        }

        let mut writer = serializer.for_writer(writer);
        for triple in graph.graph().iter() {
            writer.serialize_triple(triple)?;
        }
        Ok(writer.finish()?)
    }

    pub fn to_string(graph: &HousingGraph) -> Result<String, ProcessorError> {
        let buffer = Self::write_to(graph, Vec::new())?;
        String::from_utf8(buffer).map_err(|e| {
            ProcessorError::Processing(format!("Serialized Turtle is not UTF-8: {}", e))
        })
    }

    /// Serialize the whole graph in memory, then write it to `output_path`.
    /// Nothing is written if serialization fails.
    pub fn save<P: AsRef<Path>>(graph: &HousingGraph, output_path: P) -> Result<(), ProcessorError> {
        let output_path = output_path.as_ref();
        let turtle = Self::write_to(graph, Vec::new()).map_err(|e| {
            ProcessorError::Processing(format!("Failed to serialize graph: {}", e))
        })?;

        if let Some(output_dir) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(output_dir).map_err(|e| {
                ProcessorError::Processing(format!(
                    "Failed to create directory for output file: {}",
                    e
                ))
            })?;
        }

        fs::write(output_path, turtle).map_err(|e| {
            ProcessorError::Processing(format!("Failed to write output file: {}", e))
        })?;

        tracing::info!("Saved {} statements to {}", graph.len(), output_path.display());
        Ok(())
    }
}

/// Parse a Turtle document into a graph.
pub fn read_turtle<R: Read>(reader: R) -> Result<Graph, ProcessorError> {
    let mut graph = Graph::new();
    for triple in TurtleParser::new().for_reader(reader) {
        graph.insert(&triple?);
    }
    Ok(graph)
}
