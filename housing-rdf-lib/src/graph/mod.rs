use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedNode, TripleRef};

use crate::error::ProcessorError;
use crate::mapping::{CompiledMapping, Mapping};
use crate::source::Row;
use crate::vocab::namespaced;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub rows_read: usize,
    pub rows_mapped: usize,
    pub rows_skipped: usize,
    pub statements: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row was mapped; `statements` counts the ones new to the graph.
    Mapped { statements: usize },
    /// The row had too few fields and contributed nothing.
    Skipped,
}

/// Applies a compiled mapping to one row at a time.
#[derive(Debug, Clone)]
pub struct RowMapper {
    mapping: CompiledMapping,
}

impl RowMapper {
    pub fn new(mapping: &Mapping) -> Result<Self, ProcessorError> {
        Ok(Self {
            mapping: mapping.compile()?,
        })
    }

    pub fn prefixes(&self) -> &[(String, String)] {
        &self.mapping.prefixes
    }

    pub fn subject_for(&self, id: &str) -> Result<NamedNode, ProcessorError> {
        Ok(NamedNode::new(namespaced(
            &self.mapping.subject_namespace,
            id,
        ))?)
    }

    pub fn map_row(&self, row: &Row, graph: &mut Graph) -> Result<RowOutcome, ProcessorError> {
        if row.len() < self.mapping.min_fields {
            tracing::warn!(
                "Skipping row at line {}: {} field(s), at least {} expected",
                row.line(),
                row.len(),
                self.mapping.min_fields
            );
            return Ok(RowOutcome::Skipped);
        }

        let id = row.get(self.mapping.id_column).ok_or_else(|| {
            ProcessorError::Processing(format!(
                "[Column: {}, Row: {}], Missing identifier value",
                self.mapping.id_column,
                row.line()
            ))
        })?;
        let subject = self.subject_for(id)?;

        // Resolve every object before touching the graph so a failing row
        // leaves no statements behind.
        let mut objects = Vec::with_capacity(self.mapping.rules.len());
        for rule in &self.mapping.rules {
            if let Some(object) = rule.object(row, &self.mapping.places)? {
                objects.push((&rule.predicate, object));
            }
        }

        let mut statements = 0;
        if graph.insert(TripleRef::new(&subject, rdf::TYPE, &self.mapping.class)) {
            statements += 1;
        }
        for (predicate, object) in &objects {
            if graph.insert(TripleRef::new(&subject, *predicate, object)) {
                statements += 1;
            }
        }

        Ok(RowOutcome::Mapped { statements })
    }

    /// Add the data set resource, returning the number of new statements.
    pub fn add_dataset(&self, graph: &mut Graph) -> Result<usize, ProcessorError> {
        let dataset = self.mapping.dataset.as_ref().ok_or_else(|| {
            ProcessorError::InvalidMapping(
                "Dataset resource requested but the mapping has no dataset section".into(),
            )
        })?;

        let mut statements = 0;
        for type_ in &dataset.types {
            if graph.insert(TripleRef::new(&dataset.iri, rdf::TYPE, type_)) {
                statements += 1;
            }
        }
        for label in &dataset.labels {
            if graph.insert(TripleRef::new(&dataset.iri, rdfs::LABEL, label)) {
                statements += 1;
            }
        }
        Ok(statements)
    }
}

/// The built graph together with the prefixes to declare when writing it.
#[derive(Debug, Clone)]
pub struct HousingGraph {
    graph: Graph,
    prefixes: Vec<(String, String)>,
    summary: BuildSummary,
}

impl HousingGraph {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    pub fn summary(&self) -> BuildSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

pub struct GraphBuilder {
    mapper: RowMapper,
    include_dataset: bool,
}

impl GraphBuilder {
    pub fn new(mapping: &Mapping) -> Result<Self, ProcessorError> {
        Ok(Self {
            mapper: RowMapper::new(mapping)?,
            include_dataset: false,
        })
    }

    pub fn with_dataset(mut self, include_dataset: bool) -> Self {
        self.include_dataset = include_dataset;
        self
    }

    /// Map every row in order. The first error aborts the build.
    pub fn build<I>(&self, rows: I) -> Result<HousingGraph, ProcessorError>
    where
        I: IntoIterator<Item = Result<Row, ProcessorError>>,
    {
        tracing::info!("Creating RDF graph for housing data set");
        let mut graph = Graph::new();
        let mut summary = BuildSummary::default();

        if self.include_dataset {
            summary.statements += self.mapper.add_dataset(&mut graph)?;
            tracing::debug!("Added data set resource");
        }

        for row in rows {
            let row = row?;
            summary.rows_read += 1;
            tracing::debug!("Data : {:?}", row.fields());
            match self.mapper.map_row(&row, &mut graph)? {
                RowOutcome::Mapped { statements } => {
                    summary.rows_mapped += 1;
                    summary.statements += statements;
                }
                RowOutcome::Skipped => summary.rows_skipped += 1,
            }
        }

        tracing::info!(
            "Graph complete, number of statements: {} ({} rows mapped, {} skipped)",
            graph.len(),
            summary.rows_mapped,
            summary.rows_skipped
        );

        Ok(HousingGraph {
            graph,
            prefixes: self.mapper.prefixes().to_vec(),
            summary,
        })
    }

    pub fn build_from_rows<I>(&self, rows: I) -> Result<HousingGraph, ProcessorError>
    where
        I: IntoIterator<Item = Row>,
    {
        self.build(rows.into_iter().map(Ok))
    }
}
