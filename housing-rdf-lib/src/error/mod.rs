use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
    #[error("Invalid IRI: {0}")]
    InvalidIri(#[from] oxrdf::IriParseError),
    #[error("Invalid language tag: {0}")]
    InvalidLanguageTag(#[from] oxrdf::LanguageTagParseError),
    #[error("Turtle parse error: {0}")]
    Turtle(#[from] oxttl::TurtleParseError),
    #[error("[Column: {column}, Row: {row}], Invalid {expected} value: {value:?}")]
    InvalidNumber {
        column: usize,
        row: u64,
        expected: &'static str,
        value: String,
    },
    #[error("Processing error: {0}")]
    Processing(String),
}
