use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;

use crate::error::ProcessorError;

/// One delimited line: positional text fields plus the line it started on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<String>,
    line: u64,
}

impl Row {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            line: 0,
        }
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// 1-based line in the input, 0 for rows built in memory.
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl From<&StringRecord> for Row {
    fn from(record: &StringRecord) -> Self {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        Row::new(record.iter()).at_line(line)
    }
}

/// Tracks whether the bytes read so far leave a quote open. An escaped quote
/// (`""`) flips the state twice, so only unbalanced quoting is caught.
struct QuoteBalance<R> {
    inner: R,
    open: bool,
}

impl<R: Read> Read for QuoteBalance<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        let quotes = buf[..read].iter().filter(|&&b| b == b'"').count();
        if quotes % 2 == 1 {
            self.open = !self.open;
        }
        Ok(read)
    }
}

/// Forward-only reader over delimited rows.
///
/// The header is not special-cased: callers drop it with
/// [`RowSource::skip_header`] before iterating. The source is consumed by
/// iteration and cannot be rewound; open a new one to read the input again.
pub struct RowSource<R: Read> {
    reader: csv::Reader<QuoteBalance<R>>,
    record: StringRecord,
    last_line: u64,
}

impl RowSource<File> {
    pub fn open<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Self, ProcessorError> {
        let path = path.as_ref();
        tracing::debug!("Reading rows from {:?}", path);
        let file = File::open(path).map_err(|e| {
            ProcessorError::Processing(format!(
                "Failed to read CSV @ {}: {}",
                path.to_string_lossy(),
                e
            ))
        })?;
        Self::from_reader(file, delimiter)
    }
}

impl<R: Read> RowSource<R> {
    pub fn from_reader(reader: R, delimiter: char) -> Result<Self, ProcessorError> {
        if !delimiter.is_ascii() {
            return Err(ProcessorError::InvalidMapping(format!(
                "Delimiter must be a single ASCII character, found {:?}",
                delimiter
            )));
        }
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(false)
            .flexible(true)
            .from_reader(QuoteBalance {
                inner: reader,
                open: false,
            });
        Ok(Self {
            reader,
            record: StringRecord::new(),
            last_line: 0,
        })
    }

    /// Next row, or `None` at end of input. Input that ends inside a quoted
    /// field is an error: the open quote has swallowed every following line.
    pub fn read_next(&mut self) -> Result<Option<Row>, ProcessorError> {
        if self.reader.read_record(&mut self.record)? {
            let row = Row::from(&self.record);
            self.last_line = row.line();
            Ok(Some(row))
        } else if self.reader.get_ref().open {
            Err(ProcessorError::MalformedCsv(format!(
                "Unterminated quoted field, input ended inside quotes (last row started on line {})",
                self.last_line
            )))
        } else {
            Ok(None)
        }
    }

    /// Read and discard the first row, returning it for logging.
    pub fn skip_header(&mut self) -> Result<Option<Row>, ProcessorError> {
        let header = self.read_next()?;
        match &header {
            Some(row) => tracing::info!("Headers : {:?}", row.fields()),
            None => tracing::warn!("Input is empty, no header row found"),
        }
        Ok(header)
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<Row, ProcessorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "id;name;latitude;longitude;price;number_of_reviews;city\n\
A1;Chez Sam;48.85;2.35;120;10;75056\n\
A2\n\
A3;\"Loft; rooftop\";43.3;5.4;90;2;13201\n";

    #[test]
    fn test_header_is_skipped_by_caller() {
        let mut source = RowSource::from_reader(INPUT.as_bytes(), ';').unwrap();
        let header = source.skip_header().unwrap().unwrap();
        assert_eq!(header.get(0), Some("id"));
        assert_eq!(header.len(), 7);

        let rows: Vec<Row> = source.collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get(1), Some("Chez Sam"));
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].get(1), Some("Loft; rooftop"));
        assert_eq!(rows[2].line(), 4);
    }

    #[test]
    fn test_without_skip_header_first_row_is_data() {
        let mut source = RowSource::from_reader(INPUT.as_bytes(), ';').unwrap();
        let first = source.next().unwrap().unwrap();
        assert_eq!(first.fields()[6], "city");
    }

    #[test]
    fn test_empty_input() {
        let mut source = RowSource::from_reader("".as_bytes(), ';').unwrap();
        assert!(source.skip_header().unwrap().is_none());
        assert!(source.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let bytes: &[u8] = b"id;name\nA1;\xff\xfe\n";
        let mut source = RowSource::from_reader(bytes, ';').unwrap();
        source.skip_header().unwrap();
        assert!(matches!(
            source.next(),
            Some(Err(ProcessorError::Csv(_)))
        ));
    }

    #[test]
    fn test_unterminated_quote_is_fatal() {
        let input = "hdr\nA1;Chez Sam;48.85;2.35;120;10;\"75056\nA2;Loft;43.3;5.4;90;2;13201\n";
        let mut source = RowSource::from_reader(input.as_bytes(), ';').unwrap();
        source.skip_header().unwrap();
        let result: Result<Vec<Row>, _> = source.collect();
        match result {
            Err(ProcessorError::MalformedCsv(message)) => assert!(message.contains("line 2")),
            other => panic!("expected a malformed CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_escaped_quotes_are_balanced() {
        let input = "hdr\nA1;\"Loft \"\"Vue\"\"\";48.85\nA2;Chez \"Sam\";43.3\n";
        let mut source = RowSource::from_reader(input.as_bytes(), ';').unwrap();
        source.skip_header().unwrap();
        let rows: Vec<Row> = source.collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(1), Some("Loft \"Vue\""));
        assert_eq!(rows[1].get(1), Some("Chez \"Sam\""));
    }

    #[test]
    fn test_missing_file() {
        let result = RowSource::open("../test-data/does-not-exist.csv", ';');
        assert!(matches!(result, Err(ProcessorError::Processing(_))));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        assert!(matches!(
            RowSource::from_reader("".as_bytes(), '§'),
            Err(ProcessorError::InvalidMapping(_))
        ));
    }
}
