use std::collections::HashMap;

use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, Term};

use crate::error::ProcessorError;
use crate::source::Row;
use crate::utils::{format_xsd_float, wkt_point};
use crate::vocab::geo;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CompiledValue {
    Text(usize),
    Float(usize),
    Integer(usize),
    WktPoint { lat: usize, long: usize },
    PlaceLookup(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) predicate: NamedNode,
    pub(crate) value: CompiledValue,
}

impl CompiledRule {
    pub(crate) fn is_place_lookup(&self) -> bool {
        matches!(self.value, CompiledValue::PlaceLookup(_))
    }

    /// Object for this rule on `row`, or `None` when the rule emits nothing.
    pub(crate) fn object(
        &self,
        row: &Row,
        places: &HashMap<String, NamedNode>,
    ) -> Result<Option<Term>, ProcessorError> {
        let term: Term = match &self.value {
            CompiledValue::Text(column) => {
                Literal::new_simple_literal(field(row, *column)?).into()
            }
            CompiledValue::Float(column) => {
                let raw = field(row, *column)?;
                let value = parse_float(raw).ok_or_else(|| ProcessorError::InvalidNumber {
                    column: *column,
                    row: row.line(),
                    expected: "float",
                    value: raw.to_string(),
                })?;
                Literal::new_typed_literal(format_xsd_float(value), xsd::FLOAT).into()
            }
            CompiledValue::Integer(column) => {
                let raw = field(row, *column)?;
                let value = raw.trim().parse::<i64>().map_err(|_| {
                    ProcessorError::InvalidNumber {
                        column: *column,
                        row: row.line(),
                        expected: "integer",
                        value: raw.to_string(),
                    }
                })?;
                Literal::new_typed_literal(value.to_string(), xsd::INTEGER).into()
            }
            CompiledValue::WktPoint { lat, long } => {
                let point = wkt_point(field(row, *lat)?, field(row, *long)?);
                Literal::new_typed_literal(point, geo::WKT_LITERAL).into()
            }
            CompiledValue::PlaceLookup(column) => match places.get(field(row, *column)?) {
                Some(place) => place.clone().into(),
                None => return Ok(None),
            },
        };
        Ok(Some(term))
    }
}

/// Decimal or exponent notation, or the exact words `NaN` and `Infinity`
/// with an optional sign. Surrounding whitespace is ignored.
fn parse_float(raw: &str) -> Option<f32> {
    let text = raw.trim();
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let has_word = unsigned
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E');
    if has_word && unsigned != "NaN" && unsigned != "Infinity" {
        return None;
    }
    text.parse().ok()
}

fn field(row: &Row, column: usize) -> Result<&str, ProcessorError> {
    row.get(column).ok_or_else(|| {
        ProcessorError::Processing(format!(
            "[Column: {}, Row: {}], Missing field (row has {} fields)",
            column,
            row.line(),
            row.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;

    fn rule(value: CompiledValue) -> CompiledRule {
        CompiledRule {
            predicate: NamedNode::new_unchecked("https://example.org/p"),
            value,
        }
    }

    fn places() -> HashMap<String, NamedNode> {
        HashMap::from([(
            vocab::PARIS_CITY_CODE.to_string(),
            NamedNode::new_unchecked(vocab::PARIS_COMMUNE_URI),
        )])
    }

    fn row() -> Row {
        Row::new(["A1", "Chez Sam", "48.85", " 2.35 ", "120", "10", "75056"]).at_line(2)
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let object = rule(CompiledValue::Text(5)).object(&row(), &places()).unwrap();
        assert_eq!(object, Some(Literal::new_simple_literal("10").into()));
    }

    #[test]
    fn test_float_is_typed_and_trimmed() {
        let lat = rule(CompiledValue::Float(2)).object(&row(), &places()).unwrap();
        assert_eq!(
            lat,
            Some(Literal::new_typed_literal("48.85", xsd::FLOAT).into())
        );
        let long = rule(CompiledValue::Float(3)).object(&row(), &places()).unwrap();
        assert_eq!(
            long,
            Some(Literal::new_typed_literal("2.35", xsd::FLOAT).into())
        );
    }

    #[test]
    fn test_integer_rejects_decimals() {
        let price = rule(CompiledValue::Integer(4)).object(&row(), &places()).unwrap();
        assert_eq!(
            price,
            Some(Literal::new_typed_literal("120", xsd::INTEGER).into())
        );
        let err = rule(CompiledValue::Integer(2))
            .object(&row(), &places())
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::InvalidNumber {
                column: 2,
                row: 2,
                expected: "integer",
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_float_fails() {
        let bad = Row::new(["A1", "Loft", "north", "2.35"]).at_line(7);
        let err = rule(CompiledValue::Float(2)).object(&bad, &places()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Column: 2, Row: 7], Invalid float value: \"north\""
        );
    }

    #[test]
    fn test_float_accepts_only_exact_special_words() {
        for word in ["inf", "infinity", "INF", "nan", "NAN", "-inf", "1.5f", "0x10"] {
            let bad = Row::new(["A1", "Loft", word]).at_line(4);
            let err = rule(CompiledValue::Float(2)).object(&bad, &places()).unwrap_err();
            assert!(
                matches!(err, ProcessorError::InvalidNumber { column: 2, row: 4, .. }),
                "{:?} should be rejected",
                word
            );
        }

        for (word, lexical) in [
            ("NaN", "NaN"),
            ("Infinity", "INF"),
            ("+Infinity", "INF"),
            ("-Infinity", "-INF"),
            (" 1e3 ", "1000.0"),
            ("-2.5E-4", "-2.5E-4"),
        ] {
            let ok = Row::new(["A1", "Loft", word]);
            assert_eq!(
                rule(CompiledValue::Float(2)).object(&ok, &places()).unwrap(),
                Some(Literal::new_typed_literal(lexical, xsd::FLOAT).into()),
                "{:?}",
                word
            );
        }
    }

    #[test]
    fn test_wkt_point_uses_raw_text() {
        let point = rule(CompiledValue::WktPoint { lat: 2, long: 3 })
            .object(&row(), &places())
            .unwrap();
        assert_eq!(
            point,
            Some(Literal::new_typed_literal("POINT(48.85  2.35 )", geo::WKT_LITERAL).into())
        );
    }

    #[test]
    fn test_place_lookup_is_exact() {
        let located = rule(CompiledValue::PlaceLookup(6))
            .object(&row(), &places())
            .unwrap();
        assert_eq!(
            located,
            Some(NamedNode::new_unchecked(vocab::PARIS_COMMUNE_URI).into())
        );

        let padded = Row::new(["A1", "x", "1", "1", "1", "1", " 75056"]);
        assert_eq!(
            rule(CompiledValue::PlaceLookup(6))
                .object(&padded, &places())
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let short = Row::new(["A1", "Loft"]).at_line(3);
        let err = rule(CompiledValue::Text(5)).object(&short, &places()).unwrap_err();
        assert!(err.to_string().contains("Missing field (row has 2 fields)"));
    }
}
