/// Lexical form of an `xsd:float`.
///
/// Finite values are written like `Float.toString` on the JVM: plain decimal
/// with at least one fractional digit for magnitudes in `[1e-3, 1e7)`,
/// `<mantissa>E<exponent>` otherwise. Special values use the XSD spellings
/// `NaN`, `INF` and `-INF`.
pub fn format_xsd_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut text = value.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

/// Well-known-text point, latitude first.
pub fn wkt_point(lat: &str, long: &str) -> String {
    format!("POINT({} {})", lat, long)
}
