//! CSV point parsing.

use crate::error::GlobeError;
use crate::options::DataOptions;

/// One weighted geographic sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDatum {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Value of the weight column (`pop` by default).
    pub weight: f64,
}

impl PointDatum {
    /// Whether all three fields are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && self.weight.is_finite()
    }
}

/// Coerce a CSV field to a number the way a browser's `Number()` would:
/// surrounding whitespace is ignored, an empty field is zero, `0x` hex is
/// accepted, and anything else unparsable becomes NaN.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |v| v as f64);
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse CSV bytes with a header row into points.
///
/// Columns are located by header name (`columns`); other columns are
/// ignored and never decoded, so stray non-UTF-8 bytes there are harmless.
/// Rows keep their file order. Values that do not parse (including
/// non-UTF-8 numbers) become NaN and are left for the binning stage to
/// skip.
pub fn parse_points(
    bytes: &[u8],
    columns: &DataOptions,
) -> Result<Vec<PointDatum>, GlobeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.byte_headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name.as_bytes())
            .ok_or_else(|| GlobeError::Data(format!("missing column '{name}'")))
    };
    let lat_idx = find(&columns.lat_column)?;
    let lng_idx = find(&columns.lng_column)?;
    let weight_idx = find(&columns.weight_column)?;

    let mut points = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let field = |idx: usize| {
            record
                .get(idx)
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .map_or(f64::NAN, coerce_number)
        };
        points.push(PointDatum {
            lat: field(lat_idx),
            lng: field(lng_idx),
            weight: field(weight_idx),
        });
    }
    log::debug!("parsed {} points", points.len());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_row() {
        let points =
            parse_points(b"lat,lng,pop\n10,20,5000000", &DataOptions::default())
                .unwrap();
        assert_eq!(
            points,
            vec![PointDatum {
                lat: 10.0,
                lng: 20.0,
                weight: 5_000_000.0
            }]
        );
    }

    #[test]
    fn columns_found_by_header_in_any_order() {
        let csv = b"pop,name,lng,lat\n7,Oslo,10.75,59.91\n";
        let points = parse_points(csv, &DataOptions::default()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lat, 59.91);
        assert_eq!(points[0].lng, 10.75);
        assert_eq!(points[0].weight, 7.0);
    }

    #[test]
    fn custom_weight_column() {
        let columns = DataOptions {
            weight_column: "count".into(),
            ..DataOptions::default()
        };
        let points =
            parse_points(b"lat,lng,count\n1,2,3\n", &columns).unwrap();
        assert_eq!(points[0].weight, 3.0);
    }

    #[test]
    fn missing_column_is_a_data_error() {
        let err = parse_points(b"lat,lon,pop\n1,2,3\n", &DataOptions::default())
            .unwrap_err();
        assert!(matches!(err, GlobeError::Data(ref m) if m.contains("lng")));
    }

    #[test]
    fn empty_input_yields_no_points() {
        let points = parse_points(b"", &DataOptions::default()).unwrap();
        assert!(points.is_empty());
        let points =
            parse_points(b"lat,lng,pop\n", &DataOptions::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn unparsable_values_become_nan() {
        let points = parse_points(
            b"lat,lng,pop\nabc,20,1\n10,20\n",
            &DataOptions::default(),
        )
        .unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].lat.is_nan());
        assert!(!points[0].is_finite());
        assert!(points[1].weight.is_nan());
    }

    #[test]
    fn invalid_utf8_in_ignored_column_keeps_rows() {
        let csv = b"lat,lng,pop,name\n10,20,5000000,ok\n30,40,100,\xff\xfe\n";
        let points = parse_points(csv, &DataOptions::default()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[1],
            PointDatum {
                lat: 30.0,
                lng: 40.0,
                weight: 100.0
            }
        );
    }

    #[test]
    fn invalid_utf8_in_value_column_becomes_nan() {
        let csv = b"lat,lng,pop\n10,20,1\n\xff,40,2\n";
        let points = parse_points(csv, &DataOptions::default()).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].is_finite());
        assert!(points[1].lat.is_nan());
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_number(" 42 "), 42.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("0x1A"), 26.0);
        assert_eq!(coerce_number("-3.5e2"), -350.0);
        assert!(coerce_number("12abc").is_nan());
    }
}
