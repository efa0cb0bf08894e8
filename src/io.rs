//! Delimited point sources and centroid sinks.
//!
//! Records are one point per line with components separated by a delimiter
//! (comma by default). Blank lines are skipped. Every record must have as
//! many components as the first one.

use crate::error::KMeansError;
use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::{s, Array2, ArrayView2};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Default component separator.
pub const DEFAULT_DELIMITER: char = ',';

/// Number of decimals used when rendering centroids for the terminal.
pub const DEFAULT_PRECISION: usize = 4;

/// Headerless, trimmed reader that leaves the row-width check to us.
fn record_reader<R: Read>(reader: R, delimiter: char) -> Result<csv::Reader<R>, KMeansError> {
    if !delimiter.is_ascii() {
        return Err(KMeansError::InvalidDelimiter(delimiter));
    }
    Ok(ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader))
}

/// 1-based line number a record starts on.
fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// Whitespace-only lines come through as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.is_empty())
}

/// Read a point set from `reader`.
///
/// # Errors
///
/// - [`KMeansError::Parse`] when a component is not a finite number
/// - [`KMeansError::InvalidDimensions`] when a record's component count
///   differs from the first record's
/// - [`KMeansError::EmptyInput`] when no records are found
pub fn read_points<R: Read>(reader: R, delimiter: char) -> Result<Array2<f64>, KMeansError> {
    let mut rdr = record_reader(reader, delimiter)?;
    let mut flat: Vec<f64> = Vec::new();
    let mut width = None;
    let mut n_points = 0;

    for record in rdr.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let line_no = line_of(&record);
        match width {
            None => width = Some(record.len()),
            Some(expected) if expected != record.len() => {
                return Err(KMeansError::InvalidDimensions(format!(
                    "line {}: expected {} values but got {}",
                    line_no,
                    expected,
                    record.len()
                )));
            }
            Some(_) => {}
        }

        for field in record.iter() {
            flat.push(parse_component(field, line_no)?);
        }
        n_points += 1;
    }

    let Some(dim) = width else {
        return Err(KMeansError::EmptyInput);
    };

    Array2::from_shape_vec((n_points, dim), flat)
        .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))
}

/// Read records whose first column is a numeric key.
///
/// Returns the key-to-vector map. Each record needs at least the key; a
/// repeated key replaces the earlier record.
pub fn read_keyed_points<R: Read>(
    reader: R,
    delimiter: char,
) -> Result<BTreeMap<OrderedKey, Vec<f64>>, KMeansError> {
    let mut rdr = record_reader(reader, delimiter)?;
    let mut rows = BTreeMap::new();

    for record in rdr.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let line_no = line_of(&record);
        let mut fields = record.iter();
        let key = match fields.next() {
            Some(field) => parse_component(field, line_no)?,
            None => return Err(KMeansError::parse(line_no, "missing key")),
        };
        let values = fields
            .map(|field| parse_component(field, line_no))
            .collect::<Result<Vec<_>, _>>()?;

        rows.insert(OrderedKey(key), values);
    }

    if rows.is_empty() {
        return Err(KMeansError::EmptyInput);
    }

    Ok(rows)
}

/// A finite `f64` usable as a map key, ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedKey(pub f64);

impl Eq for OrderedKey {}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Join two keyed point sources on their common keys.
///
/// Rows come out in ascending key order; each row is the left vector
/// followed by the right vector.
pub fn inner_join(
    left: &BTreeMap<OrderedKey, Vec<f64>>,
    right: &BTreeMap<OrderedKey, Vec<f64>>,
) -> Result<Array2<f64>, KMeansError> {
    let mut flat = Vec::new();
    let mut dim = None;
    let mut n_points = 0;

    for (key, lhs) in left {
        let Some(rhs) = right.get(key) else {
            continue;
        };

        let width = lhs.len() + rhs.len();
        match dim {
            None => dim = Some(width),
            Some(d) if d != width => {
                return Err(KMeansError::InvalidDimensions(format!(
                    "key {}: expected {} values but got {}",
                    key.0, d, width
                )));
            }
            Some(_) => {}
        }

        flat.extend_from_slice(lhs);
        flat.extend_from_slice(rhs);
        n_points += 1;
    }

    let dim = match dim {
        Some(d) if d > 0 => d,
        Some(_) => {
            return Err(KMeansError::InvalidDimensions(
                "joined records have no components".to_string(),
            ))
        }
        None => return Err(KMeansError::EmptyInput),
    };

    Array2::from_shape_vec((n_points, dim), flat)
        .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))
}

/// Seed centroids with the first `k` points.
pub fn initial_from_first_k(points: &ArrayView2<f64>, k: usize) -> Result<Array2<f64>, KMeansError> {
    if k == 0 || k > points.nrows() {
        return Err(KMeansError::InvalidK(format!(
            "cannot seed {} centroids from {} points",
            k,
            points.nrows()
        )));
    }
    Ok(points.slice(s![..k, ..]).to_owned())
}

/// Write one centroid per line, components comma-separated with a fixed
/// number of decimals.
pub fn write_centroids<W: Write>(
    mut writer: W,
    centroids: &ArrayView2<f64>,
    precision: usize,
) -> Result<(), KMeansError> {
    for centroid in centroids.outer_iter() {
        let line = centroid
            .iter()
            .map(|x| format!("{:.*}", precision, x))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_component(field: &str, line_no: usize) -> Result<f64, KMeansError> {
    let value: f64 = field
        .parse()
        .map_err(|_| KMeansError::parse(line_no, format!("invalid number {:?}", field)))?;
    if !value.is_finite() {
        return Err(KMeansError::parse(
            line_no,
            format!("non-finite value {:?}", field),
        ));
    }
    Ok(value)
}
