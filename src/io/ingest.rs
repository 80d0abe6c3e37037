//! CSV ingest and normalization.
//!
//! This module turns archival light-curve tables into clean
//! `LightCurvePoint` vectors that are safe to hand to the containers.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Tolerant value parsing**: archive tables decorate numbers with
//!   flags (`~0.9`, `1.2?`, `PL`, parentheses); those are stripped, not
//!   treated as hard errors

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{AsymmetricError, DataMode, EventMeta, LightCurvePoint};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized points + row errors.
#[derive(Debug, Clone)]
pub struct IngestedLightCurve {
    pub points: Vec<LightCurvePoint>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a light-curve CSV into normalized points.
///
/// Required columns: `time` and the value column for `data_mode` (its
/// canonical name, e.g. `flux_erg_cm2_s`, or the generic `y`). Errors come
/// from `time_err_plus`/`time_err_minus` (or symmetric `time_err`) and the
/// matching `y_err_*` columns; missing error columns default to zero.
pub fn load_light_curve(path: &Path, data_mode: DataMode) -> Result<IngestedLightCurve, AppError> {
    let mut reader = open_csv(path)?;
    let header_map = read_header_map(&mut reader)?;

    if !header_map.contains_key("time") {
        return Err(AppError::input("Missing required column: `time`"));
    }
    let y_name = resolve_y_column(data_mode, &header_map)?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_point(&record, &header_map, y_name) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = points.len();
    if rows_used == 0 {
        return Err(AppError::data(format!(
            "No valid rows in '{}' ({} read, {} rejected).",
            path.display(),
            rows_read,
            row_errors.len()
        )));
    }

    Ok(IngestedLightCurve {
        points,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Look up one event's metadata in a burst-table CSV.
///
/// The table needs a `name` column; `redshift`, `photon_index`, and `t90`
/// are optional and parsed tolerantly. An event missing from the table is a
/// data error; a present event with unparseable values just gets `None`s.
pub fn load_event_meta(path: &Path, name: &str) -> Result<EventMeta, AppError> {
    let mut reader = open_csv(path)?;
    let header_map = read_header_map(&mut reader)?;

    if !header_map.contains_key("name") {
        return Err(AppError::input("Missing required column: `name`"));
    }

    let wanted = name.trim_start_matches("GRB");

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => continue,
        };
        let Some(row_name) = get_optional(&record, &header_map, "name") else {
            continue;
        };
        if row_name.trim_start_matches("GRB") != wanted {
            continue;
        }

        return Ok(EventMeta {
            redshift: parse_table_value(get_optional(&record, &header_map, "redshift")),
            photon_index: parse_table_value(get_optional(&record, &header_map, "photon_index")),
            t90: parse_table_value(get_optional(&record, &header_map, "t90")),
        });
    }

    Err(AppError::data(format!(
        "Event '{name}' not found in table '{}'.",
        path.display()
    )))
}

/// Load a binned prompt count series.
///
/// Required columns: `time` and `counts`. The bin size comes from a
/// `bin_size` column if present, otherwise from the first time step.
pub fn load_prompt_series(path: &Path) -> Result<(Vec<f64>, Vec<f64>, f64), AppError> {
    let mut reader = open_csv(path)?;
    let header_map = read_header_map(&mut reader)?;

    for col in ["time", "counts"] {
        if !header_map.contains_key(col) {
            return Err(AppError::input(format!("Missing required column: `{col}`")));
        }
    }

    let mut time = Vec::new();
    let mut counts = Vec::new();
    let mut bin_size = None;

    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::data(format!("CSV parse error: {e}")))?;
        let t = get_required(&record, &header_map, "time")
            .and_then(|s| parse_f64(s, "time"))
            .map_err(AppError::data)?;
        let c = get_required(&record, &header_map, "counts")
            .and_then(|s| parse_f64(s, "counts"))
            .map_err(AppError::data)?;
        if bin_size.is_none() {
            bin_size = get_optional(&record, &header_map, "bin_size")
                .and_then(|s| s.parse::<f64>().ok());
        }
        time.push(t);
        counts.push(c);
    }

    if time.len() < 2 && bin_size.is_none() {
        return Err(AppError::data(
            "Prompt series needs a `bin_size` column or at least two rows.",
        ));
    }
    let bin_size = bin_size.unwrap_or_else(|| time[1] - time[0]);

    Ok((time, counts, bin_size))
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn read_header_map(reader: &mut csv::Reader<File>) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect())
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_y_column(
    data_mode: DataMode,
    header_map: &HashMap<String, usize>,
) -> Result<&'static str, AppError> {
    let canonical = data_mode.y_column();
    if header_map.contains_key(canonical) {
        return Ok(canonical);
    }
    if header_map.contains_key("y") {
        return Ok("y");
    }
    Err(AppError::input(format!(
        "Missing value column: expected `{canonical}` or `y` for {} data.",
        data_mode.y_unit_label()
    )))
}

fn parse_point(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    y_name: &str,
) -> Result<LightCurvePoint, String> {
    let time = get_required(record, header_map, "time").and_then(|s| parse_f64(s, "time"))?;
    let y = get_required(record, header_map, y_name).and_then(|s| parse_f64(s, y_name))?;

    let time_err = parse_error_pair(record, header_map, "time_err");
    let y_err = parse_error_pair(record, header_map, "y_err");

    Ok(LightCurvePoint {
        time,
        time_err,
        y,
        y_err,
    })
}

fn parse_error_pair(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    stem: &str,
) -> AsymmetricError {
    let sym = parse_opt_f64(get_optional(record, header_map, stem));
    let plus = parse_opt_f64(get_optional(record, header_map, &format!("{stem}_plus")))
        .or(sym)
        .unwrap_or(0.0);
    let minus = parse_opt_f64(get_optional(record, header_map, &format!("{stem}_minus")))
        .or(sym)
        .unwrap_or(0.0);
    AsymmetricError::new(plus, minus)
}

/// Parse a burst-table value, stripping the annotation characters archive
/// tables decorate numbers with (`~`, `?`, `<`, `>`, parentheses, and
/// spectral-model tags like `PL`/`CPL`).
fn parse_table_value(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let cleaned: String = s
        .replace("CPL", "")
        .replace("PL", "")
        .chars()
        .filter(|c| !matches!(c, '~' | '?' | '<' | '>' | '(' | ')' | ',' | ' '))
        .collect();
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite `{name}` value."))
    }
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_flux_light_curve() {
        let f = write_temp(
            "time,time_err_plus,time_err_minus,flux_erg_cm2_s,y_err\n\
             100.0,1.0,2.0,1.5e-12,0.1e-12\n\
             200.0,1.0,1.0,0.9e-12,0.1e-12\n",
        );
        let ingest = load_light_curve(f.path(), DataMode::Flux).unwrap();
        assert_eq!(ingest.rows_used, 2);
        assert!(ingest.row_errors.is_empty());
        let p = &ingest.points[0];
        assert_eq!(p.time, 100.0);
        assert_eq!(p.time_err.minus, 2.0);
        assert_eq!(p.y, 1.5e-12);
        assert_eq!(p.y_err.plus, 0.1e-12);
    }

    #[test]
    fn bad_rows_are_reported_not_fatal() {
        let f = write_temp(
            "time,y\n\
             1.0,2.0\n\
             oops,3.0\n\
             2.0,\n\
             3.0,4.0\n",
        );
        let ingest = load_light_curve(f.path(), DataMode::Luminosity).unwrap();
        assert_eq!(ingest.rows_read, 4);
        assert_eq!(ingest.rows_used, 2);
        assert_eq!(ingest.row_errors.len(), 2);
        assert_eq!(ingest.row_errors[0].line, 3);
    }

    #[test]
    fn all_bad_rows_is_an_error() {
        let f = write_temp("time,y\nx,y\n");
        assert!(load_light_curve(f.path(), DataMode::Flux).is_err());
    }

    #[test]
    fn missing_value_column_is_an_error() {
        let f = write_temp("time,other\n1.0,2.0\n");
        assert!(load_light_curve(f.path(), DataMode::Flux).is_err());
    }

    #[test]
    fn event_table_lookup_cleans_values() {
        let f = write_temp(
            "name,redshift,photon_index,t90\n\
             GRB050724,0.257,1.89 PL,2.5\n\
             GRB060614,~0.125,(2.13),108.7\n\
             GRB061201,,CPL 0.81,0.76\n",
        );
        let meta = load_event_meta(f.path(), "060614").unwrap();
        assert_eq!(meta.redshift, Some(0.125));
        assert_eq!(meta.photon_index, Some(2.13));
        assert_eq!(meta.t90, Some(108.7));

        let meta = load_event_meta(f.path(), "GRB061201").unwrap();
        assert_eq!(meta.redshift, None);
        assert_eq!(meta.photon_index, Some(0.81));

        assert!(load_event_meta(f.path(), "000000").is_err());
    }

    #[test]
    fn prompt_series_infers_bin_size() {
        let f = write_temp("time,counts\n0.0,10\n0.064,12\n0.128,9\n");
        let (time, counts, bin) = load_prompt_series(f.path()).unwrap();
        assert_eq!(time.len(), 3);
        assert_eq!(counts[1], 12.0);
        assert!((bin - 0.064).abs() < 1e-12);
    }
}
