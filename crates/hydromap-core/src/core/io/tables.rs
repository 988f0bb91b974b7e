use crate::core::chem;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid data in '{path}': {reason}")]
    Invalid { path: String, reason: String },
}

fn csv_error(path: &Path, source: csv::Error) -> TableError {
    TableError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

fn invalid(path: &Path, reason: String) -> TableError {
    TableError::Invalid {
        path: path.to_string_lossy().to_string(),
        reason,
    }
}

#[derive(Debug, Deserialize)]
struct OrderParameterRecord {
    atom_index: usize,
    phi_star: f64,
}

#[derive(Debug, Deserialize)]
struct BurialRecord {
    atom_index: usize,
    buried: u8,
}

#[derive(Debug, Deserialize)]
struct PolarityRecord {
    res_name: String,
    atom_name: String,
    polarity: f64,
}

#[derive(Debug, Deserialize)]
struct StrideRecord {
    residue_number: isize,
    class: String,
}

/// Loads the per-atom order parameter array (phi_i*).
///
/// The file is a headered CSV with `atom_index,phi_star` columns. Rows must
/// be dense and 0-based: row `i` must carry `atom_index == i`, so the array
/// lines up with the heavy-atom selection it was computed over without a
/// translation table.
///
/// # Errors
///
/// Returns [`TableError::Invalid`] when indices are out of order, repeated,
/// or leave gaps, and the usual I/O and CSV variants otherwise.
pub fn load_order_parameters(path: &Path) -> Result<Vec<f64>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut values = Vec::new();
    for result in reader.deserialize::<OrderParameterRecord>() {
        let record = result.map_err(|e| csv_error(path, e))?;
        if record.atom_index != values.len() {
            return Err(invalid(
                path,
                format!(
                    "atom_index {} at row {} (rows must be dense and 0-based)",
                    record.atom_index,
                    values.len()
                ),
            ));
        }
        values.push(record.phi_star);
    }
    if values.is_empty() {
        return Err(invalid(path, "no data rows".into()));
    }
    Ok(values)
}

/// Loads the per-atom burial indicator array.
///
/// The file is a headered CSV with `atom_index,buried` columns, where
/// `buried` is 1 for buried atoms and 0 for surface atoms. The same dense
/// 0-based indexing rule as [`load_order_parameters`] applies.
pub fn load_burial_flags(path: &Path) -> Result<Vec<bool>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut flags = Vec::new();
    for result in reader.deserialize::<BurialRecord>() {
        let record = result.map_err(|e| csv_error(path, e))?;
        if record.atom_index != flags.len() {
            return Err(invalid(
                path,
                format!(
                    "atom_index {} at row {} (rows must be dense and 0-based)",
                    record.atom_index,
                    flags.len()
                ),
            ));
        }
        match record.buried {
            0 => flags.push(false),
            1 => flags.push(true),
            other => {
                return Err(invalid(
                    path,
                    format!("buried flag must be 0 or 1, found {}", other),
                ));
            }
        }
    }
    if flags.is_empty() {
        return Err(invalid(path, "no data rows".into()));
    }
    Ok(flags)
}

/// Loads a per-atom polarity scale (e.g., Kapcha-Rossky).
///
/// The file is a headered CSV with `res_name,atom_name,polarity` columns.
/// The sign of the polarity value is what classification consumes: positive
/// values mark polar atoms, non-positive values nonpolar ones. Later rows
/// override earlier rows with the same key.
pub fn load_polarity_scale(path: &Path) -> Result<HashMap<(String, String), f64>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut scale = HashMap::new();
    for result in reader.deserialize::<PolarityRecord>() {
        let record = result.map_err(|e| csv_error(path, e))?;
        scale.insert((record.res_name, record.atom_name), record.polarity);
    }
    if scale.is_empty() {
        return Err(invalid(path, "no data rows".into()));
    }
    Ok(scale)
}

/// Loads per-residue secondary-structure assignments.
///
/// The file is a headered CSV with `residue_number,class` columns, where
/// `class` is one of the STRIDE letters H, G, I, E, T, B, C. Residue numbers
/// must match the structure file the assignments were computed from.
pub fn load_stride_classes(path: &Path) -> Result<HashMap<isize, char>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut classes = HashMap::new();
    for result in reader.deserialize::<StrideRecord>() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let trimmed = record.class.trim();
        if !chem::STRIDE_CLASS_LETTERS.contains(&trimmed) {
            return Err(invalid(
                path,
                format!(
                    "unknown secondary-structure class '{}' for residue {}",
                    record.class, record.residue_number
                ),
            ));
        }
        let letter = trimmed.chars().next().unwrap_or('C');
        classes.insert(record.residue_number, letter);
    }
    if classes.is_empty() {
        return Err(invalid(path, "no data rows".into()));
    }
    Ok(classes)
}

/// Writes a cumulative-count series as a headered CSV.
///
/// The first column is the lower phi bound of each row; the remaining
/// columns are the per-category cumulative counts, one column per label.
///
/// # Arguments
///
/// * `path` - The destination file.
/// * `labels` - The category labels, in column order.
/// * `phi_lows` - The lower phi bound per row.
/// * `counts` - One row of per-category counts per phi bound.
pub fn write_series_csv(
    path: &Path,
    labels: &[String],
    phi_lows: &[f64],
    counts: &[Vec<u64>],
) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut header = vec!["phi_low".to_string()];
    header.extend(labels.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| csv_error(path, e))?;

    for (phi_low, row) in phi_lows.iter().zip(counts) {
        if row.len() != labels.len() {
            return Err(invalid(
                path,
                format!(
                    "series row has {} counts for {} labels",
                    row.len(),
                    labels.len()
                ),
            ));
        }
        let mut record = vec![phi_low.to_string()];
        record.extend(row.iter().map(|count| count.to_string()));
        writer
            .write_record(&record)
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_order_parameters_succeeds_with_dense_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phi.csv");
        fs::write(&path, "atom_index,phi_star\n0,0.5\n1,1.5\n2,2.5\n").unwrap();

        let values = load_order_parameters(&path).unwrap();
        assert_eq!(values, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn load_order_parameters_fails_on_gap_in_indices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phi.csv");
        fs::write(&path, "atom_index,phi_star\n0,0.5\n2,2.5\n").unwrap();

        let result = load_order_parameters(&path);
        assert!(matches!(result, Err(TableError::Invalid { .. })));
    }

    #[test]
    fn load_order_parameters_fails_on_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_order_parameters(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(TableError::Csv { .. })));
    }

    #[test]
    fn load_order_parameters_fails_on_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phi.csv");
        fs::write(&path, "atom_index,phi_star\n").unwrap();

        let result = load_order_parameters(&path);
        assert!(matches!(result, Err(TableError::Invalid { .. })));
    }

    #[test]
    fn load_burial_flags_maps_zero_and_one() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("buried.csv");
        fs::write(&path, "atom_index,buried\n0,1\n1,0\n2,1\n").unwrap();

        let flags = load_burial_flags(&path).unwrap();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn load_burial_flags_rejects_other_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("buried.csv");
        fs::write(&path, "atom_index,buried\n0,2\n").unwrap();

        let result = load_burial_flags(&path);
        assert!(matches!(result, Err(TableError::Invalid { .. })));
    }

    #[test]
    fn load_polarity_scale_keys_on_residue_and_atom_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kr.csv");
        fs::write(
            &path,
            "res_name,atom_name,polarity\nALA,N,0.45\nALA,CB,-0.33\n",
        )
        .unwrap();

        let scale = load_polarity_scale(&path).unwrap();
        assert_eq!(scale[&("ALA".to_string(), "N".to_string())], 0.45);
        assert_eq!(scale[&("ALA".to_string(), "CB".to_string())], -0.33);
    }

    #[test]
    fn load_stride_classes_accepts_the_seven_letters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stride.csv");
        fs::write(
            &path,
            "residue_number,class\n1,H\n2,E\n3,C\n4,T\n5,G\n6,I\n7,B\n",
        )
        .unwrap();

        let classes = load_stride_classes(&path).unwrap();
        assert_eq!(classes.len(), 7);
        assert_eq!(classes[&1], 'H');
        assert_eq!(classes[&7], 'B');
    }

    #[test]
    fn load_stride_classes_rejects_unknown_letters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stride.csv");
        fs::write(&path, "residue_number,class\n1,X\n").unwrap();

        let result = load_stride_classes(&path);
        assert!(matches!(result, Err(TableError::Invalid { .. })));
    }

    #[test]
    fn write_series_csv_produces_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let labels = vec!["buried".to_string(), "surface".to_string()];

        write_series_csv(
            &path,
            &labels,
            &[2.0, 1.0],
            &[vec![3, 1], vec![5, 2]],
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "phi_low,buried,surface");
        assert_eq!(lines[1], "2,3,1");
        assert_eq!(lines[2], "1,5,2");
    }

    #[test]
    fn write_series_csv_fails_on_ragged_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let labels = vec!["buried".to_string(), "surface".to_string()];

        let result = write_series_csv(&path, &labels, &[2.0], &[vec![3]]);
        assert!(matches!(result, Err(TableError::Invalid { .. })));
    }
}
