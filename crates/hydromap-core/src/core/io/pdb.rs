use crate::core::models::structure::ProteinStructure;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

/// Writer for PDB snapshots carrying a per-atom scalar in the B-factor column.
///
/// Structure viewers color atoms by B-factor out of the box, so writing the
/// order parameter there gives a one-file visualization of the hydration
/// map: load the PDB, color by temperature factor, and the dewetting-prone
/// atoms light up.
pub struct PdbFile;

impl PdbFile {
    /// Writes the selected atoms as fixed-column ATOM records.
    ///
    /// # Arguments
    ///
    /// * `structure` - The structure the selection indexes into.
    /// * `selection` - Atom indices to write, in output order.
    /// * `values` - The scalar written to the B-factor column, aligned with
    ///   `selection`.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns [`PdbWriteError::Inconsistency`] when `selection` and
    /// `values` differ in length or an index is out of bounds.
    pub fn write_to(
        structure: &ProteinStructure,
        selection: &[usize],
        values: &[f64],
        writer: &mut impl Write,
    ) -> Result<(), PdbWriteError> {
        if selection.len() != values.len() {
            return Err(PdbWriteError::Inconsistency(format!(
                "selection has {} atoms but {} values were provided",
                selection.len(),
                values.len()
            )));
        }

        for (&atom_index, &value) in selection.iter().zip(values) {
            let atom = structure.atom(atom_index).ok_or_else(|| {
                PdbWriteError::Inconsistency(format!("atom index {} out of bounds", atom_index))
            })?;
            let residue = structure.residue_of_atom(atom_index).ok_or_else(|| {
                PdbWriteError::Inconsistency(format!("atom index {} has no residue", atom_index))
            })?;

            // Names shorter than four characters start one column later.
            let padded_name = if atom.name.len() < 4 {
                format!(" {:<3}", atom.name)
            } else {
                atom.name.clone()
            };
            let element = atom
                .name
                .chars()
                .find(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(' ');

            writeln!(
                writer,
                "ATOM  {:>5} {:<4} {:<3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                atom.serial,
                padded_name,
                residue.name,
                residue.number,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                1.00,
                value,
                element,
            )?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }

    /// Writes the selected atoms to a file path.
    pub fn write_to_path<P: AsRef<Path>>(
        structure: &ProteinStructure,
        selection: &[usize],
        values: &[f64],
        path: P,
    ) -> Result<(), PdbWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, selection, values, &mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn small_structure() -> ProteinStructure {
        let mut structure = ProteinStructure::new();
        structure.add_atom(1, "N", 1, "ALA", Point3::new(-0.677, -1.23, 0.491), -0.4, 1.55);
        structure.add_atom(2, "CA", 1, "ALA", Point3::new(0.0, 0.0, 0.0), 0.03, 1.70);
        structure
    }

    #[test]
    fn write_to_produces_fixed_column_atom_records() {
        let structure = small_structure();
        let mut out = Vec::new();
        PdbFile::write_to(&structure, &[0, 1], &[2.5, 13.75], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ATOM  "));
        assert_eq!(&lines[0][6..11], "    1");
        assert_eq!(&lines[0][12..16], " N  ");
        assert_eq!(&lines[0][17..20], "ALA");
        assert_eq!(&lines[0][30..38], "  -0.677");
        assert_eq!(&lines[0][54..60], "  1.00");
        assert_eq!(&lines[0][60..66], "  2.50");
        assert_eq!(&lines[1][60..66], " 13.75");
        assert_eq!(lines[2], "END");
    }

    #[test]
    fn write_to_respects_the_selection_order_and_subset() {
        let structure = small_structure();
        let mut out = Vec::new();
        PdbFile::write_to(&structure, &[1], &[4.0], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains(" CA "));
        assert!(!text.contains(" N  "));
    }

    #[test]
    fn write_to_fails_on_length_mismatch() {
        let structure = small_structure();
        let mut out = Vec::new();
        let result = PdbFile::write_to(&structure, &[0, 1], &[1.0], &mut out);
        assert!(matches!(result, Err(PdbWriteError::Inconsistency(_))));
    }

    #[test]
    fn write_to_fails_on_out_of_bounds_index() {
        let structure = small_structure();
        let mut out = Vec::new();
        let result = PdbFile::write_to(&structure, &[5], &[1.0], &mut out);
        assert!(matches!(result, Err(PdbWriteError::Inconsistency(_))));
    }

    #[test]
    fn write_to_path_writes_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydration.pdb");
        let structure = small_structure();

        PdbFile::write_to_path(&structure, &[0, 1], &[1.0, 2.0], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("END\n"));
    }
}
