use crate::core::io::traits::StructureFile;
use crate::core::models::structure::ProteinStructure;
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PqrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PqrParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PqrParseErrorKind {
    #[error("Invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: String, value: String },
    #[error("Invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: String, value: String },
    #[error("ATOM/HETATM record has {found} fields (expected 10, or 11 with a chain identifier)")]
    WrongFieldCount { found: usize },
}

fn parse_int(token: &str, field: &str, line: usize) -> Result<isize, PqrError> {
    token.parse().map_err(|_| PqrError::Parse {
        line,
        kind: PqrParseErrorKind::InvalidInt {
            field: field.into(),
            value: token.into(),
        },
    })
}

fn parse_float(token: &str, field: &str, line: usize) -> Result<f64, PqrError> {
    token.parse().map_err(|_| PqrError::Parse {
        line,
        kind: PqrParseErrorKind::InvalidFloat {
            field: field.into(),
            value: token.into(),
        },
    })
}

/// Reader for the PQR structure format.
///
/// PQR is the whitespace-delimited PDB variant emitted by pdb2pqr and
/// related tools, in which the occupancy and temperature-factor columns are
/// replaced by the per-atom partial charge and radius. The charge column is
/// what makes this the preferred input here: residue-charge classification
/// needs it and plain PDB files do not carry it.
///
/// Records other than ATOM/HETATM (REMARK, TER, CRYST1, ...) are skipped;
/// an END record stops parsing. Both the 10-field layout and the 11-field
/// layout with a chain identifier are accepted; the chain identifier is
/// ignored because atom identity here is positional.
pub struct PqrFile;

impl StructureFile for PqrFile {
    type Error = PqrError;

    fn read_from(reader: &mut impl BufRead) -> Result<ProteinStructure, Self::Error> {
        let mut structure = ProteinStructure::new();
        let mut seen_serials = HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(&record_type) = tokens.first() else {
                continue;
            };
            match record_type {
                "ATOM" | "HETATM" => {
                    // 10 fields without a chain id, 11 with one.
                    let has_chain = match tokens.len() {
                        10 => false,
                        11 => true,
                        found => {
                            return Err(PqrError::Parse {
                                line: line_num,
                                kind: PqrParseErrorKind::WrongFieldCount { found },
                            });
                        }
                    };
                    let offset = if has_chain { 1 } else { 0 };

                    let serial: usize = tokens[1].parse().map_err(|_| PqrError::Parse {
                        line: line_num,
                        kind: PqrParseErrorKind::InvalidInt {
                            field: "serial".into(),
                            value: tokens[1].into(),
                        },
                    })?;
                    let name = tokens[2];
                    let res_name = tokens[3];
                    let res_number = parse_int(tokens[4 + offset], "residue number", line_num)?;
                    let x = parse_float(tokens[5 + offset], "x", line_num)?;
                    let y = parse_float(tokens[6 + offset], "y", line_num)?;
                    let z = parse_float(tokens[7 + offset], "z", line_num)?;
                    let charge = parse_float(tokens[8 + offset], "charge", line_num)?;
                    let radius = parse_float(tokens[9 + offset], "radius", line_num)?;

                    if !seen_serials.insert(serial) {
                        return Err(PqrError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }

                    structure.add_atom(
                        serial,
                        name,
                        res_number,
                        res_name,
                        Point3::new(x, y, z),
                        charge,
                        radius,
                    );
                }
                "END" => break,
                _ => continue,
            }
        }

        if structure.atom_count() == 0 {
            return Err(PqrError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const VALID_PQR: &str = "\
REMARK   1 PQR file generated by pdb2pqr
ATOM      1  N   ALA     1      -0.677  -1.230   0.491 -0.4157 1.5500
ATOM      2  H   ALA     1      -0.131  -2.162   0.491  0.2719 1.1000
ATOM      3  CA  ALA     1       0.000   0.000   0.000  0.0337 1.7000
ATOM      4  N   GLY     2       1.500   0.000   0.000 -0.4157 1.5500
ATOM      5  CA  GLY     2       2.300   1.100   0.000 -0.0252 1.7000
TER
END
";

    fn parse(content: &str) -> Result<ProteinStructure, PqrError> {
        PqrFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn read_from_parses_atoms_and_residues() {
        let structure = parse(VALID_PQR).unwrap();
        assert_eq!(structure.atom_count(), 5);
        assert_eq!(structure.residue_count(), 2);
        assert_eq!(structure.residues()[0].name, "ALA");
        assert_eq!(structure.residues()[1].number, 2);
    }

    #[test]
    fn read_from_parses_coordinates_charge_and_radius() {
        let structure = parse(VALID_PQR).unwrap();
        let atom = &structure.atoms()[0];
        assert_eq!(atom.serial, 1);
        assert_eq!(atom.name, "N");
        assert_eq!(atom.position, Point3::new(-0.677, -1.230, 0.491));
        assert!((atom.partial_charge - (-0.4157)).abs() < 1e-12);
        assert!((atom.radius - 1.55).abs() < 1e-12);
    }

    #[test]
    fn read_from_accepts_records_with_a_chain_identifier() {
        let content = "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000 -0.4157 1.5500
END
";
        let structure = parse(content).unwrap();
        assert_eq!(structure.atom_count(), 1);
        assert_eq!(structure.residues()[0].number, 1);
    }

    #[test]
    fn read_from_stops_at_end_record() {
        let content = format!("{}ATOM      9  CB  ALA     3       0 0 0 0 0\n", VALID_PQR);
        let structure = parse(&content).unwrap();
        assert_eq!(structure.atom_count(), 5);
    }

    #[test]
    fn read_from_fails_on_wrong_field_count() {
        let content = "ATOM      1  N   ALA     1      -0.677  -1.230   0.491 -0.4157\n";
        let result = parse(content);
        assert!(matches!(
            result,
            Err(PqrError::Parse {
                line: 1,
                kind: PqrParseErrorKind::WrongFieldCount { found: 9 },
            })
        ));
    }

    #[test]
    fn read_from_fails_on_invalid_float() {
        let content = "ATOM      1  N   ALA     1      -0.677  -1.230   0.491 charge 1.5500\n";
        let result = parse(content);
        assert!(matches!(
            result,
            Err(PqrError::Parse {
                line: 1,
                kind: PqrParseErrorKind::InvalidFloat { .. },
            })
        ));
    }

    #[test]
    fn read_from_fails_on_invalid_serial() {
        let content = "ATOM      x  N   ALA     1       0.0 0.0 0.0 0.0 1.5\n";
        let result = parse(content);
        assert!(matches!(
            result,
            Err(PqrError::Parse {
                line: 1,
                kind: PqrParseErrorKind::InvalidInt { .. },
            })
        ));
    }

    #[test]
    fn read_from_fails_on_duplicate_serial() {
        let content = "\
ATOM      1  N   ALA     1       0.0 0.0 0.0 0.0 1.5
ATOM      1  CA  ALA     1       1.0 0.0 0.0 0.0 1.7
";
        let result = parse(content);
        assert!(matches!(result, Err(PqrError::Inconsistency(_))));
    }

    #[test]
    fn read_from_fails_when_no_atom_records_present() {
        let result = parse("REMARK nothing here\nEND\n");
        assert!(matches!(result, Err(PqrError::MissingRecord(_))));
    }

    #[test]
    fn read_from_path_reads_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("protein.pqr");
        std::fs::write(&path, VALID_PQR).unwrap();

        let structure = PqrFile::read_from_path(&path).unwrap();
        assert_eq!(structure.atom_count(), 5);
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PqrFile::read_from_path(dir.path().join("absent.pqr"));
        assert!(matches!(result, Err(PqrError::Io(_))));
    }
}
