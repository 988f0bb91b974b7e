use super::config::ClassificationSettings;
use super::error::EngineError;
use crate::core::chem;
use crate::core::models::atom::Atom;
use crate::core::models::residue::Residue;
use crate::core::models::structure::ProteinStructure;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Identifies one of the four classification schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    /// Buried vs. surface atoms, from a precomputed indicator array.
    Burial,
    /// Charged vs. hydrophobic vs. hydrophilic, by parent residue.
    ResidueType,
    /// Polar vs. nonpolar atoms, by a per-atom scale lookup.
    Polarity,
    /// STRIDE secondary-structure class of the parent residue.
    SecondaryStructure,
}

/// The unit a scheme tallies: individual atoms, or distinct residues
/// touched by the atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyLevel {
    Atom,
    Residue,
}

impl SchemeKind {
    /// Returns the short name used in logs, errors, and file names.
    pub fn name(&self) -> &'static str {
        match self {
            SchemeKind::Burial => "buried-surface",
            SchemeKind::ResidueType => "restype",
            SchemeKind::Polarity => "atomtype",
            SchemeKind::SecondaryStructure => "ssclass",
        }
    }

    pub fn level(&self) -> TallyLevel {
        match self {
            SchemeKind::ResidueType => TallyLevel::Residue,
            _ => TallyLevel::Atom,
        }
    }
}

/// A read-only mapping from selection position to category.
///
/// Built once per scheme from the structure and its external inputs, then
/// consulted by the binner for every bin. Positions index the heavy-atom
/// selection (not the full structure), because that is the domain the
/// order-parameter and indicator arrays are defined over.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    kind: SchemeKind,
    labels: Vec<&'static str>,
    assignments: Vec<Option<usize>>,
    residue_ids: Vec<usize>,
    skipped_atoms: usize,
}

impl ClassificationTable {
    /// Builds the buried/surface table from a per-atom indicator array.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LengthMismatch`] when the indicator does not
    /// cover the selection exactly.
    pub fn burial(selection_len: usize, flags: &[bool]) -> Result<Self, EngineError> {
        if flags.len() != selection_len {
            return Err(EngineError::LengthMismatch {
                scheme: SchemeKind::Burial.name(),
                expected: selection_len,
                found: flags.len(),
            });
        }
        let assignments = flags
            .iter()
            .map(|&buried| Some(if buried { 0 } else { 1 }))
            .collect();
        Ok(Self {
            kind: SchemeKind::Burial,
            labels: vec!["Buried", "Surface"],
            assignments,
            residue_ids: Vec::new(),
            skipped_atoms: 0,
        })
    }

    /// Builds the charged/hydrophobic/hydrophilic table from residue data.
    ///
    /// A residue is charged when the magnitude of its total charge exceeds
    /// the configured cutoff; otherwise it is hydrophobic when its name is
    /// in the configured set, and hydrophilic when not. Every atom of a
    /// residue shares that residue's category, and tallies count distinct
    /// residues rather than atoms.
    pub fn residue_type(
        structure: &ProteinStructure,
        selection: &[usize],
        settings: &ClassificationSettings,
    ) -> Result<Self, EngineError> {
        let mut assignments = Vec::with_capacity(selection.len());
        let mut residue_ids = Vec::with_capacity(selection.len());
        for &atom_index in selection {
            let (atom, residue) = resolve(structure, atom_index)?;

            let category = if residue.total_charge().abs() > settings.charged_cutoff {
                0
            } else if settings.is_hydrophobic(&residue.name) {
                1
            } else {
                2
            };
            assignments.push(Some(category));
            residue_ids.push(atom.residue_index);
        }
        Ok(Self {
            kind: SchemeKind::ResidueType,
            labels: vec!["Charged", "Hydrophobic", "Hydrophilic"],
            assignments,
            residue_ids,
            skipped_atoms: 0,
        })
    }

    /// Builds the polar/nonpolar table from a per-atom scale.
    ///
    /// Lookups key on `(residue name, atom name)` after applying the force
    /// field's atom-name corrections. Atoms without a scale entry are
    /// logged, excluded from every tally, and reported through
    /// [`ClassificationTable::skipped_atoms`]; they are never silently
    /// counted into either category.
    pub fn polarity(
        structure: &ProteinStructure,
        selection: &[usize],
        scale: &HashMap<(String, String), f64>,
        force_field: &str,
        settings: &ClassificationSettings,
    ) -> Result<Self, EngineError> {
        let mut assignments = Vec::with_capacity(selection.len());
        let mut skipped_atoms = 0;
        for &atom_index in selection {
            let (atom, residue) = resolve(structure, atom_index)?;

            let atom_name = settings.corrected_atom_name(force_field, &atom.name);
            let key = (residue.name.clone(), atom_name.to_string());
            match scale.get(&key) {
                Some(value) if *value > 0.0 => assignments.push(Some(0)),
                Some(_) => assignments.push(Some(1)),
                None => {
                    warn!(
                        residue = %residue.name,
                        atom = %atom_name,
                        "no polarity entry; atom excluded from polar/nonpolar tallies"
                    );
                    assignments.push(None);
                    skipped_atoms += 1;
                }
            }
        }
        Ok(Self {
            kind: SchemeKind::Polarity,
            labels: vec!["Polar", "Nonpolar"],
            assignments,
            residue_ids: Vec::new(),
            skipped_atoms,
        })
    }

    /// Builds the secondary-structure table from per-residue assignments.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingEntry`] when a residue of the
    /// selection has no class assignment; unlike polarity misses, a gap
    /// here means the assignment file belongs to a different structure.
    pub fn secondary_structure(
        structure: &ProteinStructure,
        selection: &[usize],
        classes: &HashMap<isize, char>,
    ) -> Result<Self, EngineError> {
        let mut assignments = Vec::with_capacity(selection.len());
        for &atom_index in selection {
            let (_, residue) = resolve(structure, atom_index)?;
            let letter = classes
                .get(&residue.number)
                .ok_or_else(|| EngineError::MissingEntry {
                    scheme: SchemeKind::SecondaryStructure.name(),
                    key: format!("residue {}", residue.number),
                })?;
            let category = chem::STRIDE_CLASS_LETTERS
                .iter()
                .position(|class| class.starts_with(*letter))
                .ok_or_else(|| EngineError::MissingEntry {
                    scheme: SchemeKind::SecondaryStructure.name(),
                    key: format!("class '{}'", letter),
                })?;
            assignments.push(Some(category));
        }
        Ok(Self {
            kind: SchemeKind::SecondaryStructure,
            labels: chem::STRIDE_CLASS_LETTERS.to_vec(),
            assignments,
            residue_ids: Vec::new(),
            skipped_atoms: 0,
        })
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    /// Returns the ordered category labels.
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of selection positions this table covers.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns how many selection atoms have no category assignment.
    pub fn skipped_atoms(&self) -> usize {
        self.skipped_atoms
    }

    /// Tallies the categories of the given selection positions.
    ///
    /// Atom-level schemes count positions; the residue-level scheme counts
    /// distinct residues touched by the positions. Positions must be valid
    /// for this table's length and free of duplicates.
    pub fn tally(&self, positions: &[usize]) -> Vec<u64> {
        let mut counts = vec![0u64; self.labels.len()];
        match self.kind.level() {
            TallyLevel::Atom => {
                for &position in positions {
                    if let Some(category) = self.assignments[position] {
                        counts[category] += 1;
                    }
                }
            }
            TallyLevel::Residue => {
                let mut seen = HashSet::new();
                for &position in positions {
                    if let Some(category) = self.assignments[position] {
                        if seen.insert(self.residue_ids[position]) {
                            counts[category] += 1;
                        }
                    }
                }
            }
        }
        counts
    }

    /// Tallies every position the table covers.
    pub fn tally_full(&self) -> Vec<u64> {
        let positions: Vec<usize> = (0..self.assignments.len()).collect();
        self.tally(&positions)
    }
}

fn resolve(
    structure: &ProteinStructure,
    atom_index: usize,
) -> Result<(&Atom, &Residue), EngineError> {
    let atom = structure.atom(atom_index).ok_or_else(|| {
        EngineError::Internal(format!(
            "selection references atom {} outside the structure",
            atom_index
        ))
    })?;
    let residue = structure.residue(atom.residue_index).ok_or_else(|| {
        EngineError::Internal(format!(
            "atom {} references missing residue {}",
            atom_index, atom.residue_index
        ))
    })?;
    Ok((atom, residue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn tripeptide() -> ProteinStructure {
        // ASP carries a net charge of -1, ALA is hydrophobic, SER neither.
        let mut structure = ProteinStructure::new();
        structure.add_atom(1, "N", 1, "ASP", Point3::origin(), -0.6, 1.55);
        structure.add_atom(2, "CA", 1, "ASP", Point3::origin(), -0.4, 1.70);
        structure.add_atom(3, "N", 2, "ALA", Point3::origin(), -0.2, 1.55);
        structure.add_atom(4, "CA", 2, "ALA", Point3::origin(), 0.2, 1.70);
        structure.add_atom(5, "N", 3, "SER", Point3::origin(), -0.1, 1.55);
        structure.add_atom(6, "OG", 3, "SER", Point3::origin(), 0.1, 1.52);
        structure
    }

    #[test]
    fn burial_table_tallies_positions_by_flag() {
        let flags = vec![true, false, true, false];
        let table = ClassificationTable::burial(4, &flags).unwrap();

        assert_eq!(table.labels(), &["Buried", "Surface"]);
        assert_eq!(table.tally(&[0, 2]), vec![2, 0]);
        assert_eq!(table.tally(&[1, 3]), vec![0, 2]);
        assert_eq!(table.tally_full(), vec![2, 2]);
    }

    #[test]
    fn burial_table_rejects_wrong_length() {
        let result = ClassificationTable::burial(4, &[true, false]);
        assert!(matches!(
            result,
            Err(EngineError::LengthMismatch {
                expected: 4,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn residue_type_table_classifies_by_charge_then_name() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let settings = ClassificationSettings::default();
        let table =
            ClassificationTable::residue_type(&structure, &selection, &settings).unwrap();

        // One charged (ASP), one hydrophobic (ALA), one hydrophilic (SER).
        assert_eq!(table.tally_full(), vec![1, 1, 1]);
    }

    #[test]
    fn residue_type_table_counts_each_residue_once() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let settings = ClassificationSettings::default();
        let table =
            ClassificationTable::residue_type(&structure, &selection, &settings).unwrap();

        // Both positions belong to the ASP residue.
        assert_eq!(table.tally(&[0, 1]), vec![1, 0, 0]);
    }

    #[test]
    fn residue_type_table_honors_the_charge_cutoff() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let mut settings = ClassificationSettings::default();
        settings.charged_cutoff = 2.0;
        let table =
            ClassificationTable::residue_type(&structure, &selection, &settings).unwrap();

        // With the cutoff raised, ASP is no longer charged and falls
        // through to hydrophilic.
        assert_eq!(table.tally_full(), vec![0, 1, 2]);
    }

    #[test]
    fn polarity_table_classifies_by_scale_sign() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let settings = ClassificationSettings::default();
        let mut scale = HashMap::new();
        for res in ["ASP", "ALA", "SER"] {
            scale.insert((res.to_string(), "N".to_string()), 1.0);
            scale.insert((res.to_string(), "CA".to_string()), -1.0);
        }
        scale.insert(("SER".to_string(), "OG".to_string()), 1.0);

        let table =
            ClassificationTable::polarity(&structure, &selection, &scale, "amber99sb", &settings)
                .unwrap();
        assert_eq!(table.tally_full(), vec![4, 2]);
        assert_eq!(table.skipped_atoms(), 0);
    }

    #[test]
    fn polarity_table_skips_atoms_without_an_entry() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let settings = ClassificationSettings::default();
        let mut scale = HashMap::new();
        scale.insert(("ASP".to_string(), "N".to_string()), 1.0);

        let table =
            ClassificationTable::polarity(&structure, &selection, &scale, "amber99sb", &settings)
                .unwrap();
        assert_eq!(table.skipped_atoms(), 5);
        assert_eq!(table.tally_full(), vec![1, 0]);
    }

    #[test]
    fn polarity_table_applies_forcefield_corrections() {
        let mut structure = ProteinStructure::new();
        structure.add_atom(1, "OC1", 1, "GLY", Point3::origin(), -0.8, 1.48);
        let settings = ClassificationSettings::default();
        let mut scale = HashMap::new();
        scale.insert(("GLY".to_string(), "O".to_string()), 1.0);

        let table =
            ClassificationTable::polarity(&structure, &[0], &scale, "amber99sb", &settings)
                .unwrap();
        assert_eq!(table.tally_full(), vec![1, 0]);
        assert_eq!(table.skipped_atoms(), 0);
    }

    #[test]
    fn secondary_structure_table_maps_residue_classes() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let classes = HashMap::from([(1, 'H'), (2, 'E'), (3, 'C')]);

        let table =
            ClassificationTable::secondary_structure(&structure, &selection, &classes).unwrap();
        // Two atoms per residue, classes H, E, C.
        assert_eq!(table.tally_full(), vec![2, 0, 0, 2, 0, 0, 2]);
    }

    #[test]
    fn secondary_structure_table_fails_on_missing_residue() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let classes = HashMap::from([(1, 'H'), (2, 'E')]);

        let result = ClassificationTable::secondary_structure(&structure, &selection, &classes);
        assert!(matches!(
            result,
            Err(EngineError::MissingEntry { scheme: "ssclass", .. })
        ));
    }

    #[test]
    fn atom_level_tallies_sum_to_covered_positions() {
        let structure = tripeptide();
        let selection: Vec<usize> = (0..6).collect();
        let settings = ClassificationSettings::default();
        let mut scale = HashMap::new();
        scale.insert(("ASP".to_string(), "N".to_string()), 1.0);
        scale.insert(("ALA".to_string(), "CA".to_string()), -1.0);

        let table =
            ClassificationTable::polarity(&structure, &selection, &scale, "amber99sb", &settings)
                .unwrap();
        let total: u64 = table.tally_full().iter().sum();
        assert_eq!(total as usize + table.skipped_atoms(), table.len());
    }
}
