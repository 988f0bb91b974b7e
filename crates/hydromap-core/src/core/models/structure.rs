use super::atom::Atom;
use super::residue::Residue;
use nalgebra::Point3;

/// Represents a complete structure as an ordered collection of atoms
/// grouped into residues.
///
/// Atoms keep the order of the source file; consecutive records sharing a
/// residue number and name are grouped into one residue. The position of an
/// atom in [`ProteinStructure::atoms`] is its index everywhere else in the
/// library, so the structure must be loaded from the same file the per-atom
/// arrays were computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinStructure {
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
}

impl ProteinStructure {
    /// Creates a new, empty `ProteinStructure`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom record, grouping it into the current residue or
    /// opening a new one when the residue number or name changes.
    ///
    /// # Arguments
    ///
    /// * `serial` - The atom serial number from the source file.
    /// * `name` - The atom name.
    /// * `residue_number` - The residue sequence number the atom belongs to.
    /// * `residue_name` - The residue name the atom belongs to.
    /// * `position` - The atom coordinates in Angstroms.
    /// * `partial_charge` - The partial charge in elementary charge units.
    /// * `radius` - The atomic radius in Angstroms.
    ///
    /// # Return
    ///
    /// Returns the index assigned to the new atom.
    #[allow(clippy::too_many_arguments)]
    pub fn add_atom(
        &mut self,
        serial: usize,
        name: &str,
        residue_number: isize,
        residue_name: &str,
        position: Point3<f64>,
        partial_charge: f64,
        radius: f64,
    ) -> usize {
        let needs_new_residue = match self.residues.last() {
            Some(residue) => residue.number != residue_number || residue.name != residue_name,
            None => true,
        };
        if needs_new_residue {
            self.residues.push(Residue::new(residue_number, residue_name));
        }
        let residue_index = self.residues.len() - 1;
        let atom_index = self.atoms.len();

        let mut atom = Atom::new(serial, name, residue_index, position);
        atom.partial_charge = partial_charge;
        atom.radius = radius;
        self.atoms.push(atom);
        self.residues[residue_index].add_atom(atom_index, partial_charge);

        atom_index
    }

    /// Returns all atoms in file order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns all residues in file order.
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Returns the atom at `index`, if it exists.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns the residue at `index`, if it exists.
    pub fn residue(&self, index: usize) -> Option<&Residue> {
        self.residues.get(index)
    }

    /// Returns the residue the atom at `atom_index` belongs to.
    pub fn residue_of_atom(&self, atom_index: usize) -> Option<&Residue> {
        self.atoms
            .get(atom_index)
            .and_then(|atom| self.residues.get(atom.residue_index))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Returns the ascending indices of heavy atoms belonging to standard
    /// amino-acid residues.
    ///
    /// This is the atom selection every classification scheme and order
    /// parameter array is defined over: solvent, ions, and hydrogens are
    /// excluded.
    pub fn protein_heavy_atoms(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| {
                atom.is_heavy() && self.residues[atom.residue_index].is_amino_acid()
            })
            .map(|(index, _)| index)
            .collect()
    }
}
