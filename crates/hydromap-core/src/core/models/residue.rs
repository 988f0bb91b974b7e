use crate::core::chem;

/// Represents a residue as a contiguous group of atoms from a structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// The residue sequence number from the source file.
    pub number: isize,
    /// The name of the residue (e.g., "ALA", "GLY").
    pub name: String,
    pub(crate) atoms: Vec<usize>,
    pub(crate) total_charge: f64,
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            atoms: Vec::new(),
            total_charge: 0.0,
        }
    }

    pub(crate) fn add_atom(&mut self, atom_index: usize, partial_charge: f64) {
        self.atoms.push(atom_index);
        self.total_charge += partial_charge;
    }

    /// Returns the indices of the atoms belonging to this residue, in file order.
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Returns the total charge of the residue, summed over all of its atoms
    /// (hydrogens included).
    pub fn total_charge(&self) -> f64 {
        self.total_charge
    }

    /// Returns `true` if this residue is a standard amino acid.
    pub fn is_amino_acid(&self) -> bool {
        chem::is_amino_acid(&self.name)
    }
}
