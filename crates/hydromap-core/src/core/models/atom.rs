use crate::core::chem;
use nalgebra::Point3;

/// Represents a single atom read from a structure file.
///
/// Atoms are stored in file order and addressed by their position in that
/// order (a dense 0-based index). This index is the identity used to align
/// the structure with the external per-atom arrays (order parameters,
/// burial indicators) produced upstream of this library.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "OC1").
    pub name: String,
    /// The index of the parent residue within the owning structure.
    pub residue_index: usize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The partial atomic charge in elementary charge units.
    pub partial_charge: f64,
    /// The atomic radius in Angstroms, as assigned by the source file.
    pub radius: f64,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `serial` - The atom serial number from the source file.
    /// * `name` - The name of the atom.
    /// * `residue_index` - The index of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, name: &str, residue_index: usize, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            residue_index,
            position,
            partial_charge: 0.0,
            radius: 0.0,
        }
    }

    /// Returns `true` if this atom is a heavy (non-hydrogen) atom.
    pub fn is_heavy(&self) -> bool {
        chem::is_heavy_atom(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "CA", 0, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_index, 0);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.partial_charge, 0.0);
        assert_eq!(atom.radius, 0.0);
    }

    #[test]
    fn is_heavy_distinguishes_hydrogen_from_heavy_atoms() {
        assert!(Atom::new(1, "CA", 0, Point3::origin()).is_heavy());
        assert!(Atom::new(2, "OC1", 0, Point3::origin()).is_heavy());
        assert!(!Atom::new(3, "HA", 0, Point3::origin()).is_heavy());
        assert!(!Atom::new(4, "H1", 0, Point3::origin()).is_heavy());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(1, "N", 0, Point3::new(0.0, 0.0, 0.0));
        atom1.partial_charge = -0.47;
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
