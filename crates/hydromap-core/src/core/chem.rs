use phf::{Map, Set, phf_map, phf_set};

static STANDARD_AMINO_ACIDS: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "HID", "HIE", "HIP", "CYX", "CYM", "ASH", "GLH", "LYN",
};

static DEFAULT_HYDROPHOBIC_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "VAL", "LEU", "ILE", "PHE", "PRO", "TRP",
};

static AMBER99SB_ATOM_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "OC1" => "O",
    "OC2" => "O",
};

/// The STRIDE secondary-structure class letters in canonical order.
pub const STRIDE_CLASS_LETTERS: [&str; 7] = ["H", "G", "I", "E", "T", "B", "C"];

/// Checks whether a residue name is one of the standard amino acids.
///
/// Recognizes the twenty canonical residue names plus the common
/// protonation-state variants (e.g., HID/HIE/HIP for histidine) emitted
/// by simulation packages. Matching is case-sensitive on trimmed input,
/// as residue names in structure files are uppercase by convention.
pub fn is_amino_acid(residue_name: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains(residue_name.trim())
}

/// Returns the built-in hydrophobic residue names.
///
/// This is the default used by the residue-type classification when no
/// override is supplied through the classification settings file.
pub fn default_hydrophobic_residues() -> Vec<String> {
    let mut names: Vec<String> = DEFAULT_HYDROPHOBIC_RESIDUES
        .iter()
        .map(|s| s.to_string())
        .collect();
    names.sort_unstable();
    names
}

/// Returns the built-in atom-name corrections for a force field, if any.
///
/// Simulation packages rename a handful of atoms relative to the names used
/// by published per-atom scales; amber99sb writes the C-terminal carboxylate
/// oxygens as OC1/OC2 where the scale tables key on O. Force fields without
/// known renames get an empty correction set.
pub fn default_atom_aliases(force_field: &str) -> Vec<(String, String)> {
    match force_field {
        "amber99sb" => {
            let mut pairs: Vec<(String, String)> = AMBER99SB_ATOM_ALIASES
                .entries()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect();
            pairs.sort_unstable();
            pairs
        }
        _ => Vec::new(),
    }
}

pub fn is_heavy_atom(atom_name: &str) -> bool {
    let first_char = atom_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase());
    !matches!(first_char, Some('H') | Some('D'))
}
