//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! protein structures in hydromap, providing the foundation for atom
//! selection and classification.
//!
//! ## Overview
//!
//! The models are deliberately flat: a structure is an ordered list of atoms
//! grouped into residues, mirroring the record order of the file it was read
//! from. Atoms are addressed by dense 0-based indices so that externally
//! computed per-atom arrays (order parameters, burial indicators) line up
//! with the structure without any translation table.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with coordinates, charge, and radius
//! - [`residue`] - Residue grouping with accumulated total charge
//! - [`structure`] - Complete structure with the protein heavy-atom selection

pub mod atom;
pub mod residue;
pub mod structure;
