//! Provides input/output functionality for structure and data file formats.
//!
//! This module contains implementations for reading the file formats the
//! hydration analysis consumes (PQR structures, CSV data tables, INDUS
//! water-count logs) and for writing its non-graphical outputs (B-factor
//! PDB snapshots, cumulative-count CSV series). It provides a trait-based
//! interface for structure input so callers do not depend on a concrete
//! format.

pub mod indus;
pub mod pdb;
pub mod pqr;
pub mod tables;
pub mod traits;
