//! # Core Module
//!
//! This module provides the fundamental building blocks for hydration
//! analysis of biased protein simulations, serving as the data layer of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the data structures and file handling that
//! the classification and binning engine is built on. It knows how to
//! represent a protein structure as an indexable atom list, how to read the
//! inputs an analysis needs, and how to write its non-graphical outputs.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, and the heavy-atom selection
//! - **File I/O** ([`io`]) - PQR structures, CSV tables, INDUS logs, and PDB output
//! - **Chemical Knowledge** ([`chem`]) - Static residue and atom-name tables
//!
//! ## Key Capabilities
//!
//! - **Positional atom identity** so external per-atom arrays align without translation
//! - **Fail-fast parsers** with line-numbered errors for every input format
//! - **Force-field-aware atom naming** for per-atom scale lookups

pub mod chem;
pub mod io;
pub mod models;
