//! # Engine Module
//!
//! This module implements the analysis engine for protein hydration
//! characterization, turning per-atom order parameters and structure data
//! into classified, binned, and cumulatively tabulated statistics.
//!
//! ## Overview
//!
//! The engine sits between raw inputs (structures, order-parameter arrays,
//! indicator and scale tables) and the rendering layer. It generates the
//! descending phi threshold ladder, assigns every selection atom to a bin,
//! classifies atoms under the enabled schemes, and folds the bins into the
//! cumulative counts that drive frame rendering and series plots.
//!
//! ## Architecture
//!
//! The module is organized into submodules that handle successive stages of
//! the analysis:
//!
//! - **Configuration** ([`config`]) - Workflow parameters, classification
//!   settings, and their builders
//! - **Threshold Generation** ([`bins`]) - Evenly spaced descending ladders
//!   with the infinite sentinel
//! - **Classification** ([`classify`]) - Per-atom category tables for the
//!   four schemes
//! - **Tabulation** ([`binner`]) - Bin assignment, cumulative unions, and
//!   frame/series outputs
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user
//!   feedback mechanisms
//! - **Error Handling** ([`error`]) - Engine-specific error types and error
//!   propagation

pub mod binner;
pub mod bins;
pub mod classify;
pub mod config;
pub mod error;
pub mod progress;
