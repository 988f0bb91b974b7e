//! # Workflows Module
//!
//! This module provides high-level workflow implementations that orchestrate complete
//! hydration analyses in HydroMap.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of HydroMap. They encapsulate
//! an entire analysis pipeline, from input loading through figure and movie output.
//! Each workflow handles file loading, parameter validation, progress reporting,
//! and result organization, providing a clean and simple API for multi-stage analyses.
//!
//! ## Architecture
//!
//! The module is organized around specific analyses:
//!
//! - **Characteristics Workflow** ([`chars`]) - Per-atom hydration order parameters
//!   binned over a phi threshold ladder and cross-tabulated against classification
//!   schemes, rendered as pie-chart frame sets, cumulative-count plots, and movies.
//! - **Waters Workflow** ([`waters`]) - Windowed averaging of an INDUS water-count
//!   log with optional accumulation-file output and a time-series plot.
//! - **Movie Encoding** ([`movie`]) - Frame-set stitching through an external
//!   `ffmpeg` subprocess.

pub mod chars;
pub mod error;
pub mod movie;
pub mod waters;
