//! # Plot Module
//!
//! This module renders the analysis outputs as figures: per-frame pie
//! charts of the classification schemes, cumulative phi-series line plots,
//! and the water-count time series of an INDUS log.
//!
//! ## Overview
//!
//! Rendering is a pure sink: it consumes the tallies produced by the
//! engine and never recomputes them. All figures share one canvas
//! convention (a 6x4 inch plot at a configurable resolution) and select
//! their backend from the target file extension, so the same call renders
//! raster or vector output.
//!
//! ## Architecture
//!
//! - **Canvas Conventions** ([`canvas`]) - Figure sizing and backend
//!   selection shared by every renderer
//! - **Palettes** ([`palette`]) - The base and wetted color pairs of each
//!   classification scheme
//! - **Pie Frames** ([`pie`]) - Composition, sentinel-bin, and ensemble
//!   frame rendering
//! - **Line Series** ([`series`]) - Cumulative counts against phi and
//!   water counts against time
//! - **Error Handling** ([`error`]) - Rendering error types

pub(crate) mod canvas;
pub mod error;
pub mod palette;
pub mod pie;
pub mod series;
