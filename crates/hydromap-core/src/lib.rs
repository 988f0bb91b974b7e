//! # HydroMap Core Library
//!
//! A library for mapping protein hydration from INDUS umbrella-sampling output,
//! tabulating per-atom dewetting order parameters against structural
//! classifications and rendering the results as figures and movies.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`ProteinStructure`), chemistry constants, and I/O for PQR structures,
//!   per-atom tables, and INDUS logs.
//!
//! - **[`engine`]: The Logic Core.** This layer turns loaded inputs into
//!   tabulated results: the phi threshold ladder, the `HydrationBinner`, and
//!   the classification schemes (`ClassificationTable`).
//!
//! - **[`plot`]: The Rendering Layer.** Pie-chart frames, cumulative-count
//!   plots, and time-series figures drawn with `plotters`.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the lower layers together to execute complete analyses,
//!   such as the hydration-characteristics movie pipeline. It provides a
//!   simple and powerful entry point for end-users of the library.

pub mod core;
pub mod engine;
pub mod plot;
pub mod workflows;
