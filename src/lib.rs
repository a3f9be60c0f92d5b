//! Pilecal: axial load-displacement model of a single pile in layered soil and its calibration
//!
//! The crate builds a one-dimensional finite element idealization of a pile (an elastic
//! chain of truss elements with nonlinear soil springs at every node), runs an incremental
//! static analysis of the head load, and fits four soil-pile interaction parameters to a
//! measured load test with a differential evolution optimizer.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

/// Defines a function of the pseudo-time (load factor) used to scale load patterns
pub type FnTime = fn(f64) -> f64;

pub mod base;
pub mod calibration;
pub mod fem;
pub mod material;
pub mod prelude;
