//! Implements the axial finite element model of a single pile and the analysis engine

mod analysis_engine;
mod axial_engine;
mod control_convergence;
mod curve;
mod element_spring;
mod element_trait;
mod element_truss;
mod engine_session;
mod pile;
mod uniaxial_model;
pub use crate::fem::analysis_engine::*;
pub use crate::fem::axial_engine::*;
pub use crate::fem::control_convergence::*;
pub use crate::fem::curve::*;
pub use crate::fem::element_spring::*;
pub use crate::fem::element_trait::*;
pub use crate::fem::element_truss::*;
pub use crate::fem::engine_session::*;
pub use crate::fem::pile::*;
pub use crate::fem::uniaxial_model::*;
