//! Implements the base structures: configuration, soil data, and calibration parameters

mod calibration_params;
mod config;
mod enums;
mod pile_geometry;
mod samples;
mod soil_layer;
mod soil_profile;
mod tag_generator;
pub use crate::base::calibration_params::*;
pub use crate::base::config::*;
pub use crate::base::enums::*;
pub use crate::base::pile_geometry::*;
pub use crate::base::samples::*;
pub use crate::base::soil_layer::*;
pub use crate::base::soil_profile::*;
pub use crate::base::tag_generator::*;
