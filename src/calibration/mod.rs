//! Implements the calibration of the pile model against a measured load test

mod calibrator;
mod differential_evolution;
mod param_optimizer;
pub use crate::calibration::calibrator::*;
pub use crate::calibration::differential_evolution::*;
pub use crate::calibration::load_test::*;
pub use crate::calibration::param_optimizer::*;
