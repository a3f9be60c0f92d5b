//! Makes available common structures needed to run a pile analysis or a calibration
//!
//! You may write `use pilecal::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{CalibrationParams, Config, Dof, ParamBounds, PileGeometry, Samples, SoilLayer, SoilProfile};
pub use crate::calibration::{CalibrationResult, Calibrator, LoadTestResult, ParamOptimizer};
pub use crate::fem::{AnalysisEngine, AxialEngine, Curve, EngineSession, Pile};
