use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of calibration parameters
pub const N_CALIBRATION_PARAMS: usize = 4;

/// Holds the dimensionless soil-pile interaction parameters subject to calibration
///
/// The array form used by the optimizer is `[Rfb, Sbu, alpha21, Rfs]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[allow(non_snake_case)]
pub struct CalibrationParams {
    /// Corrective factor of the initial tip stiffness (construction effects, soil type, ...)
    pub Rfb: f64,

    /// Tip settlement at which the slope of the tip load-transfer curve changes
    pub Sbu: f64,

    /// Ratio between the post-break and the initial tip stiffness
    pub alpha21: f64,

    /// Corrective factor of the ultimate skin friction
    pub Rfs: f64,
}

impl CalibrationParams {
    /// Allocates a new instance
    #[allow(non_snake_case)]
    pub fn new(Rfb: f64, Sbu: f64, alpha21: f64, Rfs: f64) -> Result<Self, StrError> {
        if !(Rfb > 0.0) {
            return Err("Rfb must be > 0.0");
        }
        if !(Sbu > 0.0) {
            return Err("Sbu must be > 0.0");
        }
        if !(alpha21 >= 0.0) {
            return Err("alpha21 must be ≥ 0.0");
        }
        if !(Rfs > 0.0) {
            return Err("Rfs must be > 0.0");
        }
        Ok(CalibrationParams { Rfb, Sbu, alpha21, Rfs })
    }

    /// Returns the parameters used when no calibration is available
    pub fn from_default() -> Self {
        CalibrationParams {
            Rfb: 1.0,
            Sbu: 5e-3,
            alpha21: 0.01,
            Rfs: 1.0,
        }
    }

    /// Allocates a new instance from `[Rfb, Sbu, alpha21, Rfs]`
    pub fn from_array(x: &[f64]) -> Result<Self, StrError> {
        if x.len() != N_CALIBRATION_PARAMS {
            return Err("the array of calibration parameters must have 4 values");
        }
        CalibrationParams::new(x[0], x[1], x[2], x[3])
    }

    /// Returns `[Rfb, Sbu, alpha21, Rfs]`
    pub fn to_array(&self) -> [f64; N_CALIBRATION_PARAMS] {
        [self.Rfb, self.Sbu, self.alpha21, self.Rfs]
    }
}

impl fmt::Display for CalibrationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rfb = {:?}, Sbu = {:?}, alpha21 = {:?}, Rfs = {:?}",
            self.Rfb, self.Sbu, self.alpha21, self.Rfs
        )
    }
}

/// Holds the search box of the calibration parameters as `(min, max)` pairs
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[allow(non_snake_case)]
pub struct ParamBounds {
    pub Rfb: (f64, f64),
    pub Sbu: (f64, f64),
    pub alpha21: (f64, f64),
    pub Rfs: (f64, f64),
}

impl ParamBounds {
    /// Allocates a new instance with the default search box
    pub fn new() -> Self {
        ParamBounds {
            Rfb: (0.8, 1.0),
            Sbu: (1e-3, 9e-3),
            alpha21: (0.0, 1.0),
            Rfs: (0.8, 1.0),
        }
    }

    /// Returns the bounds in the order of the array form
    pub fn to_array(&self) -> [(f64, f64); N_CALIBRATION_PARAMS] {
        [self.Rfb, self.Sbu, self.alpha21, self.Rfs]
    }

    /// Checks the bounds
    ///
    /// Every interval must be non-empty and the lower bounds of `Rfb`, `Sbu`, and `Rfs` positive.
    pub fn validate(&self) -> Result<(), StrError> {
        for (min, max) in self.to_array() {
            if !(min <= max) {
                return Err("the lower bound must be ≤ the upper bound");
            }
        }
        if !(self.Rfb.0 > 0.0 && self.Sbu.0 > 0.0 && self.Rfs.0 > 0.0) {
            return Err("the lower bounds of Rfb, Sbu, and Rfs must be > 0.0");
        }
        if !(self.alpha21.0 >= 0.0) {
            return Err("the lower bound of alpha21 must be ≥ 0.0");
        }
        Ok(())
    }

    /// Returns true if the parameters are within the box
    pub fn contains(&self, params: &CalibrationParams) -> bool {
        self.to_array()
            .iter()
            .zip(params.to_array())
            .all(|(&(min, max), x)| min <= x && x <= max)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
