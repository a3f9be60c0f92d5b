use crate::StrError;
use russell_lab::math::PI;
use serde::{Deserialize, Serialize};

/// Holds the geometry and the elasticity modulus of a single pile
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct PileGeometry {
    /// Pile length
    pub length: f64,

    /// Pile (outer) radius
    pub radius: f64,

    /// Cross-sectional area overriding the solid circular section `π・r²`
    pub area: Option<f64>,

    /// Elasticity modulus of the pile material
    pub young: f64,
}

impl PileGeometry {
    /// Allocates a new instance
    pub fn new(length: f64, radius: f64, area: Option<f64>, young: f64) -> Result<Self, StrError> {
        let geometry = PileGeometry {
            length,
            radius,
            area,
            young,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks that all values are positive
    pub fn validate(&self) -> Result<(), StrError> {
        if !(self.length > 0.0) {
            return Err("the pile length must be > 0.0");
        }
        if !(self.radius > 0.0) {
            return Err("the pile radius must be > 0.0");
        }
        if let Some(area) = self.area {
            if !(area > 0.0) {
                return Err("the cross-sectional area of the pile must be > 0.0");
            }
        }
        if !(self.young > 0.0) {
            return Err("the elasticity modulus must be > 0.0");
        }
        Ok(())
    }

    /// Returns the cross-sectional area (explicit or `π・r²`)
    pub fn area(&self) -> f64 {
        match self.area {
            Some(area) => area,
            None => PI * self.radius * self.radius,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
