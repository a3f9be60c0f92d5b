use crate::StrError;

/// Implements the linear elastic relation of the pile structure
///
/// ```text
/// σ = E・ε
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearElastic {
    young: f64,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(young: f64) -> Result<Self, StrError> {
        if !(young > 0.0) {
            return Err("the elasticity modulus must be > 0.0");
        }
        Ok(LinearElastic { young })
    }

    /// Returns the elasticity (Young's) modulus
    pub fn modulus(&self) -> f64 {
        self.young
    }

    /// Calculates the stress
    pub fn stress(&self, strain: f64) -> f64 {
        self.young * strain
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
