use crate::base::{CalibrationParams, SoilProfile};
use crate::StrError;
use russell_lab::math::PI;

/// Implements the bilinear load-transfer (q-z) relation of the end bearing at the pile tip
///
/// ```text
///  F
///  ↑                    slope k2 = α21・k1
///  |           _______----------
///  |      .--''
///  |    .'  slope k1 = k1b / Rfb
///  |  .'
///  o-------|--------------------→ δ
///         Sbu                 δmax
///
///             4・Gb
/// k1b = ——————————————— ・ π・r²
///        π・r・(1 - νb)
/// ```
///
/// where `Gb` and `νb` are the shear modulus and Poisson coefficient at the tip.
#[derive(Clone, Debug, PartialEq)]
pub struct TipLaw {
    /// Initial stiffness (force/length)
    k1: f64,

    /// Post-break stiffness (force/length)
    k2: f64,

    /// Displacement at the slope change
    sbu: f64,

    /// Largest displacement of the table
    delta_max: f64,
}

impl TipLaw {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `profile` -- the soil profile; the tip is at `profile.pile_length()`
    /// * `pile_radius` -- the pile radius
    /// * `params` -- provides `Rfb`, `Sbu`, and `alpha21`
    /// * `delta_max` -- the largest displacement of the table; must be greater than `Sbu`
    pub fn new(
        profile: &SoilProfile,
        pile_radius: f64,
        params: &CalibrationParams,
        delta_max: f64,
    ) -> Result<Self, StrError> {
        if !(pile_radius > 0.0) {
            return Err("the pile radius must be > 0.0");
        }
        if !(params.Rfb > 0.0) {
            return Err("Rfb must be > 0.0");
        }
        if !(params.alpha21 >= 0.0) {
            return Err("alpha21 must be ≥ 0.0");
        }
        if !(params.Sbu > 0.0 && params.Sbu < delta_max) {
            return Err("Sbu must be in (0, delta_max)");
        }
        let gb = profile.tip_shear_modulus()?;
        let nub = profile.tip_poisson_ratio()?;
        let tip_area = PI * pile_radius * pile_radius;
        let k1b = (4.0 * gb / (PI * pile_radius * (1.0 - nub))) * tip_area;
        let k1 = k1b / params.Rfb;
        Ok(TipLaw {
            k1,
            k2: k1 * params.alpha21,
            sbu: params.Sbu,
            delta_max,
        })
    }

    /// Returns the initial stiffness
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Returns the post-break stiffness
    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// Calculates the bearing force for a given (non-negative) displacement
    pub fn force(&self, delta: f64) -> f64 {
        if delta <= 0.0 {
            0.0
        } else if delta <= self.sbu {
            self.k1 * delta
        } else {
            self.sbu * self.k1 + (delta - self.sbu) * self.k2
        }
    }

    /// Returns the three (displacement, force) breakpoints
    pub fn breakpoints(&self) -> Vec<(f64, f64)> {
        let f_break = self.sbu * self.k1;
        vec![
            (0.0, 0.0),
            (self.sbu, f_break),
            (self.delta_max, f_break + (self.delta_max - self.sbu) * self.k2),
        ]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
