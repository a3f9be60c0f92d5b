use crate::base::{Config, SoilProfile};
use crate::StrError;
use russell_lab::math::PI;

/// Implements the hyperbolic load-transfer (t-z) relation of the skin friction at a pile node
///
/// The force mobilized on the pile segment tributary to the node is
///
/// ```text
///            δ                  1              1
/// F(δ) = ————————     with  a = ——     and b = ————
///         a + b・δ                Ke             Fult
/// ```
///
/// where `Ke` is the initial stiffness and `Fult` the ultimate friction force of the segment.
///
/// # References
///
/// * Lee C.Y. (1993) Settlement of pile groups: practical approach, J. Geotech. Eng., 119(9):1449-1461
#[derive(Clone, Debug, PartialEq)]
pub struct FrictionLaw {
    /// Depth of the node
    depth: f64,

    /// Initial stiffness `Ke` (force/length)
    ke: f64,

    /// Ultimate friction force `Fult = τf/Rfs・As`
    tau_ult: f64,

    /// Log-spaced displacement samples used to build the multi-linear table
    samples: Vec<f64>,
}

impl FrictionLaw {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `profile` -- the soil profile
    /// * `pile_radius` -- the pile radius
    /// * `depth` -- the depth of the pile node
    /// * `element_length` -- the length of the pile segment tributary to the node
    /// * `rfs` -- the corrective factor of the ultimate friction
    /// * `config` -- holds the resolution of the sampled table
    pub fn new(
        profile: &SoilProfile,
        pile_radius: f64,
        depth: f64,
        element_length: f64,
        rfs: f64,
        config: &Config,
    ) -> Result<Self, StrError> {
        if !(pile_radius > 0.0) {
            return Err("the pile radius must be > 0.0");
        }
        if !(element_length > 0.0) {
            return Err("the element length must be > 0.0");
        }
        if !(rfs > 0.0) {
            return Err("Rfs must be > 0.0");
        }
        let rm = influence_radius(profile);
        if !(rm > pile_radius) {
            return Err("the influence radius must be greater than the pile radius");
        }
        let area = element_length * 2.0 * PI * pile_radius;
        let ke = profile.shear_modulus(depth)? / (pile_radius * f64::ln(rm / pile_radius)) * area;
        let tau_ult = profile.tau_f(depth)? / rfs * area;
        Ok(FrictionLaw {
            depth,
            ke,
            tau_ult,
            samples: geomspace(config.friction_delta_min, config.delta_max, config.friction_n_sample),
        })
    }

    /// Returns the depth of the node
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns the initial stiffness `Ke = 1/a`
    pub fn ke(&self) -> f64 {
        self.ke
    }

    /// Returns the ultimate friction force `Fult = 1/b`
    pub fn tau_ult(&self) -> f64 {
        self.tau_ult
    }

    /// Calculates the friction force for a given (non-negative) displacement
    pub fn force(&self, delta: f64) -> f64 {
        if delta <= 0.0 {
            return 0.0;
        }
        // δ / (1/Ke + δ/Fult) written without divisions by Fult (which may be zero)
        self.ke * self.tau_ult * delta / (self.tau_ult + self.ke * delta)
    }

    /// Returns the (displacement, force) table starting at the origin
    pub fn breakpoints(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.samples.len() + 1);
        points.push((0.0, 0.0));
        points.extend(self.samples.iter().map(|&d| (d, self.force(d))));
        points
    }
}

/// Calculates the enhancement ratio `ρm = Σ Ḡᵢ・Lᵢ / (Gmax・L)`
pub fn enhancement_ratio(profile: &SoilProfile) -> f64 {
    let den = profile.max_shear_modulus() * profile.pile_length();
    profile
        .layers()
        .iter()
        .map(|layer| layer.avg_shear_modulus() * layer.length() / den)
        .sum()
}

/// Calculates the influence radius `rm = 2.5・L・ρm・(1 - ν̄)`
pub fn influence_radius(profile: &SoilProfile) -> f64 {
    2.5 * profile.pile_length() * enhancement_ratio(profile) * (1.0 - profile.avg_poisson_ratio())
}

/// Returns `n` log-spaced values from `min` to `max` (both included)
fn geomspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    let ratio = max / min;
    let mut values: Vec<f64> = (0..n)
        .map(|i| min * f64::powf(ratio, (i as f64) / ((n - 1) as f64)))
        .collect();
    values[0] = min;
    values[n - 1] = max;
    values
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
