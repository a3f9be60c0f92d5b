use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the properties of a soil layer crossed by the pile
///
/// The properties vary linearly with depth between the top (`up_*`) and
/// bottom (`bottom_*`) values of the layer.
///
/// # Notation
///
/// * `z` -- depth, positive downwards, measured from the pile head
/// * `G(z)` -- shear modulus
/// * `ν(z)` -- Poisson's coefficient
/// * `τf(z)` -- ultimate (skin friction) shear stress
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "SoilLayerData")]
pub struct SoilLayer {
    /// Depth of the top of the layer
    up_depth: f64,

    /// Depth of the bottom of the layer
    bottom_depth: f64,

    /// Shear modulus at the top of the layer
    up_shear_modulus: f64,

    /// Shear modulus at the bottom of the layer
    bottom_shear_modulus: f64,

    /// Poisson's coefficient at the top of the layer
    up_poisson_ratio: f64,

    /// Poisson's coefficient at the bottom of the layer
    bottom_poisson_ratio: f64,

    /// Ultimate shear stress at the top of the layer
    up_tau_f: f64,

    /// Ultimate shear stress at the bottom of the layer
    bottom_tau_f: f64,
}

/// Holds the raw data of a layer before validation (deserialization)
#[derive(Deserialize)]
struct SoilLayerData {
    up_depth: f64,
    bottom_depth: f64,
    up_shear_modulus: f64,
    bottom_shear_modulus: f64,
    up_poisson_ratio: f64,
    bottom_poisson_ratio: f64,
    up_tau_f: f64,
    bottom_tau_f: f64,
}

impl TryFrom<SoilLayerData> for SoilLayer {
    type Error = StrError;
    fn try_from(data: SoilLayerData) -> Result<Self, Self::Error> {
        SoilLayer::new(
            (data.up_depth, data.bottom_depth),
            (data.up_shear_modulus, data.bottom_shear_modulus),
            (data.up_poisson_ratio, data.bottom_poisson_ratio),
            (data.up_tau_f, data.bottom_tau_f),
        )
    }
}

impl SoilLayer {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `depths` -- (up, bottom) with `0 ≤ up < bottom`
    /// * `shear_modulus` -- (up, bottom) values; must be positive
    /// * `poisson_ratio` -- (up, bottom) values; must be in `[0, 0.5]`
    /// * `tau_f` -- (up, bottom) values; must be non-negative
    pub fn new(
        depths: (f64, f64),
        shear_modulus: (f64, f64),
        poisson_ratio: (f64, f64),
        tau_f: (f64, f64),
    ) -> Result<Self, StrError> {
        let (up_depth, bottom_depth) = depths;
        if !(up_depth >= 0.0) {
            return Err("the top depth of the layer must be ≥ 0.0");
        }
        if !(bottom_depth > up_depth) {
            return Err("the bottom depth of the layer must be greater than the top depth");
        }
        if !(shear_modulus.0 > 0.0 && shear_modulus.1 > 0.0) {
            return Err("the shear modulus of the layer must be > 0.0");
        }
        let poisson_ok = |v: f64| v >= 0.0 && v <= 0.5;
        if !(poisson_ok(poisson_ratio.0) && poisson_ok(poisson_ratio.1)) {
            return Err("the Poisson coefficient of the layer must be in [0.0, 0.5]");
        }
        if !(tau_f.0 >= 0.0 && tau_f.1 >= 0.0) {
            return Err("the ultimate shear stress of the layer must be ≥ 0.0");
        }
        Ok(SoilLayer {
            up_depth,
            bottom_depth,
            up_shear_modulus: shear_modulus.0,
            bottom_shear_modulus: shear_modulus.1,
            up_poisson_ratio: poisson_ratio.0,
            bottom_poisson_ratio: poisson_ratio.1,
            up_tau_f: tau_f.0,
            bottom_tau_f: tau_f.1,
        })
    }

    /// Checks the data (e.g., after deserialization)
    pub fn validate(&self) -> Result<(), StrError> {
        SoilLayer::new(
            (self.up_depth, self.bottom_depth),
            (self.up_shear_modulus, self.bottom_shear_modulus),
            (self.up_poisson_ratio, self.bottom_poisson_ratio),
            (self.up_tau_f, self.bottom_tau_f),
        )
        .map(|_| ())
    }

    /// Returns the depth of the top of the layer
    pub fn up_depth(&self) -> f64 {
        self.up_depth
    }

    /// Returns the depth of the bottom of the layer
    pub fn bottom_depth(&self) -> f64 {
        self.bottom_depth
    }

    /// Returns the thickness of the layer
    pub fn length(&self) -> f64 {
        self.bottom_depth - self.up_depth
    }

    /// Returns true if the depth is within `[up_depth, bottom_depth]`
    pub fn contains(&self, depth: f64) -> bool {
        self.up_depth <= depth && depth <= self.bottom_depth
    }

    /// Returns the mean of the top and bottom shear moduli
    pub fn avg_shear_modulus(&self) -> f64 {
        (self.up_shear_modulus + self.bottom_shear_modulus) / 2.0
    }

    /// Returns the largest of the top and bottom shear moduli
    pub fn max_shear_modulus(&self) -> f64 {
        f64::max(self.up_shear_modulus, self.bottom_shear_modulus)
    }

    /// Returns the mean of the top and bottom Poisson coefficients
    pub fn avg_poisson_ratio(&self) -> f64 {
        (self.up_poisson_ratio + self.bottom_poisson_ratio) / 2.0
    }

    /// Calculates the shear modulus at a depth within the layer
    pub fn shear_modulus(&self, depth: f64) -> f64 {
        self.interpolate(self.up_shear_modulus, self.bottom_shear_modulus, depth)
    }

    /// Calculates the Poisson coefficient at a depth within the layer
    pub fn poisson_ratio(&self, depth: f64) -> f64 {
        self.interpolate(self.up_poisson_ratio, self.bottom_poisson_ratio, depth)
    }

    /// Calculates the ultimate shear stress at a depth within the layer
    pub fn tau_f(&self, depth: f64) -> f64 {
        self.interpolate(self.up_tau_f, self.bottom_tau_f, depth)
    }

    #[inline]
    fn interpolate(&self, up: f64, bottom: f64, depth: f64) -> f64 {
        up + (bottom - up) / (self.bottom_depth - self.up_depth) * (depth - self.up_depth)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SoilLayer;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            SoilLayer::new((-1.0, 1.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).err(),
            Some("the top depth of the layer must be ≥ 0.0")
        );
        assert_eq!(
            SoilLayer::new((2.0, 2.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).err(),
            Some("the bottom depth of the layer must be greater than the top depth")
        );
        assert_eq!(
            SoilLayer::new((0.0, 2.0), (0.0, 1.0), (0.3, 0.3), (1.0, 1.0)).err(),
            Some("the shear modulus of the layer must be > 0.0")
        );
        assert_eq!(
            SoilLayer::new((0.0, 2.0), (1.0, 1.0), (0.3, 0.6), (1.0, 1.0)).err(),
            Some("the Poisson coefficient of the layer must be in [0.0, 0.5]")
        );
        assert_eq!(
            SoilLayer::new((0.0, 2.0), (1.0, 1.0), (0.3, 0.3), (-1.0, 1.0)).err(),
            Some("the ultimate shear stress of the layer must be ≥ 0.0")
        );
    }

    #[test]
    fn interpolation_works() {
        let layer = SoilLayer::new((2.0, 6.0), (10.0, 30.0), (0.2, 0.4), (19.0, 93.0)).unwrap();
        assert_eq!(layer.length(), 4.0);
        assert!(layer.contains(2.0));
        assert!(layer.contains(6.0));
        assert!(!layer.contains(6.1));
        approx_eq(layer.shear_modulus(2.0), 10.0, 1e-15);
        approx_eq(layer.shear_modulus(4.0), 20.0, 1e-15);
        approx_eq(layer.shear_modulus(6.0), 30.0, 1e-15);
        approx_eq(layer.poisson_ratio(3.0), 0.25, 1e-15);
        approx_eq(layer.tau_f(6.0), 93.0, 1e-13);
        approx_eq(layer.avg_shear_modulus(), 20.0, 1e-15);
        approx_eq(layer.max_shear_modulus(), 30.0, 1e-15);
        approx_eq(layer.avg_poisson_ratio(), 0.3, 1e-15);
    }

    #[test]
    fn interpolation_is_linear_within_the_layer() {
        let layer = SoilLayer::new((1.0, 5.0), (65e6, 80e6), (0.3, 0.45), (19e3, 93e3)).unwrap();
        let np = 17;
        for i in 0..np {
            let z = 1.0 + 4.0 * (i as f64) / ((np - 1) as f64);
            let t = (z - 1.0) / 4.0;
            approx_eq(layer.shear_modulus(z), 65e6 + t * 15e6, 1e-7);
            approx_eq(layer.poisson_ratio(z), 0.3 + t * 0.15, 1e-15);
            approx_eq(layer.tau_f(z), 19e3 + t * 74e3, 1e-9);
        }
    }

    #[test]
    fn deserialize_validates_the_data() {
        let layer = SoilLayer::new((0.0, 2.0), (10e6, 20e6), (0.3, 0.4), (1e3, 5e3)).unwrap();
        let json = serde_json::to_string(&layer).unwrap();
        let back: SoilLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layer);
        let inverted = json.replace("\"bottom_depth\":2.0", "\"bottom_depth\":-1.0");
        assert!(inverted.contains("-1.0"));
        let res = serde_json::from_str::<SoilLayer>(&inverted);
        assert!(res.is_err());
        assert!(res
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default()
            .contains("the bottom depth of the layer must be greater than the top depth"));
    }
}
