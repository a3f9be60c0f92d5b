use super::SoilLayer;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Tolerance to compare the depths of adjacent layers
const DEPTH_TOLERANCE: f64 = 1e-10;

/// Holds the stack of soil layers along the pile
///
/// The layers are sorted by depth, start at the pile head (z = 0) and are
/// contiguous: the bottom of a layer is the top of the next one. Hence, the
/// bottom of the last layer coincides with the pile tip.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "SoilProfileData")]
pub struct SoilProfile {
    layers: Vec<SoilLayer>,
}

/// Holds the raw layers of a profile before validation (deserialization)
#[derive(Deserialize)]
struct SoilProfileData {
    layers: Vec<SoilLayer>,
}

impl TryFrom<SoilProfileData> for SoilProfile {
    type Error = StrError;
    fn try_from(data: SoilProfileData) -> Result<Self, Self::Error> {
        SoilProfile::new(data.layers)
    }
}

impl SoilProfile {
    /// Allocates a new instance
    ///
    /// Returns an error if the layers are not contiguous or do not start at z = 0
    pub fn new(layers: Vec<SoilLayer>) -> Result<Self, StrError> {
        if layers.len() == 0 {
            return Err("the soil profile must have at least one layer");
        }
        for layer in &layers {
            layer.validate()?;
        }
        if f64::abs(layers[0].up_depth()) > DEPTH_TOLERANCE {
            return Err("the first soil layer must start at depth 0.0");
        }
        for pair in layers.windows(2) {
            if f64::abs(pair[1].up_depth() - pair[0].bottom_depth()) > DEPTH_TOLERANCE {
                return Err("the soil layers must be contiguous, without gaps or overlaps");
            }
        }
        Ok(SoilProfile { layers })
    }

    /// Checks the data (e.g., after deserialization)
    pub fn validate(&self) -> Result<(), StrError> {
        SoilProfile::new(self.layers.clone()).map(|_| ())
    }

    /// Returns the layers
    pub fn layers(&self) -> &[SoilLayer] {
        &self.layers
    }

    /// Returns the length of the pile, i.e., the sum of the layer thicknesses
    pub fn pile_length(&self) -> f64 {
        self.layers.iter().map(|layer| layer.length()).sum()
    }

    /// Returns the largest shear modulus over all layers
    pub fn max_shear_modulus(&self) -> f64 {
        self.layers
            .iter()
            .map(|layer| layer.max_shear_modulus())
            .fold(f64::MIN, f64::max)
    }

    /// Returns the length-weighted average of the Poisson coefficient
    ///
    /// ```text
    /// ν̄ = Σ ν̄ᵢ・Lᵢ / L
    /// ```
    pub fn avg_poisson_ratio(&self) -> f64 {
        let sum: f64 = self
            .layers
            .iter()
            .map(|layer| layer.avg_poisson_ratio() * layer.length())
            .sum();
        sum / self.pile_length()
    }

    /// Calculates the shear modulus at a given depth
    pub fn shear_modulus(&self, depth: f64) -> Result<f64, StrError> {
        Ok(self.find_layer(depth)?.shear_modulus(depth))
    }

    /// Calculates the Poisson coefficient at a given depth
    pub fn poisson_ratio(&self, depth: f64) -> Result<f64, StrError> {
        Ok(self.find_layer(depth)?.poisson_ratio(depth))
    }

    /// Calculates the ultimate shear stress at a given depth
    pub fn tau_f(&self, depth: f64) -> Result<f64, StrError> {
        Ok(self.find_layer(depth)?.tau_f(depth))
    }

    /// Returns the shear modulus at the pile tip
    pub fn tip_shear_modulus(&self) -> Result<f64, StrError> {
        self.shear_modulus(self.pile_length())
    }

    /// Returns the Poisson coefficient at the pile tip
    pub fn tip_poisson_ratio(&self) -> Result<f64, StrError> {
        self.poisson_ratio(self.pile_length())
    }

    /// Finds the first layer containing the depth
    ///
    /// At an interface, the upper layer is returned. Depths slightly beyond the
    /// ends of the profile (round-off) are accepted by the first or last layer.
    fn find_layer(&self, depth: f64) -> Result<&SoilLayer, StrError> {
        if let Some(layer) = self.layers.iter().find(|layer| layer.contains(depth)) {
            return Ok(layer);
        }
        let first = &self.layers[0];
        let last = &self.layers[self.layers.len() - 1];
        if depth < first.up_depth() && first.up_depth() - depth <= DEPTH_TOLERANCE {
            return Ok(first);
        }
        if depth > last.bottom_depth() && depth - last.bottom_depth() <= DEPTH_TOLERANCE {
            return Ok(last);
        }
        Err("cannot find soil layer containing the given depth")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SoilProfile;
    use crate::base::SoilLayer;
    use russell_lab::approx_eq;

    fn two_layers() -> SoilProfile {
        let top = SoilLayer::new((0.0, 4.0), (10e6, 20e6), (0.3, 0.3), (10e3, 30e3)).unwrap();
        let bottom = SoilLayer::new((4.0, 10.0), (20e6, 50e6), (0.3, 0.5), (30e3, 90e3)).unwrap();
        SoilProfile::new(vec![top, bottom]).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            SoilProfile::new(Vec::new()).err(),
            Some("the soil profile must have at least one layer")
        );
        let a = SoilLayer::new((1.0, 4.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).unwrap();
        assert_eq!(
            SoilProfile::new(vec![a]).err(),
            Some("the first soil layer must start at depth 0.0")
        );
        let a = SoilLayer::new((0.0, 4.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).unwrap();
        let b = SoilLayer::new((4.5, 6.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).unwrap();
        assert_eq!(
            SoilProfile::new(vec![a, b]).err(),
            Some("the soil layers must be contiguous, without gaps or overlaps")
        );
        let b = SoilLayer::new((3.0, 6.0), (1.0, 1.0), (0.3, 0.3), (1.0, 1.0)).unwrap();
        assert_eq!(
            SoilProfile::new(vec![a, b]).err(),
            Some("the soil layers must be contiguous, without gaps or overlaps")
        );
    }

    #[test]
    fn aggregates_work() {
        let profile = two_layers();
        approx_eq(profile.pile_length(), 10.0, 1e-15);
        approx_eq(profile.max_shear_modulus(), 50e6, 1e-15);
        // (0.3 * 4 + 0.4 * 6) / 10
        approx_eq(profile.avg_poisson_ratio(), 0.36, 1e-15);
    }

    #[test]
    fn pile_length_is_the_sum_of_thicknesses() {
        let thicknesses = [0.5, 1.25, 3.0, 0.75, 7.5];
        let mut layers = Vec::new();
        let mut z = 0.0;
        for h in thicknesses {
            layers.push(SoilLayer::new((z, z + h), (1e6, 1e6), (0.3, 0.3), (1e3, 1e3)).unwrap());
            z += h;
        }
        let profile = SoilProfile::new(layers).unwrap();
        approx_eq(profile.pile_length(), thicknesses.iter().sum(), 1e-13);
    }

    #[test]
    fn depth_queries_work() {
        let profile = two_layers();
        approx_eq(profile.shear_modulus(0.0).unwrap(), 10e6, 1e-15);
        approx_eq(profile.shear_modulus(2.0).unwrap(), 15e6, 1e-8);
        approx_eq(profile.shear_modulus(7.0).unwrap(), 35e6, 1e-8);
        approx_eq(profile.poisson_ratio(7.0).unwrap(), 0.4, 1e-15);
        approx_eq(profile.tau_f(10.0).unwrap(), 90e3, 1e-10);
        approx_eq(profile.tip_shear_modulus().unwrap(), 50e6, 1e-8);
        approx_eq(profile.tip_poisson_ratio().unwrap(), 0.5, 1e-15);
        assert_eq!(
            profile.shear_modulus(10.5).err(),
            Some("cannot find soil layer containing the given depth")
        );
        assert_eq!(
            profile.tau_f(-0.1).err(),
            Some("cannot find soil layer containing the given depth")
        );
    }

    #[test]
    fn depth_queries_are_continuous_at_interfaces() {
        let profile = two_layers();
        let eps = 1e-9;
        approx_eq(profile.shear_modulus(4.0 - eps).unwrap(), profile.shear_modulus(4.0 + eps).unwrap(), 1e-1);
        approx_eq(profile.poisson_ratio(4.0 - eps).unwrap(), profile.poisson_ratio(4.0 + eps).unwrap(), 1e-9);
        approx_eq(profile.tau_f(4.0 - eps).unwrap(), profile.tau_f(4.0 + eps).unwrap(), 1e-3);
    }

    #[test]
    fn deserialize_validates_the_data() {
        let profile = two_layers();
        let json = serde_json::to_string(&profile).unwrap();
        let back: SoilProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);

        let res = serde_json::from_str::<SoilProfile>(r#"{"layers":[]}"#);
        assert!(res
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default()
            .contains("the soil profile must have at least one layer"));

        let gap = json.replace("\"up_depth\":4.0", "\"up_depth\":5.0");
        assert!(gap.contains("5.0"));
        let res = serde_json::from_str::<SoilProfile>(&gap);
        assert!(res
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default()
            .contains("the soil layers must be contiguous, without gaps or overlaps"));
    }
}
