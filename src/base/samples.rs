use super::{SoilLayer, SoilProfile};
use russell_lab::math::PI;

/// Holds sample soil profiles and pile data
pub struct Samples;

impl Samples {
    /// Returns the soil profile of the O'Neill et al. (1982) single pile test (SI units)
    ///
    /// A single layer with constant G = 65 MPa and ν = 0.5; τf varies linearly from 19 kPa
    /// at the head to 93 kPa at the tip (z = 13.1 m).
    pub fn onill_1982_soil_profile() -> SoilProfile {
        let layer = SoilLayer::new(
            (0.0, 13.1),   // m
            (65e6, 65e6),  // Pa
            (0.5, 0.5),    // -
            (19e3, 93e3),  // Pa
        )
        .unwrap();
        SoilProfile::new(vec![layer]).unwrap()
    }

    /// Returns the cross-sectional area of the O'Neill et al. (1982) steel pipe pile (m²)
    ///
    /// Outer radius 0.137 m and wall thickness 9.3 mm.
    pub fn onill_1982_pile_area() -> f64 {
        let r = 137e-3;
        let t = 9.3e-3;
        PI * r * r - PI * (r - t) * (r - t)
    }

    /// Returns a two-layer profile (SI units) with a stiffer bottom layer
    pub fn two_layer_soil_profile() -> SoilProfile {
        let top = SoilLayer::new((0.0, 4.0), (20e6, 30e6), (0.3, 0.3), (15e3, 30e3)).unwrap();
        let bottom = SoilLayer::new((4.0, 10.0), (30e6, 60e6), (0.3, 0.4), (30e3, 80e3)).unwrap();
        SoilProfile::new(vec![top, bottom]).unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Samples;
    use russell_lab::approx_eq;

    #[test]
    fn samples_are_consistent() {
        let profile = Samples::onill_1982_soil_profile();
        approx_eq(profile.pile_length(), 13.1, 1e-15);
        approx_eq(Samples::onill_1982_pile_area(), 7.7335e-3, 1e-6);
        let profile = Samples::two_layer_soil_profile();
        approx_eq(profile.pile_length(), 10.0, 1e-15);
    }
}
