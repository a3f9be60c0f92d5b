use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;

/// Holds a load-displacement curve as a sequence of (displacement, force) samples
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Curve {
    displacement: Vec<f64>,
    force: Vec<f64>,
}

impl Curve {
    /// Allocates an empty curve
    pub fn new() -> Self {
        Curve {
            displacement: Vec::new(),
            force: Vec::new(),
        }
    }

    /// Allocates a curve with the given samples
    ///
    /// The shorter sequence determines the number of samples.
    pub fn from_samples(displacement: &[f64], force: &[f64]) -> Self {
        let n = usize::min(displacement.len(), force.len());
        Curve {
            displacement: displacement[..n].to_vec(),
            force: force[..n].to_vec(),
        }
    }

    /// Appends a sample
    pub fn push(&mut self, displacement: f64, force: f64) {
        self.displacement.push(displacement);
        self.force.push(force);
    }

    /// Returns the number of samples
    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    /// Returns true if the curve has no samples
    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    /// Returns the displacements
    pub fn displacements(&self) -> &[f64] {
        &self.displacement
    }

    /// Returns the forces
    pub fn forces(&self) -> &[f64] {
        &self.force
    }

    /// Returns the last sample
    pub fn last(&self) -> Option<(f64, f64)> {
        match (self.displacement.last(), self.force.last()) {
            (Some(d), Some(f)) => Some((*d, *f)),
            _ => None,
        }
    }

    /// Interpolates the force at a given displacement
    ///
    /// The samples are sorted by displacement first. Outside the sampled range the
    /// first (or last) segment is extended. Returns NaN if the curve has fewer than two
    /// samples or if the segment used has coincident displacements.
    pub fn interpolate(&self, displacement: f64) -> f64 {
        let points = self.sorted();
        interpolate_sorted(&points, displacement)
    }

    /// Interpolates the forces at a set of displacements
    pub fn resample(&self, displacements: &[f64]) -> Vec<f64> {
        let points = self.sorted();
        displacements.iter().map(|&x| interpolate_sorted(&points, x)).collect()
    }

    /// Returns true if both displacements and forces strictly increase
    pub fn is_monotonic_increasing(&self) -> bool {
        self.displacement.windows(2).all(|w| w[1] > w[0]) && self.force.windows(2).all(|w| w[1] > w[0])
    }

    /// Writes a JSON file with the samples
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }

    /// Returns the samples sorted by displacement (stable)
    fn sorted(&self) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .displacement
            .iter()
            .zip(self.force.iter())
            .map(|(d, f)| (*d, *f))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }
}

/// Interpolates linearly on sorted points, extending the end segments
fn interpolate_sorted(points: &[(f64, f64)], x: f64) -> f64 {
    let n = points.len();
    if n < 2 || x.is_nan() {
        return f64::NAN;
    }
    let count = points.partition_point(|p| p.0 <= x);
    let i = if count == 0 { 0 } else { usize::min(count - 1, n - 2) };
    let (xa, ya) = points[i];
    let (xb, yb) = points[i + 1];
    let dx = xb - xa;
    if dx == 0.0 {
        return f64::NAN;
    }
    ya + (yb - ya) * (x - xa) / dx
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Curve;
    use russell_lab::{approx_eq, array_approx_eq};

    #[test]
    fn push_and_accessors_work() {
        let mut curve = Curve::new();
        assert!(curve.is_empty());
        assert_eq!(curve.last(), None);
        curve.push(0.0, 0.0);
        curve.push(1.0, 10.0);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.displacements(), &[0.0, 1.0]);
        assert_eq!(curve.forces(), &[0.0, 10.0]);
        assert_eq!(curve.last(), Some((1.0, 10.0)));
        let other = Curve::from_samples(&[0.0, 1.0, 2.0], &[0.0, 10.0]);
        assert_eq!(other, curve);
    }

    #[test]
    fn interpolate_works() {
        let curve = Curve::from_samples(&[0.0, 1.0, 3.0], &[0.0, 10.0, 20.0]);
        approx_eq(curve.interpolate(0.5), 5.0, 1e-15);
        approx_eq(curve.interpolate(1.0), 10.0, 1e-15);
        approx_eq(curve.interpolate(2.0), 15.0, 1e-15);
        // extrapolation
        approx_eq(curve.interpolate(5.0), 30.0, 1e-14);
        approx_eq(curve.interpolate(-1.0), -10.0, 1e-15);
        let values = curve.resample(&[0.25, 3.0]);
        array_approx_eq(&values, &[2.5, 20.0], 1e-15);
    }

    #[test]
    fn interpolate_handles_unsorted_samples() {
        let curve = Curve::from_samples(&[2.0, 0.0, 1.0], &[4.0, 0.0, 1.0]);
        approx_eq(curve.interpolate(1.5), 2.5, 1e-15);
    }

    #[test]
    fn degenerate_curves_give_nan() {
        let curve = Curve::new();
        assert!(curve.interpolate(1.0).is_nan());
        let curve = Curve::from_samples(&[1.0], &[1.0]);
        assert!(curve.interpolate(1.0).is_nan());
        let curve = Curve::from_samples(&[0.0, 0.0], &[0.0, 5.0]);
        assert!(curve.interpolate(1.0).is_nan());
        let curve = Curve::from_samples(&[0.0, 1.0], &[0.0, 5.0]);
        assert!(curve.interpolate(f64::NAN).is_nan());
    }

    #[test]
    fn is_monotonic_increasing_works() {
        let curve = Curve::from_samples(&[0.0, 1.0, 2.0], &[0.0, 1.0, 1.5]);
        assert!(curve.is_monotonic_increasing());
        let curve = Curve::from_samples(&[0.0, 1.0, 2.0], &[0.0, 1.0, 1.0]);
        assert!(!curve.is_monotonic_increasing());
    }

    #[test]
    fn serialize_works() {
        let curve = Curve::from_samples(&[0.0, 1.0], &[0.0, 2.0]);
        let json = serde_json::to_string(&curve).unwrap();
        assert_eq!(json, r#"{"displacement":[0.0,1.0],"force":[0.0,2.0]}"#);
        let back: Curve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, curve);
        let path = "/tmp/pilecal/test_curve_write_json.json";
        curve.write_json(path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, json);
    }
}
