use crate::StrError;

/// Implements a multi-linear elastic uniaxial relation given by a table of (strain, stress) points
///
/// Between points the relation is linear. Outside the table, the first and last
/// segments are extended (linear extrapolation). The tangent at a breakpoint is
/// the slope of the segment on its right.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLinear {
    points: Vec<(f64, f64)>,
}

impl MultiLinear {
    /// Allocates a new instance
    ///
    /// The strains must be strictly increasing; all values must be finite.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, StrError> {
        if points.len() < 2 {
            return Err("the multi-linear table must have at least two points");
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err("the multi-linear table must have finite values");
        }
        if points.windows(2).any(|pair| !(pair[1].0 > pair[0].0)) {
            return Err("the strains of the multi-linear table must be strictly increasing");
        }
        Ok(MultiLinear { points })
    }

    /// Returns the (strain, stress) points
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Returns true if the stresses never decrease with the strain
    pub fn is_monotonic(&self) -> bool {
        self.points.windows(2).all(|pair| pair[1].1 >= pair[0].1)
    }

    /// Calculates the stress
    pub fn stress(&self, strain: f64) -> f64 {
        let i = self.segment(strain);
        let (xa, ya) = self.points[i];
        ya + self.slope(i) * (strain - xa)
    }

    /// Calculates the tangent modulus
    pub fn tangent(&self, strain: f64) -> f64 {
        self.slope(self.segment(strain))
    }

    /// Returns the index of the segment used at the given strain
    fn segment(&self, strain: f64) -> usize {
        let n = self.points.len();
        let count = self.points.partition_point(|p| p.0 <= strain);
        if count == 0 {
            0
        } else {
            usize::min(count - 1, n - 2)
        }
    }

    #[inline]
    fn slope(&self, i: usize) -> f64 {
        let (xa, ya) = self.points[i];
        let (xb, yb) = self.points[i + 1];
        (yb - ya) / (xb - xa)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
