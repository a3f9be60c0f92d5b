use super::{ElementTrait, UniaxialModel};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements a one-dimensional truss (rod) element along the pile axis
///
/// ```text
///        N = A・σ(ε)   with   ε = c・(ub - ua) / L   and   c = (zb - za) / L
///
///               ┌         ┐                  A・Eₜ ┌         ┐
/// f_int = c・N・│ -1   1  │ᵀ      K = ———— │  1  -1 │
///               └         ┘                   L   │ -1   1 │
///                                                  └         ┘
/// ```
///
/// # References
///
/// * Felippa C., Chapter 20: Implementation of One-Dimensional Elements (IFEM.Ch20.pdf)
pub struct ElementTruss {
    /// Element tag
    tag: usize,

    /// Indices of the two nodes
    local_to_global: [usize; 2],

    /// Cross-sectional area
    area: f64,

    /// Length
    length: f64,

    /// Direction cosine (±1)
    cosine: f64,

    /// Uniaxial material
    model: UniaxialModel,
}

impl ElementTruss {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `tag` -- the element tag
    /// * `nodes` -- the indices of the two nodes
    /// * `depths` -- the depths of the two nodes
    /// * `area` -- the cross-sectional area
    /// * `model` -- the uniaxial material
    pub fn new(
        tag: usize,
        nodes: [usize; 2],
        depths: [f64; 2],
        area: f64,
        model: UniaxialModel,
    ) -> Result<Self, StrError> {
        if !(area > 0.0) {
            return Err("the cross-sectional area of a truss element must be > 0.0");
        }
        let dz = depths[1] - depths[0];
        let length = f64::abs(dz);
        if !(length > 0.0) {
            return Err("the length of a truss element must be > 0.0");
        }
        Ok(ElementTruss {
            tag,
            local_to_global: nodes,
            area,
            length,
            cosine: dz / length,
            model,
        })
    }

    /// Returns the strain
    pub fn strain(&self, uu: &Vector) -> f64 {
        let (a, b) = (self.local_to_global[0], self.local_to_global[1]);
        self.cosine * (uu[b] - uu[a]) / self.length
    }

    /// Returns the axial force (positive in tension)
    pub fn axial_force(&self, uu: &Vector) -> f64 {
        self.area * self.model.stress(self.strain(uu))
    }
}

impl ElementTrait for ElementTruss {
    fn tag(&self) -> usize {
        self.tag
    }

    fn local_to_global(&self) -> &[usize; 2] {
        &self.local_to_global
    }

    fn calc_residual(&self, residual: &mut Vector, uu: &Vector) -> Result<(), StrError> {
        let nn = self.axial_force(uu);
        residual[0] = -self.cosine * nn;
        residual[1] = self.cosine * nn;
        Ok(())
    }

    fn calc_jacobian(&self, jacobian: &mut Matrix, uu: &Vector) -> Result<(), StrError> {
        let k = self.area * self.model.tangent(self.strain(uu)) / self.length;
        jacobian.set(0, 0, k);
        jacobian.set(0, 1, -k);
        jacobian.set(1, 0, -k);
        jacobian.set(1, 1, k);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementTruss;
    use crate::fem::{ElementTrait, UniaxialModel};
    use crate::material::LinearElastic;
    use russell_lab::{approx_eq, Matrix, Vector};

    fn elastic(young: f64) -> UniaxialModel {
        UniaxialModel::Elastic(LinearElastic::new(young).unwrap())
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ElementTruss::new(1, [0, 1], [0.0, 1.0], 0.0, elastic(1.0)).err(),
            Some("the cross-sectional area of a truss element must be > 0.0")
        );
        assert_eq!(
            ElementTruss::new(1, [0, 1], [2.0, 2.0], 1.0, elastic(1.0)).err(),
            Some("the length of a truss element must be > 0.0")
        );
    }

    #[test]
    fn truss_works() {
        // compression of a 2 m long bar: node 0 at z = 0 moves down 1 mm, node 1 is fixed
        let truss = ElementTruss::new(7, [0, 1], [0.0, 2.0], 0.01, elastic(200e9)).unwrap();
        assert_eq!(truss.tag(), 7);
        assert_eq!(truss.local_to_global(), &[0, 1]);
        let uu = Vector::from(&[1e-3, 0.0]);
        approx_eq(truss.strain(&uu), -0.5e-3, 1e-18);
        approx_eq(truss.axial_force(&uu), -1e6, 1e-6);
        let mut residual = Vector::new(2);
        truss.calc_residual(&mut residual, &uu).unwrap();
        approx_eq(residual[0], 1e6, 1e-6);
        approx_eq(residual[1], -1e6, 1e-6);
        let mut jacobian = Matrix::new(2, 2);
        truss.calc_jacobian(&mut jacobian, &uu).unwrap();
        approx_eq(jacobian.get(0, 0), 1e9, 1e-3);
        approx_eq(jacobian.get(0, 1), -1e9, 1e-3);
        approx_eq(jacobian.get(1, 0), -1e9, 1e-3);
        approx_eq(jacobian.get(1, 1), 1e9, 1e-3);
    }

    #[test]
    fn truss_is_independent_of_node_order() {
        let truss = ElementTruss::new(1, [0, 1], [2.0, 0.0], 0.01, elastic(200e9)).unwrap();
        // node 0 at z = 2 moves up, node 1 at z = 0 is fixed: compression
        let uu = Vector::from(&[-1e-3, 0.0]);
        approx_eq(truss.axial_force(&uu), -1e6, 1e-6);
        let mut residual = Vector::new(2);
        truss.calc_residual(&mut residual, &uu).unwrap();
        approx_eq(residual[0], -1e6, 1e-6);
        approx_eq(residual[1], 1e6, 1e-6);
    }
}
