use super::{ElementTrait, UniaxialModel};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements a zero-length spring element joining two nodes along the pile axis
///
/// The deformation is `δ = ub - ua` and the spring force is `F = σ(δ)`, where
/// `σ` is the (force, displacement) relation given by the uniaxial material.
pub struct ElementSpring {
    /// Element tag
    tag: usize,

    /// Indices of the two nodes
    local_to_global: [usize; 2],

    /// Force-displacement relation
    model: UniaxialModel,
}

impl ElementSpring {
    /// Allocates a new instance
    pub fn new(tag: usize, nodes: [usize; 2], model: UniaxialModel) -> Result<Self, StrError> {
        if nodes[0] == nodes[1] {
            return Err("the spring element must join two distinct nodes");
        }
        Ok(ElementSpring {
            tag,
            local_to_global: nodes,
            model,
        })
    }

    /// Returns the deformation of the spring
    pub fn deformation(&self, uu: &Vector) -> f64 {
        uu[self.local_to_global[1]] - uu[self.local_to_global[0]]
    }

    /// Returns the spring force
    pub fn force(&self, uu: &Vector) -> f64 {
        self.model.stress(self.deformation(uu))
    }
}

impl ElementTrait for ElementSpring {
    fn tag(&self) -> usize {
        self.tag
    }

    fn local_to_global(&self) -> &[usize; 2] {
        &self.local_to_global
    }

    fn calc_residual(&self, residual: &mut Vector, uu: &Vector) -> Result<(), StrError> {
        let f = self.force(uu);
        residual[0] = -f;
        residual[1] = f;
        Ok(())
    }

    fn calc_jacobian(&self, jacobian: &mut Matrix, uu: &Vector) -> Result<(), StrError> {
        let k = self.model.tangent(self.deformation(uu));
        jacobian.set(0, 0, k);
        jacobian.set(0, 1, -k);
        jacobian.set(1, 0, -k);
        jacobian.set(1, 1, k);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
