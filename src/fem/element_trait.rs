use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the trait for local (element) equations of two-node axial elements
pub trait ElementTrait: Send + Sync {
    /// Returns the tag of the element
    fn tag(&self) -> usize;

    /// Returns the local-to-global mapping, i.e., the indices of the two nodes
    fn local_to_global(&self) -> &[usize; 2];

    /// Calculates the internal forces vector (local, two components)
    ///
    /// The vector `uu` holds the displacements of all nodes.
    fn calc_residual(&self, residual: &mut Vector, uu: &Vector) -> Result<(), StrError>;

    /// Calculates the tangent stiffness (local, 2×2)
    fn calc_jacobian(&self, jacobian: &mut Matrix, uu: &Vector) -> Result<(), StrError>;
}
