use serde::{Deserialize, Serialize};

/// Defines degrees-of-freedom (DOF) types
///
/// The pile model is one-dimensional; hence, the only DOF is the axial displacement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the pile axis (positive downwards)
    Uz = 0,
}

