use crate::material::{LinearElastic, MultiLinear};

/// Holds a uniaxial (strain, stress) relation registered in the analysis engine
#[derive(Clone, Debug, PartialEq)]
pub enum UniaxialModel {
    /// Multi-linear elastic relation given by a table
    MultiLinear(MultiLinear),

    /// Linear elastic relation
    Elastic(LinearElastic),
}

impl UniaxialModel {
    /// Calculates the stress
    pub fn stress(&self, strain: f64) -> f64 {
        match self {
            UniaxialModel::MultiLinear(table) => table.stress(strain),
            UniaxialModel::Elastic(model) => model.stress(strain),
        }
    }

    /// Calculates the tangent modulus
    pub fn tangent(&self, strain: f64) -> f64 {
        match self {
            UniaxialModel::MultiLinear(table) => table.tangent(strain),
            UniaxialModel::Elastic(model) => model.modulus(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
