use super::{FrictionLaw, LinearElastic, TipLaw};

/// Holds the load-transfer and structural relations of the pile model
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Skin friction (t-z) spring at a shaft node
    Friction(FrictionLaw),

    /// End bearing (q-z) spring at the tip node
    Tip(TipLaw),

    /// Linear elastic pile structure
    Structure(LinearElastic),
}

impl Material {
    /// Returns the (displacement, force) table of a spring material, or None for the structure
    pub fn breakpoints(&self) -> Option<Vec<(f64, f64)>> {
        match self {
            Material::Friction(law) => Some(law.breakpoints()),
            Material::Tip(law) => Some(law.breakpoints()),
            Material::Structure(..) => None,
        }
    }

    /// Returns the elasticity modulus of the structure, or None for a spring material
    pub fn modulus(&self) -> Option<f64> {
        match self {
            Material::Structure(model) => Some(model.modulus()),
            _ => None,
        }
    }

    /// Returns true if this is a soil spring
    pub fn is_spring(&self) -> bool {
        !matches!(self, Material::Structure(..))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
