//! Implements the load-transfer relations of the soil springs and the pile structure

mod friction_law;
mod linear_elastic;
#[allow(clippy::module_inception)]
mod material;
mod multi_linear;
mod tip_law;
pub use crate::material::friction_law::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::material::*;
pub use crate::material::multi_linear::*;
pub use crate::material::tip_law::*;
