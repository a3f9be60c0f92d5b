use crate::base::{Dof, Tag};
use crate::{FnTime, StrError};

/// Defines the interface of a structural analysis engine driven by the pile model builder
///
/// The engine holds a single model at a time (nodes, materials, elements, and load
/// patterns) and advances it through an incremental static analysis. Tags are chosen
/// by the caller and must be unique within each kind of entity.
///
/// The engine state is global for the model being built: callers must [reset](AnalysisEngine::reset)
/// it before populating a new model. See [super::EngineSession] for the scoped way of doing so.
pub trait AnalysisEngine {
    /// Discards all nodes, materials, elements, load patterns, and results
    fn reset(&mut self);

    /// Declares a new model with the given number of DOFs per node
    fn define_model(&mut self, ndf: usize) -> Result<(), StrError>;

    /// Creates a node at a given depth
    fn create_node(&mut self, tag: Tag, depth: f64) -> Result<(), StrError>;

    /// Restrains a DOF of a node
    fn restrain(&mut self, node: Tag, dof: Dof) -> Result<(), StrError>;

    /// Creates a multi-linear elastic uniaxial material from (strain, stress) breakpoints
    fn create_uniaxial_material(&mut self, tag: Tag, breakpoints: &[(f64, f64)]) -> Result<(), StrError>;

    /// Creates a linear elastic uniaxial material
    fn create_linear_material(&mut self, tag: Tag, modulus: f64) -> Result<(), StrError>;

    /// Creates a zero-length spring element joining two nodes
    fn create_spring_element(&mut self, tag: Tag, node_a: Tag, node_b: Tag, material: Tag) -> Result<(), StrError>;

    /// Creates a truss element joining two nodes
    fn create_truss_element(
        &mut self,
        tag: Tag,
        node_a: Tag,
        node_b: Tag,
        area: f64,
        material: Tag,
    ) -> Result<(), StrError>;

    /// Creates a load pattern whose loads are scaled by `scale(λ)`
    fn create_load_pattern(&mut self, tag: Tag, scale: FnTime) -> Result<(), StrError>;

    /// Adds a nodal load to a load pattern
    fn apply_nodal_load(&mut self, pattern: Tag, node: Tag, dof: Dof, magnitude: f64) -> Result<(), StrError>;

    /// Advances the load factor by `delta` and finds the equilibrium state
    ///
    /// Returns the new load factor. If the equilibrium iterations fail, returns an error
    /// and keeps the last converged state.
    fn advance_increment(&mut self, delta: f64) -> Result<f64, StrError>;

    /// Returns the current displacement of a node
    fn query_displacement(&self, node: Tag, dof: Dof) -> Result<f64, StrError>;
}
