use super::{AnalysisEngine, ControlConvergence, ElementSpring, ElementTrait, ElementTruss, UniaxialModel};
use crate::base::{Config, Dof, Tag};
use crate::material::{LinearElastic, MultiLinear};
use crate::{FnTime, StrError};
use russell_lab::{solve_lin_sys, vec_copy, vec_norm, Matrix, Norm, Vector};
use std::collections::{HashMap, HashSet};

/// Holds a load pattern: nodal loads scaled by a function of the load factor
struct LoadPattern {
    scale: FnTime,
    loads: Vec<(usize, f64)>, // (node index, magnitude)
}

/// Holds the model currently loaded in the engine
struct AxialModel {
    /// Number of DOFs per node (always 1)
    ndf: usize,

    /// Depths of all nodes (ordered by creation)
    depths: Vec<f64>,

    /// Maps node tags to node indices
    node_index: HashMap<Tag, usize>,

    /// Restrained flags (one per node)
    restrained: Vec<bool>,

    /// Uniaxial materials
    materials: HashMap<Tag, UniaxialModel>,

    /// Elements
    elements: Vec<Box<dyn ElementTrait>>,

    /// Tags of the elements
    element_tags: HashSet<Tag>,

    /// Load patterns
    patterns: HashMap<Tag, LoadPattern>,

    /// Equation numbers of the nodes; None means restrained
    equations: Vec<Option<usize>>,

    /// Number of equations (unknown DOFs)
    neq: usize,

    /// Displacements of all nodes
    uu: Vector,

    /// Current load factor
    lambda: f64,

    /// Number of converged increments
    n_increment: usize,
}

/// Implements an incremental static solver for one-dimensional axial models
///
/// The solver uses load control and the full Newton-Raphson method. The tangent
/// stiffness is assembled for the unknown (non-restrained) DOFs only and the linear
/// system is solved by a dense LU factorization.
pub struct AxialEngine {
    /// Holds the tolerances and verbose flags
    config: Config,

    /// The current model; None before `define_model`
    model: Option<AxialModel>,

    /// Total number of Newton-Raphson iterations since the last reset
    n_iterations_total: usize,
}

impl AxialEngine {
    /// Allocates a new instance
    pub fn new(config: &Config) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate engine because config.validate() failed");
        }
        Ok(AxialEngine {
            config: config.clone(),
            model: None,
            n_iterations_total: 0,
        })
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true if no model has been defined since the last reset
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
    }

    /// Returns the number of nodes of the current model
    pub fn n_node(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.depths.len())
    }

    /// Returns the number of elements of the current model
    pub fn n_element(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.elements.len())
    }

    /// Returns the current load factor
    pub fn load_factor(&self) -> f64 {
        self.model.as_ref().map_or(0.0, |m| m.lambda)
    }

    /// Returns the number of converged load increments of the current model
    pub fn n_converged_increments(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.n_increment)
    }

    /// Returns the total number of Newton-Raphson iterations since the last reset
    pub fn n_iterations_total(&self) -> usize {
        self.n_iterations_total
    }

    /// Returns the model for modification; fails if undefined or if the analysis has started
    fn editable(&mut self) -> Result<&mut AxialModel, StrError> {
        let model = self.model.as_mut().ok_or("the model must be defined first")?;
        if model.n_increment > 0 || model.neq > 0 {
            return Err("cannot modify the model after the analysis has started");
        }
        Ok(model)
    }
}

impl AxialModel {
    fn new(ndf: usize) -> Self {
        AxialModel {
            ndf,
            depths: Vec::new(),
            node_index: HashMap::new(),
            restrained: Vec::new(),
            materials: HashMap::new(),
            elements: Vec::new(),
            element_tags: HashSet::new(),
            patterns: HashMap::new(),
            equations: Vec::new(),
            neq: 0,
            uu: Vector::new(0),
            lambda: 0.0,
            n_increment: 0,
        }
    }

    fn node(&self, tag: Tag) -> Result<usize, StrError> {
        self.node_index.get(&tag).copied().ok_or("cannot find node with the given tag")
    }

    fn material(&self, tag: Tag) -> Result<&UniaxialModel, StrError> {
        self.materials.get(&tag).ok_or("cannot find material with the given tag")
    }

    fn check_dof(&self, dof: Dof) -> Result<(), StrError> {
        if (dof as usize) < self.ndf {
            Ok(())
        } else {
            Err("the DOF is not available in this model")
        }
    }

    fn check_new_element(&self, tag: Tag) -> Result<(), StrError> {
        if self.element_tags.contains(&tag) {
            Err("an element with the same tag already exists")
        } else {
            Ok(())
        }
    }

    /// Numbers the unknown DOFs and allocates the displacements (once)
    fn start(&mut self) -> Result<(), StrError> {
        if self.neq > 0 {
            return Ok(());
        }
        let nnode = self.depths.len();
        self.equations = vec![None; nnode];
        let mut neq = 0;
        for i in 0..nnode {
            if !self.restrained[i] {
                self.equations[i] = Some(neq);
                neq += 1;
            }
        }
        if neq == 0 {
            return Err("the model has no unknown DOFs");
        }
        self.neq = neq;
        self.uu = Vector::new(nnode);
        Ok(())
    }

    /// Assembles the internal forces vector (one component per node)
    fn calc_ff_int(&self) -> Result<Vector, StrError> {
        let mut ff_int = Vector::new(self.depths.len());
        let mut local = Vector::new(2);
        for element in &self.elements {
            element.calc_residual(&mut local, &self.uu)?;
            let l2g = element.local_to_global();
            ff_int[l2g[0]] += local[0];
            ff_int[l2g[1]] += local[1];
        }
        Ok(ff_int)
    }

    /// Assembles the tangent stiffness matrix of the unknown DOFs
    fn calc_kk(&self) -> Result<Matrix, StrError> {
        let mut kk = Matrix::new(self.neq, self.neq);
        let mut local = Matrix::new(2, 2);
        for element in &self.elements {
            element.calc_jacobian(&mut local, &self.uu)?;
            let l2g = element.local_to_global();
            for a in 0..2 {
                if let Some(p) = self.equations[l2g[a]] {
                    for b in 0..2 {
                        if let Some(q) = self.equations[l2g[b]] {
                            kk.add(p, q, local.get(a, b));
                        }
                    }
                }
            }
        }
        Ok(kk)
    }

    /// Finds the equilibrium state at the load factor `lambda_new`
    fn newton(&mut self, config: &Config, control: &mut ControlConvergence, lambda_new: f64) -> Result<(), StrError> {
        // external forces
        let nnode = self.depths.len();
        let mut ff_ext = Vector::new(nnode);
        for pattern in self.patterns.values() {
            let scale = (pattern.scale)(lambda_new);
            for (i, magnitude) in &pattern.loads {
                ff_ext[*i] += scale * magnitude;
            }
        }
        let norm_ff_ext = vec_norm(&ff_ext, Norm::Max);

        // iterations
        let mut rr = Vector::new(self.neq);
        let mut mdu = Vector::new(self.neq);
        for iteration in 0..config.n_max_iterations {
            // residual: R = Fint - Fext
            let ff_int = self.calc_ff_int()?;
            for i in 0..nnode {
                if let Some(eq) = self.equations[i] {
                    rr[eq] = ff_int[i] - ff_ext[i];
                }
            }

            // check convergence on residual
            control.analyze_rr(iteration, &rr, norm_ff_ext)?;
            if control.converged_on_norm_rr() {
                control.print_iteration();
                return Ok(());
            }

            // solve K・mdu = R
            let mut kk = self.calc_kk()?;
            vec_copy(&mut mdu, &rr)?;
            solve_lin_sys(&mut mdu, &mut kk).map_err(|_| "cannot solve the global linear system")?;

            // update U
            for i in 0..nnode {
                if let Some(eq) = self.equations[i] {
                    self.uu[i] -= mdu[eq];
                }
            }

            // check convergence on correction
            control.analyze_mdu(&mdu)?;
            control.print_iteration();
            if control.converged_on_norm_mdu() {
                return Ok(());
            }
        }
        Err("Newton-Raphson did not converge")
    }
}

impl AnalysisEngine for AxialEngine {
    fn reset(&mut self) {
        self.model = None;
        self.n_iterations_total = 0;
    }

    fn define_model(&mut self, ndf: usize) -> Result<(), StrError> {
        if ndf != 1 {
            return Err("the axial engine requires one DOF per node");
        }
        if self.model.is_some() {
            return Err("the model has been defined already; reset the engine first");
        }
        self.model = Some(AxialModel::new(ndf));
        Ok(())
    }

    fn create_node(&mut self, tag: Tag, depth: f64) -> Result<(), StrError> {
        let model = self.editable()?;
        if !depth.is_finite() {
            return Err("the depth of the node must be finite");
        }
        if model.node_index.contains_key(&tag) {
            return Err("a node with the same tag already exists");
        }
        model.node_index.insert(tag, model.depths.len());
        model.depths.push(depth);
        model.restrained.push(false);
        Ok(())
    }

    fn restrain(&mut self, node: Tag, dof: Dof) -> Result<(), StrError> {
        let model = self.editable()?;
        model.check_dof(dof)?;
        let i = model.node(node)?;
        model.restrained[i] = true;
        Ok(())
    }

    fn create_uniaxial_material(&mut self, tag: Tag, breakpoints: &[(f64, f64)]) -> Result<(), StrError> {
        let model = self.editable()?;
        if model.materials.contains_key(&tag) {
            return Err("a material with the same tag already exists");
        }
        let table = MultiLinear::new(breakpoints.to_vec())?;
        if !table.is_monotonic() {
            return Err("the multi-linear table must be non-decreasing");
        }
        model.materials.insert(tag, UniaxialModel::MultiLinear(table));
        Ok(())
    }

    fn create_linear_material(&mut self, tag: Tag, modulus: f64) -> Result<(), StrError> {
        let model = self.editable()?;
        if model.materials.contains_key(&tag) {
            return Err("a material with the same tag already exists");
        }
        model
            .materials
            .insert(tag, UniaxialModel::Elastic(LinearElastic::new(modulus)?));
        Ok(())
    }

    fn create_spring_element(&mut self, tag: Tag, node_a: Tag, node_b: Tag, material: Tag) -> Result<(), StrError> {
        let model = self.editable()?;
        model.check_new_element(tag)?;
        let nodes = [model.node(node_a)?, model.node(node_b)?];
        let uniaxial = model.material(material)?.clone();
        let element = ElementSpring::new(tag, nodes, uniaxial)?;
        model.elements.push(Box::new(element));
        model.element_tags.insert(tag);
        Ok(())
    }

    fn create_truss_element(
        &mut self,
        tag: Tag,
        node_a: Tag,
        node_b: Tag,
        area: f64,
        material: Tag,
    ) -> Result<(), StrError> {
        let model = self.editable()?;
        model.check_new_element(tag)?;
        let nodes = [model.node(node_a)?, model.node(node_b)?];
        let depths = [model.depths[nodes[0]], model.depths[nodes[1]]];
        let uniaxial = model.material(material)?.clone();
        let element = ElementTruss::new(tag, nodes, depths, area, uniaxial)?;
        model.elements.push(Box::new(element));
        model.element_tags.insert(tag);
        Ok(())
    }

    fn create_load_pattern(&mut self, tag: Tag, scale: FnTime) -> Result<(), StrError> {
        let model = self.editable()?;
        if model.patterns.contains_key(&tag) {
            return Err("a load pattern with the same tag already exists");
        }
        model.patterns.insert(
            tag,
            LoadPattern {
                scale,
                loads: Vec::new(),
            },
        );
        Ok(())
    }

    fn apply_nodal_load(&mut self, pattern: Tag, node: Tag, dof: Dof, magnitude: f64) -> Result<(), StrError> {
        let model = self.editable()?;
        model.check_dof(dof)?;
        if !magnitude.is_finite() {
            return Err("the magnitude of the nodal load must be finite");
        }
        let i = model.node(node)?;
        let load_pattern = model
            .patterns
            .get_mut(&pattern)
            .ok_or("cannot find load pattern with the given tag")?;
        load_pattern.loads.push((i, magnitude));
        Ok(())
    }

    fn advance_increment(&mut self, delta: f64) -> Result<f64, StrError> {
        let model = self.model.as_mut().ok_or("the model must be defined first")?;
        if !(delta > 0.0) {
            return Err("the load factor increment must be > 0.0");
        }
        model.start()?;
        let lambda_new = model.lambda + delta;
        let mut control = ControlConvergence::new(&self.config);
        if model.n_increment == 0 {
            control.print_header();
        }
        let backup = model.uu.clone();
        let res = model.newton(&self.config, &mut control, lambda_new);
        self.n_iterations_total += control.n_iterations_total();
        match res {
            Ok(()) => {
                model.lambda = lambda_new;
                model.n_increment += 1;
                control.print_step(model.n_increment, lambda_new);
                Ok(lambda_new)
            }
            Err(e) => {
                model.uu = backup;
                control.print_footer();
                Err(e)
            }
        }
    }

    fn query_displacement(&self, node: Tag, dof: Dof) -> Result<f64, StrError> {
        let model = self.model.as_ref().ok_or("the model must be defined first")?;
        model.check_dof(dof)?;
        let i = model.node(node)?;
        if model.uu.dim() == 0 {
            return Ok(0.0);
        }
        Ok(model.uu[i])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
