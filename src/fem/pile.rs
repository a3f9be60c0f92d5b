use super::{AnalysisEngine, Curve, EngineSession};
use crate::base::{CalibrationParams, Config, Dof, PileGeometry, SoilProfile, Tag, TagGenerator};
use crate::material::{FrictionLaw, LinearElastic, Material, TipLaw};
use crate::StrError;

/// Relative tolerance when comparing the pile length with the depth spanned by the soil profile
const LENGTH_TOLERANCE: f64 = 1e-10;

/// Indicates the stage of a pile model build
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PileState {
    Constructed,
    Meshed,
    MaterialsAttached,
    LoadApplied,
    Analyzed,
}

/// Implements the finite element idealization of an axially loaded single pile
///
/// ```text
///        P ↓
///   head ●──spring──▲ fixed       z = 0
///        │
///  truss │
///        ●──spring──▲ fixed
///        │
///        ⋮
///        │
///    tip ●──spring──▲ fixed       z = L
/// ```
///
/// The pile is a chain of `N` equally spaced nodes joined by linear elastic truss
/// elements. Each pile node is paired with a restrained node at the same depth through
/// a zero-length spring: a hyperbolic friction (t-z) law along the shaft and a bilinear
/// bearing (q-z) law at the tip. The head load is applied in equal increments of the
/// load factor.
///
/// Each instance is single-use: `constructed → meshed → materials-attached → load-applied → analyzed`.
pub struct Pile {
    geometry: PileGeometry,
    profile: SoilProfile,
    params: CalibrationParams,
    load: f64,
    config: Config,
    state: PileState,
    depths: Vec<f64>,
    pile_nodes: Vec<Tag>,
    fixed_nodes: Vec<Tag>,
    head: usize,
    tip: usize,
    structure: Option<Material>,
    springs: Vec<Material>,
}

impl Pile {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `geometry` -- the pile length, radius, optional area, and elasticity modulus
    /// * `profile` -- the soil profile; it must span the pile length
    /// * `params` -- the calibration parameters
    /// * `load` -- the total (downward) head load
    /// * `config` -- the discretization and solver parameters
    pub fn new(
        geometry: &PileGeometry,
        profile: &SoilProfile,
        params: &CalibrationParams,
        load: f64,
        config: &Config,
    ) -> Result<Self, StrError> {
        geometry.validate()?;
        profile.validate()?;
        if f64::abs(profile.pile_length() - geometry.length) > LENGTH_TOLERANCE * geometry.length {
            return Err("the soil profile must span the pile length");
        }
        if !(load > 0.0) || !load.is_finite() {
            return Err("the head load must be > 0.0");
        }
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate pile because config.validate() failed");
        }
        Ok(Pile {
            geometry: *geometry,
            profile: profile.clone(),
            params: *params,
            load,
            config: config.clone(),
            state: PileState::Constructed,
            depths: Vec::new(),
            pile_nodes: Vec::new(),
            fixed_nodes: Vec::new(),
            head: 0,
            tip: 0,
            structure: None,
            springs: Vec::new(),
        })
    }

    /// Returns the stage of the build
    pub fn state(&self) -> PileState {
        self.state
    }

    /// Returns the depths of the pile nodes (available after meshing)
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Returns the structure material (available after attaching materials)
    pub fn structure(&self) -> Option<&Material> {
        self.structure.as_ref()
    }

    /// Returns the spring material of each pile node (available after attaching materials)
    pub fn springs(&self) -> &[Material] {
        &self.springs
    }

    /// Builds the model in the engine and runs the incremental analysis
    ///
    /// The engine is reset before the build and after it, even if the build fails.
    ///
    /// Returns the (head displacement, head force) curve with one sample per load increment.
    pub fn analyze<E: AnalysisEngine + ?Sized>(&mut self, engine: &mut E) -> Result<Curve, StrError> {
        if self.state != PileState::Constructed {
            return Err("the pile model can only be analyzed once");
        }
        let mut session = EngineSession::open(engine)?;
        let mut tags = TagGenerator::new();
        self.mesh(&mut *session, &mut tags)?;
        self.attach_materials(&mut *session, &mut tags)?;
        self.apply_load(&mut *session, &mut tags)?;
        self.run(&mut *session)
    }

    /// Creates the pile and fixed nodes
    fn mesh<E: AnalysisEngine + ?Sized>(&mut self, engine: &mut E, tags: &mut TagGenerator) -> Result<(), StrError> {
        let n = self.config.number_of_node;
        let length = self.geometry.length;
        self.depths = (0..n)
            .map(|i| {
                if i == n - 1 {
                    length
                } else {
                    length * (i as f64) / ((n - 1) as f64)
                }
            })
            .collect();
        for depth in &self.depths {
            let pile = tags.next_tag();
            let fixed = tags.next_tag();
            engine.create_node(pile, *depth)?;
            engine.create_node(fixed, *depth)?;
            engine.restrain(fixed, Dof::Uz)?;
            self.pile_nodes.push(pile);
            self.fixed_nodes.push(fixed);
        }
        self.head = find_unique(&self.depths, 0.0).ok_or("cannot find pile head node at depth 0")?;
        self.tip = find_unique(&self.depths, length).ok_or("cannot find pile tip node at pile length")?;
        self.state = PileState::Meshed;
        Ok(())
    }

    /// Creates the materials, truss elements, and spring elements
    fn attach_materials<E: AnalysisEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        tags: &mut TagGenerator,
    ) -> Result<(), StrError> {
        // pile structure
        let structure = Material::Structure(LinearElastic::new(self.geometry.young)?);
        let structure_tag = tags.next_tag();
        register(engine, structure_tag, &structure)?;
        let area = self.geometry.area();
        for pair in self.pile_nodes.windows(2) {
            engine.create_truss_element(tags.next_tag(), pair[0], pair[1], area, structure_tag)?;
        }
        self.structure = Some(structure);

        // soil springs
        let element_length = self.geometry.length / (self.config.number_of_node as f64);
        for i in 0..self.depths.len() {
            let spring = if i == self.tip {
                Material::Tip(TipLaw::new(
                    &self.profile,
                    self.geometry.radius,
                    &self.params,
                    self.config.delta_max,
                )?)
            } else {
                Material::Friction(FrictionLaw::new(
                    &self.profile,
                    self.geometry.radius,
                    self.depths[i],
                    element_length,
                    self.params.Rfs,
                    &self.config,
                )?)
            };
            let material_tag = tags.next_tag();
            register(engine, material_tag, &spring)?;
            engine.create_spring_element(tags.next_tag(), self.fixed_nodes[i], self.pile_nodes[i], material_tag)?;
            self.springs.push(spring);
        }
        self.state = PileState::MaterialsAttached;
        Ok(())
    }

    /// Applies the head load through a linearly scaled load pattern
    fn apply_load<E: AnalysisEngine + ?Sized>(&mut self, engine: &mut E, tags: &mut TagGenerator) -> Result<(), StrError> {
        let pattern = tags.next_tag();
        engine.create_load_pattern(pattern, |lambda| lambda)?;
        engine.apply_nodal_load(pattern, self.pile_nodes[self.head], Dof::Uz, self.load)?;
        self.state = PileState::LoadApplied;
        Ok(())
    }

    /// Runs the load increments and records the head response
    fn run<E: AnalysisEngine + ?Sized>(&mut self, engine: &mut E) -> Result<Curve, StrError> {
        let n_steps = self.config.number_of_steps;
        let head = self.pile_nodes[self.head];
        let mut curve = Curve::new();
        let mut lambda = 0.0;
        for step in 1..=n_steps {
            let target = (step as f64) / (n_steps as f64);
            lambda = engine.advance_increment(target - lambda)?;
            let displacement = engine.query_displacement(head, Dof::Uz)?;
            curve.push(displacement, lambda * self.load);
        }
        self.state = PileState::Analyzed;
        Ok(curve)
    }
}

/// Registers a material in the engine using its breakpoints or modulus
fn register<E: AnalysisEngine + ?Sized>(engine: &mut E, tag: Tag, material: &Material) -> Result<(), StrError> {
    match (material.breakpoints(), material.modulus()) {
        (Some(points), _) => engine.create_uniaxial_material(tag, &points),
        (None, Some(modulus)) => engine.create_linear_material(tag, modulus),
        (None, None) => Err("the material has neither breakpoints nor modulus"),
    }
}

/// Returns the index of the only depth equal to `target`, or None if there are zero or many
fn find_unique(depths: &[f64], target: f64) -> Option<usize> {
    let mut found = None;
    for (i, depth) in depths.iter().enumerate() {
        if *depth == target {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{find_unique, Pile, PileState};
    use crate::base::{CalibrationParams, Config, PileGeometry, Samples, SoilLayer, SoilProfile};
    use crate::fem::AxialEngine;
    use crate::material::Material;
    use russell_lab::approx_eq;

    fn small_config() -> Config {
        let mut config = Config::new();
        config.set_number_of_node(5).unwrap().set_number_of_steps(10).unwrap();
        config
    }

    fn two_layer_pile(config: &Config) -> Pile {
        let geometry = PileGeometry::new(10.0, 0.3, None, 30e9).unwrap();
        let profile = Samples::two_layer_soil_profile();
        let params = CalibrationParams::from_default();
        Pile::new(&geometry, &profile, &params, 500e3, config).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        let config = Config::new();
        let profile = Samples::two_layer_soil_profile();
        let params = CalibrationParams::from_default();
        let geometry = PileGeometry::new(12.0, 0.3, None, 30e9).unwrap();
        assert_eq!(
            Pile::new(&geometry, &profile, &params, 1.0, &config).err(),
            Some("the soil profile must span the pile length")
        );
        let geometry = PileGeometry::new(10.0, 0.3, None, 30e9).unwrap();
        assert_eq!(
            Pile::new(&geometry, &profile, &params, 0.0, &config).err(),
            Some("the head load must be > 0.0")
        );
        let mut wrong = PileGeometry::new(10.0, 0.3, None, 30e9).unwrap();
        wrong.radius = 0.0;
        assert_eq!(
            Pile::new(&wrong, &profile, &params, 1.0, &config).err(),
            Some("the pile radius must be > 0.0")
        );
        let mut config = Config::new();
        config.number_of_steps = 0;
        assert_eq!(
            Pile::new(&geometry, &profile, &params, 1.0, &config).err(),
            Some("cannot allocate pile because config.validate() failed")
        );
    }

    #[test]
    fn find_unique_works() {
        assert_eq!(find_unique(&[0.0, 0.5, 1.0], 0.0), Some(0));
        assert_eq!(find_unique(&[0.0, 0.5, 1.0], 1.0), Some(2));
        assert_eq!(find_unique(&[0.0, 0.5, 0.999999], 1.0), None);
        assert_eq!(find_unique(&[0.0, 0.0, 1.0], 0.0), None);
    }

    #[test]
    fn mesh_and_materials_are_correct() {
        let config = small_config();
        let mut engine = AxialEngine::new(&config).unwrap();
        let mut pile = two_layer_pile(&config);
        assert_eq!(pile.state(), PileState::Constructed);
        pile.analyze(&mut engine).unwrap();
        assert_eq!(pile.state(), PileState::Analyzed);
        assert_eq!(pile.depths(), &[0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(pile.springs().len(), 5);
        for spring in &pile.springs()[..4] {
            assert!(matches!(spring, Material::Friction(..)));
        }
        assert!(matches!(pile.springs()[4], Material::Tip(..)));
        assert_eq!(pile.structure().and_then(|m| m.modulus()), Some(30e9));
        if let Material::Friction(law) = &pile.springs()[2] {
            assert_eq!(law.depth(), 5.0);
        }
        // the engine is left empty for the next build
        assert!(engine.is_empty());
    }

    #[test]
    fn analyze_works() {
        let config = small_config();
        let mut engine = AxialEngine::new(&config).unwrap();
        let mut pile = two_layer_pile(&config);
        let curve = pile.analyze(&mut engine).unwrap();
        assert_eq!(curve.len(), 10);
        assert!(curve.is_monotonic_increasing());
        approx_eq(curve.forces()[0], 50e3, 1e-6);
        let (displacement, force) = curve.last().unwrap();
        approx_eq(force, 500e3, 1e-6);
        assert!(displacement > 0.0);
        assert!(displacement < 0.1);
    }

    #[test]
    fn analyze_is_single_use() {
        let config = small_config();
        let mut engine = AxialEngine::new(&config).unwrap();
        let mut pile = two_layer_pile(&config);
        pile.analyze(&mut engine).unwrap();
        assert_eq!(
            pile.analyze(&mut engine).err(),
            Some("the pile model can only be analyzed once")
        );
    }

    #[test]
    fn stiffer_pile_settles_less() {
        let config = small_config();
        let mut engine = AxialEngine::new(&config).unwrap();
        let profile = Samples::two_layer_soil_profile();
        let params = CalibrationParams::from_default();
        let soft = PileGeometry::new(10.0, 0.3, None, 10e9).unwrap();
        let stiff = PileGeometry::new(10.0, 0.3, None, 40e9).unwrap();
        let mut pile_soft = Pile::new(&soft, &profile, &params, 500e3, &config).unwrap();
        let mut pile_stiff = Pile::new(&stiff, &profile, &params, 500e3, &config).unwrap();
        let (u_soft, _) = pile_soft.analyze(&mut engine).unwrap().last().unwrap();
        let (u_stiff, _) = pile_stiff.analyze(&mut engine).unwrap().last().unwrap();
        assert!(u_stiff < u_soft);
    }

    #[test]
    fn failed_build_resets_engine() {
        // friction is zero everywhere and the tip is perfectly plastic: the load cannot be carried
        let layer = SoilLayer::new((0.0, 10.0), (20e6, 20e6), (0.3, 0.3), (0.0, 0.0)).unwrap();
        let profile = SoilProfile::new(vec![layer]).unwrap();
        let geometry = PileGeometry::new(10.0, 0.3, None, 30e9).unwrap();
        let params = CalibrationParams::new(1.0, 5e-3, 0.0, 1.0).unwrap();
        let config = small_config();
        let mut engine = AxialEngine::new(&config).unwrap();
        let mut pile = Pile::new(&geometry, &profile, &params, 1e9, &config).unwrap();
        assert!(pile.analyze(&mut engine).is_err());
        assert_eq!(pile.state(), PileState::LoadApplied);
        assert!(engine.is_empty());
    }
}
