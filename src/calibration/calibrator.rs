use super::{DifferentialEvolution, LoadTestResult, ParamOptimizer};
use crate::base::{CalibrationParams, Config, ParamBounds};
use crate::fem::{AnalysisEngine, AxialEngine, Curve};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the outcome of a calibration
///
/// The parameters are those of the best member of the final population. No local
/// (gradient-based) polishing is applied after the differential evolution.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CalibrationResult {
    /// Best parameters found
    pub params: CalibrationParams,

    /// Cost (least-square distance) of the best parameters
    pub cost: f64,

    /// Number of optimizer generations
    pub n_iterations: usize,

    /// Number of pile model evaluations
    pub n_evaluations: usize,

    /// Whether the optimizer met its tolerance before the iteration limit
    pub converged: bool,
}

/// Fits the calibration parameters of the pile model to a measured load test
///
/// Every cost evaluation builds a brand new pile model loaded by the largest measured
/// force, runs the incremental analysis, interpolates the computed head curve at the
/// measured displacements, and measures the distance to the measured forces.
pub struct Calibrator {
    test: LoadTestResult,
    bounds: ParamBounds,
    config: Config,
    options: ParamOptimizer,
}

impl Calibrator {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `test` -- the measured load test
    /// * `bounds` -- the search box of the parameters
    /// * `config` -- the discretization and solver parameters of the pile model
    /// * `options` -- the optimizer parameters
    pub fn new(
        test: &LoadTestResult,
        bounds: &ParamBounds,
        config: &Config,
        options: &ParamOptimizer,
    ) -> Result<Self, StrError> {
        test.validate()?;
        bounds.validate()?;
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate calibrator because config.validate() failed");
        }
        if let Some(msg) = options.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate calibrator because options.validate() failed");
        }
        if !(bounds.Sbu.1 < config.delta_max()) {
            return Err("the upper bound of Sbu must be smaller than delta_max");
        }
        Ok(Calibrator {
            test: test.clone(),
            bounds: *bounds,
            config: config.clone(),
            options: options.clone(),
        })
    }

    /// Returns the measured load test
    pub fn test(&self) -> &LoadTestResult {
        &self.test
    }

    /// Runs the forward model with the given parameters
    pub fn curve<E: AnalysisEngine + ?Sized>(
        &self,
        engine: &mut E,
        params: &CalibrationParams,
    ) -> Result<Curve, StrError> {
        let mut pile = self.test.get_pile(params, &self.config)?;
        pile.analyze(engine)
    }

    /// Computes the distance between the computed and measured curves
    ///
    /// Returns the penalty if the analysis fails (e.g., no convergence) or if the
    /// distance is undefined (e.g., the computed curve is degenerate).
    pub fn cost<E: AnalysisEngine + ?Sized>(&self, engine: &mut E, params: &CalibrationParams) -> f64 {
        let curve = match self.curve(engine, params) {
            Ok(curve) => curve,
            Err(_) => return self.options.penalty,
        };
        let computed = curve.resample(self.test.displacement());
        let distance = least_square(&computed, self.test.force());
        if distance.is_finite() {
            distance
        } else {
            self.options.penalty
        }
    }

    /// Finds the parameters minimizing the cost using an in-crate axial engine
    ///
    /// Returns the best member of the final population, without local polishing.
    pub fn calibrate(&self) -> Result<CalibrationResult, StrError> {
        let mut engine = AxialEngine::new(&self.config)?;
        self.calibrate_with(&mut engine)
    }

    /// Finds the parameters minimizing the cost using the given engine
    pub fn calibrate_with<E: AnalysisEngine + ?Sized>(&self, engine: &mut E) -> Result<CalibrationResult, StrError> {
        let solver = DifferentialEvolution::new(&self.options)?;
        let bounds = self.bounds.to_array();
        let solution = solver.minimize(&bounds, |x| match CalibrationParams::from_array(x) {
            Ok(params) => self.cost(&mut *engine, &params),
            Err(_) => self.options.penalty,
        })?;
        let params = CalibrationParams::from_array(&solution.x)?;
        if self.options.verbose {
            println!("{}", params);
            println!(
                "cost = {:?}, generations = {}, evaluations = {}, converged = {}",
                solution.fun, solution.n_iterations, solution.n_evaluations, solution.converged
            );
        }
        Ok(CalibrationResult {
            params,
            cost: solution.fun,
            n_iterations: solution.n_iterations,
            n_evaluations: solution.n_evaluations,
            converged: solution.converged,
        })
    }
}

/// Returns the Euclidean distance `sqrt(Σ (y2ᵢ - y1ᵢ)²)` between two sequences
///
/// Returns NaN if the lengths differ or if any value is NaN.
pub fn least_square(y1: &[f64], y2: &[f64]) -> f64 {
    if y1.len() != y2.len() {
        return f64::NAN;
    }
    let sum: f64 = y1.iter().zip(y2).map(|(a, b)| (b - a) * (b - a)).sum();
    f64::sqrt(sum)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
