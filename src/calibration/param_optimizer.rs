use crate::StrError;
use std::fmt;

/// Holds the parameters of the differential evolution optimizer used by the calibration
#[derive(Clone, Debug)]
pub struct ParamOptimizer {
    /// Maximum number of generations
    pub(crate) max_iter: usize,

    /// Multiplier of the population size; the population has `pop_size・ndim` members
    pub(crate) pop_size: usize,

    /// Relative tolerance on the spread of the population costs
    pub(crate) tol: f64,

    /// Absolute tolerance on the spread of the population costs
    pub(crate) atol: f64,

    /// Range of the differential weight; a new weight is drawn for each generation (dithering)
    pub(crate) mutation: (f64, f64),

    /// Crossover probability
    pub(crate) recombination: f64,

    /// Seed of the random number generator; None means seeded from the operating system
    pub(crate) seed: Option<u64>,

    /// Cost assigned to trial parameters whose evaluation fails or is undefined
    pub(crate) penalty: f64,

    /// Shows one message per generation
    pub(crate) verbose: bool,
}

impl ParamOptimizer {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        ParamOptimizer {
            max_iter: 1000,
            pop_size: 15,
            tol: 0.01,
            atol: 0.0,
            mutation: (0.5, 1.0),
            recombination: 0.7,
            seed: None,
            penalty: 1e6,
            verbose: false,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.max_iter < 1 {
            return Some(format!("max_iter = {} is incorrect; it must be ≥ 1", self.max_iter));
        }
        if self.pop_size < 1 {
            return Some(format!("pop_size = {} is incorrect; it must be ≥ 1", self.pop_size));
        }
        if !(self.tol >= 0.0) || !(self.atol >= 0.0) {
            return Some("tolerances must be ≥ 0.0".to_string());
        }
        let (m0, m1) = self.mutation;
        if !(m0 >= 0.0 && m0 <= m1 && m1 < 2.0) {
            return Some(format!("mutation = {:?} is incorrect; it must satisfy 0 ≤ min ≤ max < 2", self.mutation));
        }
        if !(self.recombination >= 0.0 && self.recombination <= 1.0) {
            return Some(format!(
                "recombination = {:?} is incorrect; it must be in [0, 1]",
                self.recombination
            ));
        }
        if !(self.penalty > 0.0) || !self.penalty.is_finite() {
            return Some(format!("penalty = {:?} is incorrect; it must be finite and > 0", self.penalty));
        }
        None
    }

    /// Sets the maximum number of generations
    pub fn set_max_iter(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("max_iter must be ≥ 1");
        }
        self.max_iter = value;
        Ok(self)
    }

    /// Sets the multiplier of the population size
    pub fn set_pop_size(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("pop_size must be ≥ 1");
        }
        self.pop_size = value;
        Ok(self)
    }

    /// Sets the relative and absolute tolerances of the convergence test
    pub fn set_tolerances(&mut self, tol: f64, atol: f64) -> Result<&mut Self, StrError> {
        if !(tol >= 0.0) || !(atol >= 0.0) {
            return Err("tolerances must be ≥ 0.0");
        }
        self.tol = tol;
        self.atol = atol;
        Ok(self)
    }

    /// Sets the range of the differential weight
    ///
    /// Use `min == max` to disable dithering.
    pub fn set_mutation(&mut self, min: f64, max: f64) -> Result<&mut Self, StrError> {
        if !(min >= 0.0 && min <= max && max < 2.0) {
            return Err("the mutation range must satisfy 0 ≤ min ≤ max < 2");
        }
        self.mutation = (min, max);
        Ok(self)
    }

    /// Sets the crossover probability
    pub fn set_recombination(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value >= 0.0 && value <= 1.0) {
            return Err("recombination must be in [0, 1]");
        }
        self.recombination = value;
        Ok(self)
    }

    /// Sets the seed of the random number generator
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Sets the cost of failed evaluations
    pub fn set_penalty(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value > 0.0) || !value.is_finite() {
            return Err("penalty must be finite and > 0.0");
        }
        self.penalty = value;
        Ok(self)
    }

    /// Sets the verbose mode
    pub fn set_verbose(&mut self, flag: bool) -> &mut Self {
        self.verbose = flag;
        self
    }

    /// Returns the maximum number of generations
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Returns the cost of failed evaluations
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

impl fmt::Display for ParamOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Optimizer parameters\n")?;
        write!(f, "====================\n")?;
        write!(f, "max_iter = {:?}\n", self.max_iter)?;
        write!(f, "pop_size = {:?}\n", self.pop_size)?;
        write!(f, "tol = {:?}\n", self.tol)?;
        write!(f, "atol = {:?}\n", self.atol)?;
        write!(f, "mutation = {:?}\n", self.mutation)?;
        write!(f, "recombination = {:?}\n", self.recombination)?;
        write!(f, "seed = {:?}\n", self.seed)?;
        write!(f, "penalty = {:?}\n", self.penalty)?;
        write!(f, "verbose = {:?}\n", self.verbose)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ParamOptimizer;

    #[test]
    fn new_works() {
        let options = ParamOptimizer::new();
        assert_eq!(options.max_iter(), 1000);
        assert_eq!(options.pop_size, 15);
        assert_eq!(options.penalty(), 1e6);
        assert_eq!(options.validate(), None);
    }

    #[test]
    fn setters_capture_errors() {
        let mut options = ParamOptimizer::new();
        assert_eq!(options.set_max_iter(0).err(), Some("max_iter must be ≥ 1"));
        assert_eq!(options.set_pop_size(0).err(), Some("pop_size must be ≥ 1"));
        assert_eq!(options.set_tolerances(-0.1, 0.0).err(), Some("tolerances must be ≥ 0.0"));
        assert_eq!(
            options.set_mutation(1.0, 0.5).err(),
            Some("the mutation range must satisfy 0 ≤ min ≤ max < 2")
        );
        assert_eq!(options.set_recombination(1.5).err(), Some("recombination must be in [0, 1]"));
        assert_eq!(options.set_penalty(f64::INFINITY).err(), Some("penalty must be finite and > 0.0"));
    }

    #[test]
    fn setters_and_validate_work() {
        let mut options = ParamOptimizer::new();
        options
            .set_max_iter(50)
            .unwrap()
            .set_pop_size(8)
            .unwrap()
            .set_mutation(0.7, 0.7)
            .unwrap()
            .set_seed(Some(42));
        assert_eq!(options.max_iter(), 50);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.validate(), None);
        options.recombination = -1.0;
        assert_eq!(
            options.validate(),
            Some("recombination = -1.0 is incorrect; it must be in [0, 1]".to_string())
        );
    }

    #[test]
    fn display_works() {
        let options = ParamOptimizer::new();
        let text = format!("{}", options);
        assert!(text.starts_with("Optimizer parameters\n====================\nmax_iter = 1000\n"));
    }
}
