use crate::StrError;
use std::fmt;

/// Holds configuration parameters for the pile model and the incremental analysis
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of pile nodes along the depth (including head and tip)
    pub(crate) number_of_node: usize,

    /// Number of equal load increments from zero to the total load
    pub(crate) number_of_steps: usize,

    /// Maximum number of Newton-Raphson iterations per increment
    pub(crate) n_max_iterations: usize,

    /// Absolute tolerance for the max-norm of the residual vector
    pub(crate) tol_rr_abs: f64,

    /// Tolerance for the max-norm of the residual vector relative to the max-norm of the external forces
    pub(crate) tol_rr_rel: f64,

    /// Absolute tolerance for the max-norm of the displacement correction
    pub(crate) tol_mdu_abs: f64,

    /// Number of displacement samples of the friction (t-z) curves
    pub(crate) friction_n_sample: usize,

    /// Smallest (positive) displacement sample of the friction (t-z) curves
    pub(crate) friction_delta_min: f64,

    /// Largest displacement represented by the spring tables
    pub(crate) delta_max: f64,

    /// Shows one message per load increment
    pub(crate) verbose_steps: bool,

    /// Shows the convergence history of the Newton-Raphson iterations
    pub(crate) verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            number_of_node: 50,
            number_of_steps: 300,
            n_max_iterations: 20,
            tol_rr_abs: 1e-6,
            tol_rr_rel: 1e-9,
            tol_mdu_abs: 1e-14,
            friction_n_sample: 50,
            friction_delta_min: 1e-12,
            delta_max: 0.1,
            verbose_steps: false,
            verbose_iterations: false,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.number_of_node < 2 {
            return Some(format!("number_of_node = {} is incorrect; it must be ≥ 2", self.number_of_node));
        }
        if self.number_of_steps < 1 {
            return Some(format!("number_of_steps = {} is incorrect; it must be ≥ 1", self.number_of_steps));
        }
        if self.n_max_iterations < 1 {
            return Some(format!("n_max_iterations = {} is incorrect; it must be ≥ 1", self.n_max_iterations));
        }
        if self.tol_rr_abs < 0.0 || self.tol_rr_rel < 0.0 || self.tol_mdu_abs < 0.0 {
            return Some("tolerances must be ≥ 0.0".to_string());
        }
        if self.friction_n_sample < 2 {
            return Some(format!("friction_n_sample = {} is incorrect; it must be ≥ 2", self.friction_n_sample));
        }
        if !(self.friction_delta_min > 0.0 && self.friction_delta_min < self.delta_max) {
            return Some(format!(
                "friction_delta_min = {:?} is incorrect; it must be in (0, delta_max)",
                self.friction_delta_min
            ));
        }
        None
    }

    /// Sets the number of pile nodes
    pub fn set_number_of_node(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 2 {
            return Err("number_of_node must be ≥ 2");
        }
        self.number_of_node = value;
        Ok(self)
    }

    /// Sets the number of load increments
    pub fn set_number_of_steps(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("number_of_steps must be ≥ 1");
        }
        self.number_of_steps = value;
        Ok(self)
    }

    /// Sets the maximum number of Newton-Raphson iterations per increment
    pub fn set_n_max_iterations(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        self.n_max_iterations = value;
        Ok(self)
    }

    /// Sets the tolerances for the residual (absolute and relative) and for the correction
    pub fn set_tolerances(&mut self, tol_rr_abs: f64, tol_rr_rel: f64, tol_mdu_abs: f64) -> Result<&mut Self, StrError> {
        if tol_rr_abs < 0.0 || tol_rr_rel < 0.0 || tol_mdu_abs < 0.0 {
            return Err("tolerances must be ≥ 0.0");
        }
        self.tol_rr_abs = tol_rr_abs;
        self.tol_rr_rel = tol_rr_rel;
        self.tol_mdu_abs = tol_mdu_abs;
        Ok(self)
    }

    /// Sets the resolution of the friction (t-z) curves
    ///
    /// The samples are log-spaced from `delta_min` to `delta_max`.
    pub fn set_friction_sampling(&mut self, n_sample: usize, delta_min: f64) -> Result<&mut Self, StrError> {
        if n_sample < 2 {
            return Err("the number of friction samples must be ≥ 2");
        }
        if !(delta_min > 0.0 && delta_min < self.delta_max) {
            return Err("the smallest friction sample must be in (0, delta_max)");
        }
        self.friction_n_sample = n_sample;
        self.friction_delta_min = delta_min;
        Ok(self)
    }

    /// Sets the largest displacement represented by the spring tables
    pub fn set_delta_max(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value > self.friction_delta_min) {
            return Err("delta_max must be greater than the smallest friction sample");
        }
        self.delta_max = value;
        Ok(self)
    }

    /// Sets the verbose mode for load increments
    pub fn set_verbose_steps(&mut self, flag: bool) -> &mut Self {
        self.verbose_steps = flag;
        self
    }

    /// Sets the verbose mode for Newton-Raphson iterations
    pub fn set_verbose_iterations(&mut self, flag: bool) -> &mut Self {
        self.verbose_iterations = flag;
        self
    }

    /// Returns the number of pile nodes
    pub fn number_of_node(&self) -> usize {
        self.number_of_node
    }

    /// Returns the number of load increments
    pub fn number_of_steps(&self) -> usize {
        self.number_of_steps
    }

    /// Returns the largest displacement represented by the spring tables
    pub fn delta_max(&self) -> f64 {
        self.delta_max
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "number_of_node = {:?}\n", self.number_of_node)?;
        write!(f, "number_of_steps = {:?}\n", self.number_of_steps)?;
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations)?;
        write!(f, "tol_rr_abs = {:?}\n", self.tol_rr_abs)?;
        write!(f, "tol_rr_rel = {:?}\n", self.tol_rr_rel)?;
        write!(f, "tol_mdu_abs = {:?}\n", self.tol_mdu_abs)?;
        write!(f, "friction_n_sample = {:?}\n", self.friction_n_sample)?;
        write!(f, "friction_delta_min = {:?}\n", self.friction_delta_min)?;
        write!(f, "delta_max = {:?}\n", self.delta_max)?;
        write!(f, "verbose_steps = {:?}\n", self.verbose_steps)?;
        write!(f, "verbose_iterations = {:?}\n", self.verbose_iterations)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
