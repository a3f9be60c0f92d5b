use crate::base::Config;
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};

/// Controls the convergence of the Newton-Raphson iterations of a load increment
///
/// Convergence is reached when either
///
/// 1. the max-norm of the residual `‖R‖∞ ≤ tol_rr_abs + tol_rr_rel・‖Fext‖∞`, or
/// 2. the max-norm of the displacement correction `‖mdu‖∞ ≤ tol_mdu_abs`
pub struct ControlConvergence<'a> {
    config: &'a Config,
    iteration: usize,
    norm_rr_prev: f64,
    norm_rr: f64,
    norm_mdu: f64,
    converged_on_norm_rr: bool,
    diverging_on_norm_rr: bool,
    converged_on_norm_mdu: bool,
    n_iterations_total: usize,
}

impl<'a> ControlConvergence<'a> {
    /// Creates a new convergence controller
    pub fn new(config: &'a Config) -> Self {
        ControlConvergence {
            config,
            iteration: 0,
            norm_rr_prev: 0.0,
            norm_rr: 0.0,
            norm_mdu: 0.0,
            converged_on_norm_rr: false,
            diverging_on_norm_rr: false,
            converged_on_norm_mdu: false,
            n_iterations_total: 0,
        }
    }

    /// Returns the total number of iterations over all increments
    pub fn n_iterations_total(&self) -> usize {
        self.n_iterations_total
    }

    /// Returns true if converged on the residual
    pub fn converged_on_norm_rr(&self) -> bool {
        self.converged_on_norm_rr
    }

    /// Returns true if converged on the displacement correction
    pub fn converged_on_norm_mdu(&self) -> bool {
        self.converged_on_norm_mdu
    }

    /// Returns true if converged on either criterion
    pub fn converged(&self) -> bool {
        self.converged_on_norm_rr || self.converged_on_norm_mdu
    }

    /// Analyzes the residual vector
    ///
    /// Returns an error if NaN or Inf values are found.
    pub(crate) fn analyze_rr(&mut self, iteration: usize, rr: &Vector, norm_ff_ext: f64) -> Result<(), StrError> {
        self.iteration = iteration;
        self.n_iterations_total += 1;
        let found_nan_or_inf = rr.as_data().iter().any(|v| !v.is_finite());
        self.norm_rr = if found_nan_or_inf { f64::NAN } else { vec_norm(rr, Norm::Max) };
        let tolerance = self.config.tol_rr_abs + self.config.tol_rr_rel * norm_ff_ext;
        self.converged_on_norm_rr = if found_nan_or_inf {
            false
        } else {
            self.norm_rr <= tolerance
        };
        self.diverging_on_norm_rr = if found_nan_or_inf || iteration == 0 {
            false
        } else {
            self.norm_rr > self.norm_rr_prev
        };
        self.norm_rr_prev = self.norm_rr;
        if found_nan_or_inf {
            Err("found NaN or Inf in the residual vector")
        } else {
            Ok(())
        }
    }

    /// Analyzes the displacement correction
    ///
    /// Returns an error if NaN or Inf values are found.
    pub(crate) fn analyze_mdu(&mut self, mdu: &Vector) -> Result<(), StrError> {
        if mdu.as_data().iter().any(|v| !v.is_finite()) {
            self.norm_mdu = f64::NAN;
            self.converged_on_norm_mdu = false;
            return Err("found NaN or Inf in the displacement correction");
        }
        self.norm_mdu = vec_norm(mdu, Norm::Max);
        self.converged_on_norm_mdu = self.norm_mdu <= self.config.tol_mdu_abs;
        Ok(())
    }

    /// Prints the header of the convergence table
    pub(crate) fn print_header(&self) {
        if self.config.verbose_steps || self.config.verbose_iterations {
            println!("\n{:>8} {:>11} {:>5} {:>9} {:>9}", "step", "λ", "iter", "‖mdu‖∞", "‖R‖∞");
            println!("{}", "─".repeat(46));
        }
    }

    /// Prints information about the load increment
    pub(crate) fn print_step(&self, step: usize, load_factor: f64) {
        if self.config.verbose_steps {
            println!(
                "{:>8} {:>11.6e} {:>5} {:>9.2e} {:>9.2e}",
                step,
                load_factor,
                self.iteration,
                self.norm_mdu,
                self.norm_rr
            );
        }
    }

    /// Prints information about the current iteration
    pub(crate) fn print_iteration(&self) {
        if self.config.verbose_iterations {
            let status = if self.converged() {
                "converged"
            } else if self.diverging_on_norm_rr {
                "diverging"
            } else {
                ""
            };
            println!(
                "{:>8} {:>11} {:>5} {:>9.2e} {:>9.2e} {}",
                "·", "·", self.iteration, self.norm_mdu, self.norm_rr, status
            );
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_steps || self.config.verbose_iterations {
            println!("{}", "─".repeat(46));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
