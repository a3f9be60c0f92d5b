use super::ParamOptimizer;
use crate::StrError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Holds the outcome of a differential evolution run
#[derive(Clone, Debug)]
pub struct DeSolution {
    /// Best point found
    pub x: Vec<f64>,

    /// Objective value at the best point
    pub fun: f64,

    /// Number of generations
    pub n_iterations: usize,

    /// Number of objective function evaluations
    pub n_evaluations: usize,

    /// Whether the population spread met the tolerance before `max_iter`
    pub converged: bool,
}

/// Implements the differential evolution method (strategy best/1/bin) for bounded global minimization
///
/// The population lives in the unit hypercube and is mapped onto the bounds before each
/// evaluation. Each generation draws a differential weight from the mutation range
/// (dithering). Mutants are built from the best member and two distinct random members;
/// the binomial crossover always takes at least one coordinate from the mutant;
/// coordinates falling outside the unit box are re-sampled uniformly. Trials replace their
/// parent immediately when they are not worse. The run stops when the standard deviation
/// of the population costs is not greater than `atol + tol・|mean|`. The best member is
/// returned as is (there is no local polishing step).
///
/// # References
///
/// * Storn R, Price K (1997) Differential Evolution - a Simple and Efficient Heuristic for
///   Global Optimization over Continuous Spaces, Journal of Global Optimization, 11:341-359
pub struct DifferentialEvolution<'a> {
    options: &'a ParamOptimizer,
}

impl<'a> DifferentialEvolution<'a> {
    /// Allocates a new instance
    pub fn new(options: &'a ParamOptimizer) -> Result<Self, StrError> {
        if let Some(msg) = options.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate optimizer because options.validate() failed");
        }
        Ok(DifferentialEvolution { options })
    }

    /// Minimizes the objective function within the given (lower, upper) bounds
    pub fn minimize<F>(&self, bounds: &[(f64, f64)], mut objective: F) -> Result<DeSolution, StrError>
    where
        F: FnMut(&[f64]) -> f64,
    {
        let ndim = bounds.len();
        if ndim == 0 {
            return Err("the number of dimensions must be ≥ 1");
        }
        if bounds.iter().any(|(lo, hi)| !lo.is_finite() || !hi.is_finite() || lo > hi) {
            return Err("the bounds must be finite with lower ≤ upper");
        }
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scale = |unit: &[f64]| -> Vec<f64> {
            unit.iter()
                .zip(bounds)
                .map(|(u, (lo, hi))| lo + u * (hi - lo))
                .collect()
        };

        // initial population
        let npop = usize::max(5, self.options.pop_size * ndim);
        let mut population: Vec<Vec<f64>> = (0..npop)
            .map(|_| (0..ndim).map(|_| rng.gen::<f64>()).collect())
            .collect();
        let mut energies: Vec<f64> = population.iter().map(|u| objective(&scale(u))).collect();
        let mut n_evaluations = npop;
        let mut best = index_of_min(&energies);

        // generations
        let mut n_iterations = 0;
        let mut converged = false;
        let (m0, m1) = self.options.mutation;
        let mut trial = vec![0.0; ndim];
        while n_iterations < self.options.max_iter {
            n_iterations += 1;
            let weight = m0 + rng.gen::<f64>() * (m1 - m0);
            for i in 0..npop {
                let (r0, r1) = pick_two(&mut rng, npop, i);
                let fill_point = rng.gen_range(0..ndim);
                for j in 0..ndim {
                    if j == fill_point || rng.gen::<f64>() < self.options.recombination {
                        trial[j] = population[best][j] + weight * (population[r0][j] - population[r1][j]);
                    } else {
                        trial[j] = population[i][j];
                    }
                    if !(trial[j] >= 0.0 && trial[j] <= 1.0) {
                        trial[j] = rng.gen::<f64>();
                    }
                }
                let energy = objective(&scale(&trial));
                n_evaluations += 1;
                if energy <= energies[i] {
                    population[i].copy_from_slice(&trial);
                    energies[i] = energy;
                    if energy < energies[best] {
                        best = i;
                    }
                }
            }
            let (mean, std_dev) = mean_and_std(&energies);
            if self.options.verbose {
                println!(
                    "{:>6} best = {:>11.6e} mean = {:>11.6e} std = {:>9.2e}",
                    n_iterations, energies[best], mean, std_dev
                );
            }
            if std_dev <= self.options.atol + self.options.tol * f64::abs(mean) {
                converged = true;
                break;
            }
        }
        Ok(DeSolution {
            x: scale(&population[best]),
            fun: energies[best],
            n_iterations,
            n_evaluations,
            converged,
        })
    }
}

/// Returns the index of the smallest value (NaN is never selected unless all values are NaN)
fn index_of_min(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v < values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Picks two distinct indices different from `exclude`
fn pick_two(rng: &mut StdRng, n: usize, exclude: usize) -> (usize, usize) {
    let mut r0 = rng.gen_range(0..n);
    while r0 == exclude {
        r0 = rng.gen_range(0..n);
    }
    let mut r1 = rng.gen_range(0..n);
    while r1 == exclude || r1 == r0 {
        r1 = rng.gen_range(0..n);
    }
    (r0, r1)
}

/// Returns the mean and the (population) standard deviation
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, f64::sqrt(variance))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{index_of_min, mean_and_std, pick_two, DifferentialEvolution};
    use crate::calibration::ParamOptimizer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use russell_lab::approx_eq;

    fn seeded() -> ParamOptimizer {
        let mut options = ParamOptimizer::new();
        options.set_seed(Some(1234));
        options
    }

    #[test]
    fn new_and_minimize_capture_errors() {
        let mut options = ParamOptimizer::new();
        options.pop_size = 0;
        assert_eq!(
            DifferentialEvolution::new(&options).err(),
            Some("cannot allocate optimizer because options.validate() failed")
        );
        let options = seeded();
        let solver = DifferentialEvolution::new(&options).unwrap();
        assert_eq!(
            solver.minimize(&[], |_| 0.0).err(),
            Some("the number of dimensions must be ≥ 1")
        );
        assert_eq!(
            solver.minimize(&[(1.0, 0.0)], |_| 0.0).err(),
            Some("the bounds must be finite with lower ≤ upper")
        );
    }

    #[test]
    fn helpers_work() {
        assert_eq!(index_of_min(&[3.0, 1.0, 2.0]), 1);
        assert_eq!(index_of_min(&[f64::NAN, 5.0, 6.0]), 1);
        let (mean, std_dev) = mean_and_std(&[1.0, 3.0]);
        approx_eq(mean, 2.0, 1e-15);
        approx_eq(std_dev, 1.0, 1e-15);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (r0, r1) = pick_two(&mut rng, 4, 2);
            assert!(r0 != 2 && r1 != 2 && r0 != r1);
            assert!(r0 < 4 && r1 < 4);
        }
    }

    #[test]
    fn minimize_sphere_works() {
        let options = seeded();
        let solver = DifferentialEvolution::new(&options).unwrap();
        let bounds = [(-5.0, 5.0), (-5.0, 5.0), (-5.0, 5.0)];
        let res = solver
            .minimize(&bounds, |x| x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum())
            .unwrap();
        assert!(res.fun < 1e-6);
        // the best member is returned without any further (polishing) evaluation
        let fun: f64 = res.x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum();
        assert_eq!(res.fun, fun);
        for v in &res.x {
            approx_eq(*v, 1.0, 1e-3);
        }
        assert!(res.n_evaluations > 0);
        assert_eq!(res.n_evaluations, 45 * (res.n_iterations + 1));
    }

    #[test]
    fn minimize_rosenbrock_works() {
        let mut options = seeded();
        options.set_tolerances(0.0, 1e-10).unwrap();
        let solver = DifferentialEvolution::new(&options).unwrap();
        let bounds = [(-2.0, 2.0), (-2.0, 2.0)];
        let res = solver
            .minimize(&bounds, |x| {
                100.0 * (x[1] - x[0] * x[0]) * (x[1] - x[0] * x[0]) + (1.0 - x[0]) * (1.0 - x[0])
            })
            .unwrap();
        approx_eq(res.x[0], 1.0, 1e-3);
        approx_eq(res.x[1], 1.0, 1e-3);
    }

    #[test]
    fn minimize_respects_bounds() {
        let options = seeded();
        let solver = DifferentialEvolution::new(&options).unwrap();
        // unconstrained minimum at x = -3 lies outside the box
        let bounds = [(0.0, 2.0)];
        let res = solver
            .minimize(&bounds, |x| {
                assert!(x[0] >= 0.0 && x[0] <= 2.0);
                (x[0] + 3.0) * (x[0] + 3.0)
            })
            .unwrap();
        approx_eq(res.x[0], 0.0, 0.05);
    }

    #[test]
    fn same_seed_gives_same_result() {
        let options = seeded();
        let solver = DifferentialEvolution::new(&options).unwrap();
        let f = |x: &[f64]| f64::sin(3.0 * x[0]) + x[0] * x[0];
        let a = solver.minimize(&[(-3.0, 3.0)], f).unwrap();
        let b = solver.minimize(&[(-3.0, 3.0)], f).unwrap();
        assert_eq!(a.x, b.x);
        assert_eq!(a.n_evaluations, b.n_evaluations);
    }

    #[test]
    fn max_iter_is_honored() {
        let mut options = seeded();
        options.set_max_iter(3).unwrap().set_tolerances(0.0, 0.0).unwrap();
        let solver = DifferentialEvolution::new(&options).unwrap();
        let res = solver.minimize(&[(-1.0, 1.0), (-1.0, 1.0)], |x| x[0] * x[0] + x[1] * x[1]).unwrap();
        assert!(!res.converged);
        assert_eq!(res.n_iterations, 3);
        assert_eq!(res.n_evaluations, 30 * 4);
    }
}
