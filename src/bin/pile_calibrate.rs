use pilecal::base::{CalibrationParams, Config, ParamBounds};
use pilecal::calibration::{Calibrator, LoadTestResult, ParamOptimizer};
use pilecal::fem::AxialEngine;
use pilecal::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "pile_calibrate",
    about = "Calibrates the axial load-transfer parameters of a single pile against a load test"
)]
struct Options {
    /// JSON file with the load test data
    #[structopt(required_unless = "sample")]
    input: Option<String>,

    /// Uses the O'Neill et al. (1982) single pile test instead of an input file
    #[structopt(long)]
    sample: bool,

    /// Runs the pile model with the default parameters only
    #[structopt(long)]
    forward: bool,

    /// Writes the computed load-displacement curve to this JSON file
    #[structopt(long)]
    output: Option<String>,

    /// Number of pile nodes
    #[structopt(long, default_value = "50")]
    nodes: usize,

    /// Number of load increments
    #[structopt(long, default_value = "300")]
    steps: usize,

    /// Maximum number of optimizer generations
    #[structopt(long, default_value = "1000")]
    max_iter: usize,

    /// Multiplier of the optimizer population size
    #[structopt(long, default_value = "15")]
    pop_size: usize,

    /// Seed of the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Shows the optimizer progress
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load data
    let test = match (&options.input, options.sample) {
        (_, true) => LoadTestResult::onill_1982_single_pile(),
        (Some(path), false) => LoadTestResult::read_json(path)?,
        (None, false) => return Err("an input file or the --sample flag is required"),
    };

    // configuration
    let mut config = Config::new();
    config
        .set_number_of_node(options.nodes)?
        .set_number_of_steps(options.steps)?;
    let mut optimizer = ParamOptimizer::new();
    optimizer
        .set_max_iter(options.max_iter)?
        .set_pop_size(options.pop_size)?
        .set_seed(options.seed)
        .set_verbose(options.verbose);
    let calibrator = Calibrator::new(&test, &ParamBounds::new(), &config, &optimizer)?;

    // parameters
    let params = if options.forward {
        CalibrationParams::from_default()
    } else {
        let result = calibrator.calibrate()?;
        println!("\ncost = {:.6e} after {} generations", result.cost, result.n_iterations);
        if !result.converged {
            println!("WARNING: the optimizer did not converge");
        }
        result.params
    };
    println!("{}", params);

    // computed curve
    let mut engine = AxialEngine::new(&config)?;
    let curve = calibrator.curve(&mut engine, &params)?;
    if let Some((displacement, force)) = curve.last() {
        println!("head displacement = {:.6e} at force = {:.6e}", displacement, force);
    }
    if let Some(path) = &options.output {
        curve.write_json(path)?;
        println!("curve written to {}", path);
    }
    Ok(())
}
