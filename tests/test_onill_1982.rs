use pilecal::prelude::*;
use pilecal::StrError;
use russell_lab::approx_eq;

// O'Neill et al. (1982) single pile load test
//
// Steel pipe pile: L = 13.1 m, r = 0.137 m, wall thickness 9.3 mm, E = 210 GPa
// Overconsolidated clay: G = 65 MPa, ν = 0.5, τf from 19 kPa (head) to 93 kPa (tip)
//
// Measured head displacement at P = 653 kN: 4.2 mm

#[test]
fn test_onill_1982() -> Result<(), StrError> {
    let test = LoadTestResult::onill_1982_single_pile();
    let config = Config::new();
    let mut engine = AxialEngine::new(&config)?;
    let params = CalibrationParams::from_default();

    let mut pile = test.get_pile(&params, &config)?;
    let curve = pile.analyze(&mut engine)?;

    // one sample per load increment
    assert_eq!(curve.len(), 300);
    assert!(curve.is_monotonic_increasing());

    // the final increment carries the full load
    let (displacement, force) = curve.last().ok_or("curve is empty")?;
    approx_eq(force, 653e3, 1e-6);
    println!("head displacement at 653 kN = {:.3} mm", displacement * 1000.0);
    assert!(displacement > 1e-3 && displacement < 1e-2);

    // the first increment is nearly linear elastic
    approx_eq(curve.forces()[0], 653e3 / 300.0, 1e-6);
    assert!(curve.displacements()[0] > 0.0);
    assert!(curve.displacements()[0] < 1e-4);

    // the engine is left empty for the next build
    assert!(engine.is_empty());
    Ok(())
}

#[test]
fn test_onill_1982_mesh_refinement() -> Result<(), StrError> {
    let test = LoadTestResult::onill_1982_single_pile();
    let params = CalibrationParams::from_default();
    let mut results = Vec::new();
    for n in [10, 20, 40] {
        let mut config = Config::new();
        config.set_number_of_node(n)?.set_number_of_steps(50)?;
        let mut engine = AxialEngine::new(&config)?;
        let curve = test.get_pile(&params, &config)?.analyze(&mut engine)?;
        let (displacement, _) = curve.last().ok_or("curve is empty")?;
        assert!(displacement > 0.0);
        results.push(displacement);
    }
    // the head displacement settles as the mesh is refined
    let d1 = f64::abs(results[1] - results[0]);
    let d2 = f64::abs(results[2] - results[1]);
    assert!(d2 < d1);
    Ok(())
}
