//! Two-stage solve for the reference greenhouse measurement.
//!
//! 25.4775 °C, 55.1136 % relative humidity, 0.031396 g/m³ per second.

use ec_core::constants::GAS_CONST_WATER;
use ec_solver::{SolverProfile, check, solve_dry_bulb, solve_wet_bulb};

const AIR: f64 = 25.4775;
const RH: f64 = 55.1136;
const ET_RATE: f64 = 0.031396;

#[test]
fn wet_bulb_converges_between_18_and_20() {
    let settings = SolverProfile::Production.settings();
    let wb = solve_wet_bulb(AIR, RH, &settings.wet_bulb).unwrap();

    println!(
        "twb = {} after {} iterations (residual {:e})",
        wb.temperature_c, wb.outcome.iterations, wb.outcome.residual
    );
    assert!(wb.outcome.converged);
    assert!(wb.temperature_c > 18.0 && wb.temperature_c < 20.0);
}

#[test]
fn zero_seconds_has_no_depression() {
    let settings = SolverProfile::Production.settings();
    let twb = solve_wet_bulb(AIR, RH, &settings.wet_bulb).unwrap().temperature_c;

    let db = solve_dry_bulb(AIR, RH, twb, GAS_CONST_WATER, 0.0, &settings.dry_bulb).unwrap();
    assert!((db.temperature_c - AIR).abs() < 1e-3);

    let flags = check(db.temperature_c, twb, db.abs_hum_et, db.max_hum_et);
    assert!(flags.is_plausible());
}

#[test]
fn long_duration_is_flagged() {
    let settings = SolverProfile::Production.settings();
    let twb = solve_wet_bulb(AIR, RH, &settings.wet_bulb).unwrap().temperature_c;

    let et = ET_RATE * 199.0;
    let db = solve_dry_bulb(AIR, RH, twb, GAS_CONST_WATER, et, &settings.dry_bulb).unwrap();
    let depression = AIR - db.temperature_c;
    assert!(depression > 0.0);

    let flags = check(db.temperature_c, twb, db.abs_hum_et, db.max_hum_et);
    // the air would have to cool below its own wet bulb
    assert!(db.temperature_c < twb);
    assert!(flags.temperature_inversion);
    assert!(flags.supersaturation);
}

#[test]
fn inversion_and_saturation_set_in_together() {
    let settings = SolverProfile::Production.settings();
    let twb = solve_wet_bulb(AIR, RH, &settings.wet_bulb).unwrap().temperature_c;

    // below ~100 s both checks pass, above ~120 s both fail
    for seconds in [10.0, 60.0, 95.0, 125.0, 150.0, 199.0] {
        let et = ET_RATE * seconds;
        let db = solve_dry_bulb(AIR, RH, twb, GAS_CONST_WATER, et, &settings.dry_bulb).unwrap();
        let flags = check(db.temperature_c, twb, db.abs_hum_et, db.max_hum_et);
        assert_eq!(
            flags.temperature_inversion, flags.supersaturation,
            "seconds={seconds} flags={flags:?}"
        );
        assert_eq!(flags.is_plausible(), seconds < 100.0, "seconds={seconds}");
    }
}
