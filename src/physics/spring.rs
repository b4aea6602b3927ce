use std::f64::consts::PI;

/// Hooke's law restoring force: F = -k x.
pub fn restoring_force(spring_constant: f64, position: f64) -> f64 {
    -(spring_constant * position)
}

/// Natural period 2π√(m/k). `None` when m/k is not positive (no oscillation).
pub fn natural_period(mass: f64, spring_constant: f64) -> Option<f64> {
    let ratio = mass / spring_constant;
    if ratio > 0.0 && ratio.is_finite() {
        Some(2.0 * PI * ratio.sqrt())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Stability of semi-implicit Euler on x'' = -(k/m) x
// ---------------------------------------------------------------------------

/// Largest time step for which the scheme stays bounded: h < 2/ω = 2√(m/k).
pub fn stability_limit(mass: f64, spring_constant: f64) -> Option<f64> {
    natural_period(mass, spring_constant).map(|period| period / PI)
}
