//! Volume of a solid of revolution by the disk method.
//!
//! Rotating y = f(x), x ∈ [a, b], about the x-axis gives a solid whose volume is
//! V = ∫ₐᵇ π·f(x)² dx. The integrand is never negative, so the sign of f does not
//! matter. Besides the volume a [`SampleSet`] of the curve is produced for plotting.
use crate::numerical::quadrature::{IntegrationError, QuadratureConfig, QuadratureResult, integrate};
use crate::revolution::RevolutionError;
use crate::symbolic::symbolic_lambdify::ParsedFunction;
use log::{debug, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum_macros::Display;
use thiserror::Error;

/// number of points of a sample set
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("bounds must be finite numbers, got a = {a}, b = {b}")]
    NonFinite { a: f64, b: f64 },
    #[error("lower bound a = {a} is greater than upper bound b = {b}")]
    Reversed { a: f64, b: f64 },
}

/// What to do with a > b
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// fail with [`BoundsError::Reversed`]
    #[default]
    Reject,
    /// integrate over [b, a]
    Swap,
}

impl BoundsPolicy {
    /// Returns the interval to integrate over, with lower <= upper.
    pub fn resolve(&self, a: f64, b: f64) -> Result<(f64, f64), BoundsError> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(BoundsError::NonFinite { a, b });
        }
        if a <= b {
            return Ok((a, b));
        }
        match self {
            BoundsPolicy::Reject => Err(BoundsError::Reversed { a, b }),
            BoundsPolicy::Swap => {
                debug!("swapping reversed bounds [{}, {}]", a, b);
                Ok((b, a))
            }
        }
    }
}

/// n evenly spaced points from a to b, both ends included
pub fn linspace(a: f64, b: f64, n: usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, a),
        _ => {
            let h = (b - a) / ((n - 1) as f64);
            // last point is set exactly to avoid rounding past b
            DVector::from_fn(n, |i, _| if i == n - 1 { b } else { a + h * (i as f64) })
        }
    }
}

/// Curve points (x, f(x)) used for plotting
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub x: DVector<f64>,
    pub y: DVector<f64>,
}

impl SampleSet {
    pub fn new(f: &ParsedFunction, a: f64, b: f64, points: usize) -> Self {
        let x = linspace(a, b, points);
        let y = f.call(&x);
        SampleSet { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// largest |f(x)| among the finite samples, 0 if there is none
    pub fn max_radius(&self) -> f64 {
        self.y
            .iter()
            .filter(|y| y.is_finite())
            .fold(0.0_f64, |acc, y| acc.max(y.abs()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Everything `compute_volume_with` needs besides f and the bounds
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSettings {
    pub quadrature: QuadratureConfig,
    pub points: usize,
    pub bounds_policy: BoundsPolicy,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        VolumeSettings {
            quadrature: QuadratureConfig::default(),
            points: DEFAULT_SAMPLE_POINTS,
            bounds_policy: BoundsPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeResult {
    pub volume: f64,
    pub abs_error: f64,
    pub evaluations: usize,
    /// interval actually integrated over
    pub interval: (f64, f64),
    pub samples: SampleSet,
}

/// ∫ π·f(x)² dx over [lower, upper] for any real function
pub fn volume_disk_method(
    f: &dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, IntegrationError> {
    let disk_area = |x: f64| {
        let r = f(x);
        PI * r * r
    };
    integrate(&disk_area, lower, upper, config)
}

/// Volume with default settings: adaptive quadrature, 100 samples, reversed bounds rejected.
pub fn compute_volume(f: &ParsedFunction, a: f64, b: f64) -> Result<VolumeResult, RevolutionError> {
    compute_volume_with(f, a, b, &VolumeSettings::default())
}

/// Volume with explicit settings. The settings are checked first, so an empty
/// interval with bad quadrature settings is still an error.
pub fn compute_volume_with(
    f: &ParsedFunction,
    a: f64,
    b: f64,
    settings: &VolumeSettings,
) -> Result<VolumeResult, RevolutionError> {
    settings.quadrature.validate()?;
    if settings.points < 2 {
        return Err(RevolutionError::Config(format!(
            "at least 2 sample points are needed, got {}",
            settings.points
        )));
    }
    let (lower, upper) = settings.bounds_policy.resolve(a, b)?;
    let samples = SampleSet::new(f, lower, upper, settings.points);
    if lower == upper {
        info!("empty interval [{}, {}], volume is 0", lower, upper);
        return Ok(VolumeResult {
            volume: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            interval: (lower, upper),
            samples,
        });
    }
    let quad = volume_disk_method(&|x| f.eval(x), lower, upper, &settings.quadrature)?;
    info!(
        "V = {} for {} on [{}, {}] ({} method, error {:e}, {} evaluations)",
        quad.value, f, lower, upper, settings.quadrature.method, quad.abs_error, quad.evaluations
    );
    Ok(VolumeResult {
        volume: quad.value,
        abs_error: quad.abs_error,
        evaluations: quad.evaluations,
        interval: (lower, upper),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature::QuadMethod;
    use crate::symbolic::symbolic_lambdify::parse;
    use approx::assert_relative_eq;

    fn volume(expr: &str, a: f64, b: f64) -> f64 {
        compute_volume(&parse(expr).unwrap(), a, b).unwrap().volume
    }

    #[test]
    fn test_empty_interval_has_zero_volume() {
        for expr in ["x^2", "1/x", "ln(x)", "5"] {
            assert_eq!(volume(expr, 0.0, 0.0), 0.0);
        }
        assert_eq!(volume("sin(x)", 2.5, 2.5), 0.0);
    }

    #[test]
    fn test_empty_interval_still_checks_settings() {
        let settings = VolumeSettings {
            quadrature: QuadratureConfig {
                simpson_intervals: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let f = parse("x").unwrap();
        for (a, b) in [(1.0, 1.0), (0.0, 1.0)] {
            assert!(matches!(
                compute_volume_with(&f, a, b, &settings),
                Err(RevolutionError::Integration(IntegrationError::InvalidConfig { .. }))
            ));
        }
    }

    #[test]
    fn test_hyperbolic_cosine() {
        // ∫₀¹ π·cosh²(x) dx = π·(sinh(2)/4 + 1/2)
        let expected = PI * (2.0_f64.sinh() / 4.0 + 0.5);
        assert_relative_eq!(volume("cosh(x)", 0.0, 1.0), expected, epsilon = 1e-9);
        // sinh² = cosh² - 1
        assert_relative_eq!(volume("sinh(x)", 0.0, 1.0), expected - PI, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_function_gives_cylinder() {
        let c = 3.0;
        assert_relative_eq!(volume("3", 1.0, 4.0), PI * c * c * 3.0, epsilon = 1e-9);
        assert_relative_eq!(volume("-2", 0.0, 1.0), 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_cone() {
        assert_relative_eq!(volume("x", 0.0, 1.0), PI / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere() {
        for r in [1.0_f64, 2.0, 3.5] {
            let expr = format!("sqrt({} - x^2)", r * r);
            assert_relative_eq!(
                volume(&expr, -r, r),
                4.0 / 3.0 * PI * r.powi(3),
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn test_volume_does_not_depend_on_sign_of_f() {
        let positive = volume("x^2 + 1", -1.0, 2.0);
        let negative = volume("-(x^2 + 1)", -1.0, 2.0);
        assert_relative_eq!(positive, negative, epsilon = 1e-12);
        assert!(volume("sin(x)", 0.0, 2.0 * PI) > 0.0);
    }

    #[test]
    fn test_reversed_bounds_rejected_by_default() {
        let f = parse("x").unwrap();
        let err = compute_volume(&f, 1.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            RevolutionError::Bounds(BoundsError::Reversed { a, b }) if a == 1.0 && b == 0.0
        ));
    }

    #[test]
    fn test_reversed_bounds_swapped_on_request() {
        let f = parse("x").unwrap();
        let settings = VolumeSettings {
            bounds_policy: BoundsPolicy::Swap,
            ..Default::default()
        };
        let swapped = compute_volume_with(&f, 1.0, 0.0, &settings).unwrap();
        let forward = compute_volume(&f, 0.0, 1.0).unwrap();
        assert_relative_eq!(swapped.volume, forward.volume, epsilon = 1e-12);
        assert_eq!(swapped.interval, (0.0, 1.0));
    }

    #[test]
    fn test_non_finite_bounds() {
        let f = parse("x").unwrap();
        for (a, b) in [(f64::NAN, 1.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 0.0)] {
            assert!(matches!(
                compute_volume(&f, a, b),
                Err(RevolutionError::Bounds(BoundsError::NonFinite { .. }))
            ));
        }
    }

    #[test]
    fn test_singular_integrand_is_an_error() {
        let f = parse("1/x").unwrap();
        let err = compute_volume(&f, -1.0, 1.0).unwrap_err();
        assert!(matches!(err, RevolutionError::Integration(_)));
    }

    #[test]
    fn test_log_outside_domain_is_an_error() {
        let f = parse("ln(x)").unwrap();
        assert!(matches!(
            compute_volume(&f, -2.0, -1.0),
            Err(RevolutionError::Integration(IntegrationError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_samples_span_the_interval() {
        let result = compute_volume(&parse("x^2").unwrap(), -1.0, 3.0).unwrap();
        let samples = &result.samples;
        assert_eq!(samples.len(), DEFAULT_SAMPLE_POINTS);
        assert_eq!(samples.x[0], -1.0);
        assert_eq!(samples.x[DEFAULT_SAMPLE_POINTS - 1], 3.0);
        for (x, y) in samples.iter() {
            assert_relative_eq!(y, x * x, epsilon = 1e-12);
        }
        assert_relative_eq!(samples.max_radius(), 9.0);
    }

    #[test]
    fn test_all_methods_agree() {
        let f = parse("exp(-x) * cos(x)").unwrap();
        let reference = compute_volume(&f, 0.0, 3.0).unwrap().volume;
        for method in [QuadMethod::GaussLegendre, QuadMethod::Simpson] {
            let settings = VolumeSettings {
                quadrature: QuadratureConfig::with_method(method),
                ..Default::default()
            };
            let v = compute_volume_with(&f, 0.0, 3.0, &settings).unwrap().volume;
            assert_relative_eq!(v, reference, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_too_few_sample_points() {
        let settings = VolumeSettings {
            points: 1,
            ..Default::default()
        };
        assert!(matches!(
            compute_volume_with(&parse("x").unwrap(), 0.0, 1.0, &settings),
            Err(RevolutionError::Config(_))
        ));
    }

    #[test]
    fn test_linspace() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1).as_slice(), &[2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
