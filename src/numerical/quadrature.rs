//! Numerical integration of a real function over a finite interval.
//!
//! Three methods are available:
//! - `Adaptive` (default): global adaptive bisection over Gauss-Legendre panels. Every
//!   panel is integrated once as a whole and once as two halves; the difference is the
//!   panel error estimate. The panel with the largest error is split until the summed
//!   error is below `max(epsabs, epsrel * |I|)` or `limit` subdivisions are spent.
//! - `GaussLegendre`: a single fixed-degree Gauss-Legendre rule.
//! - `Simpson`: composite Simpson rule with an even number of intervals.
//!
//! Any non-finite value of the integrand is an error, so a singularity inside the
//! interval never leaks out as NaN or infinity. A finite integrand whose integral
//! exceeds the range of `f64` is reported as [`IntegrationError::Overflow`].
use gauss_quad::GaussLegendre;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// absolute and relative tolerance used when none is given
pub const DEFAULT_TOLERANCE: f64 = 1.49e-8;
/// maximal number of panel bisections
pub const DEFAULT_LIMIT: usize = 50;
/// Gauss-Legendre points per panel
pub const DEFAULT_DEGREE: usize = 21;
pub const DEFAULT_SIMPSON_INTERVALS: usize = 1000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("integrand is not finite at x = {x}")]
    NonFinite { x: f64 },

    #[error(
        "integral did not converge after {subdivisions} subdivisions: estimated error {abs_error:e} exceeds tolerance {tolerance:e}"
    )]
    NotConverged {
        subdivisions: usize,
        value: f64,
        abs_error: f64,
        tolerance: f64,
    },

    #[error("invalid quadrature settings: {reason}")]
    InvalidConfig { reason: String },

    #[error("integral overflowed to {value}: the integrand is finite but too large")]
    Overflow { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum QuadMethod {
    /// adaptive bisection over Gauss-Legendre panels
    Adaptive,
    /// Gauss-Legendre quadrature of fixed degree over the whole interval
    GaussLegendre,
    /// composite Simpson rule
    Simpson,
}

impl QuadMethod {
    /// Get a description of the quadrature method
    pub fn description(&self) -> &'static str {
        match self {
            QuadMethod::Adaptive => "adaptive bisection over Gauss-Legendre panels",
            QuadMethod::GaussLegendre => "Gauss-Legendre quadrature of fixed degree",
            QuadMethod::Simpson => "composite Simpson rule",
        }
    }
}

/// `[quadrature]` section of a task file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuadratureConfig {
    pub method: QuadMethod,
    /// Gauss-Legendre points (per panel for the adaptive method)
    pub degree: usize,
    pub epsabs: f64,
    pub epsrel: f64,
    /// maximal number of bisections of the adaptive method
    pub limit: usize,
    /// number of intervals of the Simpson rule, must be even
    pub simpson_intervals: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        QuadratureConfig {
            method: QuadMethod::Adaptive,
            degree: DEFAULT_DEGREE,
            epsabs: DEFAULT_TOLERANCE,
            epsrel: DEFAULT_TOLERANCE,
            limit: DEFAULT_LIMIT,
            simpson_intervals: DEFAULT_SIMPSON_INTERVALS,
        }
    }
}

impl QuadratureConfig {
    pub fn with_method(method: QuadMethod) -> Self {
        QuadratureConfig {
            method,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        let invalid = |reason: &str| {
            Err(IntegrationError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.degree < 2 {
            return invalid("degree must be at least 2");
        }
        if !(self.epsabs >= 0.0 && self.epsrel >= 0.0) {
            return invalid("tolerances must be non-negative numbers");
        }
        if self.epsabs == 0.0 && self.epsrel == 0.0 {
            return invalid("at least one of epsabs and epsrel must be positive");
        }
        if self.limit == 0 {
            return invalid("limit must be at least 1");
        }
        if self.simpson_intervals < 2 || self.simpson_intervals % 2 != 0 {
            return invalid("simpson_intervals must be even and at least 2");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    /// estimate of |value - exact|
    pub abs_error: f64,
    /// number of integrand calls
    pub evaluations: usize,
    /// number of panel bisections (adaptive method only)
    pub subdivisions: usize,
}

impl QuadratureResult {
    fn zero() -> Self {
        QuadratureResult {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            subdivisions: 0,
        }
    }
}

/// Counts integrand calls and remembers the first point where it was not finite.
struct Watched<'f> {
    f: &'f dyn Fn(f64) -> f64,
    evaluations: Cell<usize>,
    bad_point: Cell<Option<f64>>,
}

impl<'f> Watched<'f> {
    fn new(f: &'f dyn Fn(f64) -> f64) -> Self {
        Watched {
            f,
            evaluations: Cell::new(0),
            bad_point: Cell::new(None),
        }
    }

    fn call(&self, x: f64) -> f64 {
        self.evaluations.set(self.evaluations.get() + 1);
        let y = (self.f)(x);
        if !y.is_finite() && self.bad_point.get().is_none() {
            self.bad_point.set(Some(x));
        }
        y
    }

    fn check(&self) -> Result<(), IntegrationError> {
        match self.bad_point.get() {
            Some(x) => Err(IntegrationError::NonFinite { x }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn gauss_legendre(degree: usize) -> Result<GaussLegendre, IntegrationError> {
    GaussLegendre::new(degree).map_err(|e| IntegrationError::InvalidConfig {
        reason: format!("Failed to create Gauss-Legendre quadrature: {:?}", e),
    })
}

fn estimate_panel(rule: &GaussLegendre, f: &Watched, a: f64, b: f64) -> Panel {
    let whole = rule.integrate(a, b, |x| f.call(x));
    let mid = 0.5 * (a + b);
    let halves = rule.integrate(a, mid, |x| f.call(x)) + rule.integrate(mid, b, |x| f.call(x));
    Panel {
        a,
        b,
        value: halves,
        error: (halves - whole).abs(),
    }
}

fn adaptive(
    f: &Watched,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, IntegrationError> {
    let rule = gauss_legendre(config.degree)?;
    let mut panels = vec![estimate_panel(&rule, f, lower, upper)];
    f.check()?;
    let mut subdivisions = 0;
    loop {
        let value: f64 = panels.iter().map(|p| p.value).sum();
        if !value.is_finite() {
            return Err(IntegrationError::Overflow { value });
        }
        let abs_error: f64 = panels.iter().map(|p| p.error).sum();
        let tolerance = config.epsabs.max(config.epsrel * value.abs());
        if abs_error <= tolerance {
            debug!(
                "adaptive quadrature converged: I = {}, error = {:e}, {} subdivisions",
                value, abs_error, subdivisions
            );
            return Ok(QuadratureResult {
                value,
                abs_error,
                evaluations: f.evaluations.get(),
                subdivisions,
            });
        }
        let (worst_index, worst) = panels
            .iter()
            .enumerate()
            .max_by(|(_, p), (_, q)| p.error.total_cmp(&q.error))
            .map(|(i, p)| (i, *p))
            .ok_or_else(|| IntegrationError::InvalidConfig {
                reason: "empty panel list".to_string(),
            })?;
        let mid = 0.5 * (worst.a + worst.b);
        let exhausted = subdivisions >= config.limit;
        // the worst panel can not be split any further in floating point
        let too_narrow = mid == worst.a || mid == worst.b;
        if exhausted || too_narrow {
            warn!(
                "adaptive quadrature stopped: I = {}, error = {:e} > {:e} after {} subdivisions",
                value, abs_error, tolerance, subdivisions
            );
            return Err(IntegrationError::NotConverged {
                subdivisions,
                value,
                abs_error,
                tolerance,
            });
        }
        panels.swap_remove(worst_index);
        panels.push(estimate_panel(&rule, f, worst.a, mid));
        panels.push(estimate_panel(&rule, f, mid, worst.b));
        f.check()?;
        subdivisions += 1;
    }
}

fn fixed_gauss_legendre(
    f: &Watched,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, IntegrationError> {
    let rule = gauss_legendre(config.degree)?;
    let panel = estimate_panel(&rule, f, lower, upper);
    f.check()?;
    Ok(QuadratureResult {
        value: panel.value,
        abs_error: panel.error,
        evaluations: f.evaluations.get(),
        subdivisions: 0,
    })
}

/// Composite Simpson rule; the error estimate is the distance to the trapezoid
/// sum on the same grid.
fn simpson(
    f: &Watched,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, IntegrationError> {
    let n = config.simpson_intervals;
    let h = (upper - lower) / (n as f64);
    let ends = f.call(lower) + f.call(upper);
    let mut odd = 0.0;
    let mut even = 0.0;
    for i in 1..n {
        let x = lower + (i as f64) * h;
        if i % 2 == 0 {
            even += f.call(x);
        } else {
            odd += f.call(x);
        }
    }
    f.check()?;
    let value = (ends + 4.0 * odd + 2.0 * even) * h / 3.0;
    let trapezoid = (0.5 * ends + odd + even) * h;
    Ok(QuadratureResult {
        value,
        abs_error: (value - trapezoid).abs(),
        evaluations: f.evaluations.get(),
        subdivisions: 0,
    })
}

/// Integrates `f` from `lower` to `upper` with the configured method.
///
/// `lower > upper` gives the negated integral; `lower == upper` gives exactly 0
/// without calling `f`.
pub fn integrate(
    f: &dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, IntegrationError> {
    config.validate()?;
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(IntegrationError::InvalidConfig {
            reason: format!("bounds must be finite, got [{}, {}]", lower, upper),
        });
    }
    if lower == upper {
        return Ok(QuadratureResult::zero());
    }
    let watched = Watched::new(f);
    let result = match config.method {
        QuadMethod::Adaptive => adaptive(&watched, lower, upper, config)?,
        QuadMethod::GaussLegendre => fixed_gauss_legendre(&watched, lower, upper, config)?,
        QuadMethod::Simpson => simpson(&watched, lower, upper, config)?,
    };
    if !result.value.is_finite() {
        warn!("integral of a finite integrand overflowed to {}", result.value);
        return Err(IntegrationError::Overflow {
            value: result.value,
        });
    }
    Ok(result)
}
