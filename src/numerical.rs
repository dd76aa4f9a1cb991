/// quadrature of a function of one variable: adaptive Gauss-Legendre, fixed Gauss-Legendre, Simpson
/// Example#1
/// ```
/// use RustedRevolve::numerical::quadrature::{integrate, QuadratureConfig};
/// let result = integrate(&|x: f64| x.exp(), 0.0, 1.0, &QuadratureConfig::default()).unwrap();
/// assert!((result.value - (std::f64::consts::E - 1.0)).abs() < 1e-10);
/// ```
pub mod quadrature;
/// volume of a solid of revolution by the disk method
/// Example#1
/// ```
/// use RustedRevolve::symbolic::symbolic_lambdify::parse;
/// use RustedRevolve::numerical::disk_method::compute_volume;
/// // cone of height 1 and radius 1
/// let f = parse("x").unwrap();
/// let result = compute_volume(&f, 0.0, 1.0).unwrap();
/// assert!((result.volume - std::f64::consts::PI / 3.0).abs() < 1e-6);
/// assert_eq!(result.samples.len(), 100);
/// ```
pub mod disk_method;
/// mesh and animation frames of the rotated solid
pub mod revolution_surface;
