use RustedRevolve::numerical::quadrature::{QuadMethod, QuadratureConfig, integrate};
use RustedRevolve::symbolic::symbolic_lambdify::parse;
use strum::IntoEnumIterator;

fn main() {
    println!("=== Quadrature Methods ===\n");

    // ∫₀¹ e^x dx = e - 1
    let expected = std::f64::consts::E - 1.0;
    for method in QuadMethod::iter() {
        let config = QuadratureConfig::with_method(method);
        let result = integrate(&|x: f64| x.exp(), 0.0, 1.0, &config).unwrap();
        println!("∫₀¹ e^x dx, {} = {}", method, result.value);
        println!(
            "Error: {:e}, estimated {:e}, {} evaluations\n",
            (result.value - expected).abs(),
            result.abs_error,
            result.evaluations
        );
    }

    // a parsed function works the same way
    let f = parse("sin(x)^2").unwrap();
    let config = QuadratureConfig::default();
    let result = integrate(&|x| f.eval(x), 0.0, 20.0 * std::f64::consts::PI, &config).unwrap();
    println!(
        "∫₀^20π sin²(x) dx = {} after {} subdivisions",
        result.value, result.subdivisions
    );

    // tighter panel budget
    let strict = QuadratureConfig {
        limit: 3,
        ..Default::default()
    };
    match integrate(&|x| f.eval(x), 0.0, 200.0 * std::f64::consts::PI, &strict) {
        Ok(result) => println!("converged: {}", result.value),
        Err(e) => println!("with limit 3: {}", e),
    }

    println!("\n=== Available Quadrature Methods ===");
    for method in QuadMethod::iter() {
        println!("{}: {}", method, method.description());
    }
}
