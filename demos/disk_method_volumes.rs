use RustedRevolve::numerical::disk_method::{BoundsPolicy, VolumeSettings, compute_volume, compute_volume_with};
use RustedRevolve::symbolic::symbolic_lambdify::parse;
use std::f64::consts::PI;

fn main() {
    println!("=== Volumes of Solids of Revolution (disk method) ===\n");

    // cone: f(x) = x on [0, 1], V = π/3
    let f = parse("x").unwrap();
    let cone = compute_volume(&f, 0.0, 1.0).unwrap();
    println!("{} on [0, 1]: V = {}", f, cone.volume);
    println!("Expected: {}", PI / 3.0);
    println!("Error: {}\n", (cone.volume - PI / 3.0).abs());

    // sphere of radius 2: f(x) = sqrt(4 - x^2) on [-2, 2], V = 32π/3
    let f = parse("sqrt(4 - x^2)").unwrap();
    let sphere = compute_volume(&f, -2.0, 2.0).unwrap();
    println!("{} on [-2, 2]: V = {}", f, sphere.volume);
    println!("Expected: {}", 32.0 * PI / 3.0);
    println!(
        "{} integrand evaluations, estimated error {:e}\n",
        sphere.evaluations, sphere.abs_error
    );

    // the sign of f does not matter
    let up = compute_volume(&parse("sin(x)").unwrap(), 0.0, PI).unwrap();
    let down = compute_volume(&parse("-sin(x)").unwrap(), 0.0, PI).unwrap();
    println!("sin(x) and -sin(x) on [0, π]: {} and {}\n", up.volume, down.volume);

    // reversed bounds: rejected by default, swapped on request
    let f = parse("x^2").unwrap();
    match compute_volume(&f, 2.0, 0.0) {
        Ok(result) => println!("unexpected volume {}", result.volume),
        Err(e) => println!("a > b: {}", e),
    }
    let swap = VolumeSettings {
        bounds_policy: BoundsPolicy::Swap,
        ..Default::default()
    };
    let swapped = compute_volume_with(&f, 2.0, 0.0, &swap).unwrap();
    println!("a > b with swap policy: V = {} over {:?}\n", swapped.volume, swapped.interval);

    // a singular integrand is reported, never returned as NaN
    match compute_volume(&parse("1/x").unwrap(), -1.0, 1.0) {
        Ok(result) => println!("unexpected volume {}", result.volume),
        Err(e) => println!("1/x on [-1, 1]: {}", e),
    }
}
