#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedRevolve::symbolic::parse_expr::parse_expression_func;
/// let input = "x^2 * exp(-x) + arctg(x)";
/// let parsed_expression = parse_expression_func(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!(parse_expression_func("x + ").is_err());
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree and its arithmetic
/// 2) finds the free symbols of an expression
/// 3) evaluates an expression directly, without compiling it
///# Example#
/// ```
/// use RustedRevolve::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone() * x + Expr::Const(1.0);
/// assert_eq!(f.free_symbols(), vec!["x".to_string()]);
/// assert_eq!(f.eval_expression(2.0), 5.0);
/// // the integrand of the disk method
/// let area = f.disk_area();
/// println!("{}", area);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// turns a symbolic expression of one variable into a regular Rust function
/// that can be applied to numbers, vectors and matrices
///# Example
/// ```
/// use RustedRevolve::symbolic::symbolic_lambdify::parse;
/// use nalgebra::DVector;
/// let f = parse("sqrt(1 - x^2)").unwrap();
/// let x = DVector::from_vec(vec![0.0, 1.0]);
/// assert_eq!(f.call(&x), DVector::from_vec(vec![1.0, 0.0]));
/// ```
pub mod symbolic_lambdify;
