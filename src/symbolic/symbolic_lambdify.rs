use crate::symbolic::parse_expr::{MAX_DEPTH, ParseError, parse_expression_func};
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;
use std::fmt;

/// compiled closure of one real argument
pub type Func1D = Box<dyn Fn(f64) -> f64 + Send + Sync>;

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// Every `Var` node reads the closure argument, so the caller must make sure
    /// the expression has at most one free symbol ([`parse`] does).
    /// A constant expression yields a closure that ignores its argument.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Func1D {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify1D();
                let rf = rhs.lambdify1D();
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(base, exp) => match exp.as_ref() {
                // integer exponents go through powi
                Expr::Const(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => {
                    let n = *n as i32;
                    let bf = base.lambdify1D();
                    Box::new(move |x| bf(x).powi(n))
                }
                _ => {
                    let bf = base.lambdify1D();
                    let ef = exp.lambdify1D();
                    Box::new(move |x| bf(x).powf(ef(x)))
                }
            },
            Expr::Exp(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).ln())
            }
            Expr::Abs(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).abs())
            }
            Expr::sin(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).sin())
            }
            Expr::cos(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).cos())
            }
            Expr::tg(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).tan())
            }
            Expr::ctg(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| 1.0 / f(x).tan())
            }
            Expr::arcsin(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).asin())
            }
            Expr::arccos(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).acos())
            }
            Expr::arctg(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).atan())
            }
            Expr::arcctg(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| PI / 2.0 - f(x).atan())
            }
            Expr::sinh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).sinh())
            }
            Expr::cosh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).cosh())
            }
            Expr::tanh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).tanh())
            }
            Expr::arcsinh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).asinh())
            }
            Expr::arccosh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).acosh())
            }
            Expr::arctanh(e) => {
                let f = e.lambdify1D();
                Box::new(move |x| f(x).atanh())
            }
        } // end of match
    } // end of lambdify1D
}

/// Numeric containers a [`ParsedFunction`] can be applied to element-wise.
/// The output always has the shape of the input.
pub trait NumericArg: Sized {
    fn map_elementwise(&self, f: &dyn Fn(f64) -> f64) -> Self;
}

impl NumericArg for f64 {
    fn map_elementwise(&self, f: &dyn Fn(f64) -> f64) -> Self {
        f(*self)
    }
}

impl NumericArg for Vec<f64> {
    fn map_elementwise(&self, f: &dyn Fn(f64) -> f64) -> Self {
        self.iter().map(|&x| f(x)).collect()
    }
}

impl NumericArg for DVector<f64> {
    fn map_elementwise(&self, f: &dyn Fn(f64) -> f64) -> Self {
        self.map(|x| f(x))
    }
}

impl NumericArg for DMatrix<f64> {
    fn map_elementwise(&self, f: &dyn Fn(f64) -> f64) -> Self {
        self.map(|x| f(x))
    }
}

/// A user formula turned into a regular Rust function of one real variable.
///
/// Built once per calculation by [`parse`] and never mutated afterwards.
pub struct ParsedFunction {
    source: String,
    expr: Expr,
    variable: Option<String>,
    func: Func1D,
}

impl ParsedFunction {
    /// Wraps an expression, rejecting it if it has more than one free symbol
    /// or more than [`MAX_DEPTH`] levels.
    pub fn from_expr(source: &str, expr: Expr) -> Result<Self, ParseError> {
        if expr.height() > MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        let mut variables = expr.free_symbols();
        if variables.len() > 1 {
            return Err(ParseError::TooManyVariables { variables });
        }
        let func = expr.lambdify1D();
        Ok(ParsedFunction {
            source: source.trim().to_string(),
            expr,
            variable: variables.pop(),
            func,
        })
    }

    /// f(x) for a single value
    pub fn eval(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    /// f applied to a scalar, `Vec`, `DVector` or `DMatrix`; same shape out.
    pub fn call<T: NumericArg>(&self, x: &T) -> T {
        x.map_elementwise(&|v| (self.func)(v))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// name of the free symbol, `None` for a constant expression
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// plot label like "f(x)"
    pub fn label(&self) -> String {
        format!("f({})", self.variable.as_deref().unwrap_or("x"))
    }
}

impl fmt::Debug for ParsedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFunction")
            .field("source", &self.source)
            .field("expr", &self.expr)
            .field("variable", &self.variable)
            .finish()
    }
}

impl fmt::Display for ParsedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.label(), self.expr)
    }
}

/// Parses `expression` and compiles it into a callable of one variable.
///
/// # Errors
/// [`ParseError`] for bad syntax, unknown functions, or more than one free symbol.
///
/// # Example
/// ```
/// use RustedRevolve::symbolic::symbolic_lambdify::parse;
/// let f = parse("x^2 + 1").unwrap();
/// assert_eq!(f.eval(2.0), 5.0);
/// assert_eq!(f.call(&vec![0.0, 1.0]), vec![1.0, 2.0]);
/// assert!(parse("x + y").is_err());
/// ```
pub fn parse(expression: &str) -> Result<ParsedFunction, ParseError> {
    let expr = parse_expression_func(expression)?;
    let parsed = ParsedFunction::from_expr(expression, expr)?;
    debug!("parsed '{}' into {}", expression.trim(), parsed);
    Ok(parsed)
}
