//! # Symbolic Engine Module
//!
//! Expression tree for the profile curve f(x) of a solid of revolution.
//!
//! ## Purpose
//!
//! The symbolic engine allows users to:
//! - Build expressions of one real variable either by parsing a string
//!   (see [`crate::symbolic::parse_expr`]) or with operator overloading
//! - Find the free symbols of an expression
//! - Evaluate an expression directly or turn it into a closure (see
//!   [`crate::symbolic::symbolic_lambdify`])
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - the free variable, usually "x"
//! - **Constants**: `Const(f64)` - numerical constants (pi and E are folded to constants by the parser)
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `Abs`, `sin`, `cos`, etc., and the hyperbolic
//!   `sinh`, `cosh`, `tanh` with their inverses `arcsinh`, `arccosh`, `arctanh`
//!
//! ### Key Methods
//! - `free_symbols()` - sorted, deduplicated variable names
//! - `eval_expression(value)` - direct evaluation without building a closure
//! - `height()` - number of levels of the tree, computed without recursion
//! - `square()` / `disk_area()` - the integrand pieces of the disk method
//!
//! Trigonometric variants keep the mathematical notation (tg, ctg, arctg, arcctg);
//! the parser accepts both that notation and tan/cot/atan/acot.

#![allow(non_camel_case_types)]

use std::f64::consts::PI;
use std::fmt;

/// Core symbolic expression enum representing f(x) as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedRevolve::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "t")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Absolute value: |x|
    Abs(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function: cot(x) - uses mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function: arcsin(x)
    arcsin(Box<Expr>),
    /// Arccosine function: arccos(x)
    arccos(Box<Expr>),
    /// Arctangent function: arctan(x) - uses mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function: arccot(x) - uses mathematical notation 'arcctg'
    arcctg(Box<Expr>),
    /// Hyperbolic sine: sinh(x)
    sinh(Box<Expr>),
    /// Hyperbolic cosine: cosh(x)
    cosh(Box<Expr>),
    /// Hyperbolic tangent: tanh(x)
    tanh(Box<Expr>),
    /// Inverse hyperbolic sine: arcsinh(x)
    arcsinh(Box<Expr>),
    /// Inverse hyperbolic cosine: arccosh(x), defined for x >= 1
    arccosh(Box<Expr>),
    /// Inverse hyperbolic tangent: arctanh(x), defined for |x| < 1
    arctanh(Box<Expr>),
}

/// Pretty printing with explicit parentheses for precedence; negative
/// constants are wrapped too so the output can be fed back to the parser.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) if *val < 0.0 => write!(f, "({})", val),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
            Expr::sinh(expr) => write!(f, "sinh({})", expr),
            Expr::cosh(expr) => write!(f, "cosh({})", expr),
            Expr::tanh(expr) => write!(f, "tanh({})", expr),
            Expr::arcsinh(expr) => write!(f, "arcsinh({})", expr),
            Expr::arccosh(expr) => write!(f, "arccosh({})", expr),
            Expr::arctanh(expr) => write!(f, "arctanh({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates square root as self^0.5.
    pub fn sqrt(self) -> Expr {
        Expr::Pow(self.boxed(), Box::new(Expr::Const(0.5)))
    }

    /// self^2
    pub fn square(self) -> Expr {
        self.pow(Expr::Const(2.0))
    }

    /// Area of the disk swept by the point (x, f(x)) around the x-axis: pi * f(x)^2.
    ///
    /// Squaring makes the integrand non-negative whatever the sign of f.
    pub fn disk_area(&self) -> Expr {
        Expr::Const(PI) * self.clone().square()
    }

    /// Extracts all unique variable names from the symbolic expression.
    ///
    /// # Returns
    /// Vector of unique variable names in alphabetical order
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = parse_expression_func("x^2 + y*z + x").unwrap();
    /// assert_eq!(expr.free_symbols(), vec!["x", "y", "z"]);
    /// ```
    pub fn free_symbols(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_symbols(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_symbols(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            _ => {
                for child in self.children() {
                    child.collect_symbols(vars);
                }
            }
        }
    }

    /// Direct subexpressions: none for leaves, one for functions, two for operators.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Abs(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr)
            | Expr::sinh(expr)
            | Expr::cosh(expr)
            | Expr::tanh(expr)
            | Expr::arcsinh(expr)
            | Expr::arccosh(expr)
            | Expr::arctanh(expr) => vec![expr.as_ref()],
        }
    }

    /// Number of levels of the tree; a leaf has height 1.
    ///
    /// Walks the tree with an explicit stack, so it is safe on trees of any depth.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(expr.children().into_iter().map(|child| (child, level + 1)));
        }
        height
    }

    /// Evaluates the expression at `var = value` without creating a closure.
    ///
    /// Every symbol is bound to `value`; callers make sure the expression has
    /// at most one free symbol (the parser guarantees it).
    ///
    /// # Performance
    /// Use lambdify() for repeated evaluation, eval_expression() for one-time use
    pub fn eval_expression(&self, value: f64) -> f64 {
        match self {
            Expr::Var(_) => value,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval_expression(value) + rhs.eval_expression(value),
            Expr::Sub(lhs, rhs) => lhs.eval_expression(value) - rhs.eval_expression(value),
            Expr::Mul(lhs, rhs) => lhs.eval_expression(value) * rhs.eval_expression(value),
            Expr::Div(lhs, rhs) => lhs.eval_expression(value) / rhs.eval_expression(value),
            Expr::Pow(base, exp) => base.eval_expression(value).powf(exp.eval_expression(value)),
            Expr::Exp(expr) => expr.eval_expression(value).exp(),
            Expr::Ln(expr) => expr.eval_expression(value).ln(),
            Expr::Abs(expr) => expr.eval_expression(value).abs(),
            Expr::sin(expr) => expr.eval_expression(value).sin(),
            Expr::cos(expr) => expr.eval_expression(value).cos(),
            Expr::tg(expr) => expr.eval_expression(value).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval_expression(value).tan(),
            Expr::arcsin(expr) => expr.eval_expression(value).asin(),
            Expr::arccos(expr) => expr.eval_expression(value).acos(),
            Expr::arctg(expr) => expr.eval_expression(value).atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.eval_expression(value).atan(),
            Expr::sinh(expr) => expr.eval_expression(value).sinh(),
            Expr::cosh(expr) => expr.eval_expression(value).cosh(),
            Expr::tanh(expr) => expr.eval_expression(value).tanh(),
            Expr::arcsinh(expr) => expr.eval_expression(value).asinh(),
            Expr::arccosh(expr) => expr.eval_expression(value).acosh(),
            Expr::arctanh(expr) => expr.eval_expression(value).atanh(),
        }
    } // end of eval_expression
}
