//! String -> symbolic expression.
//!
//! The grammar is a small precedence-climbing parser written with `nom`:
//! ```text
//!  expr    := term   (('+' | '-') term)*
//!  term    := unary  (('*' | '/') unary)*
//!  unary   := ('+' | '-') unary | power
//!  power   := atom   (('**' | '^') unary)?        right associative
//!  atom    := number | name '(' expr ')' | name | '(' expr ')'
//! ```
//! Nesting is bounded by [`MAX_NESTING`] and the height of the resulting tree by
//! [`MAX_DEPTH`], so every recursive walk over a parsed tree stays shallow.
//! `pi` and `E` are constants, every other bare name is a free symbol.
//! Implicit multiplication such as `2x` is rejected.
//!
//!# Example
//! ```
//! use RustedRevolve::symbolic::parse_expr::parse_expression_func;
//! let expr = parse_expression_func("sqrt(4 - x^2)").unwrap();
//! assert_eq!(expr.free_symbols(), vec!["x".to_string()]);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit0, digit1, multispace0, one_of, satisfy},
    combinator::{cut, map_res, opt, recognize},
    error::{ErrorKind, FromExternalError, ParseError as NomParseError},
    sequence::{delimited, preceded},
};
use std::f64::consts::{E, PI};
use thiserror::Error;

/// Most levels an expression tree may have; a lone `x` is one level.
pub const MAX_DEPTH: usize = 500;

/// Most brackets, function calls, signs and exponents nested inside each other.
pub const MAX_NESTING: usize = 64;

/// Reasons an expression string is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("invalid syntax at position {position}: unexpected {found}")]
    Syntax { position: usize, found: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("'{name}' is a function and needs an argument in brackets")]
    MissingArgument { name: String },

    #[error("expression must contain at most one variable, found: {}", .variables.join(", "))]
    TooManyVariables { variables: Vec<String> },

    #[error("expression is nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// nom error carrying the place where the grammar gave up.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarError<'a> {
    pub input: &'a str,
    pub kind: GrammarErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarErrorKind {
    Nom(ErrorKind),
    UnknownFunction(String),
    MissingArgument(String),
    TooDeep(usize),
}

impl<'a> NomParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        GrammarError {
            input,
            kind: GrammarErrorKind::Nom(kind),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, Ext> FromExternalError<&'a str, Ext> for GrammarError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: Ext) -> Self {
        GrammarError {
            input,
            kind: GrammarErrorKind::Nom(kind),
        }
    }
}

type PResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;

/// parsed subtree and its height
type Node = (Expr, usize);

const FUNCTION_NAMES: [&str; 31] = [
    "sin", "cos", "tan", "tg", "cot", "ctg", "asin", "arcsin", "acos", "arccos", "atan",
    "arctan", "arctg", "acot", "arccot", "arcctg", "sinh", "cosh", "tanh", "asinh", "arcsinh",
    "acosh", "arccosh", "atanh", "arctanh", "exp", "log", "ln", "abs", "Abs", "sqrt",
];

/// skips whitespace around a token
fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = GrammarError<'a>>
where
    P: Parser<&'a str, Output = O, Error = GrammarError<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

fn too_deep(input: &str, limit: usize) -> nom::Err<GrammarError<'_>> {
    nom::Err::Failure(GrammarError {
        input,
        kind: GrammarErrorKind::TooDeep(limit),
    })
}

/// same as `cut` for a parser called directly
fn committed(e: nom::Err<GrammarError<'_>>) -> nom::Err<GrammarError<'_>> {
    match e {
        nom::Err::Error(e) => nom::Err::Failure(e),
        other => other,
    }
}

fn checked_height(input: &str, height: usize) -> Result<usize, nom::Err<GrammarError<'_>>> {
    if height > MAX_DEPTH {
        return Err(too_deep(input, MAX_DEPTH));
    }
    Ok(height)
}

fn number(input: &str) -> PResult<'_, f64> {
    map_res(
        recognize((
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
            opt((one_of("eE"), opt(one_of("+-")), digit1)),
        )),
        |text: &str| text.parse::<f64>(),
    )
    .parse(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize((
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn apply_function(name: &str, arg: Expr) -> Option<Expr> {
    let expr = match name {
        "sin" => Expr::sin(arg.boxed()),
        "cos" => Expr::cos(arg.boxed()),
        "tan" | "tg" => Expr::tg(arg.boxed()),
        "cot" | "ctg" => Expr::ctg(arg.boxed()),
        "asin" | "arcsin" => Expr::arcsin(arg.boxed()),
        "acos" | "arccos" => Expr::arccos(arg.boxed()),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg.boxed()),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg.boxed()),
        "sinh" => Expr::sinh(arg.boxed()),
        "cosh" => Expr::cosh(arg.boxed()),
        "tanh" => Expr::tanh(arg.boxed()),
        "asinh" | "arcsinh" => Expr::arcsinh(arg.boxed()),
        "acosh" | "arccosh" => Expr::arccosh(arg.boxed()),
        "atanh" | "arctanh" => Expr::arctanh(arg.boxed()),
        "exp" => arg.exp(),
        "log" | "ln" => arg.ln(),
        "abs" | "Abs" => Expr::Abs(arg.boxed()),
        "sqrt" => arg.sqrt(),
        _ => return None,
    };
    Some(expr)
}

fn symbol_or_constant(name: &str) -> Expr {
    match name {
        "pi" => Expr::Const(PI),
        "E" => Expr::Const(E),
        _ => Expr::Var(name.to_string()),
    }
}

/// `name(arg)`, a named constant or a free symbol
fn call_or_symbol(input: &str, nesting: usize) -> PResult<'_, Node> {
    let (rest, name) = identifier(input)?;
    let open: PResult<'_, char> = preceded(multispace0, char('(')).parse(rest);
    match open {
        Ok((after_open, _)) => {
            let (after_arg, (arg, height)) = sum(after_open, nesting + 1).map_err(committed)?;
            let (after_close, _) = cut(ws(char(')'))).parse(after_arg)?;
            match apply_function(name, arg) {
                Some(expr) => Ok((after_close, (expr, checked_height(input, height + 1)?))),
                None => Err(nom::Err::Failure(GrammarError {
                    input,
                    kind: GrammarErrorKind::UnknownFunction(name.to_string()),
                })),
            }
        }
        Err(nom::Err::Error(_)) if FUNCTION_NAMES.contains(&name) => {
            Err(nom::Err::Failure(GrammarError {
                input,
                kind: GrammarErrorKind::MissingArgument(name.to_string()),
            }))
        }
        Err(nom::Err::Error(_)) => Ok((rest, (symbol_or_constant(name), 1))),
        Err(e) => Err(e),
    }
}

fn atom(input: &str, nesting: usize) -> PResult<'_, Node> {
    let (input, _) = multispace0::<&str, GrammarError<'_>>(input)?;
    let bracket: PResult<'_, char> = char('(').parse(input);
    let (rest, node) = if let Ok((rest, value)) = number(input) {
        (rest, (Expr::Const(value), 1))
    } else if let Ok((after_open, _)) = bracket {
        let (after_inner, inner) = sum(after_open, nesting + 1).map_err(committed)?;
        let (rest, _) = cut(ws(char(')'))).parse(after_inner)?;
        (rest, inner)
    } else {
        call_or_symbol(input, nesting)?
    };
    let (rest, _) = multispace0::<&str, GrammarError<'_>>(rest)?;
    Ok((rest, node))
}

fn power(input: &str, nesting: usize) -> PResult<'_, Node> {
    let (rest, (base, base_height)) = atom(input, nesting)?;
    let op: PResult<'_, &str> = ws(alt((tag("**"), tag("^")))).parse(rest);
    match op {
        Ok((after_op, _)) => {
            let (rest, (exponent, exp_height)) =
                unary(after_op, nesting + 1).map_err(committed)?;
            let height = checked_height(rest, base_height.max(exp_height) + 1)?;
            Ok((rest, (base.pow(exponent), height)))
        }
        Err(nom::Err::Error(_)) => Ok((rest, (base, base_height))),
        Err(e) => Err(e),
    }
}

fn negate(input: &str, (expr, height): Node) -> Result<Node, nom::Err<GrammarError<'_>>> {
    match expr {
        Expr::Const(val) => Ok((Expr::Const(-val), height)),
        other => Ok((-other, checked_height(input, height + 1)?)),
    }
}

fn unary(input: &str, nesting: usize) -> PResult<'_, Node> {
    if nesting > MAX_NESTING {
        return Err(too_deep(input, MAX_NESTING));
    }
    let sign: PResult<'_, char> = ws(one_of("+-")).parse(input);
    match sign {
        Ok((rest, '-')) => {
            let (rest, operand) = unary(rest, nesting + 1).map_err(committed)?;
            Ok((rest, negate(rest, operand)?))
        }
        Ok((rest, _)) => unary(rest, nesting + 1).map_err(committed),
        Err(nom::Err::Error(_)) => power(input, nesting),
        Err(e) => Err(e),
    }
}

fn product(input: &str, nesting: usize) -> PResult<'_, Node> {
    let (mut input, (mut acc, mut height)) = unary(input, nesting)?;
    loop {
        let op: PResult<'_, char> = ws(one_of("*/")).parse(input);
        match op {
            Ok((rest, op)) => {
                let (rest, (rhs, rhs_height)) = unary(rest, nesting).map_err(committed)?;
                height = checked_height(rest, height.max(rhs_height) + 1)?;
                acc = if op == '*' { acc * rhs } else { acc / rhs };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, (acc, height))),
            Err(e) => return Err(e),
        }
    }
}

fn sum(input: &str, nesting: usize) -> PResult<'_, Node> {
    if nesting > MAX_NESTING {
        return Err(too_deep(input, MAX_NESTING));
    }
    let (mut input, (mut acc, mut height)) = product(input, nesting)?;
    loop {
        let op: PResult<'_, char> = ws(one_of("+-")).parse(input);
        match op {
            Ok((rest, op)) => {
                let (rest, (rhs, rhs_height)) = product(rest, nesting).map_err(committed)?;
                height = checked_height(rest, height.max(rhs_height) + 1)?;
                acc = if op == '+' { acc + rhs } else { acc - rhs };
                input = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((input, (acc, height))),
            Err(e) => return Err(e),
        }
    }
}

fn syntax_error(source: &str, rest: &str) -> ParseError {
    let rest = rest.trim_start();
    let found = match rest.chars().next() {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    };
    ParseError::Syntax {
        position: source.len() - rest.len(),
        found,
    }
}

/// Parses a whole string into a symbolic expression.
///
/// The grammar does not limit the number of free symbols; the single-variable
/// contract is checked by [`crate::symbolic::symbolic_lambdify::parse`].
/// Input nested past [`MAX_NESTING`] or building a tree taller than [`MAX_DEPTH`]
/// is rejected with [`ParseError::TooDeep`] before anything recurses that far.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match sum(input, 0) {
        Ok((rest, (expr, _))) if rest.trim().is_empty() => Ok(expr),
        Ok((rest, _)) => Err(syntax_error(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(match e.kind {
            GrammarErrorKind::UnknownFunction(name) => ParseError::UnknownFunction { name },
            GrammarErrorKind::MissingArgument(name) => ParseError::MissingArgument { name },
            GrammarErrorKind::TooDeep(limit) => ParseError::TooDeep { limit },
            GrammarErrorKind::Nom(_) => syntax_error(input, e.input),
        }),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(input, "")),
    }
}
