//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedRootPlot::symbolic::parse_expr::parse_expression;
//! let parsed_expression = parse_expression("x^2 - 4*sin(x)", "x").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
//! Grammar, from the loosest binding to the tightest:
//! ```text
//!   sum     := product (('+' | '-') product)*
//!   product := unary (('*' | '/') unary)*
//!   unary   := ('-' | '+') unary | power
//!   power   := atom (('^' | '**') unary)?
//!   atom    := number | name '(' sum ')' | name | '(' sum ')'
//! ```
//! so `-x^2` is `-(x^2)` and `2^3^2` is `2^(3^2)`.
//! Names resolve to the free variable, to the constants `pi` and `e`, or to one of the
//! functions listed in [`function_by_name`]. Anything else is rejected as an undefined symbol.
use crate::errors::CompileError;
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::{ErrorKind, FromExternalError, ParseError},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};
use std::f64::consts::{E, PI};

/// deepest allowed nesting of brackets, signs, exponents and calls
pub const MAX_NESTING: usize = 64;
/// highest allowed expression tree, long operator chains count too
pub const MAX_HEIGHT: usize = 256;

/// Why a nom parser stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprErrorKind {
    Nom(ErrorKind),
    /// a name followed by '(' that is not a known function
    UndefinedFunction(String),
    /// nesting deeper than `MAX_NESTING` or a tree higher than `MAX_HEIGHT`
    TooDeep,
}

/// Parser error carrying the unparsed rest of the input, used to compute the position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprError<'a> {
    pub input: &'a str,
    pub kind: ExprErrorKind,
}

impl<'a> ParseError<&'a str> for ExprError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        ExprError {
            input,
            kind: ExprErrorKind::Nom(kind),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for ExprError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        Self::from_error_kind(input, kind)
    }
}

impl<'a> ExprError<'a> {
    /// Converts into the public error, `source` is the whole text given to the parser.
    fn into_compile_error(self, source: &str) -> CompileError {
        match self.kind {
            ExprErrorKind::UndefinedFunction(name) => CompileError::UndefinedSymbol(name),
            ExprErrorKind::TooDeep => CompileError::Parse {
                position: source.len() - self.input.len(),
                message: "expression nested too deeply".to_string(),
            },
            ExprErrorKind::Nom(_) => {
                let position = source.len() - self.input.len();
                let message = match self.input.trim_start().chars().next() {
                    Some(c) => format!("unexpected '{}'", c),
                    None => "unexpected end of expression".to_string(),
                };
                CompileError::Parse { position, message }
            }
        }
    }
}

type PResult<'a, O> = IResult<&'a str, O, ExprError<'a>>;

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = ExprError<'a>>
where
    P: Parser<&'a str, Output = O, Error = ExprError<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Maps a function name to the node constructor, `None` if the name is not whitelisted.
pub fn function_by_name(name: &str) -> Option<fn(Box<Expr>) -> Expr> {
    let function: fn(Box<Expr>) -> Expr = match name {
        "exp" => Expr::Exp,
        "log" | "ln" => Expr::Ln,
        "sqrt" => Expr::sqrt,
        "abs" => Expr::abs,
        "sin" => Expr::sin,
        "cos" => Expr::cos,
        "tan" | "tg" => Expr::tg,
        "cot" | "ctg" => Expr::ctg,
        "asin" | "arcsin" => Expr::arcsin,
        "acos" | "arccos" => Expr::arccos,
        "atan" | "arctan" | "arctg" => Expr::arctg,
        "acot" | "arccot" | "arcctg" => Expr::arcctg,
        _ => return None,
    };
    Some(function)
}

fn symbol(name: &str) -> Expr {
    match name {
        "pi" => Expr::Const(PI),
        "e" | "E" => Expr::Const(E),
        _ => Expr::Var(name.to_string()),
    }
}

fn number(input: &str) -> PResult<'_, Expr> {
    ws(map_res(recognize_float, |s: &str| s.parse::<f64>().map(Expr::Const))).parse(input)
}

/// word characters: a letter or '_' followed by letters, digits or '_'
fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// Parsed subtree together with its height, leaves have height 0.
type Node = (Expr, usize);

fn too_deep(input: &str) -> nom::Err<ExprError<'_>> {
    nom::Err::Failure(ExprError {
        input,
        kind: ExprErrorKind::TooDeep,
    })
}

/// Refuses trees higher than `MAX_HEIGHT`, evaluation and drop recurse over the height.
fn checked(input: &str, expr: Expr, height: usize) -> Result<Node, nom::Err<ExprError<'_>>> {
    if height > MAX_HEIGHT {
        return Err(too_deep(input));
    }
    Ok((expr, height))
}

fn call_or_symbol(input: &str, depth: usize) -> PResult<'_, Node> {
    let (rest, name) = ws(identifier).parse(input)?;
    let (rest, open) = opt(ws(char('('))).parse(rest)?;
    if open.is_none() {
        return Ok((rest, (symbol(name), 0)));
    }
    let Some(function) = function_by_name(name) else {
        // an unknown call is fatal: no other branch can make sense of it
        return Err(nom::Err::Failure(ExprError {
            input,
            kind: ExprErrorKind::UndefinedFunction(name.to_string()),
        }));
    };
    let (rest, (argument, height)) =
        terminated(|i| sum(i, depth + 1), ws(char(')'))).parse(rest)?;
    let node = checked(input, function(argument.boxed()), height + 1)?;
    Ok((rest, node))
}

fn parenthesized(input: &str, depth: usize) -> PResult<'_, Node> {
    delimited(ws(char('(')), |i| sum(i, depth + 1), ws(char(')'))).parse(input)
}

fn atom(input: &str, depth: usize) -> PResult<'_, Node> {
    alt((
        map(number, |expr| (expr, 0usize)),
        |i| call_or_symbol(i, depth),
        |i| parenthesized(i, depth),
    ))
    .parse(input)
}

fn power(input: &str, depth: usize) -> PResult<'_, Node> {
    let (rest, (base, base_height)) = atom(input, depth)?;
    let (rest, exponent) =
        opt(preceded(ws(alt((tag("**"), tag("^")))), |i| unary(i, depth + 1))).parse(rest)?;
    match exponent {
        Some((exponent, height)) => {
            let node = checked(input, base.pow(exponent), base_height.max(height) + 1)?;
            Ok((rest, node))
        }
        None => Ok((rest, (base, base_height))),
    }
}

fn unary(input: &str, depth: usize) -> PResult<'_, Node> {
    if depth > MAX_NESTING {
        return Err(too_deep(input));
    }
    let (rest, sign) = opt(ws(one_of("+-"))).parse(input)?;
    match sign {
        Some('-') => {
            let (rest, (operand, height)) = unary(rest, depth + 1)?;
            let node = checked(input, -operand, height + 1)?;
            Ok((rest, node))
        }
        Some(_) => unary(rest, depth + 1),
        None => power(rest, depth),
    }
}

fn product(input: &str, depth: usize) -> PResult<'_, Node> {
    let (rest, first) = unary(input, depth)?;
    let (rest, tail) = many0(pair(ws(one_of("*/")), |i| unary(i, depth))).parse(rest)?;
    let node = tail
        .into_iter()
        .try_fold(first, |(acc, acc_height), (op, (rhs, rhs_height))| {
            let expr = match op {
                '*' => acc * rhs,
                _ => acc / rhs,
            };
            checked(input, expr, acc_height.max(rhs_height) + 1)
        })?;
    Ok((rest, node))
}

fn sum(input: &str, depth: usize) -> PResult<'_, Node> {
    let (rest, first) = product(input, depth)?;
    let (rest, tail) = many0(pair(ws(one_of("+-")), |i| product(i, depth))).parse(rest)?;
    let node = tail
        .into_iter()
        .try_fold(first, |(acc, acc_height), (op, (rhs, rhs_height))| {
            let expr = match op {
                '+' => acc + rhs,
                _ => acc - rhs,
            };
            checked(input, expr, acc_height.max(rhs_height) + 1)
        })?;
    Ok((rest, node))
}

/// Parses `input` into an [`Expr`] whose only free variable may be `variable`.
///
/// Fails with [`CompileError::Parse`] on malformed or too deeply nested text and with
/// [`CompileError::UndefinedSymbol`] on any name outside the whitelist.
pub fn parse_expression(input: &str, variable: &str) -> Result<Expr, CompileError> {
    let expr = match all_consuming(ws(|i| sum(i, 0))).parse(input) {
        Ok((_, (expr, _))) => expr,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(e.into_compile_error(input));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(CompileError::Parse {
                position: input.len(),
                message: "unexpected end of expression".to_string(),
            });
        }
    };
    if let Some(unknown) = expr
        .all_arguments_are_variables()
        .into_iter()
        .find(|name| name != variable)
    {
        return Err(CompileError::UndefinedSymbol(unknown));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Box<Expr> {
        Box::new(Expr::Var("x".to_string()))
    }

    fn parse(input: &str) -> Expr {
        parse_expression(input, "x").unwrap()
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse("42"), Expr::Const(42.0));
        assert_eq!(parse(".5"), Expr::Const(0.5));
        assert_eq!(parse("1.5e-3"), Expr::Const(1.5e-3));
    }

    #[test]
    fn test_decimal_literal_at_end_of_input() {
        assert_eq!(number("4.5"), Ok(("", Expr::Const(4.5))));
        assert_eq!(parse("x - 4.5"), Expr::Sub(x(), Box::new(Expr::Const(4.5))));
        assert_eq!(
            parse("x^2 - 4.0001"),
            Expr::Pow(x(), Box::new(Expr::Const(2.0))) - Expr::Const(4.0001)
        );
        assert_eq!(parse("x*2.5"), *x() * Expr::Const(2.5));
        assert_eq!(parse("x - 0.25"), *x() - Expr::Const(0.25));
        assert_eq!(parse("3."), Expr::Const(3.0));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse("x"), Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_named_constants() {
        assert_eq!(parse("pi"), Expr::Const(PI));
        assert_eq!(parse("e"), Expr::Const(E));
        assert_eq!(parse("E"), Expr::Const(E));
    }

    #[test]
    fn test_parse_subtraction() {
        assert_eq!(parse("x - 2"), Expr::Sub(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_left_associative_chain() {
        let expected = Expr::Pow(x(), Box::new(Expr::Const(2.0))) - *x() - Expr::Const(1.0);
        assert_eq!(parse("x^2 - x - 1"), expected);
    }

    #[test]
    fn test_parse_product_binds_tighter_than_sum() {
        let expected = Expr::Const(1.0) + Expr::Const(2.0) * *x();
        assert_eq!(parse("1 + 2*x"), expected);
    }

    #[test]
    fn test_parse_power_both_spellings() {
        let expected = Expr::Pow(x(), Box::new(Expr::Const(2.0)));
        assert_eq!(parse("x^2"), expected);
        assert_eq!(parse("x**2"), expected);
    }

    #[test]
    fn test_parse_power_is_right_associative() {
        let expected = Expr::Const(2.0).pow(Expr::Const(3.0).pow(Expr::Const(2.0)));
        assert_eq!(parse("2^3^2"), expected);
    }

    #[test]
    fn test_parse_unary_minus_below_power() {
        let expected = -Expr::Pow(x(), Box::new(Expr::Const(2.0)));
        assert_eq!(parse("-x^2"), expected);
        assert_eq!(parse("x^-1"), (*x()).pow(-Expr::Const(1.0)));
    }

    #[test]
    fn test_parse_with_brackets() {
        let expected = (*x() + Expr::Const(1.0)) * (*x() - Expr::Const(2.0));
        assert_eq!(parse("(x + 1) * (x - 2)"), expected);
    }

    #[test]
    fn test_parse_functions_and_aliases() {
        assert_eq!(parse("sin(x)"), Expr::sin(x()));
        assert_eq!(parse("log(x)"), Expr::Ln(x()));
        assert_eq!(parse("ln(x)"), Expr::Ln(x()));
        assert_eq!(parse("tan(x)"), parse("tg(x)"));
        assert_eq!(parse("atan(x)"), Expr::arctg(x()));
        assert_eq!(parse("sqrt (x)"), Expr::sqrt(x()));
    }

    #[test]
    fn test_parse_nested_functions() {
        assert_eq!(parse("sin(cos(x))"), Expr::sin(Box::new(Expr::cos(x()))));
    }

    #[test]
    fn test_unknown_variable_is_undefined_symbol() {
        assert_eq!(
            parse_expression("x + y", "x"),
            Err(CompileError::UndefinedSymbol("y".to_string()))
        );
    }

    #[test]
    fn test_unknown_function_is_undefined_symbol() {
        assert_eq!(
            parse_expression("foo(x) + 1", "x"),
            Err(CompileError::UndefinedSymbol("foo".to_string()))
        );
        assert_eq!(
            parse_expression("2 * __import__(x)", "x"),
            Err(CompileError::UndefinedSymbol("__import__".to_string()))
        );
    }

    #[test]
    fn test_other_variable_name() {
        let expr = parse_expression("t^2 - 1", "t").unwrap();
        assert_eq!(expr.all_arguments_are_variables(), vec!["t".to_string()]);
        assert!(parse_expression("x^2 - 1", "t").is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(matches!(
            parse_expression("(x + 1", "x"),
            Err(CompileError::Parse { .. })
        ));
        assert!(matches!(
            parse_expression("x + 1)", "x"),
            Err(CompileError::Parse { position: 5, .. })
        ));
    }

    #[test]
    fn test_invalid_expressions() {
        for input in ["", "   ", "x +", "2x", "x * * 2", "sin x", "x ; 1"] {
            assert!(
                matches!(parse_expression(input, "x"), Err(CompileError::Parse { .. })),
                "{} should be a syntax error",
                input
            );
        }
    }

    #[test]
    fn test_error_message_names_offending_char() {
        let err = parse_expression("x # 2", "x").unwrap_err();
        assert_eq!(
            err,
            CompileError::Parse {
                position: 2,
                message: "unexpected '#'".to_string()
            }
        );
    }

    fn assert_too_deep(input: &str) {
        match parse_expression(input, "x") {
            Err(CompileError::Parse { message, .. }) => {
                assert_eq!(message, "expression nested too deeply")
            }
            other => panic!("expected a nesting error, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_brackets_are_rejected() {
        assert_too_deep(&format!("{}x{}", "(".repeat(1000), ")".repeat(1000)));
        assert_too_deep(&format!("{}x{}", "sin(".repeat(1000), ")".repeat(1000)));
    }

    #[test]
    fn test_deep_signs_and_exponents_are_rejected() {
        assert_too_deep(&format!("{}x", "-".repeat(5000)));
        assert_too_deep(&format!("{}x", "2^".repeat(5000)));
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        assert_too_deep(&format!("{}x", "x+".repeat(5000)));
        assert_too_deep(&format!("{}x", "x*".repeat(5000)));
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let nested = format!("{}x{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(parse(&nested), *x());
        let chain = format!("{}x", "x+".repeat(100));
        assert!(parse_expression(&chain, "x").is_ok());
        assert_eq!(parse("--x"), -(-*x()));
    }
}
