//! # Symbolic engine
//!
//! Restricted abstract syntax tree for expressions of one real variable.
//!
//! The tree is produced by [`parse_expr`](crate::symbolic::parse_expr) and consumed by
//! [`symbolic_lambdify`](crate::symbolic::symbolic_lambdify), which turns it into a
//! numeric function. Only the arithmetic operators and the fixed set of elementary
//! functions below can appear in it, so nothing outside that whitelist can ever be
//! evaluated.
//!
//! ## Main structures and methods
//! - `Expr` - the tree itself, with `Display` for logging
//! - `parse_expression(input, variable)` - string to tree (see `parse_expr`)
//! - `all_arguments_are_variables` - names of the variables in the tree
//! - `std::ops` overloads so trees can be built as `x.clone() * x - Expr::Const(4.0)`
//!
//! Trigonometric functions keep the mathematical notation `tg`, `ctg`, `arctg`, `arcctg`.

#![allow(non_camel_case_types)]

use std::fmt;

/// Symbolic expression of one variable.
///
/// # Examples
/// ```rust
/// use RustedRootPlot::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = x.clone() * x - Expr::Const(4.0);
/// assert_eq!(format!("{}", expr), "((x * x) - 4)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x")
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
    /// Square root
    sqrt(Box<Expr>),
    /// Absolute value
    abs(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// Tangent function: tan(x)
    tg(Box<Expr>),
    /// Cotangent function: cot(x)
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// Arctangent function: arctan(x)
    arctg(Box<Expr>),
    /// Arccotangent function: arccot(x)
    arcctg(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
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

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Argument of a one-argument function node, `None` for leaves and binary operations.
    fn inner(&self) -> Option<&Expr> {
        match self {
            Expr::Exp(e)
            | Expr::Ln(e)
            | Expr::sqrt(e)
            | Expr::abs(e)
            | Expr::sin(e)
            | Expr::cos(e)
            | Expr::tg(e)
            | Expr::ctg(e)
            | Expr::arcsin(e)
            | Expr::arccos(e)
            | Expr::arctg(e)
            | Expr::arcctg(e) => Some(e),
            _ => None,
        }
    }

    /// Names of all variables in the expression, sorted and without duplicates.
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            other => {
                if let Some(expr) = other.inner() {
                    expr.collect_variables(vars);
                }
            }
        }
    }
}
