//! LAMBDIFICATION - converting symbolic expressions to numeric functions.
//!
//! [`compile`] turns a string into a [`NumericFunction`]: the string is parsed into an
//! [`Expr`] and the tree is lowered into a [`Lambda`] whose only leaf besides constants
//! is the free variable. Evaluation walks the `Lambda`, so the function is plain data:
//! it can be sent to another thread, but it is built per request and never cached.
//! The parser bounds the tree height, which bounds the recursion of `compile1D` and `eval`.
use crate::errors::CompileError;
use crate::symbolic::parse_expr::parse_expression;
use crate::symbolic::symbolic_engine::Expr;
use ndarray::Array1;
use std::f64::consts::PI;

/// Name of the free variable when none is given.
pub const DEFAULT_VARIABLE: &str = "x";

#[derive(Clone, Debug, PartialEq)]
pub enum Lambda {
    Arg,
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Sqrt(Box<Lambda>),
    Abs(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
}

impl Expr {
    /// Lowers the tree into a [`Lambda`]. Every `Var` becomes the argument, so the
    /// expression must already have been checked to contain no other variable.
    pub fn compile1D(&self) -> Lambda {
        let unary = |e: &Expr, node: fn(Box<Lambda>) -> Lambda| node(Box::new(e.compile1D()));
        let binary = |a: &Expr, b: &Expr, node: fn(Box<Lambda>, Box<Lambda>) -> Lambda| {
            node(Box::new(a.compile1D()), Box::new(b.compile1D()))
        };
        match self {
            Expr::Var(_) => Lambda::Arg,
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => binary(a, b, Lambda::Add),
            Expr::Sub(a, b) => binary(a, b, Lambda::Sub),
            Expr::Mul(a, b) => binary(a, b, Lambda::Mul),
            Expr::Div(a, b) => binary(a, b, Lambda::Div),
            Expr::Pow(a, b) => binary(a, b, Lambda::Pow),
            Expr::Exp(e) => unary(e, Lambda::Exp),
            Expr::Ln(e) => unary(e, Lambda::Ln),
            Expr::sqrt(e) => unary(e, Lambda::Sqrt),
            Expr::abs(e) => unary(e, Lambda::Abs),
            Expr::sin(e) => unary(e, Lambda::Sin),
            Expr::cos(e) => unary(e, Lambda::Cos),
            Expr::tg(e) => unary(e, Lambda::Tg),
            Expr::ctg(e) => unary(e, Lambda::Ctg),
            Expr::arcsin(e) => unary(e, Lambda::ArcSin),
            Expr::arccos(e) => unary(e, Lambda::ArcCos),
            Expr::arctg(e) => unary(e, Lambda::ArcTg),
            Expr::arcctg(e) => unary(e, Lambda::ArcCtg),
        }
    }
}

impl Lambda {
    #[inline(always)]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Lambda::Arg => x,
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(x) + b.eval(x),
            Lambda::Sub(a, b) => a.eval(x) - b.eval(x),
            Lambda::Mul(a, b) => a.eval(x) * b.eval(x),
            Lambda::Div(a, b) => a.eval(x) / b.eval(x),
            Lambda::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Lambda::Exp(e) => e.eval(x).exp(),
            Lambda::Ln(e) => e.eval(x).ln(),
            Lambda::Sqrt(e) => e.eval(x).sqrt(),
            Lambda::Abs(e) => e.eval(x).abs(),
            Lambda::Sin(e) => e.eval(x).sin(),
            Lambda::Cos(e) => e.eval(x).cos(),
            Lambda::Tg(e) => e.eval(x).tan(),
            Lambda::Ctg(e) => 1.0 / e.eval(x).tan(),
            Lambda::ArcSin(e) => e.eval(x).asin(),
            Lambda::ArcCos(e) => e.eval(x).acos(),
            Lambda::ArcTg(e) => e.eval(x).atan(),
            Lambda::ArcCtg(e) => (PI / 2.0) - e.eval(x).atan(),
        }
    }
}

/// Numeric function of one real variable, scalar or elementwise over arrays.
///
/// # Examples
/// ```
/// use RustedRootPlot::symbolic::symbolic_lambdify::compile;
/// use ndarray::array;
/// let f = compile("x^2 - 4").unwrap();
/// assert_eq!(f.eval(3.0), 5.0);
/// assert_eq!(f.eval_array(&array![0.0, 2.0]), array![-4.0, 0.0]);
/// ```
#[derive(Clone, Debug)]
pub struct NumericFunction {
    expr: Expr,
    lambda: Lambda,
}

impl NumericFunction {
    pub fn from_expr(expr: Expr) -> NumericFunction {
        let lambda = expr.compile1D();
        NumericFunction { expr, lambda }
    }

    /// symbolic form the function was compiled from
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.lambda.eval(x)
    }

    pub fn eval_array(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.lambda.eval(xi))
    }

    /// Central difference `(f(x+h) - f(x-h)) / 2h`.
    pub fn derivative(&self, x: f64, h: f64) -> f64 {
        (self.eval(x + h) - self.eval(x - h)) / (2.0 * h)
    }
}

/// Compiles an expression of `x`.
pub fn compile(expression: &str) -> Result<NumericFunction, CompileError> {
    compile_with_variable(expression, DEFAULT_VARIABLE)
}

/// Compiles an expression whose free variable is `variable`.
pub fn compile_with_variable(
    expression: &str,
    variable: &str,
) -> Result<NumericFunction, CompileError> {
    let expr = parse_expression(expression, variable)?;
    Ok(NumericFunction::from_expr(expr))
}
