#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedRootPlot::symbolic::parse_expr::parse_expression;
/// let parsed_expression = parse_expression("x^2 - 4*sin(x)", "x").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!(parse_expression("x + y", "x").is_err());
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// restricted expression tree of one variable
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
///
/// turns an expression into a numeric function of one variable
/// Example#
/// ```
/// use RustedRootPlot::symbolic::symbolic_lambdify::compile;
/// let f = compile("exp(x) - 1").unwrap();
/// assert_eq!(f.eval(0.0), 0.0);
/// ```
pub mod symbolic_lambdify;
