//! Root-plot requests: an expression and two initial guesses in, a
//! [`PlotDescription`] with both roots out.
//!
//! Every request compiles its own function and gets its own result back, so
//! independent requests can be solved in parallel with [`NewtonPlotter::solve_batch`].
//!
//! # Examples
//! ```
//! use RustedRootPlot::numerical::newton_plot::{NewtonPlotRequest, NewtonPlotter};
//! use RustedRootPlot::Utils::settings::NewtonPlotSettings;
//! let plotter = NewtonPlotter::new(NewtonPlotSettings::default()).unwrap();
//! let plot = plotter.solve(&NewtonPlotRequest::new("x^2 - 4", "1", "-1")).unwrap();
//! assert!(plot.root_exists);
//! assert_eq!(plot.roots[0].x, 2.0);
//! assert_eq!(plot.roots[1].x, -2.0);
//! ```
use crate::errors::{NewtonPlotError, SettingsError};
use crate::numerical::NR_1D::{NR1D, RootResult};
use crate::numerical::plots::{PlotDescription, assemble};
use crate::numerical::sample_domain::{SampleDomain, build_domain, root_exists};
use crate::symbolic::symbolic_lambdify::compile_with_variable;
use crate::Utils::settings::NewtonPlotSettings;
use log::info;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct NewtonPlotRequest {
    pub expression: String,
    pub guess1: String,
    pub guess2: String,
}

impl NewtonPlotRequest {
    pub fn new(expression: &str, guess1: &str, guess2: &str) -> NewtonPlotRequest {
        NewtonPlotRequest {
            expression: expression.to_string(),
            guess1: guess1.to_string(),
            guess2: guess2.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewtonPlot {
    pub description: PlotDescription,
    /// roots found from the first and the second guess
    pub roots: [RootResult; 2],
    pub domain: SampleDomain,
    pub root_exists: bool,
}

/// True if `variable` occurs in `expression` as a whole identifier.
pub fn is_processable(expression: &str, variable: &str) -> bool {
    let mut chars = expression.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_ascii_alphabetic() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, c)) = chars.peek() {
                if !(c.is_ascii_alphanumeric() || c == '_') {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            if &expression[start..end] == variable {
                return true;
            }
        }
    }
    false
}

/// Reads an initial guess, surrounding whitespace allowed.
pub fn parse_guess(text: &str) -> Result<f64, NewtonPlotError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NewtonPlotError::InvalidGuess(text.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct NewtonPlotter {
    settings: NewtonPlotSettings,
}

impl NewtonPlotter {
    /// Validates `settings` first, so a solver never runs with a zero step or tolerance below 0.
    pub fn new(settings: NewtonPlotSettings) -> Result<NewtonPlotter, SettingsError> {
        settings.validate()?;
        Ok(NewtonPlotter { settings })
    }

    pub fn solve(&self, request: &NewtonPlotRequest) -> Result<NewtonPlot, NewtonPlotError> {
        // case folding applies to the variable name as well
        let (expression, variable) = if self.settings.case_insensitive {
            (
                request.expression.to_lowercase(),
                self.settings.variable.to_lowercase(),
            )
        } else {
            (request.expression.clone(), self.settings.variable.clone())
        };
        let variable = variable.as_str();
        if !is_processable(&expression, variable) {
            return Err(NewtonPlotError::NotProcessable {
                expression,
                variable: variable.to_string(),
            });
        }
        let f = compile_with_variable(&expression, variable)?;
        info!("compiled {} as {}", expression, f.expr());
        let x1 = parse_guess(&request.guess1)?;
        let x2 = parse_guess(&request.guess2)?;

        let solver = NR1D::from_settings(&self.settings);
        let root1 = solver.find_root(&f, x1);
        let root2 = solver.find_root(&f, x2);
        let domain = build_domain(root1.x, root2.x);
        let exists = root_exists(&f, &domain);
        let description = assemble(&f, &root1, &root2, &expression, &domain, exists);
        info!(
            "{}: roots {} and {}, roots exist: {}",
            expression, root1.x, root2.x, exists
        );
        Ok(NewtonPlot {
            description,
            roots: [root1, root2],
            domain,
            root_exists: exists,
        })
    }

    /// Solves independent requests in parallel, results in request order.
    pub fn solve_batch(
        &self,
        requests: &[NewtonPlotRequest],
    ) -> Vec<Result<NewtonPlot, NewtonPlotError>> {
        requests.par_iter().map(|request| self.solve(request)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_processable() {
        assert!(is_processable("x^2 - 4", "x"));
        assert!(is_processable("sin(x)", "x"));
        // digits do not start an identifier, compilation rejects 2x later
        assert!(is_processable("2x", "x"));
        assert!(!is_processable("exp(2) + 1", "x"));
        assert!(!is_processable("max + 1", "x"));
        assert!(!is_processable("x1 + 1", "x"));
        assert!(is_processable("t*t", "t"));
        assert!(!is_processable("", "x"));
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess(" 4 ").unwrap(), 4.0);
        assert_eq!(parse_guess("-1.5e2").unwrap(), -150.0);
        for bad in ["abc", "", "inf", "NaN", "1,5"] {
            assert_eq!(
                parse_guess(bad).unwrap_err(),
                NewtonPlotError::InvalidGuess(bad.to_string())
            );
        }
    }
}
