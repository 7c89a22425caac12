//! Newton-Raphson method for a single equation f(x) = 0 with a central
//! difference derivative.
//!
//! Iteration stops as soon as |f(x)| <= tolerance or after `max_iterations` steps.
//! Non-convergence is never an error: the outcome of every run is recorded in
//! [`RootOutcome`] next to the estimate, and the estimate is always a finite number.
//!  Example#1
//! ```
//! use RustedRootPlot::numerical::NR_1D::{NR1D, RootOutcome};
//! use RustedRootPlot::symbolic::symbolic_lambdify::compile;
//! let f = compile("x^2 - 4").unwrap();
//! let result = NR1D::new().find_root(&f, 1.0);
//! assert_eq!(result.outcome, RootOutcome::Converged);
//! assert_eq!(result.x, 2.0);
//! ```
//! Example#2
//! ```
//! // zero derivative: the estimate is reset to 0 and the run is flagged
//! use RustedRootPlot::numerical::NR_1D::{find_root, RootOutcome};
//! use RustedRootPlot::symbolic::symbolic_lambdify::compile;
//! let f = compile("7").unwrap();
//! let result = find_root(&f, 3.0, 1e-4, 1000);
//! assert_eq!(result.outcome, RootOutcome::DerivativeVanished);
//! assert_eq!(result.x, 0.0);
//! ```
use crate::numerical::root_check::{RootLabel, classify};
use crate::symbolic::symbolic_lambdify::NumericFunction;
use crate::Utils::settings::NewtonPlotSettings;
use log::{Level, debug, info, log_enabled, warn};
use std::time::Instant;
use strum_macros::Display;
use tabled::{builder::Builder, settings::Style};

/// How a Newton run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RootOutcome {
    /// |f(x)| <= tolerance
    Converged,
    MaxIterationsReached,
    /// f'(x) == 0 was met, x was reset to 0
    DerivativeVanished,
    /// the next iterate was not a finite number, the last finite one is kept
    NonFinite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootResult {
    /// final estimate, snapped to an integer when that integer is an exact root
    pub x: f64,
    /// f(x) at the final estimate
    pub fx: f64,
    /// every iterate, the initial guess excluded
    pub iterations: Vec<f64>,
    pub outcome: RootOutcome,
}

impl RootResult {
    pub fn label(&self) -> RootLabel {
        RootLabel::from_residual(self.fx)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NR1D {
    pub tolerance: f64,
    pub max_iterations: usize,
    /// step h of (f(x+h) - f(x-h)) / 2h
    pub derivative_step: f64,
}

impl Default for NR1D {
    fn default() -> Self {
        NR1D {
            tolerance: 1e-4,
            max_iterations: 1000,
            derivative_step: 1e-6,
        }
    }
}

impl NR1D {
    pub fn new() -> NR1D {
        NR1D::default()
    }
    ////////////////////////////SETTERS////////////////////////////////////////////////////////
    pub fn set_solver_params(
        &mut self,
        tolerance: f64,
        max_iterations: usize,
        derivative_step: f64,
    ) {
        self.tolerance = tolerance;
        self.max_iterations = max_iterations;
        self.derivative_step = derivative_step;
    }

    pub fn from_settings(settings: &NewtonPlotSettings) -> NR1D {
        NR1D {
            tolerance: settings.tolerance,
            max_iterations: settings.max_iterations,
            derivative_step: settings.derivative_step,
        }
    }
    //////////////////////////////////////////////////////////////////////////////////////////////
    ///                 MAIN LOOP
    //////////////////////////////////////////////////////////////////////////////////////////////
    pub fn find_root(&self, f: &NumericFunction, x0: f64) -> RootResult {
        let begin = Instant::now();
        let mut x = x0;
        let mut fx = f.eval(x);
        let mut iterations: Vec<f64> = Vec::new();
        let mut stopped: Option<RootOutcome> = None;
        while fx.abs() > self.tolerance && iterations.len() < self.max_iterations {
            let dfx = f.derivative(x, self.derivative_step);
            if dfx == 0.0 {
                warn!(
                    "derivative vanished at x = {} after {} iterations, estimate reset to 0",
                    x,
                    iterations.len()
                );
                x = 0.0;
                stopped = Some(RootOutcome::DerivativeVanished);
                break;
            }
            let new_x = x - fx / dfx;
            if !new_x.is_finite() {
                warn!(
                    "iterate is not finite (f = {}, f' = {}), keeping x = {}",
                    fx, dfx, x
                );
                stopped = Some(RootOutcome::NonFinite);
                break;
            }
            x = new_x;
            iterations.push(x);
            fx = f.eval(x);
            debug!("iteration = {}, x = {}, f(x) = {}", iterations.len(), x, fx);
        }
        let outcome = match stopped {
            Some(outcome) => outcome,
            None if fx.abs() <= self.tolerance => RootOutcome::Converged,
            // NaN residual fails both loop tests
            None if fx.is_nan() => RootOutcome::NonFinite,
            None => {
                warn!(
                    "no convergence after {} iterations, |f(x)| = {}",
                    iterations.len(),
                    fx.abs()
                );
                RootOutcome::MaxIterationsReached
            }
        };
        let (x, _) = classify(x, f);
        let fx = f.eval(x);
        info!(
            "x0 = {}: x = {}, f(x) = {}, {} iterations, {}",
            x0,
            x,
            fx,
            iterations.len(),
            outcome
        );
        let result = RootResult {
            x,
            fx,
            iterations,
            outcome,
        };
        if log_enabled!(Level::Debug) {
            self.calc_statistics(&result, begin.elapsed().as_micros());
        }
        result
    }

    fn calc_statistics(&self, result: &RootResult, elapsed_micros: u128) {
        let mut builder = Builder::default();
        builder.push_record([
            "number of iterations".to_string(),
            result.iterations.len().to_string(),
        ]);
        builder.push_record([
            "max iterations".to_string(),
            self.max_iterations.to_string(),
        ]);
        builder.push_record(["final residual".to_string(), format!("{:e}", result.fx)]);
        builder.push_record(["outcome".to_string(), result.outcome.to_string()]);
        builder.push_record(["time, mks".to_string(), elapsed_micros.to_string()]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        debug!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }
}

/// Runs Newton-Raphson from `x0` with tolerance `epsilon` and at most `kmax`
/// iterations, derivative step 1e-6.
pub fn find_root(f: &NumericFunction, x0: f64, epsilon: f64, kmax: usize) -> RootResult {
    let mut solver = NR1D::new();
    solver.set_solver_params(epsilon, kmax, 1e-6);
    solver.find_root(f, x0)
}
