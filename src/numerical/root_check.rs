//! Snapping of a Newton estimate to the nearest integer and the label a root
//! gets on the plot.
use crate::symbolic::symbolic_lambdify::NumericFunction;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum RootLabel {
    /// the function is exactly zero at the point
    #[strum(serialize = "IS_ROOT")]
    ExactRoot,
    #[strum(serialize = "IS_APPROXIMATION")]
    Approximation,
}

impl RootLabel {
    /// Label of a point from the stored residual `f(x)`.
    pub fn from_residual(fx: f64) -> RootLabel {
        if fx == 0.0 {
            RootLabel::ExactRoot
        } else {
            RootLabel::Approximation
        }
    }
}

/// Rounds `x` to the nearest integer (ties go to the even neighbour) and keeps
/// the rounded value only if `f` vanishes there exactly.
///
/// # Examples
/// ```
/// use RustedRootPlot::numerical::root_check::{classify, RootLabel};
/// use RustedRootPlot::symbolic::symbolic_lambdify::compile;
/// let f = compile("x^2 - 4").unwrap();
/// assert_eq!(classify(2.0000001, &f), (2.0, RootLabel::ExactRoot));
/// ```
pub fn classify(x: f64, f: &NumericFunction) -> (f64, RootLabel) {
    // + 0.0 turns -0.0 into 0.0
    let rounded = x.round_ties_even() + 0.0;
    if f.eval(rounded) == 0.0 {
        (rounded, RootLabel::ExactRoot)
    } else {
        (x, RootLabel::Approximation)
    }
}
