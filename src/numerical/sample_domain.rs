//! Sampling interval around the two estimated roots and the sign-change test
//! that decides whether the plot shows roots at all.
use crate::symbolic::symbolic_lambdify::NumericFunction;
use itertools::{Itertools, MinMaxResult};
use log::debug;
use ndarray::Array1;

/// number of points the curve is sampled at
pub const SAMPLE_COUNT: usize = 100;
/// distance added on both sides of the root pair
pub const DOMAIN_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleDomain {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

impl SampleDomain {
    /// `count` equally spaced points, both ends included.
    pub fn points(&self) -> Array1<f64> {
        Array1::linspace(self.low, self.high, self.count)
    }
}

/// `[min - 10, max + 10]` of the two roots, sampled at 100 points.
pub fn build_domain(root1: f64, root2: f64) -> SampleDomain {
    let (lo, hi) = if root1 <= root2 {
        (root1, root2)
    } else {
        (root2, root1)
    };
    SampleDomain {
        low: lo - DOMAIN_MARGIN,
        high: hi + DOMAIN_MARGIN,
        count: SAMPLE_COUNT,
    }
}

/// Coarse existence test: `f(0) == 0`, or the sampled values reach both signs
/// (`min * max <= 0`). NaN samples are skipped.
pub fn root_exists(f: &NumericFunction, domain: &SampleDomain) -> bool {
    if f.eval(0.0) == 0.0 {
        return true;
    }
    let samples = f.eval_array(&domain.points());
    let exists = match samples
        .iter()
        .copied()
        .filter(|y| !y.is_nan())
        .minmax_by(f64::total_cmp)
    {
        MinMaxResult::NoElements => false,
        MinMaxResult::OneElement(y) => y * y <= 0.0,
        MinMaxResult::MinMax(min, max) => min * max <= 0.0,
    };
    debug!(
        "root existence over [{}, {}]: {}",
        domain.low, domain.high, exists
    );
    exists
}
