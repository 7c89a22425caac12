//! Renderer-independent description of the Newton-Raphson plot: the sampled
//! curve and, when the curve has roots, one marker per estimated root.
use crate::numerical::NR_1D::RootResult;
use crate::numerical::sample_domain::SampleDomain;
use crate::symbolic::symbolic_lambdify::NumericFunction;
use serde::Serialize;

pub const PLOT_TITLE: &str = "Newton-Raphson Method";
pub const X_AXIS_LABEL: &str = "X axis";
pub const Y_AXIS_LABEL: &str = "Y axis";
/// curve label when the sign test found no roots
pub const NO_ROOTS_LABEL: &str = "NO ROOTS FOUND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Yellow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSeries {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum PlotSeries {
    Curve(CurveSeries),
    Marker(MarkerSeries),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDescription {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub series: Vec<PlotSeries>,
}

impl PlotDescription {
    pub fn curves(&self) -> impl Iterator<Item = &CurveSeries> {
        self.series.iter().filter_map(|s| match s {
            PlotSeries::Curve(c) => Some(c),
            PlotSeries::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerSeries> {
        self.series.iter().filter_map(|s| match s {
            PlotSeries::Marker(m) => Some(m),
            PlotSeries::Curve(_) => None,
        })
    }

    /// Extents of all finite points of all series, `None` if there are none.
    pub fn bounds(&self) -> Option<PlotBounds> {
        let points = self
            .curves()
            .flat_map(|c| c.x.iter().copied().zip(c.y.iter().copied()))
            .chain(self.markers().map(|m| (m.x, m.y)))
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let mut bounds: Option<PlotBounds> = None;
        for (x, y) in points {
            bounds = Some(match bounds {
                None => PlotBounds {
                    x_min: x,
                    x_max: x,
                    y_min: y,
                    y_max: y,
                },
                Some(b) => PlotBounds {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            });
        }
        bounds
    }
}

fn marker(root: &RootResult, color: MarkerColor) -> PlotSeries {
    PlotSeries::Marker(MarkerSeries {
        x: root.x,
        y: root.fx,
        label: format!("{} = {}", root.label(), root.x),
        color,
    })
}

/// Builds the plot: the curve over `domain`, and when `exists` a red marker
/// for the first root and a yellow one for the second.
pub fn assemble(
    f: &NumericFunction,
    root1: &RootResult,
    root2: &RootResult,
    expression: &str,
    domain: &SampleDomain,
    exists: bool,
) -> PlotDescription {
    let xs = domain.points();
    let ys = f.eval_array(&xs);
    let label = if exists {
        expression.to_string()
    } else {
        NO_ROOTS_LABEL.to_string()
    };
    let mut series = vec![PlotSeries::Curve(CurveSeries {
        x: xs.to_vec(),
        y: ys.to_vec(),
        label,
    })];
    if exists {
        series.push(marker(root1, MarkerColor::Red));
        series.push(marker(root2, MarkerColor::Yellow));
    }
    PlotDescription {
        title: PLOT_TITLE.to_string(),
        x_axis_label: X_AXIS_LABEL.to_string(),
        y_axis_label: Y_AXIS_LABEL.to_string(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::NR_1D::{RootOutcome, find_root};
    use crate::numerical::sample_domain::build_domain;
    use crate::symbolic::symbolic_lambdify::compile;
    use serde_json::json;

    fn root(x: f64, fx: f64) -> RootResult {
        RootResult {
            x,
            fx,
            iterations: vec![x],
            outcome: RootOutcome::Converged,
        }
    }

    #[test]
    fn test_assemble_with_roots() {
        let f = compile("x^2 - 4").unwrap();
        let r1 = find_root(&f, 1.0, 1e-4, 1000);
        let r2 = find_root(&f, -1.0, 1e-4, 1000);
        let domain = build_domain(r1.x, r2.x);
        let plot = assemble(&f, &r1, &r2, "x^2 - 4", &domain, true);
        assert_eq!(plot.title, "Newton-Raphson Method");
        assert_eq!(plot.series.len(), 3);
        let curve = plot.curves().next().unwrap();
        assert_eq!(curve.label, "x^2 - 4");
        assert_eq!(curve.x.len(), 100);
        assert_eq!(curve.y[0], f.eval(curve.x[0]));
        let markers: Vec<&MarkerSeries> = plot.markers().collect();
        assert_eq!(markers[0].color, MarkerColor::Red);
        assert_eq!(markers[0].label, "IS_ROOT = 2");
        assert_eq!(markers[1].color, MarkerColor::Yellow);
        assert_eq!(markers[1].label, "IS_ROOT = -2");
    }

    #[test]
    fn test_assemble_without_roots() {
        let f = compile("x^2 + 1").unwrap();
        let domain = build_domain(0.0, 0.0);
        let plot = assemble(&f, &root(0.0, 1.0), &root(0.0, 1.0), "x^2 + 1", &domain, false);
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.curves().next().unwrap().label, NO_ROOTS_LABEL);
        assert_eq!(plot.markers().count(), 0);
    }

    #[test]
    fn test_approximation_label() {
        let f = compile("x^2 - 2").unwrap();
        let r = root(1.5, 0.25);
        let plot = assemble(&f, &r, &r, "x^2 - 2", &build_domain(1.5, 1.5), true);
        assert_eq!(plot.markers().next().unwrap().label, "IS_APPROXIMATION = 1.5");
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let plot = PlotDescription {
            title: PLOT_TITLE.to_string(),
            x_axis_label: X_AXIS_LABEL.to_string(),
            y_axis_label: Y_AXIS_LABEL.to_string(),
            series: vec![
                PlotSeries::Curve(CurveSeries {
                    x: vec![-1.0, 0.0, 2.0],
                    y: vec![f64::NAN, 3.0, -4.0],
                    label: "c".to_string(),
                }),
                PlotSeries::Marker(MarkerSeries {
                    x: 5.0,
                    y: 0.0,
                    label: "m".to_string(),
                    color: MarkerColor::Red,
                }),
            ],
        };
        let b = plot.bounds().unwrap();
        assert_eq!((b.x_min, b.x_max, b.y_min, b.y_max), (0.0, 5.0, -4.0, 3.0));
    }

    #[test]
    fn test_empty_bounds() {
        let plot = PlotDescription {
            title: String::new(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            series: vec![],
        };
        assert!(plot.bounds().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let marker = PlotSeries::Marker(MarkerSeries {
            x: 5.0,
            y: 0.0,
            label: "IS_ROOT = 5".to_string(),
            color: MarkerColor::Yellow,
        });
        assert_eq!(
            serde_json::to_value(&marker).unwrap(),
            json!({"kind": "Marker", "x": 5.0, "y": 0.0, "label": "IS_ROOT = 5", "color": "yellow"})
        );
        let f = compile("x").unwrap();
        let domain = build_domain(0.0, 0.0);
        let plot = assemble(&f, &root(0.0, 0.0), &root(0.0, 0.0), "x", &domain, true);
        let value = serde_json::to_value(&plot).unwrap();
        assert_eq!(value["title"], "Newton-Raphson Method");
        assert_eq!(value["x_axis_label"], "X axis");
        assert_eq!(value["series"][0]["kind"], "Curve");
        assert_eq!(value["series"][0]["x"].as_array().unwrap().len(), 100);
    }
}
