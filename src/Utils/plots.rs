use crate::numerical::plots::{MarkerColor, PlotDescription, PlotSeries};
use log::info;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// splits a sampled curve into runs of finite points, NaN and inf break the line
fn finite_segments(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if xi.is_finite() && yi.is_finite() {
            current.push((xi, yi));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn padded(min: f64, max: f64) -> (f64, f64) {
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

/// Draws a [`PlotDescription`] into a PNG file of `size` pixels.
pub fn render_png(
    description: &PlotDescription,
    path: impl AsRef<Path>,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let bounds = description.bounds().ok_or("plot has no finite points")?;
    let (x_min, x_max) = padded(bounds.x_min, bounds.x_max);
    let (y_min, y_max) = padded(bounds.y_min, bounds.y_max);

    let root_area = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&description.title, ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&description.x_axis_label)
        .y_desc(&description.y_axis_label)
        .draw()?;

    for series in &description.series {
        match series {
            PlotSeries::Curve(curve) => {
                for (i, segment) in finite_segments(&curve.x, &curve.y).into_iter().enumerate() {
                    let drawn = chart.draw_series(LineSeries::new(segment, &BLUE))?;
                    // one legend entry per curve
                    if i == 0 {
                        drawn.label(curve.label.as_str()).legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], &BLUE)
                        });
                    }
                }
            }
            PlotSeries::Marker(marker) => {
                let color = match marker.color {
                    MarkerColor::Red => RED,
                    MarkerColor::Yellow => YELLOW,
                };
                if !(marker.x.is_finite() && marker.y.is_finite()) {
                    continue;
                }
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (marker.x, marker.y),
                        6,
                        color.filled(),
                    )))?
                    .label(marker.label.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x + 5, y - 5), (x + 15, y + 5)], color.filled())
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    info!("plot saved to {}", path.as_ref().display());
    Ok(())
}
