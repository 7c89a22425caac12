#![allow(non_snake_case)]
use RustedRootPlot::Utils::logger::init_logger;
use RustedRootPlot::Utils::plots::render_png;
use RustedRootPlot::Utils::settings::NewtonPlotSettings;
use RustedRootPlot::numerical::NR_1D::NR1D;
use RustedRootPlot::numerical::newton_plot::{NewtonPlotRequest, NewtonPlotter};
use RustedRootPlot::symbolic::symbolic_lambdify::compile;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let settings = NewtonPlotSettings::default();
    init_logger(&settings.loglevel, settings.log_to_file)?;
    let example = 0;
    match example {
        0 => {
            // two guesses, two roots, the plot is saved next to the binary
            let plotter = NewtonPlotter::new(settings)?;
            let request = NewtonPlotRequest::new("x^2 - 4", "1", "-1");
            let plot = plotter.solve(&request)?;
            for root in &plot.roots {
                println!(
                    "{} = {}, {} iterations, {}",
                    root.label(),
                    root.x,
                    root.iterations.len(),
                    root.outcome
                );
            }
            render_png(&plot.description, "newton_raphson.png", (800, 600))?;
        }
        1 => {
            // no real roots: the curve is drawn alone
            let plotter = NewtonPlotter::new(settings)?;
            let plot = plotter.solve(&NewtonPlotRequest::new("x^2 + 1", "1", "2"))?;
            println!("roots exist: {}", plot.root_exists);
            render_png(&plot.description, "no_roots.png", (800, 600))?;
        }
        2 => {
            // solver alone, without the plot
            let f = compile("cos(x) - x")?;
            let mut solver = NR1D::new();
            solver.set_solver_params(1e-10, 100, 1e-6);
            let result = solver.find_root(&f, 1.0);
            println!("x = {}, f(x) = {:e}, {}", result.x, result.fx, result.outcome);
        }
        3 => {
            // many requests at once
            let plotter = NewtonPlotter::new(settings)?;
            let requests = vec![
                NewtonPlotRequest::new("x - 5", "4", "6"),
                NewtonPlotRequest::new("x^3 - 2*x + 2", "0", "-2"),
                NewtonPlotRequest::new("exp(x) - 2", "0", "3"),
                NewtonPlotRequest::new("y + 1", "0", "1"),
            ];
            for (request, result) in requests.iter().zip(plotter.solve_batch(&requests)) {
                match result {
                    Ok(plot) => println!(
                        "{}: {} and {} ({}, {})",
                        request.expression,
                        plot.roots[0].x,
                        plot.roots[1].x,
                        plot.roots[0].outcome,
                        plot.roots[1].outcome
                    ),
                    Err(e) => println!("{}: {}", request.expression, e),
                }
            }
        }
        _ => {
            println!("no such example");
        }
    }
    Ok(())
}
