use plotters::prelude::*;
use rustfft::num_complex::Complex64;
use std::error::Error;
use std::path::Path;

use crate::upfirlerp::grid_time;

const PLOT_FONT_SIZE: u32 = 15;
const PLOT_SIZE_X: u32 = 800;
const PLOT_SIZE_Y: u32 = 600;

fn value_range(grid: &[Complex64], values: &[Complex64], part: fn(&Complex64) -> f64) -> (f64, f64) {
    let delta = 0.1;
    let y_max = grid
        .iter()
        .chain(values.iter())
        .map(part)
        .fold(0.0, |acc, v| if v > acc { v } else { acc });
    let y_min = grid
        .iter()
        .chain(values.iter())
        .map(part)
        .fold(0.0, |acc, v| if v < acc { v } else { acc });
    (y_min - delta, y_max + delta)
}

/// Draws the filtered grid samples (line) and the interpolated query
/// points (dots), real part on top and imaginary part below.
pub fn plot_interpolation(
    file_name: &Path,
    step_sec: f64,
    grid: &[Complex64],
    t: &[f64],
    values: &[Complex64],
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(file_name, (PLOT_SIZE_X, PLOT_SIZE_Y)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let x_max = grid_time(grid.len().max(1), step_sec);
    let x_min = -step_sec;
    let areas = root_area.split_evenly((2, 1));
    let parts: [(&str, fn(&Complex64) -> f64, &RGBColor); 2] =
        [("real", |c| c.re, &BLUE), ("imag", |c| c.im, &RED)];

    for (area, (name, part, color)) in areas.iter().zip(parts) {
        let (y_min, y_max) = value_range(grid, values, part);
        let mut ctx = ChartBuilder::on(area)
            .set_label_area_size(LabelAreaPosition::Left, 40)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .caption(
                format!("{}: {} grid samples, {} queries", name, grid.len(), t.len()),
                ("sans-serif", PLOT_FONT_SIZE),
            )
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        ctx.configure_mesh().draw()?;

        ctx.draw_series(LineSeries::new(
            grid.iter()
                .enumerate()
                .map(|(n, c)| (grid_time(n, step_sec), part(c))),
            &BLACK,
        ))?;
        ctx.draw_series(
            t.iter()
                .zip(values.iter())
                .filter(|(q, _)| q.is_finite())
                .map(|(&q, c)| Circle::new((q, part(c)), 2, color.filled())),
        )?;
    }
    root_area.present()?;
    log::info!("plot written to {}", file_name.display());
    Ok(())
}
