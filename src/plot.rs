//! Trajectory rendering.
//!
//! External collaborator of the solvers: takes a finished trajectory table
//! and draws it to an SVG file. Nothing here feeds back into a solve.
use crate::mech::Table;
use plotters::prelude::*;
use std::path::Path;

const PALETTE: [RGBColor; 5] = [RED, BLUE, GREEN, MAGENTA, BLACK];

/// Draw every trajectory of a solved table into an SVG file.
///
/// Square viewport over the common bounding box (matching the equal-aspect
/// convention of linkage drawings), one polyline and legend entry per
/// tracked point, and a dot marker at the first sample of each path.
pub fn plot_table<P>(table: &Table, title: &str, path: P) -> Result<(), Box<dyn std::error::Error>>
where
    P: AsRef<Path>,
{
    let mut p_min = f64::INFINITY;
    let mut p_max = -f64::INFINITY;
    for &[x, y] in table.iter().flat_map(|(_, c)| c.iter()) {
        p_min = p_min.min(x.min(y));
        p_max = p_max.max(x.max(y));
    }
    if p_min >= p_max {
        // Nothing to draw from an empty or single-point table
        return Ok(());
    }
    let root = SVGBackend::new(&path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40))
        .x_label_area_size(40)
        .y_label_area_size(40)
        .margin(20)
        .build_cartesian_2d(p_min..p_max, p_min..p_max)?;
    chart.configure_mesh().disable_x_mesh().disable_y_mesh().draw()?;
    for (i, (name, curve)) in table.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                curve.iter().map(|&[x, y]| (x, y)),
                color.stroke_width(2),
            ))?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        if let Some(&[x, y]) = curve.first() {
            chart.draw_series(std::iter::once(Circle::new((x, y), 5, color.filled())))?;
        }
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
