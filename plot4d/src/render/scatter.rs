//! 3D scatter charts
use super::{CAPTION, COLORBAR, FONT, ScatterPlot, into_rgba, rgb_buffer, span};
use crate::Error;
use image::RgbaImage;
use plotters::{coord::Shift, prelude::*};

/// Number of swatches in the continuous colorbar
const STEPS: usize = 64;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(super) fn draw(plot: &ScatterPlot<'_>) -> Result<RgbaImage, Error> {
    let size = plot.size;
    let mut buf = rgb_buffer(size);
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (size.width(), size.height()))
                .into_drawing_area();
        root.fill(&WHITE)?;
        let (main, side) = root.split_horizontally(size.width() - COLORBAR);
        draw_chart(plot, &main)?;
        draw_colorbar(plot, &side)?;
        root.present()?;
    }
    into_rgba(size, buf)
}

/// Maps a magnitude into `[0, 1]` over the cloud's range
fn position(m: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo { (m - lo) / (hi - lo) } else { 0.5 }
}

fn draw_chart(plot: &ScatterPlot<'_>, area: &Area<'_>) -> Result<(), Error> {
    let cloud = plot.cloud;
    let (lo, hi) = cloud.bounds();
    let (xr, yr, zr) = (span(lo[0], hi[0]), span(lo[1], hi[1]), span(lo[2], hi[2]));

    // The chart's vertical axis is its second one, so `z` goes there
    let mut chart = ChartBuilder::on(area)
        .caption(plot.title, (FONT, 20))
        .margin(10)
        .build_cartesian_3d(xr.clone(), zr.clone(), yr.clone())?;
    chart.with_projection(|mut p| {
        p.yaw = 0.6;
        p.pitch = 0.35;
        p.scale = 0.8;
        p.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()?;

    let (xl, yl, zl) = plot.labels;
    let label = (FONT, 15).into_font().color(&BLACK);
    chart.draw_series([
        Text::new(xl.to_owned(), (xr.end, zr.start, yr.start), label.clone()),
        Text::new(yl.to_owned(), (xr.start, zr.start, yr.end), label.clone()),
        Text::new(zl.to_owned(), (xr.start, zr.end, yr.start), label),
    ])?;

    let range = cloud.magnitude_range();
    let (w, h) = area.dim_in_pixel();
    let radius = (w.min(h) / 100).max(3);
    chart.draw_series(
        cloud
            .samples()
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != cloud.best_index())
            .map(|(_, p)| {
                let color = plot.colormap.rgb(position(p.magnitude, range));
                Circle::new((p.x, p.z, p.y), radius, color.filled())
            }),
    )?;

    if let Some(best) = cloud.best() {
        let at = (best.x, best.z, best.y);
        let color = plot.colormap.rgb(position(best.magnitude, range));
        chart.draw_series([
            Circle::new(at, radius * 2 + 2, plot.colormap.highlight().filled()),
            Circle::new(at, radius * 2, color.filled()),
        ])?;
    }
    Ok(())
}

fn draw_colorbar(plot: &ScatterPlot<'_>, area: &Area<'_>) -> Result<(), Error> {
    let range = plot.cloud.magnitude_range();
    let yr = span(range.0, range.1);
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(10 + CAPTION)
        .x_label_area_size(20)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, yr.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .draw()?;

    let step = (yr.end - yr.start) / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let y = yr.start + step * i as f64;
        let t = (i as f64 + 0.5) / STEPS as f64;
        Rectangle::new(
            [(0.0, y), (1.0, y + step)],
            plot.colormap.rgb(t).filled(),
        )
    }))?;
    Ok(())
}
