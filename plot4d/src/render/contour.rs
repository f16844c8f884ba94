//! Filled contour charts
use super::{CAPTION, COLORBAR, ContourPlot, FONT, into_rgba, rgb_buffer, span};
use crate::Error;
use image::RgbaImage;
use plotters::{coord::Shift, prelude::*};

/// Edge length of one filled cell, in pixels
const CELL: u32 = 2;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(super) fn draw(plot: &ContourPlot<'_>) -> Result<RgbaImage, Error> {
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

fn band_colors(plot: &ContourPlot<'_>) -> Vec<RGBColor> {
    let scale = plot.scale;
    (0..scale.bands())
        .map(|b| plot.colormap.rgb(scale.band_position(b)))
        .collect()
}

fn draw_chart(plot: &ContourPlot<'_>, area: &Area<'_>) -> Result<(), Error> {
    let grid = plot.grid;
    let scale = plot.scale;
    let (xs, ys) = (grid.xs(), grid.ys());
    let xr = span(xs[0], xs[xs.len() - 1]);
    let yr = span(ys[0], ys[ys.len() - 1]);

    let mut chart = ChartBuilder::on(area)
        .caption(plot.title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(xr.clone(), yr.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(5)
        .y_labels(5)
        .x_desc(plot.labels.0)
        .y_desc(plot.labels.1)
        .draw()?;

    let colors = band_colors(plot);
    let (pw, ph) = chart.plotting_area().dim_in_pixel();
    let nx = (pw / CELL).max(1) as usize;
    let ny = (ph / CELL).max(1) as usize;
    let dx = (xr.end - xr.start) / nx as f64;
    let dy = (yr.end - yr.start) / ny as f64;
    let (x0, y0) = (xr.start, yr.start);

    // Rows go upwards from the bottom edge, so later cells win shared edges
    chart.draw_series(
        (0..ny)
            .flat_map(|j| (0..nx).map(move |i| (i, j)))
            .map(|(i, j)| {
                let x = x0 + dx * i as f64;
                let y = y0 + dy * j as f64;
                let v = grid.interpolate(x + dx / 2.0, y + dy / 2.0);
                Rectangle::new(
                    [(x, y), (x + dx, y + dy)],
                    colors[scale.band(v)].filled(),
                )
            }),
    )?;
    Ok(())
}

fn draw_colorbar(plot: &ContourPlot<'_>, area: &Area<'_>) -> Result<(), Error> {
    let scale = plot.scale;
    let yr = span(scale.min(), scale.max());
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(10 + CAPTION)
        .x_label_area_size(40)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, yr.clone())?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .draw()?;

    let mut edges = scale.boundaries();
    if edges.len() < 2 {
        edges = vec![yr.start, yr.end];
    }
    let colors = band_colors(plot);
    chart.draw_series(edges.windows(2).zip(&colors).map(|(w, c)| {
        Rectangle::new([(0.0, w[0]), (1.0, w[1])], c.filled())
    }))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ColorScale, Colormap, Domain2D, ImageSize, sample};
    use image::Rgba;

    const SIZE: (u32, u32) = (400, 300);

    fn render_with(
        f: impl Fn(f64, f64, f64) -> f64,
        scale: ColorScale,
        title: &str,
        labels: (&str, &str),
    ) -> RgbaImage {
        let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 5, 5).unwrap();
        let grid = sample(&f, &domain, 0.0).unwrap();
        draw(&ContourPlot {
            grid: &grid,
            scale: &scale,
            colormap: Colormap::Viridis,
            size: ImageSize::new(SIZE.0, SIZE.1),
            title,
            labels,
        })
        .unwrap()
    }

    fn render(f: impl Fn(f64, f64, f64) -> f64, scale: ColorScale) -> RgbaImage {
        render_with(f, scale, "f at z=0.00", ("x", "y"))
    }

    fn rgba(t: f64) -> Rgba<u8> {
        let [r, g, b] = Colormap::Viridis.color(t);
        Rgba([r, g, b, 255])
    }

    /// Returns positions of `color` within the chart panel (left of the
    /// colorbar)
    fn find(img: &RgbaImage, color: Rgba<u8>) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(x, _, p)| *x < SIZE.0 - COLORBAR && **p == color)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn title_and_labels_are_drawn() {
        let scale = ColorScale::new(0.0, 1.0, 5).unwrap();
        let f = |x: f64, y: f64, _z: f64| x * y;
        let a = render_with(f, scale, "f at z=0.00", ("x", "y"));
        let b = render_with(f, scale, "another title at t=9.99", ("x", "y"));
        let c = render_with(f, scale, "f at z=0.00", ("speed", "angle"));
        assert_eq!(a.dimensions(), SIZE);
        assert_ne!(a, b, "title should appear in the image");
        assert_ne!(a, c, "axis labels should appear in the image");
    }

    #[test]
    fn gradient_orientation() {
        let scale = ColorScale::new(0.0, 1.0, 3).unwrap();
        let (lo, hi) = (rgba(0.0), rgba(1.0));

        let img = render(|x, _y, _z| x, scale);
        let low = find(&img, lo);
        let high = find(&img, hi);
        assert!(!low.is_empty() && !high.is_empty());
        let low_right = low.iter().map(|p| p.0).max().unwrap();
        let high_left = high.iter().map(|p| p.0).min().unwrap();
        assert!(low_right < high_left);

        // y increases towards the top of the image
        let img = render(|_x, y, _z| y, scale);
        let low_top = find(&img, lo).iter().map(|p| p.1).min().unwrap();
        let high_bottom = find(&img, hi).iter().map(|p| p.1).max().unwrap();
        assert!(high_bottom < low_top);
    }

    #[test]
    fn degenerate_scale() {
        let scale = ColorScale::new(2.0, 2.0, 21).unwrap();
        let img = render(|_x, _y, _z| 2.0, scale);
        assert!(!find(&img, rgba(0.5)).is_empty());
        assert!(find(&img, rgba(0.0)).is_empty());
        assert!(find(&img, rgba(1.0)).is_empty());
    }

    #[test]
    fn out_of_range_values_clamp() {
        let scale = ColorScale::new(10.0, 20.0, 5).unwrap();
        let img = render(|x, _y, _z| 100.0 * x - 50.0, scale);
        assert!(!find(&img, rgba(0.0)).is_empty());
        assert!(!find(&img, rgba(1.0)).is_empty());
        assert!(find(&img, rgba(1.0 / 3.0)).len() < find(&img, rgba(0.0)).len());
    }
}
