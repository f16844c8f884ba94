//! Single cross-section frames
use crate::{
    ColorScale, Error, Function, PlotConfig, SampleGrid,
    render::{ContourPlot, RasterRenderer, Renderer},
    resolve_scale, sample,
};
use log::debug;
use std::path::{Path, PathBuf};

/// A rendered cross-section image on disk
#[derive(Clone, Debug, PartialEq)]
pub struct FrameArtifact {
    /// Location of the PNG file
    pub path: PathBuf,
    /// Value of the third coordinate for this cross-section
    pub z: f64,
    /// Plot title, which is also the file stem
    pub title: String,
}

/// Builds the title of a cross-section plot
///
/// ```
/// assert_eq!(plot4d::frame_title("drag", "mach", 0.8), "drag at mach=0.80");
/// assert_eq!(plot4d::frame_title("f", "z", -1.25), "f at z=-1.25");
/// ```
pub fn frame_title(func_name: &str, z_label: &str, z: f64) -> String {
    format!("{func_name} at {z_label}={z:.2}")
}

/// Renders one cross-section with the built-in [`RasterRenderer`]
///
/// See [`render_frame_with`] for details.
pub fn render_frame(
    grid: &SampleGrid,
    scale: &ColorScale,
    config: &PlotConfig,
    destination: Option<&Path>,
) -> Result<Option<FrameArtifact>, Error> {
    render_frame_with(&RasterRenderer, grid, scale, config, destination)
}

/// Renders one cross-section
///
/// If `destination` is given, the directory is created (recursively) if
/// missing, and the image is written as `{destination}/{title}.png`, where the
/// title comes from [`frame_title`].  Otherwise, the image is drawn but not
/// stored, and `None` is returned.
pub fn render_frame_with<R: Renderer + ?Sized>(
    renderer: &R,
    grid: &SampleGrid,
    scale: &ColorScale,
    config: &PlotConfig,
    destination: Option<&Path>,
) -> Result<Option<FrameArtifact>, Error> {
    match destination {
        Some(dir) => write_frame(renderer, grid, scale, config, dir).map(Some),
        None => {
            draw(renderer, grid, scale, config, &title_for(config, grid))?;
            Ok(None)
        }
    }
}

fn title_for(config: &PlotConfig, grid: &SampleGrid) -> String {
    frame_title(config.func_name(), &config.z_label, grid.z())
}

fn draw<R: Renderer + ?Sized>(
    renderer: &R,
    grid: &SampleGrid,
    scale: &ColorScale,
    config: &PlotConfig,
    title: &str,
) -> Result<image::RgbaImage, Error> {
    renderer.contour(&ContourPlot {
        grid,
        scale,
        colormap: config.colormap,
        size: config.image_size,
        title,
        labels: (
            config.domain.xlabel.as_str(),
            config.domain.ylabel.as_str(),
        ),
    })
}

/// Renders a frame and writes it into `dir`
pub(crate) fn write_frame<R: Renderer + ?Sized>(
    renderer: &R,
    grid: &SampleGrid,
    scale: &ColorScale,
    config: &PlotConfig,
    dir: &Path,
) -> Result<FrameArtifact, Error> {
    let title = title_for(config, grid);
    let img = draw(renderer, grid, scale, config, &title)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{title}.png"));
    image::save_buffer(
        &path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
    )?;
    debug!("wrote frame {path:?}");

    Ok(FrameArtifact {
        path,
        z: grid.z(),
        title,
    })
}

/// Samples and renders a single cross-section at `z`
///
/// The color scale is `wbounds` if given, or the extrema of this one
/// cross-section otherwise.
pub fn plot_cross_section<F: Function + ?Sized>(
    f: &F,
    z: f64,
    config: &PlotConfig,
    wbounds: Option<(f64, f64)>,
    destination: Option<&Path>,
) -> Result<Option<FrameArtifact>, Error> {
    plot_cross_section_with(&RasterRenderer, f, z, config, wbounds, destination)
}

/// Samples and renders a single cross-section using a custom [`Renderer`]
pub fn plot_cross_section_with<R: Renderer + ?Sized, F: Function + ?Sized>(
    renderer: &R,
    f: &F,
    z: f64,
    config: &PlotConfig,
    wbounds: Option<(f64, f64)>,
    destination: Option<&Path>,
) -> Result<Option<FrameArtifact>, Error> {
    let grid = sample(f, &config.domain, z)?;
    let scale =
        resolve_scale(std::slice::from_ref(&grid), wbounds, config.levels)?;
    render_frame_with(renderer, &grid, &scale, config, destination)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Domain2D;
    use image::RgbaImage;
    use std::cell::RefCell;

    /// Renderer that records what it was asked to draw
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, f64, f64, usize)>>,
    }

    impl Renderer for Recorder {
        fn contour(&self, plot: &ContourPlot<'_>) -> Result<RgbaImage, Error> {
            self.calls.borrow_mut().push((
                plot.title.to_owned(),
                plot.scale.min(),
                plot.scale.max(),
                plot.grid.values().width(),
            ));
            Ok(RgbaImage::new(4, 4))
        }

        fn scatter(
            &self,
            _plot: &crate::render::ScatterPlot<'_>,
        ) -> Result<RgbaImage, Error> {
            unreachable!()
        }
    }

    #[test]
    fn titles() {
        assert_eq!(
            frame_title("Crosssection", "z", 0.0),
            "Crosssection at z=0.00"
        );
        assert_eq!(frame_title("w", "t", 12.3456), "w at t=12.35");
        assert_eq!(frame_title("w", "t", -0.5), "w at t=-0.50");
    }

    #[test]
    fn single_plot_uses_own_extrema() {
        let r = Recorder::default();
        let config = PlotConfig {
            domain: Domain2D::new(0.0..=1.0, 0.0..=2.0, 4, 3).unwrap(),
            ..PlotConfig::default()
        };
        let f = |x: f64, y: f64, z: f64| x + y + z;
        let out =
            plot_cross_section_with(&r, &f, 0.5, &config, None, None).unwrap();
        assert!(out.is_none());
        assert_eq!(
            r.calls.into_inner(),
            vec![("Crosssection at z=0.50".to_owned(), 0.5, 3.5, 4)]
        );
    }

    #[test]
    fn single_plot_override() {
        let r = Recorder::default();
        let config = PlotConfig {
            func_name: Some("sum".to_owned()),
            z_label: "t".to_owned(),
            ..PlotConfig::default()
        };
        let f = |x: f64, y: f64, z: f64| x + y + z;
        plot_cross_section_with(&r, &f, 1.0, &config, Some((-1.0, 1.0)), None)
            .unwrap();
        assert_eq!(
            r.calls.into_inner(),
            vec![("sum at t=1.00".to_owned(), -1.0, 1.0, 21)]
        );
    }
}
