//! Drawing of contour and scatter plots
//!
//! Drawing goes through the [`Renderer`] trait, so that the sampling and
//! sequencing logic never depends on how pixels are produced.
//! [`RasterRenderer`] is the built-in implementation, which draws charts with
//! [`plotters`] into an in-memory bitmap.
use crate::{ColorScale, Colormap, Error, ImageSize, PointCloud, SampleGrid};
use image::RgbaImage;

mod contour;
mod scatter;

/// Inputs for a filled contour plot of one cross-section
pub struct ContourPlot<'a> {
    /// Sampled values
    pub grid: &'a SampleGrid,
    /// Shared color scale
    pub scale: &'a ColorScale,
    /// Color gradient
    pub colormap: Colormap,
    /// Output size
    pub size: ImageSize,
    /// Plot title
    pub title: &'a str,
    /// Axis labels, as `(x, y)`
    pub labels: (&'a str, &'a str),
}

/// Inputs for a 3D scatter plot of a point cloud
pub struct ScatterPlot<'a> {
    /// Samples to draw
    pub cloud: &'a PointCloud,
    /// Color gradient, spanning the cloud's magnitude range
    pub colormap: Colormap,
    /// Output size
    pub size: ImageSize,
    /// Plot title
    pub title: &'a str,
    /// Axis labels, as `(x, y, z)`
    pub labels: (&'a str, &'a str, &'a str),
}

/// A backend that turns plot inputs into images
pub trait Renderer {
    /// Draws a filled contour plot
    fn contour(&self, plot: &ContourPlot<'_>) -> Result<RgbaImage, Error>;

    /// Draws a 3D scatter plot
    fn scatter(&self, plot: &ScatterPlot<'_>) -> Result<RgbaImage, Error>;
}

/// Renderer that draws charts into an in-memory bitmap
///
/// Contour plots are filled cell by cell from the interpolated value grid,
/// with each cell painted in the color of its band.  Both plot kinds carry the
/// title as a caption, labeled axes, and a colorbar at the right edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct RasterRenderer;

impl Renderer for RasterRenderer {
    fn contour(&self, plot: &ContourPlot<'_>) -> Result<RgbaImage, Error> {
        contour::draw(plot)
    }

    fn scatter(&self, plot: &ScatterPlot<'_>) -> Result<RgbaImage, Error> {
        scatter::draw(plot)
    }
}

////////////////////////////////////////////////////////////////////////////////

const FONT: &str = "sans-serif";

/// Width of the colorbar panel, including its tick labels
const COLORBAR: u32 = 90;

/// Space above the plot area that is taken by the caption
const CAPTION: u32 = 40;

/// Returns a non-empty axis range, widening degenerate spans
fn span(lo: f64, hi: f64) -> std::ops::Range<f64> {
    if hi > lo { lo..hi } else { lo - 0.5..hi + 0.5 }
}

/// Allocates an RGB buffer for `plotters` to draw into
fn rgb_buffer(size: ImageSize) -> Vec<u8> {
    vec![0; size.width() as usize * size.height() as usize * 3]
}

/// Converts a filled RGB buffer into an RGBA image
fn into_rgba(size: ImageSize, buf: Vec<u8>) -> Result<RgbaImage, Error> {
    let rgb = image::RgbImage::from_raw(size.width(), size.height(), buf)
        .ok_or_else(|| Error::RenderError("bitmap size mismatch".to_owned()))?;
    Ok(image::DynamicImage::ImageRgb8(rgb).to_rgba8())
}
