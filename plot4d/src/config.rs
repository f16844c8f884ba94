//! Plot and animation settings
use crate::{Colormap, Domain2D, Error};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Size of a rendered image, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageSize {
    width: u32,
    height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Builds a square image size
impl From<u32> for ImageSize {
    fn from(v: u32) -> Self {
        Self::new(v, v)
    }
}

impl ImageSize {
    /// Builds a new image size
    ///
    /// Dimensions are clamped to at least 200 pixels, leaving room for the
    /// caption, axis labels, and colorbar.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(Self::MIN),
            height: height.max(Self::MIN),
        }
    }

    const MIN: u32 = 200;

    /// Returns the width of the image, in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Settings for drawing a single cross-section
///
/// A configuration is an immutable value; build one per call (or share one by
/// reference) rather than mutating a global default.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Region and resolution in `(x, y)`
    pub domain: Domain2D,

    /// Number of level boundaries in the color scale
    pub levels: usize,

    /// Color gradient
    pub colormap: Colormap,

    /// Output image size
    pub image_size: ImageSize,

    /// Function name shown in titles; `None` uses `"Crosssection"`
    pub func_name: Option<String>,

    /// Name of the third coordinate, shown in titles
    pub z_label: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            domain: Domain2D::default(),
            levels: 21,
            colormap: Colormap::default(),
            image_size: ImageSize::default(),
            func_name: None,
            z_label: "z".to_owned(),
        }
    }
}

impl PlotConfig {
    /// Returns the function name used in titles
    pub fn func_name(&self) -> &str {
        self.func_name.as_deref().unwrap_or("Crosssection")
    }
}

/// Settings for building a flipbook animation
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Settings shared by every frame
    pub plot: PlotConfig,

    /// Playback rate, in frames per second
    pub fps: f64,

    /// Keep the per-frame PNG files after encoding
    pub keep_frames: bool,

    /// Directory where frame images are written
    ///
    /// Created if missing; removed after encoding if it ends up empty.
    pub frame_dir: PathBuf,

    /// Path of the animation file
    ///
    /// If `None`, the animation is written next to `frame_dir`, named after
    /// the function (see [`default_animation_name`](crate::default_animation_name)).
    pub output: Option<PathBuf>,

    /// Fixed `(min, max)` color range; if `None`, the range is found by
    /// scanning every frame first
    pub wbounds: Option<(f64, f64)>,
}

impl AnimationConfig {
    /// Builds a configuration with default playback settings
    pub fn new(plot: PlotConfig, frame_dir: impl Into<PathBuf>) -> Self {
        Self {
            plot,
            fps: 1.0,
            keep_frames: true,
            frame_dir: frame_dir.into(),
            output: None,
            wbounds: None,
        }
    }

    /// Returns the path where the animation will be written
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => {
                let name =
                    crate::default_animation_name(self.plot.func_name.as_deref());
                self.frame_dir
                    .parent()
                    .unwrap_or(Path::new(""))
                    .join(name)
            }
        }
    }

    /// Returns the display time of a single frame
    ///
    /// The rate must be positive and finite, and slow enough rates that the
    /// frame time does not fit in a [`Duration`] are rejected as well.
    pub(crate) fn frame_delay(&self) -> Result<Duration, Error> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(Error::InvalidRate(self.fps));
        }
        Duration::try_from_secs_f64(1.0 / self.fps)
            .map_err(|_| Error::InvalidRate(self.fps))
    }
}
