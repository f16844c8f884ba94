//! `plot4d` draws functions of three variables, `w = f(x, y, z)`, as a stack
//! of 2D contour plots taken at fixed values of `z`, then strings those
//! cross-sections together into an animated flipbook.
//!
//! # Functions
//! Anything implementing [`Function`] can be sampled.  Plain closures of type
//! `Fn(f64, f64, f64) -> f64` work out of the box; fallible closures can be
//! wrapped in [`TryFn`], and (with the `rhai` feature) a script expression can
//! be compiled into a [`rhai::ScriptFunction`].
//!
//! # Sampling
//! A [`Domain2D`] describes the rectangle in `(x, y)` and the number of samples
//! along each axis.  [`sample`] evaluates the function at every grid point for
//! a single `z`, producing a [`SampleGrid`]:
//!
//! ```
//! use plot4d::{Domain2D, sample};
//!
//! let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 2, 2)?;
//! let f = |x: f64, y: f64, z: f64| x + y + z;
//! let grid = sample(&f, &domain, 0.0)?;
//! assert_eq!(grid.values()[(0, 1)], 1.0); // row is y, column is x
//! assert_eq!(grid.values()[(1, 1)], 2.0);
//! # Ok::<(), plot4d::Error>(())
//! ```
//!
//! # Color scales
//! Every frame of an animation shares one [`ColorScale`], found by scanning
//! all requested cross-sections before anything is drawn (see
//! [`resolve_scale`]).  This keeps colors comparable from frame to frame.
//!
//! # Output
//! [`plot_cross_section`] renders a single cross-section, and
//! [`build_animation`] renders a whole sequence and encodes it as a GIF.
//! [`plot_point_cloud`] draws a labeled 3D scatter of discrete samples.
//!
//! ```no_run
//! use plot4d::{AnimationConfig, PlotConfig, build_animation};
//!
//! let plot = PlotConfig {
//!     func_name: Some("ripple".to_owned()),
//!     ..PlotConfig::default()
//! };
//! let cfg = AnimationConfig::new(plot, "frames");
//! let f = |x: f64, y: f64, z: f64| (x * x + y * y - z).sin();
//! let out = build_animation(&f, &[0.0, 0.5, 1.0], &cfg)?;
//! println!("wrote {} frames to {:?}", out.frame_count, out.path);
//! # Ok::<(), plot4d::Error>(())
//! ```
//!
//! # Features
#![doc = document_features::document_features!()]
#![warn(missing_docs)]

mod animate;
mod colormap;
mod config;
mod domain;
mod error;
mod eval;
mod frame;
mod grid;
mod scale;
mod scatter;

pub mod render;

#[cfg(feature = "rhai")]
pub mod rhai;

pub use animate::{
    AnimationArtifact, build_animation, build_animation_with,
    default_animation_name,
};
pub use colormap::Colormap;
pub use config::{AnimationConfig, ImageSize, PlotConfig};
pub use domain::{Domain2D, linspace};
pub use error::Error;
pub use eval::{Function, TryFn};
pub use frame::{
    FrameArtifact, frame_title, plot_cross_section, plot_cross_section_with,
    render_frame, render_frame_with,
};
pub use grid::{Matrix, SampleGrid, sample};
pub use scale::{ColorScale, resolve_scale};
pub use scatter::{
    PointCloud, PointSample, plot_point_cloud, plot_point_cloud_with,
};
