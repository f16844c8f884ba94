//! Discrete point clouds, drawn as 3D scatter plots
use crate::{
    Error, PlotConfig,
    render::{RasterRenderer, Renderer, ScatterPlot},
};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// A single sample of `w = f(x, y, z)`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointSample {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Z position
    pub z: f64,
    /// Sampled value, used for coloring
    pub magnitude: f64,
}

impl PointSample {
    /// Builds a new sample
    pub fn new(x: f64, y: f64, z: f64, magnitude: f64) -> Self {
        Self { x, y, z, magnitude }
    }
}

/// A non-empty set of samples, with at most one designated "best" sample
#[derive(Clone, Debug)]
pub struct PointCloud {
    samples: Vec<PointSample>,
    best: Option<usize>,
}

impl PointCloud {
    /// Builds a point cloud, designating the largest-magnitude sample as best
    ///
    /// Ties go to the earliest sample.  Returns an error if `samples` is empty
    /// or contains a non-finite value.
    pub fn new(samples: Vec<PointSample>) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::EmptyPointCloud);
        }
        if let Some(i) = samples.iter().position(|p| {
            ![p.x, p.y, p.z, p.magnitude].iter().all(|v| v.is_finite())
        }) {
            return Err(Error::InvalidPointCloud(format!(
                "point sample {i} is not finite"
            )));
        }
        let mut best = 0;
        for (i, p) in samples.iter().enumerate() {
            if p.magnitude > samples[best].magnitude {
                best = i;
            }
        }
        Ok(Self {
            samples,
            best: Some(best),
        })
    }

    /// Removes the "best" designation
    pub fn without_best(mut self) -> Self {
        self.best = None;
        self
    }

    /// Returns all samples, in insertion order
    pub fn samples(&self) -> &[PointSample] {
        &self.samples
    }

    /// Returns the index of the designated best sample
    pub fn best_index(&self) -> Option<usize> {
        self.best
    }

    /// Returns the designated best sample
    pub fn best(&self) -> Option<&PointSample> {
        self.best.map(|i| &self.samples[i])
    }

    /// Returns the smallest and largest magnitudes
    pub fn magnitude_range(&self) -> (f64, f64) {
        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.magnitude), hi.max(p.magnitude))
            })
    }

    /// Returns the per-axis lower and upper position bounds
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        let mut lo = [f64::INFINITY; 3];
        let mut hi = [f64::NEG_INFINITY; 3];
        for p in &self.samples {
            for (i, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                lo[i] = lo[i].min(v);
                hi[i] = hi[i].max(v);
            }
        }
        (lo, hi)
    }
}

/// Draws a point cloud as a 3D scatter plot
///
/// Axis labels come from the configured domain (`x`, `y`) and `z_label`.  If
/// `destination` is given, the image is written there as
/// `"{func_name} point cloud.png"` (creating the directory if needed) and its
/// path is returned.
pub fn plot_point_cloud(
    cloud: &PointCloud,
    config: &PlotConfig,
    destination: Option<&Path>,
) -> Result<Option<PathBuf>, Error> {
    plot_point_cloud_with(&RasterRenderer, cloud, config, destination)
}

/// Draws a point cloud using a custom [`Renderer`]
pub fn plot_point_cloud_with<R: Renderer + ?Sized>(
    renderer: &R,
    cloud: &PointCloud,
    config: &PlotConfig,
    destination: Option<&Path>,
) -> Result<Option<PathBuf>, Error> {
    let title = format!("{} point cloud", config.func_name());
    let plot = ScatterPlot {
        cloud,
        colormap: config.colormap,
        size: config.image_size,
        title: &title,
        labels: (
            config.domain.xlabel.as_str(),
            config.domain.ylabel.as_str(),
            config.z_label.as_str(),
        ),
    };
    let img = renderer.scatter(&plot)?;
    debug!("drew {} point samples", cloud.samples().len());

    let Some(dir) = destination else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{title}.png"));
    image::save_buffer(
        &path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
    )?;
    info!("wrote point cloud to {path:?}");
    Ok(Some(path))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn best_is_max_magnitude() {
        let cloud = PointCloud::new(vec![
            PointSample::new(0.0, 0.0, 0.0, 1.0),
            PointSample::new(1.0, 0.0, 0.0, 5.0),
            PointSample::new(2.0, 0.0, 0.0, 5.0),
            PointSample::new(3.0, 0.0, 0.0, -2.0),
        ])
        .unwrap();
        assert_eq!(cloud.best_index(), Some(1));
        assert_eq!(cloud.best().unwrap().x, 1.0);
        assert_eq!(cloud.magnitude_range(), (-2.0, 5.0));
        assert_eq!(cloud.bounds(), ([0.0, 0.0, 0.0], [3.0, 0.0, 0.0]));

        let cloud = cloud.without_best();
        assert!(cloud.best().is_none());
    }

    #[test]
    fn rejects_bad_clouds() {
        assert!(matches!(PointCloud::new(vec![]), Err(Error::EmptyPointCloud)));
        assert!(matches!(
            PointCloud::new(vec![
                PointSample::new(0.0, 0.0, 0.0, 1.0),
                PointSample::new(0.0, f64::NAN, 0.0, 1.0),
            ]),
            Err(Error::InvalidPointCloud(msg)) if msg.contains("sample 1")
        ));
    }

    #[test]
    fn without_destination() {
        let cloud =
            PointCloud::new(vec![PointSample::new(0.0, 0.0, 0.0, 1.0)]).unwrap();
        let out = plot_point_cloud(&cloud, &PlotConfig::default(), None);
        assert!(out.unwrap().is_none());
    }
}
