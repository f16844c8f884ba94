//! Color scale resolution
use crate::{Error, SampleGrid, linspace};
use log::debug;

/// A `(min, max)` value range split into discrete color bands
///
/// `levels` is the number of level boundaries, so a scale with `levels`
/// boundaries has `levels - 1` bands.  A degenerate scale (`min == max`, or
/// fewer than two levels) has exactly one band.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
    levels: usize,
}

impl ColorScale {
    /// Builds a new color scale
    ///
    /// Returns an error if either bound is non-finite, if `min > max`, or if
    /// `levels` is zero.
    pub fn new(min: f64, max: f64, levels: usize) -> Result<Self, Error> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidScale(format!(
                "bounds must be finite (got {min}, {max})"
            )));
        }
        if min > max {
            return Err(Error::InvalidScale(format!(
                "min must not exceed max ({min} > {max})"
            )));
        }
        if levels == 0 {
            return Err(Error::InvalidScale(
                "at least one level is required".to_owned(),
            ));
        }
        Ok(Self { min, max, levels })
    }

    /// Lower bound of the scale
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the scale
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of level boundaries
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Checks whether the scale spans an empty range
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Returns the level boundaries, evenly spaced over `[min, max]`
    pub fn boundaries(&self) -> Vec<f64> {
        if self.is_degenerate() {
            vec![self.min]
        } else {
            linspace(self.min, self.max, self.levels)
        }
    }

    /// Returns the number of color bands
    pub fn bands(&self) -> usize {
        if self.is_degenerate() {
            1
        } else {
            self.levels.saturating_sub(1).max(1)
        }
    }

    /// Returns the band containing `v`
    ///
    /// Values outside the scale land in the outermost bands.
    pub fn band(&self, v: f64) -> usize {
        let n = self.bands();
        if n == 1 {
            return 0;
        }
        let t = ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        ((t * n as f64) as usize).min(n - 1)
    }

    /// Returns the colormap position (in `[0, 1]`) used to paint a band
    pub fn band_position(&self, band: usize) -> f64 {
        let n = self.bands();
        if n == 1 {
            0.5
        } else {
            band.min(n - 1) as f64 / (n - 1) as f64
        }
    }
}

/// Picks the color scale for a set of cross-sections
///
/// If `wbounds` is provided, it is used as-is (after validation).  Otherwise,
/// the scale spans the global extrema across every grid, so that all frames
/// built from `grids` share one color mapping.
///
/// Returns [`Error::EmptySequence`] if no bounds are given and `grids` is
/// empty.
pub fn resolve_scale(
    grids: &[SampleGrid],
    wbounds: Option<(f64, f64)>,
    levels: usize,
) -> Result<ColorScale, Error> {
    let scale = match wbounds {
        Some((min, max)) => ColorScale::new(min, max, levels)?,
        None => {
            if grids.is_empty() {
                return Err(Error::EmptySequence);
            }
            let (min, max) = grids
                .iter()
                .map(SampleGrid::extrema)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |a, b| {
                    (a.0.min(b.0), a.1.max(b.1))
                });
            ColorScale::new(min, max, levels)?
        }
    };
    debug!(
        "resolved color scale [{}, {}] with {} bands",
        scale.min,
        scale.max,
        scale.bands()
    );
    Ok(scale)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Domain2D, sample};

    fn grids(z_values: &[f64]) -> Vec<SampleGrid> {
        let f = |x: f64, y: f64, z: f64| z * (1.0 + x * y);
        let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 3, 3).unwrap();
        z_values
            .iter()
            .map(|z| sample(&f, &domain, *z).unwrap())
            .collect()
    }

    #[test]
    fn global_extrema() {
        let g = grids(&[1.0, -3.0, 2.0]);
        let s = resolve_scale(&g, None, 21).unwrap();
        assert_eq!(s.min(), -6.0);
        assert_eq!(s.max(), 4.0);
        assert_eq!(s.levels(), 21);
        assert_eq!(s.bands(), 20);
    }

    #[test]
    fn single_grid() {
        let g = grids(&[2.0]);
        let s = resolve_scale(&g, None, 5).unwrap();
        assert_eq!((s.min(), s.max()), (2.0, 4.0));
    }

    #[test]
    fn override_passes_through() {
        let g = grids(&[1.0, 2.0]);
        let s = resolve_scale(&g, Some((-10.0, 10.0)), 11).unwrap();
        assert_eq!((s.min(), s.max()), (-10.0, 10.0));

        // overrides work even without any grids
        let s = resolve_scale(&[], Some((0.0, 1.0)), 11).unwrap();
        assert_eq!((s.min(), s.max()), (0.0, 1.0));

        assert!(matches!(
            resolve_scale(&g, Some((1.0, 0.0)), 11),
            Err(Error::InvalidScale(..))
        ));
        assert!(matches!(
            resolve_scale(&g, Some((0.0, f64::INFINITY)), 11),
            Err(Error::InvalidScale(..))
        ));
    }

    #[test]
    fn empty_sequence() {
        assert!(matches!(
            resolve_scale(&[], None, 21),
            Err(Error::EmptySequence)
        ));
    }

    #[test]
    fn bands() {
        let s = ColorScale::new(0.0, 1.0, 5).unwrap();
        assert_eq!(s.boundaries(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(s.bands(), 4);
        assert_eq!(s.band(0.0), 0);
        assert_eq!(s.band(0.3), 1);
        assert_eq!(s.band(0.99), 3);
        assert_eq!(s.band(1.0), 3);
        assert_eq!(s.band(-7.0), 0);
        assert_eq!(s.band(7.0), 3);
        assert_eq!(s.band_position(0), 0.0);
        assert_eq!(s.band_position(3), 1.0);
    }

    #[test]
    fn degenerate() {
        let s = ColorScale::new(3.0, 3.0, 21).unwrap();
        assert!(s.is_degenerate());
        assert_eq!(s.bands(), 1);
        assert_eq!(s.boundaries(), vec![3.0]);
        for v in [-1.0, 3.0, 10.0] {
            assert_eq!(s.band(v), 0);
        }
        assert_eq!(s.band_position(0), 0.5);

        let s = ColorScale::new(0.0, 1.0, 1).unwrap();
        assert_eq!(s.bands(), 1);
        assert_eq!(s.band(0.7), 0);

        assert!(ColorScale::new(0.0, 1.0, 0).is_err());
    }
}
