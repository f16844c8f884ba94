use crate::Error;
use std::ops::RangeInclusive;

/// A rectangular sampling region in the `(x, y)` plane
///
/// The region is sampled at `xnum` evenly spaced points across
/// `[xmin, xmax]` and `ynum` evenly spaced points across `[ymin, ymax]`, both
/// inclusive of their endpoints.
///
/// Fields are public for convenient construction with struct-update syntax;
/// every consumer calls [`Domain2D::validate`] before sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain2D {
    /// Lower bound on the X axis
    pub xmin: f64,
    /// Upper bound on the X axis
    pub xmax: f64,
    /// Lower bound on the Y axis
    pub ymin: f64,
    /// Upper bound on the Y axis
    pub ymax: f64,

    /// Label for the X axis
    pub xlabel: String,
    /// Label for the Y axis
    pub ylabel: String,

    /// Number of samples along the X axis
    pub xnum: usize,
    /// Number of samples along the Y axis
    pub ynum: usize,
}

impl Default for Domain2D {
    /// By default, the domain is the unit square sampled at 21 × 21 points
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 1.0,
            ymin: 0.0,
            ymax: 1.0,
            xlabel: "x".to_owned(),
            ylabel: "y".to_owned(),
            xnum: 21,
            ynum: 21,
        }
    }
}

impl Domain2D {
    /// Builds a validated domain with default axis labels
    pub fn new(
        x: RangeInclusive<f64>,
        y: RangeInclusive<f64>,
        xnum: usize,
        ynum: usize,
    ) -> Result<Self, Error> {
        let out = Self {
            xmin: *x.start(),
            xmax: *x.end(),
            ymin: *y.start(),
            ymax: *y.end(),
            xnum,
            ynum,
            ..Self::default()
        };
        out.validate()?;
        Ok(out)
    }

    /// Replaces the axis labels
    pub fn with_labels(
        mut self,
        xlabel: impl Into<String>,
        ylabel: impl Into<String>,
    ) -> Self {
        self.xlabel = xlabel.into();
        self.ylabel = ylabel.into();
        self
    }

    /// Checks the domain's invariants
    ///
    /// Bounds must be finite and strictly increasing, and both resolutions
    /// must be at least 1.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, lo, hi) in
            [("x", self.xmin, self.xmax), ("y", self.ymin, self.ymax)]
        {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::InvalidDomain(format!(
                    "{name} bounds must be finite (got {lo}, {hi})"
                )));
            }
            if lo >= hi {
                return Err(Error::InvalidDomain(format!(
                    "{name} bounds are inverted or empty ({lo} >= {hi})"
                )));
            }
        }
        if self.xnum == 0 || self.ynum == 0 {
            return Err(Error::InvalidDomain(format!(
                "resolution must be positive (got {} × {})",
                self.xnum, self.ynum
            )));
        }
        Ok(())
    }

    /// Returns the X sample coordinates
    pub fn xs(&self) -> Vec<f64> {
        linspace(self.xmin, self.xmax, self.xnum)
    }

    /// Returns the Y sample coordinates
    pub fn ys(&self) -> Vec<f64> {
        linspace(self.ymin, self.ymax, self.ynum)
    }
}

/// Returns `n` evenly spaced values over `[start, end]`
///
/// Both endpoints are included exactly; a single sample sits at `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> =
                (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        let v = linspace(-1.0, 0.3, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], -1.0);
        assert_eq!(v[6], 0.3);
        assert!(v.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0, 3.0, 0).is_empty());
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn default_domain() {
        let d = Domain2D::default();
        d.validate().unwrap();
        assert_eq!(d.xs().len(), 21);
        assert_eq!(d.ys().len(), 21);
        assert_eq!(d.xlabel, "x");
        assert_eq!(d.ylabel, "y");
    }

    #[test]
    fn invalid_domains() {
        assert!(matches!(
            Domain2D::new(1.0..=0.0, 0.0..=1.0, 3, 3),
            Err(Error::InvalidDomain(..))
        ));
        assert!(matches!(
            Domain2D::new(0.0..=1.0, 0.5..=0.5, 3, 3),
            Err(Error::InvalidDomain(..))
        ));
        assert!(matches!(
            Domain2D::new(0.0..=1.0, 0.0..=1.0, 0, 3),
            Err(Error::InvalidDomain(..))
        ));
        assert!(matches!(
            Domain2D::new(0.0..=f64::NAN, 0.0..=1.0, 3, 3),
            Err(Error::InvalidDomain(..))
        ));
        let d = Domain2D {
            ynum: 0,
            ..Domain2D::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn labels() {
        let d = Domain2D::new(0.0..=2.0, -1.0..=1.0, 4, 3)
            .unwrap()
            .with_labels("temperature", "pressure");
        assert_eq!(d.xlabel, "temperature");
        assert_eq!(d.ylabel, "pressure");
        assert_eq!(d.xs(), vec![0.0, 2.0 / 3.0, 4.0 / 3.0, 2.0]);
        assert_eq!(d.ys(), vec![-1.0, 0.0, 1.0]);
    }
}
