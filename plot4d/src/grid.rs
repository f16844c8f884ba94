//! Dense sampling of a function over a 2D cross-section
use crate::{Domain2D, Error, Function};
use log::debug;

/// Generic dense matrix
///
/// The matrix is laid out in row-major order and is indexed by a
/// `(row, column)` tuple.
///
/// ```text
///        0 ------------> width (columns)
///        |             |
///        |             |
///        |             |
///        V--------------
///   height (rows)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<P> {
    data: Vec<P>,
    width: usize,
    height: usize,
}

impl<P> Matrix<P> {
    /// Builds a matrix from row-major data
    ///
    /// # Panics
    /// If `data.len()` is not `width * height`
    pub fn from_data(data: Vec<P>, width: usize, height: usize) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "data length must match matrix dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the matrix width (number of columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the shape as `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Iterates over values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &P> + '_ {
        self.data.iter()
    }

    /// Iterates over rows
    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        self.data.chunks(self.width.max(1))
    }

    /// Checks a `(row, column)` position
    ///
    /// Returns the input position in the 1D array if valid; panics otherwise
    fn decode_position(&self, pos: (usize, usize)) -> usize {
        let (row, col) = pos;
        assert!(
            row < self.height,
            "row ({row}) must be less than matrix height ({})",
            self.height
        );
        assert!(
            col < self.width,
            "column ({col}) must be less than matrix width ({})",
            self.width
        );
        row * self.width + col
    }
}

impl<P> std::ops::Index<(usize, usize)> for Matrix<P> {
    type Output = P;
    fn index(&self, pos: (usize, usize)) -> &Self::Output {
        let index = self.decode_position(pos);
        &self.data[index]
    }
}

////////////////////////////////////////////////////////////////////////////////

/// A function sampled over a [`Domain2D`] at a fixed `z`
///
/// `values()[(j, i)]` holds `f(xs()[i], ys()[j], z())`.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    z: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Matrix<f64>,
}

impl SampleGrid {
    /// Returns the fixed third coordinate
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Returns the X sample coordinates, in increasing order
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the Y sample coordinates, in increasing order
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Returns the value matrix, with shape `(ys().len(), xs().len())`
    pub fn values(&self) -> &Matrix<f64> {
        &self.values
    }

    /// Returns the smallest and largest sampled values
    pub fn extrema(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
    }

    /// Bilinearly interpolates the grid at a domain position
    ///
    /// Positions outside the sampled rectangle are clamped to its edge.
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let (i, tx) = locate(&self.xs, x);
        let (j, ty) = locate(&self.ys, y);
        let i1 = (i + 1).min(self.xs.len() - 1);
        let j1 = (j + 1).min(self.ys.len() - 1);

        let v00 = self.values[(j, i)];
        let v01 = self.values[(j, i1)];
        let v10 = self.values[(j1, i)];
        let v11 = self.values[(j1, i1)];

        let top = v00 + (v01 - v00) * tx;
        let bottom = v10 + (v11 - v10) * tx;
        top + (bottom - top) * ty
    }
}

/// Finds the cell containing `v`, returning its lower index and the fractional
/// offset within it
fn locate(coords: &[f64], v: f64) -> (usize, f64) {
    let n = coords.len();
    if n < 2 || v <= coords[0] {
        return (0, 0.0);
    }
    if v >= coords[n - 1] {
        return (n - 1, 0.0);
    }
    let i = coords.partition_point(|c| *c <= v).saturating_sub(1);
    let (lo, hi) = (coords[i], coords[i + 1]);
    (i, (v - lo) / (hi - lo))
}

/// Samples `f` on every point of `domain` at the given `z`
///
/// Evaluation proceeds row by row (`y` in the outer loop, `x` in the inner
/// loop) and stops at the first failure; no partial grid is returned.  A
/// non-finite result is treated as a failure.
pub fn sample<F: Function + ?Sized>(
    f: &F,
    domain: &Domain2D,
    z: f64,
) -> Result<SampleGrid, Error> {
    domain.validate()?;
    let xs = domain.xs();
    let ys = domain.ys();

    let mut data = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            let w = f.eval(x, y, z).map_err(|reason| Error::Evaluation {
                x,
                y,
                z,
                reason,
            })?;
            if !w.is_finite() {
                return Err(Error::Evaluation {
                    x,
                    y,
                    z,
                    reason: format!("non-finite value {w}"),
                });
            }
            data.push(w);
        }
    }
    debug!("sampled {} × {} grid at z = {z}", xs.len(), ys.len());

    let values = Matrix::from_data(data, xs.len(), ys.len());
    Ok(SampleGrid { z, xs, ys, values })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TryFn;
    use std::cell::Cell;

    #[test]
    fn matrix_layout() {
        let m = Matrix::from_data(vec![1, 2, 3, 4, 5, 6], 3, 2);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.width(), 3);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    #[should_panic]
    fn matrix_out_of_bounds() {
        let m = Matrix::from_data(vec![0.0; 6], 3, 2);
        let _ = m[(0, 3)];
    }

    #[test]
    fn sum_grid() {
        let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 2, 2).unwrap();
        let f = |x: f64, y: f64, z: f64| x + y + z;
        let grid = sample(&f, &domain, 0.0).unwrap();
        assert_eq!(grid.xs(), &[0.0, 1.0]);
        assert_eq!(grid.ys(), &[0.0, 1.0]);
        let rows: Vec<&[f64]> = grid.values().rows().collect();
        assert_eq!(rows, vec![&[0.0, 1.0][..], &[1.0, 2.0][..]]);
        assert_eq!(grid.extrema(), (0.0, 2.0));
    }

    #[test]
    fn shape_and_endpoints() {
        for (n, m) in [(1, 1), (3, 5), (7, 2), (21, 21)] {
            let domain = Domain2D::new(-2.0..=3.0, 10.0..=11.5, n, m).unwrap();
            let grid = sample(&|x: f64, _y: f64, _z: f64| x, &domain, 0.0)
                .unwrap();
            assert_eq!(grid.values().shape(), (m, n));
            assert_eq!(grid.xs().len(), n);
            assert_eq!(grid.ys().len(), m);
            assert_eq!(grid.xs()[0], -2.0);
            assert_eq!(grid.ys()[0], 10.0);
            if n > 1 {
                assert_eq!(*grid.xs().last().unwrap(), 3.0);
            }
            if m > 1 {
                assert_eq!(*grid.ys().last().unwrap(), 11.5);
            }
        }
    }

    #[test]
    fn row_major_order() {
        let domain = Domain2D::new(0.0..=2.0, 0.0..=1.0, 3, 2).unwrap();
        let calls = Cell::new(0);
        let order = std::cell::RefCell::new(vec![]);
        let f = |x: f64, y: f64, _z: f64| {
            calls.set(calls.get() + 1);
            order.borrow_mut().push((x, y));
            0.0
        };
        sample(&f, &domain, 1.0).unwrap();
        assert_eq!(calls.get(), 6);
        assert_eq!(
            order.into_inner(),
            vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (2.0, 1.0)
            ]
        );
    }

    #[test]
    fn fail_fast() {
        let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 5, 5).unwrap();
        let calls = Cell::new(0);
        let f = TryFn(|x: f64, y: f64, _z: f64| {
            calls.set(calls.get() + 1);
            if x > 0.5 && y > 0.5 {
                Err("out of range")
            } else {
                Ok(x * y)
            }
        });
        match sample(&f, &domain, 0.25) {
            Err(Error::Evaluation { x, y, z, reason }) => {
                assert_eq!((x, y, z), (0.75, 0.75, 0.25));
                assert_eq!(reason, "out of range");
            }
            other => panic!("expected evaluation error, got {other:?}"),
        }
        // rows 0..3 (15 calls) plus x = 0, 0.25, 0.5, 0.75 on row 3
        assert_eq!(calls.get(), 19);
    }

    #[test]
    fn non_finite_is_an_error() {
        let domain = Domain2D::default();
        let f = |x: f64, _y: f64, _z: f64| 1.0 / x;
        assert!(matches!(
            sample(&f, &domain, 0.0),
            Err(Error::Evaluation { .. })
        ));
    }

    #[test]
    fn invalid_domain_skips_sampling() {
        let domain = Domain2D {
            xnum: 0,
            ..Domain2D::default()
        };
        let calls = Cell::new(0);
        let f = |_x: f64, _y: f64, _z: f64| {
            calls.set(calls.get() + 1);
            0.0
        };
        assert!(matches!(
            sample(&f, &domain, 0.0),
            Err(Error::InvalidDomain(..))
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn interpolation() {
        let domain = Domain2D::new(0.0..=1.0, 0.0..=1.0, 2, 2).unwrap();
        let f = |x: f64, y: f64, _z: f64| x + 2.0 * y;
        let grid = sample(&f, &domain, 0.0).unwrap();
        assert_eq!(grid.interpolate(0.0, 0.0), 0.0);
        assert_eq!(grid.interpolate(1.0, 1.0), 3.0);
        assert_eq!(grid.interpolate(0.5, 0.5), 1.5);
        assert_eq!(grid.interpolate(0.25, 0.0), 0.25);
        // clamped
        assert_eq!(grid.interpolate(-5.0, 5.0), 2.0);
    }
}
