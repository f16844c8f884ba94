//! Functions of three variables

/// A scalar function of three variables, `w = f(x, y, z)`
///
/// Evaluation may fail; the error string is reported back to the caller as
/// [`Error::Evaluation`](crate::Error::Evaluation), tagged with the sample
/// position.
pub trait Function {
    /// Evaluates the function at a single point
    fn eval(&self, x: f64, y: f64, z: f64) -> Result<f64, String>;
}

impl<F: Fn(f64, f64, f64) -> f64> Function for F {
    fn eval(&self, x: f64, y: f64, z: f64) -> Result<f64, String> {
        Ok(self(x, y, z))
    }
}

/// Adapter that turns a fallible closure into a [`Function`]
///
/// ```
/// use plot4d::{Function, TryFn};
///
/// let f = TryFn(|x: f64, _y: f64, _z: f64| -> Result<f64, String> {
///     if x < 0.0 { Err("negative x".to_owned()) } else { Ok(x.sqrt()) }
/// });
/// assert_eq!(f.eval(4.0, 0.0, 0.0), Ok(2.0));
/// assert!(f.eval(-1.0, 0.0, 0.0).is_err());
/// ```
pub struct TryFn<F>(pub F);

impl<F, E> Function for TryFn<F>
where
    F: Fn(f64, f64, f64) -> Result<f64, E>,
    E: std::fmt::Display,
{
    fn eval(&self, x: f64, y: f64, z: f64) -> Result<f64, String> {
        (self.0)(x, y, z).map_err(|e| e.to_string())
    }
}
