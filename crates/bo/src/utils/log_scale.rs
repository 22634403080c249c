use crate::errors::{BoError, Result};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

/// Logarithmic reparameterization of a box domain.
///
/// A point `u` of the unit hypercube maps to `x = lower * 10^(u * log10(upper / lower))`
/// which requires strictly positive lower bounds.
#[derive(Clone, Debug)]
pub struct LogScale {
    lower: Array1<f64>,
    /// log10(upper / lower)
    ratio: Array1<f64>,
}

impl LogScale {
    /// Builds the transform from native `xlimits` given as a (nx, 2) matrix
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Self> {
        if let Some((i, lower)) = xlimits
            .column(0)
            .iter()
            .enumerate()
            .find(|(_, lower)| **lower <= 0.)
        {
            return Err(BoError::InvalidConfigError(format!(
                "log scale requires strictly positive lower bounds, got {lower} for dimension {i}"
            )));
        }
        let lower = xlimits.column(0).to_owned();
        let ratio = (&xlimits.column(1) / &lower).mapv(f64::log10);
        Ok(LogScale { lower, ratio })
    }

    /// Search domain in log coordinates: the unit hypercube
    pub fn unit_xlimits(&self) -> Array2<f64> {
        let mut xlimits = Array2::zeros((self.lower.len(), 2));
        xlimits.column_mut(1).fill(1.);
        xlimits
    }

    /// Maps a point from log coordinates to native units
    pub fn to_native(&self, u: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> Array1<f64> {
        (u * &self.ratio).mapv(|v| 10f64.powf(v)) * &self.lower
    }

    /// Maps a point from native units to log coordinates
    pub fn to_unit(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> Array1<f64> {
        (x / &self.lower).mapv(f64::log10) / &self.ratio
    }

    /// Maps rows of `u` from log coordinates to native units
    pub fn rows_to_native(&self, u: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
        let mut x = u.to_owned();
        x.axis_iter_mut(Axis(0)).for_each(|mut row| {
            let native = self.to_native(&row);
            row.assign(&native)
        });
        x
    }

    /// Maps rows of `x` from native units to log coordinates
    pub fn rows_to_unit(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
        let mut u = x.to_owned();
        u.axis_iter_mut(Axis(0)).for_each(|mut row| {
            let unit = self.to_unit(&row);
            row.assign(&unit)
        });
        u
    }
}
