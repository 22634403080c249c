use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

/// A structure to store (n, xdim) matrix data and its mean and standard deviation vectors.
#[derive(Clone, Debug)]
pub(crate) struct NormalizedData {
    /// normalized data
    pub data: Array2<f64>,
    /// mean vector computed from data
    pub mean: Array1<f64>,
    /// standard deviation vector computed from data
    pub std: Array1<f64>,
}

impl NormalizedData {
    /// Constructor
    pub fn new(x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> NormalizedData {
        let (data, mean, std) = normalize(x);
        NormalizedData { data, mean, std }
    }

    /// Data kept in original units: zero mean and unit standard deviation
    pub fn identity(x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> NormalizedData {
        NormalizedData {
            data: x.to_owned(),
            mean: Array1::zeros(x.ncols()),
            std: Array1::ones(x.ncols()),
        }
    }

    /// Dimension of data points
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Apply the normalization to other points
    pub fn transform(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
        (x - &self.mean) / &self.std
    }
}

/// Column-wise standardization. A null (or undefined when only one row is given)
/// standard deviation is replaced by 1.
pub fn normalize(x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> (Array2<f64>, Array1<f64>, Array1<f64>) {
    let x_mean = x
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()));
    let ddof = if x.nrows() > 1 { 1. } else { 0. };
    let mut x_std = x.std_axis(Axis(0), ddof);
    x_std.mapv_inplace(|v| if v == 0. || !v.is_finite() { 1. } else { v });
    let xnorm = (x - &x_mean) / &x_std;

    (xnorm, x_mean, x_std)
}
