use ndarray::{Array1, Array2, ArrayView1};

/// An interface for objective function to be maximized
///
/// The function takes one point `x` and returns its value.
/// Any error is fatal to the optimization run.
pub trait ObjFn: Fn(&ArrayView1<f64>) -> anyhow::Result<f64> {}
impl<T> ObjFn for T where T: Fn(&ArrayView1<f64>) -> anyhow::Result<f64> {}

/// Optimization result
#[derive(Clone, Debug)]
pub struct OptimResult {
    /// Best observed value (e.g. f(x_opt))
    pub y_opt: f64,
    /// Best observed point, in native units
    pub x_opt: Array1<f64>,
    /// Number of iterations performed after seeding
    pub n_iters: usize,
    /// Acquisition maximum found at the last iteration
    pub acq_max: f64,
    /// Evaluated points, when requested with `full_history`
    pub history: Option<History>,
}

/// All the evaluations of a run, seeded points first
#[derive(Clone, Debug)]
pub struct History {
    /// Successive x values in native units, as a (n, nx) matrix
    pub x_doe: Array2<f64>,
    /// Successive y values (e.g. f(x_doe))
    pub y_doe: Array1<f64>,
}
