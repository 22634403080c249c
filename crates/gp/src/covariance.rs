//! Gram matrix builders.

use crate::kernels::Kernel;
use ndarray::{s, Array1, Array2, ArrayBase, Data, Ix1, Ix2, Zip};

/// Computes the `(n1, n2)` covariance matrix `K[i, j] = k(x1_i, x2_j)`.
///
/// In `fast` mode only the `(i, i)` entries are computed, others are left to zero:
/// this is enough to get marginal variances when `x1 == x2`.
pub fn covariance(
    x1: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    x2: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    kernel: &Kernel,
    fast: bool,
) -> Array2<f64> {
    let (x1, x2) = (x1.view(), x2.view());
    let mut k = Array2::zeros((x1.nrows(), x2.nrows()));
    if fast {
        let n = x1.nrows().min(x2.nrows());
        Zip::from(k.diag_mut())
            .and(x1.slice(s![..n, ..]).rows())
            .and(x2.slice(s![..n, ..]).rows())
            .par_for_each(|v, a, b| *v = kernel.value(&a, &b));
    } else {
        Zip::indexed(&mut k).par_for_each(|(i, j), v| *v = kernel.value(&x1.row(i), &x2.row(j)));
    }
    k
}

/// Computes covariances between every training point and a single point `x`.
pub fn sample_covariance(
    xtrain: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    kernel: &Kernel,
) -> Array1<f64> {
    xtrain.rows().into_iter().map(|row| kernel.value(&row, x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_covariance_full_and_fast() {
        let x = array![[0.], [1.], [2.5]];
        let kernel = Kernel::squared_exponential(1.5, 0.8);
        let full = covariance(&x, &x, &kernel, false);
        let fast = covariance(&x, &x, &kernel, true);

        assert_abs_diff_eq!(full, full.t(), epsilon = 1e-15);
        assert_abs_diff_eq!(fast.diag(), full.diag(), epsilon = 1e-15);
        assert_abs_diff_eq!(fast[[0, 1]], 0.);
        assert_abs_diff_eq!(full[[0, 0]], 1.5);
    }

    #[test]
    fn test_covariance_rectangular() {
        let xt = array![[0., 0.], [1., 1.], [2., 0.]];
        let x = array![[0.5, 0.5], [3., 3.]];
        let kernel = Kernel::ard_matern(1., 1.);
        let k = covariance(&xt, &x, &kernel, false);
        assert_eq!(k.dim(), (3, 2));
        let s = sample_covariance(&xt, &x.row(1), &kernel);
        assert_abs_diff_eq!(s, k.column(1), epsilon = 1e-15);
    }
}
