use finitediff::FiniteDiff;
use ndarray::{Array1, Array2, ArrayView1};

/// Default max number of function evaluations of one local search
pub const INFILL_MAX_EVAL_DEFAULT: usize = 200;

/// Facade for the SLSQP bounded local optimizer.
///
/// Gradient of the function is approximated with central finite differences.
pub(crate) struct Optimizer<'a> {
    fun: &'a (dyn Fn(&[f64]) -> f64 + Sync),
    bounds: Array2<f64>,
    max_eval: usize,
    xinit: Option<Array1<f64>>,
    ftol_abs: Option<f64>,
    ftol_rel: Option<f64>,
}

impl<'a> Optimizer<'a> {
    pub fn new(fun: &'a (dyn Fn(&[f64]) -> f64 + Sync), bounds: &Array2<f64>) -> Self {
        Optimizer {
            fun,
            bounds: bounds.clone(),
            max_eval: INFILL_MAX_EVAL_DEFAULT,
            xinit: None,
            ftol_abs: None,
            ftol_rel: None,
        }
    }

    pub fn ftol_abs(&mut self, ftol_abs: f64) -> &mut Self {
        self.ftol_abs = Some(ftol_abs);
        self
    }

    pub fn ftol_rel(&mut self, ftol_rel: f64) -> &mut Self {
        self.ftol_rel = Some(ftol_rel);
        self
    }

    pub fn max_eval(&mut self, max_eval: usize) -> &mut Self {
        self.max_eval = max_eval;
        self
    }

    pub fn xinit(&mut self, xinit: &ArrayView1<f64>) -> &mut Self {
        self.xinit = Some(xinit.to_owned());
        self
    }

    /// Minimizes the function within bounds starting from `xinit` (lower bounds by default).
    ///
    /// Returns the minimum and its location clamped within bounds. The minimum
    /// is infinite when the optimizer could not produce a finite value.
    pub fn minimize(&self) -> (f64, Array1<f64>) {
        let xinit = self
            .xinit
            .clone()
            .unwrap_or_else(|| self.bounds.column(0).to_owned())
            .to_vec();
        let bounds: Vec<_> = self
            .bounds
            .outer_iter()
            .map(|row| (row[0], row[1]))
            .collect();

        let obj = |x: &[f64], gradient: Option<&mut [f64]>, _params: &mut ()| -> f64 {
            if x.iter().any(|x| x.is_nan()) {
                return f64::INFINITY;
            }
            if let Some(grad) = gradient {
                let f = |x: &Vec<f64>| -> f64 { (self.fun)(x) };
                grad[..].copy_from_slice(&x.to_vec().central_diff(&f));
            }
            (self.fun)(x)
        };
        let cstrs: Vec<fn(&[f64], Option<&mut [f64]>, &mut ()) -> f64> = vec![];

        let res = slsqp::minimize(
            obj,
            &xinit,
            &bounds,
            &cstrs,
            (),
            self.max_eval,
            Some(slsqp::StopTols {
                ftol_rel: self.ftol_rel.unwrap_or(0.0),
                ftol_abs: self.ftol_abs.unwrap_or(0.0),
                ..slsqp::StopTols::default()
            }),
        );
        let (y_opt, x_opt) = match res {
            Ok((_, x_opt, y_opt)) => (y_opt, x_opt),
            Err((_, x_opt, y_opt)) => {
                log::debug!("SLSQP stopped before convergence (f={y_opt})");
                (y_opt, x_opt)
            }
        };
        let x_opt = x_opt
            .iter()
            .zip(bounds.iter())
            .map(|(x, (lo, up))| x.clamp(*lo, *up))
            .collect::<Array1<f64>>();
        let y_opt = if y_opt.is_finite() {
            y_opt
        } else {
            f64::INFINITY
        };
        (y_opt, x_opt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_minimize_within_bounds() {
        let f = |x: &[f64]| (x[0] - 3.).powi(2) + (x[1] + 1.).powi(2);
        let bounds = array![[0., 2.], [-5., 5.]];
        let (fmin, xmin) = Optimizer::new(&f, &bounds)
            .xinit(&array![0.5, 0.5].view())
            .max_eval(200)
            .ftol_rel(1e-8)
            .minimize();
        assert_abs_diff_eq!(xmin, array![2., -1.], epsilon = 1e-4);
        assert_abs_diff_eq!(fmin, 1., epsilon = 1e-6);
    }
}
