use finitediff::FiniteDiff;
use log::debug;

pub(crate) struct SlsqpParams {
    pub ftol_rel: f64,
    pub ftol_abs: f64,
    pub max_eval: usize,
}

impl Default for SlsqpParams {
    fn default() -> Self {
        SlsqpParams {
            ftol_rel: 1e-6,
            ftol_abs: 1e-8,
            max_eval: 200,
        }
    }
}

/// Builds starting points and bounds for the hyperparameters optimization,
/// both expressed in log10 space. Starting points are the current hyperparameters
/// clamped within bounds then the default ones when they differ.
pub(crate) fn prepare_multistart(
    current: &[f64],
    default: &[f64],
    bounds: &[(f64, f64)],
) -> (Vec<Vec<f64>>, Vec<(f64, f64)>) {
    // Use log10 hyperparameters as optimization parameter
    let bounds: Vec<(f64, f64)> = bounds
        .iter()
        .map(|(lo, up)| (lo.log10(), up.log10()))
        .collect();

    let to_log = |params: &[f64]| -> Vec<f64> {
        params
            .iter()
            .zip(bounds.iter())
            .map(|(p, (lo, up))| p.log10().clamp(*lo, *up))
            .collect()
    };
    let mut starts = vec![to_log(current)];
    let default = to_log(default);
    if starts[0] != default {
        starts.push(default);
    }
    (starts, bounds)
}

/// Minimizes `objfn` with SLSQP starting from `param0` within `bounds`.
/// Gradient is approximated with central finite differences.
///
/// Returns the minimum value (infinite when the optimizer produced no usable value)
/// and its location.
pub(crate) fn optimize_params<ObjF>(
    objfn: ObjF,
    param0: &[f64],
    bounds: &[(f64, f64)],
    slsqp_params: SlsqpParams,
) -> (f64, Vec<f64>)
where
    ObjF: Fn(&[f64]) -> f64,
{
    // Infeasible starting point: give up before running the optimizer
    if !objfn(param0).is_finite() {
        return (f64::INFINITY, param0.to_vec());
    }

    let obj = |x: &[f64], gradient: Option<&mut [f64]>, _params: &mut ()| -> f64 {
        if x.iter().any(|v| v.is_nan()) {
            return f64::INFINITY;
        }
        if let Some(grad) = gradient {
            let f = |x: &Vec<f64>| -> f64 { objfn(x) };
            grad[..].copy_from_slice(&x.to_vec().central_diff(&f));
        }
        objfn(x)
    };
    let cons: Vec<fn(&[f64], Option<&mut [f64]>, &mut ()) -> f64> = vec![];

    let res = slsqp::minimize(
        obj,
        param0,
        bounds,
        &cons,
        (),
        slsqp_params.max_eval,
        Some(slsqp::StopTols {
            ftol_rel: slsqp_params.ftol_rel,
            ftol_abs: slsqp_params.ftol_abs,
            ..slsqp::StopTols::default()
        }),
    );
    match res {
        Ok((_, x_opt, y_opt)) => (finite_or_inf(y_opt), x_opt),
        Err((_, x_opt, y_opt)) => {
            debug!("SLSQP stopped before convergence (f={y_opt})");
            (finite_or_inf(y_opt), x_opt)
        }
    }
}

fn finite_or_inf(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        f64::INFINITY
    }
}
