//! Observers of the bayesian optimization loop.
use log::info;
use ndarray::ArrayView1;

/// Callbacks invoked by the optimization loop at its state transitions.
///
/// Points are given in native units. Every method defaults to a no-op.
pub trait BoObserver {
    /// Called once the initial points are evaluated
    fn on_init(&mut self, _n_points: usize, _ymax: f64) {}

    /// Called at the end of each iteration with the acquisition maximum,
    /// the next candidate and the current best observed value
    fn on_iteration_complete(
        &mut self,
        _iteration: usize,
        _acquisition_max: f64,
        _candidate: &ArrayView1<f64>,
        _current_best: f64,
    ) {
    }

    /// Called when the GP hyperparameters search failed and the GP
    /// was fitted with the current kernel instead
    fn on_hyperparameter_fallback(&mut self, _iteration: usize, _reason: &str) {}
}

/// Observer reporting progress through the `log` facade at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl BoObserver for LogObserver {
    fn on_init(&mut self, n_points: usize, ymax: f64) {
        info!("Initialized with {n_points} points, current maximum {ymax}");
    }

    fn on_iteration_complete(
        &mut self,
        iteration: usize,
        acquisition_max: f64,
        candidate: &ArrayView1<f64>,
        current_best: f64,
    ) {
        info!(
            "Iteration: {iteration:3} | Acquisition maximum: {acquisition_max:.4} | Next point: {candidate} | Current maximum: {current_best}"
        );
    }

    fn on_hyperparameter_fallback(&mut self, iteration: usize, reason: &str) {
        info!("Iteration: {iteration:3} | Hyperparameters not optimized: {reason}");
    }
}
