use bayesbox_bo::{BayesOptBuilder, LogObserver};
use ndarray::{array, ArrayView1};

fn xsinx(x: &ArrayView1<f64>) -> anyhow::Result<f64> {
    Ok(-(x[0] - 3.5) * ((x[0] - 3.5) / std::f64::consts::PI).sin())
}

fn main() {
    env_logger::init();
    let mut bo = BayesOptBuilder::optimize(xsinx)
        .configure(|config| config.max_iters(20))
        .max_within(&array![[0., 25.]])
        .expect("optimizer configured");
    bo.observe(Box::new(LogObserver));
    let res = bo.maximize().expect("Maximization of xsinx");
    println!("Maximum xsinx(x) = {} at x = {}", res.y_opt, res.x_opt);
}
