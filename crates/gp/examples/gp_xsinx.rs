use bayesbox_gp::{GaussianProcessModel, Kernel};
use ndarray::{arr2, concatenate, Array, Array1, Array2, Axis};

fn xsinx(x: &Array2<f64>) -> Array1<f64> {
    ((x - 3.5) * ((x - 3.5) / std::f64::consts::PI).mapv(|v| v.sin())).remove_axis(Axis(1))
}

fn main() {
    let xt = arr2(&[[0.0], [5.0], [10.0], [15.0], [18.0], [20.0], [25.0]]);
    let yt = xsinx(&xt);

    println!("Train GP surrogate of 'xsinx' at {}", xt.column(0));
    // inputs span [0, 25]: standardize data so that default length scale bounds fit
    let mut gp = GaussianProcessModel::new(1e-6)
        .expect("valid noise")
        .normalize(true);
    let outcome = gp
        .best_fit(&xt, &yt, &Kernel::squared_exponential(2., 1.))
        .expect("GP fitting");
    println!("Fit outcome: {outcome:?}, {gp}");

    let xtest = Array::linspace(0., 25., 26).insert_axis(Axis(1));
    let ytest = xsinx(&xtest);
    // predict values and variances
    let (ypred, yvar) = gp.fast_predict(&xtest).expect("GP prediction");
    let ysigma = yvar.mapv(|v| v.sqrt());

    println!("Compute prediction errors (x, err(x), sigma(x))");
    println!(
        "{}",
        concatenate![
            Axis(1),
            xtest,
            (ypred - ytest).insert_axis(Axis(1)),
            ysigma.insert_axis(Axis(1))
        ]
    );
}
