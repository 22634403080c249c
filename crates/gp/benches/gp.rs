use bayesbox_gp::{GaussianProcessModel, HyperTuning, Kernel};
use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{Array, Array1, Axis};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;

fn criterion_gp(c: &mut Criterion) {
    let dims = [1, 5];
    let nts = [50, 200];

    let mut group = c.benchmark_group("gp");
    group.sample_size(20);
    for (&dim, &nt) in dims.iter().zip(nts.iter()) {
        let griewank = |x: &Array1<f64>| -> f64 {
            let d = Array1::linspace(1., dim as f64, dim).mapv(|v| v.sqrt());
            x.mapv(|v| v * v).sum() / 4000. - (x / &d).mapv(|v| v.cos()).fold(1., |acc, x| acc * x)
                + 1.0
        };
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let xt = Array::random_using((nt, dim), Uniform::new(-600., 600.), &mut rng);
        let yt = xt.map_axis(Axis(1), |x| griewank(&x.to_owned()));

        group.bench_function(format!("gp fit {dim}"), |b| {
            b.iter(|| {
                let mut gp = GaussianProcessModel::new(1e-6)
                    .expect("valid noise")
                    .hyper_tuning(HyperTuning::Fixed);
                gp.fit(&xt, &yt, &Kernel::squared_exponential(1., 1.))
                    .expect("GP fit error");
                std::hint::black_box(gp)
            });
        });

        group.bench_function(format!("gp best fit {dim}"), |b| {
            b.iter(|| {
                let mut gp = GaussianProcessModel::new(1e-6).expect("valid noise");
                gp.best_fit(&xt, &yt, &Kernel::ard_matern(1., 1.))
                    .expect("GP fit error");
                std::hint::black_box(gp)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_gp);
criterion_main!(benches);
