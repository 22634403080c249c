use ndarray::{Array, Array2, ArrayBase, Data, Ix2};
use ndarray_rand::{rand::Rng, rand_distr::Uniform, RandomExt};

/// Draws `ns` points uniformly within `xlimits` given as a (nx, 2) matrix
/// \[\[lower bound, upper bound\], ...\]
pub fn random_sample<R: Rng>(
    xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ns: usize,
    rng: &mut R,
) -> Array2<f64> {
    let nx = xlimits.nrows();
    let normalized = Array::random_using((ns, nx), Uniform::new(0., 1.), rng);
    let lower = xlimits.column(0);
    let scale = &xlimits.column(1) - &lower;
    normalized * scale + lower
}
