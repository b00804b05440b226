//! SPOD smoothing of the projection matrix.
//!
//! The Spectral POD variant convolves the temporal Gram matrix with a short
//! 1-D kernel *along its diagonal band*: the same tap weight is applied to
//! the co-offset entries `P[i+k, j+k]` for `k ∈ [-w, w]`. This is not a
//! separable 2-D convolution — the diagonal tie is the defining
//! characteristic of the variant, coupling both time axes simultaneously.
//!
//! Both time indices are treated as periodic: taps that run off the matrix
//! wrap around to the opposite edge. For genuinely non-periodic series this
//! introduces boundary artefacts; the assumption is deliberate and kept.

use ndarray::{Array1, Array2};

use crate::types::FilterKind;

/// Half-span of the truncated Gaussian in units of its standard deviation.
/// The `2w+1` taps sample `exp(-x²)` linearly over `[-SPAN, SPAN]`.
const GAUSSIAN_SPAN: f64 = 2.285;

/// Build a normalised smoothing kernel of length `2 * half_width + 1`.
///
/// All taps are non-negative and sum to 1 for every kind and width. With
/// `half_width = 0` the kernel is a single tap of weight 1, which makes the
/// filter a no-op.
pub fn build_kernel(kind: FilterKind, half_width: usize) -> Array1<f64> {
    let taps = 2 * half_width + 1;
    let mut kernel = match kind {
        FilterKind::Box => Array1::ones(taps),
        FilterKind::Gaussian => {
            let grid = Array1::linspace(-GAUSSIAN_SPAN, GAUSSIAN_SPAN, taps);
            grid.mapv(|x: f64| (-x * x).exp())
        }
    };
    let sum = kernel.sum();
    kernel /= sum;
    kernel
}

/// Convolve the projection matrix with `kernel` along its diagonal band,
/// wrapping periodically at the time-series boundary:
///
/// $S_{ij} = \sum_{k=-w}^{w} g_{k+w} \, P_{(i+k) \bmod T,\ (j+k) \bmod T}$
///
/// Returns the filtered matrix; shape is unchanged.
pub fn filter_projection_matrix(projection: &Array2<f64>, kernel: &Array1<f64>) -> Array2<f64> {
    let n = projection.nrows() as isize;
    let half_width = (kernel.len() / 2) as isize;

    Array2::from_shape_fn(projection.dim(), |(i, j)| {
        let mut acc = 0.0;
        for (tap, k) in (-half_width..=half_width).enumerate() {
            let row = (i as isize + k).rem_euclid(n) as usize;
            let col = (j as isize + k).rem_euclid(n) as usize;
            acc += kernel[tap] * projection[[row, col]];
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_kernel_sums_to_one() {
        for kind in [FilterKind::Box, FilterKind::Gaussian] {
            for width in [0, 1, 2, 5, 17] {
                let kernel = build_kernel(kind, width);
                assert_eq!(kernel.len(), 2 * width + 1);
                assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-12);
                assert!(kernel.iter().all(|&g| g >= 0.0));
            }
        }
    }

    #[test]
    fn test_box_kernel_is_uniform() {
        let kernel = build_kernel(FilterKind::Box, 3);
        for &g in kernel.iter() {
            assert_relative_eq!(g, 1.0 / 7.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_gaussian_kernel_peaks_at_centre() {
        let kernel = build_kernel(FilterKind::Gaussian, 4);
        let centre = kernel[4];
        for (idx, &g) in kernel.iter().enumerate() {
            assert!(g <= centre + 1e-15, "tap {} exceeds centre", idx);
        }
        // Symmetric about the centre tap.
        for offset in 1..=4 {
            assert_relative_eq!(kernel[4 - offset], kernel[4 + offset], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_width_filter_is_noop() {
        let p = array![[2.0, -1.0, 0.5], [-1.0, 3.0, 0.0], [0.5, 0.0, 1.0]];
        let kernel = build_kernel(FilterKind::Gaussian, 0);
        let filtered = filter_projection_matrix(&p, &kernel);
        for (a, b) in p.iter().zip(filtered.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-15);
        }
        // Applying it twice changes nothing either.
        let twice = filter_projection_matrix(&filtered, &kernel);
        for (a, b) in p.iter().zip(twice.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_filter_wraps_periodically() {
        // Box filter of width 1 on a 3x3 matrix: every output entry averages
        // the three diagonal co-offset neighbours with wrap-around.
        let p = array![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let kernel = build_kernel(FilterKind::Box, 1);
        let s = filter_projection_matrix(&p, &kernel);
        let third = 1.0 / 3.0;
        // The lone unit at (0,0) spreads along the periodic diagonal
        // {(2,2), (0,0), (1,1)} seen from each centre.
        assert_relative_eq!(s[[0, 0]], third, epsilon = 1e-12);
        assert_relative_eq!(s[[1, 1]], third, epsilon = 1e-12);
        assert_relative_eq!(s[[2, 2]], third, epsilon = 1e-12);
        // Off-diagonal entries never see the unit: their taps stay on the
        // shifted diagonal i - j = const.
        assert_relative_eq!(s[[0, 1]], 0.0, epsilon = 1e-12);
        assert_relative_eq!(s[[2, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_preserves_symmetry() {
        let p = array![
            [4.0, 1.0, 0.5, 0.2],
            [1.0, 3.0, 0.8, 0.1],
            [0.5, 0.8, 2.0, 0.6],
            [0.2, 0.1, 0.6, 1.0]
        ];
        let kernel = build_kernel(FilterKind::Gaussian, 2);
        let s = filter_projection_matrix(&p, &kernel);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(s[[i, j]], s[[j, i]], epsilon = 1e-12);
            }
        }
    }
}
