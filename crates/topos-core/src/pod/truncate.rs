//! Energy-based mode truncation.
//!
//! The relative information content (RIC) of the leading `m` modes is the
//! fraction of cumulative eigenvalue-magnitude energy they carry. The
//! selector counts how many leading eigenvalues are needed to reach the
//! target fraction; the caller combines that count with its own request cap.

use ndarray::Array1;

/// Count the leading eigenvalues needed for the running sum of `|λ_i|` to
/// reach `target_ric · Σ|λ|`, consuming at most all of them.
///
/// `eigenvalues` must already be in descending order. Monotone in
/// `target_ric`: a larger target never yields a smaller count. A spectrum
/// of all zeros yields 0.
pub fn ric_mode_count(eigenvalues: &Array1<f64>, target_ric: f64) -> usize {
    let total_energy: f64 = eigenvalues.iter().map(|v| v.abs()).sum();

    let mut accumulated = 0.0;
    let mut count = 0;
    while accumulated < target_ric * total_energy && count < eigenvalues.len() {
        accumulated += eigenvalues[count].abs();
        count += 1;
    }
    count
}
