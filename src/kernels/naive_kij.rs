use super::check_lengths;

/// C = A × B with the k-i-j loop order.
///
/// The inner loop streams a row of B and a row of C with stride 1. C is
/// re-read and re-written once per value of `k`.
pub fn matmul_kij(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
