use super::check_lengths;

/// C = A × B with the i-k-j loop order.
///
/// Both B and C are accessed sequentially in the inner loop and `a[i][k]`
/// stays in a register. Usually the fastest of the six.
pub fn matmul_ikj(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for i in 0..n {
        for k in 0..n {
            for j in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
