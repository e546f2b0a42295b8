use super::check_lengths;

/// C = A × B with the j-i-k loop order.
///
/// Same inner loop as i-j-k (row of A, column of B), but C is filled
/// column by column.
pub fn matmul_jik(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for j in 0..n {
        for i in 0..n {
            for k in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
