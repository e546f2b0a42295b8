use super::check_lengths;

/// C = A × B with the k-j-i loop order.
pub fn matmul_kji(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
