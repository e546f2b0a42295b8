use super::check_lengths;

/// C = A × B with the j-k-i loop order.
///
/// The inner loop walks a column of A and a column of C, both with stride
/// `n`. Usually one of the two slowest orders.
pub fn matmul_jki(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for j in 0..n {
        for k in 0..n {
            for i in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
