use super::check_lengths;

/// C = A × B with the i-j-k loop order.
///
/// The textbook order. The inner loop walks a row of A (stride 1) and a
/// column of B (stride `n`), so every step of the reduction touches a new
/// cache line of B on large matrices.
///
/// C is zeroed first, so repeated calls give the same result.
///
/// # Panics
///
/// Panics if any slice is not `n * n` long.
pub fn matmul_ijk(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_lengths(a, b, c, n);
    c.fill(0.0);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
