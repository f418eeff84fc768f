//! Thomas algorithm for tridiagonal systems.
//!
//! The in-place variant writes the solution over the right-hand side and
//! takes its elimination coefficients from a caller-owned buffer, so a
//! column solve performs no allocation.

/// Solve a tridiagonal system in place.
///
/// ```text
/// sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]
/// ```
///
/// - `sub[0]` and `sup[n-1]` are ignored
/// - `rhs` is overwritten with the solution `x`
/// - `work` must hold at least `n` entries; its contents are scratch
///
/// The system must be non-singular without pivoting, which holds for
/// diagonally dominant matrices such as the implicit diffusion operator.
#[inline]
pub fn solve_tridiagonal_in_place(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &mut [f64],
    work: &mut [f64],
) {
    let n = rhs.len();
    if n == 0 {
        return;
    }
    debug_assert!(sub.len() >= n && diag.len() >= n && sup.len() >= n);
    debug_assert!(work.len() >= n, "Scratch buffer too small: {} < {}", work.len(), n);

    // Forward sweep
    let mut den = diag[0];
    debug_assert!(den != 0.0, "Zero pivot in tridiagonal solve");
    work[0] = sup[0] / den;
    rhs[0] /= den;
    for i in 1..n {
        den = diag[i] - sub[i] * work[i - 1];
        debug_assert!(den != 0.0, "Zero pivot in tridiagonal solve at row {}", i);
        work[i] = if i + 1 < n { sup[i] / den } else { 0.0 };
        rhs[i] = (rhs[i] - sub[i] * rhs[i - 1]) / den;
    }

    // Back substitution
    for i in (0..n - 1).rev() {
        rhs[i] -= work[i] * rhs[i + 1];
    }
}

/// Allocating convenience wrapper around [`solve_tridiagonal_in_place`].
///
/// - `a`: sub-diagonal \[n\] (a\[0\] unused)
/// - `b`: main diagonal \[n\]
/// - `c`: super-diagonal \[n\] (c\[n-1\] unused)
/// - `d`: right-hand side \[n\]
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Vec<f64> {
    let n = d.len();
    assert_eq!(a.len(), n);
    assert_eq!(b.len(), n);
    assert_eq!(c.len(), n);

    let mut x = d.to_vec();
    let mut work = vec![0.0; n];
    solve_tridiagonal_in_place(a, b, c, &mut x, &mut work);
    x
}
