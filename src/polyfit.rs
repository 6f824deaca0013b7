//! Least-squares polynomial fitting over a handful of calibration points.
//!
//! Coefficients are stored lowest degree first, so `coefs[k]` multiplies
//! `x^k`. With exactly `degree + 1` points the fit degenerates to plain
//! interpolation and the Vandermonde system is solved directly; with more
//! points the normal equations are solved instead. Point counts this small
//! do not warrant pulling in a linear-algebra crate.

use crate::error::{ZoomError, ZoomResult};

/// Fit a polynomial of the given degree through `(x, y)` pairs by least
/// squares. Requires at least `degree + 1` points.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> ZoomResult<Vec<f64>> {
    if xs.len() != ys.len() {
        return Err(ZoomError::fit("polyfit needs equal-length x and y slices"));
    }
    let n = degree + 1;
    if xs.len() < n {
        return Err(ZoomError::fit(format!(
            "polyfit degree {} needs at least {} points, got {}",
            degree,
            n,
            xs.len()
        )));
    }

    if xs.len() == n {
        // Interpolation case: solve the Vandermonde system as-is. Going
        // through the normal equations here would square an already poor
        // condition number for large frame indices.
        let mut a = vec![vec![0.0f64; n]; n];
        for (row, &x) in xs.iter().enumerate() {
            let mut p = 1.0;
            for col in 0..n {
                a[row][col] = p;
                p *= x;
            }
        }
        return solve(a, ys.to_vec());
    }

    // Overdetermined case: normal equations A^T A c = A^T y, built from the
    // power sums of x.
    let mut moments = vec![0.0f64; 2 * degree + 1];
    for &x in xs {
        let mut p = 1.0;
        for m in moments.iter_mut() {
            *m += p;
            p *= x;
        }
    }
    let mut rhs = vec![0.0f64; n];
    for (&x, &y) in xs.iter().zip(ys) {
        let mut p = 1.0;
        for r in rhs.iter_mut() {
            *r += y * p;
            p *= x;
        }
    }
    let mut a = vec![vec![0.0f64; n]; n];
    for (row, a_row) in a.iter_mut().enumerate() {
        for (col, cell) in a_row.iter_mut().enumerate() {
            *cell = moments[row + col];
        }
    }
    solve(a, rhs)
}

/// Evaluate a polynomial (lowest degree first) at `x` via Horner's scheme.
pub fn polyval(coefs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    for &c in coefs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Gaussian elimination with partial pivoting. Consumes the system.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> ZoomResult<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .ok_or_else(|| ZoomError::fit("empty system"))?;
        if a[pivot_row][col].abs() == 0.0 {
            return Err(ZoomError::fit(
                "singular system (duplicate calibration frames?)",
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for col in (row + 1)..n {
            acc -= a[row][col] * x[col];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}
