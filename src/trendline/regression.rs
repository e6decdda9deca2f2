use serde::{Deserialize, Serialize};

/// Slope/intercept pair from a least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeastSquares {
    pub slope: f64,
    pub intercept: f64,
}

/// Ordinary least squares over paired samples.
///
/// `slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)`, `intercept = (Σy − slope·Σx) / n`.
/// Returns `None` for mismatched or empty input and when every `x` is equal.
#[must_use]
pub fn least_squares(x_values: &[f64], y_values: &[f64]) -> Option<LeastSquares> {
    if x_values.len() != y_values.len() || x_values.is_empty() {
        return None;
    }
    let n = x_values.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = x_values.iter().zip(y_values).fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), (x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    (slope.is_finite() && intercept.is_finite()).then_some(LeastSquares { slope, intercept })
}

/// Fits `y = Σ cₖ·xᵏ` for `k = 0..=order` through the normal equations.
///
/// The `(order + 1)²` system is assembled from the power sums `Σxᵏ`,
/// `k = 0..=2·order`. Returns coefficients in ascending power, or `None`
/// when there are not more samples than `order` or the system is singular.
#[must_use]
pub fn polynomial_least_squares(
    x_values: &[f64],
    y_values: &[f64],
    order: usize,
) -> Option<Vec<f64>> {
    if x_values.len() != y_values.len() || x_values.len() <= order {
        return None;
    }
    let size = order + 1;
    let mut moments = vec![0.0; 2 * order + 1];
    let mut rhs = vec![0.0; size];
    for (x, y) in x_values.iter().zip(y_values) {
        let mut power = 1.0;
        for (k, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if k < size {
                rhs[k] += y * power;
            }
            power *= x;
        }
    }
    let matrix = (0..size)
        .map(|row| moments[row..row + size].to_vec())
        .collect();
    solve_gauss_jordan(matrix, rhs)
}

/// Solves `A·x = b` by Gauss-Jordan elimination with full pivoting.
///
/// Returns `None` for a non-square system or a zero pivot.
#[must_use]
pub fn solve_gauss_jordan(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = rhs.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return None;
    }
    let mut used = vec![false; n];
    for _ in 0..n {
        let mut pivot_at = None;
        let mut largest = 0.0;
        for row in (0..n).filter(|row| !used[*row]) {
            for col in (0..n).filter(|col| !used[*col]) {
                let magnitude = matrix[row][col].abs();
                if pivot_at.is_none() || magnitude > largest {
                    largest = magnitude;
                    pivot_at = Some((row, col));
                }
            }
        }
        let (row, col) = pivot_at?;
        used[col] = true;
        if row != col {
            matrix.swap(row, col);
            rhs.swap(row, col);
        }

        let pivot = matrix[col][col];
        if pivot == 0.0 || !pivot.is_finite() {
            return None;
        }
        for value in &mut matrix[col] {
            *value /= pivot;
        }
        rhs[col] /= pivot;

        let pivot_row = matrix[col].clone();
        let pivot_rhs = rhs[col];
        for other in (0..n).filter(|other| *other != col) {
            let factor = matrix[other][col];
            if factor == 0.0 {
                continue;
            }
            for (value, pivot_value) in matrix[other].iter_mut().zip(&pivot_row) {
                *value -= pivot_value * factor;
            }
            rhs[other] -= pivot_rhs * factor;
        }
    }
    rhs.iter().all(|value| value.is_finite()).then_some(rhs)
}

#[cfg(test)]
mod tests {
    use super::{least_squares, polynomial_least_squares, solve_gauss_jordan};

    #[test]
    fn identical_x_values_have_no_slope() {
        assert!(least_squares(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let matrix = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(solve_gauss_jordan(matrix, vec![3.0, 6.0]).is_none());
    }

    #[test]
    fn full_pivoting_handles_zero_leading_entry() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let solution = solve_gauss_jordan(matrix, vec![2.0, 3.0]).expect("solvable");
        assert_eq!(solution, vec![3.0, 2.0]);
    }

    #[test]
    fn order_must_be_below_sample_count() {
        assert!(polynomial_least_squares(&[1.0, 2.0], &[1.0, 4.0], 2).is_none());
    }
}
