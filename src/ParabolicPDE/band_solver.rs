//! # Band solver
//!
//! Solves the near-tridiagonal system of one time level in two passes:
//! 1. `fold_off_band` removes the single extra coefficient a three-point boundary row
//!    carries (column 2 of the first row, column n-3 of the last row) by subtracting a
//!    multiple of an adjacent row;
//! 2. `thomas_sweep` runs forward elimination of the sub-diagonal, backward elimination
//!    of the super-diagonal and normalizes every row by its diagonal.
//!
//! Both passes are pure transforms of an explicit array of rows.
use super::parabolic_error::ParabolicError;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// One row of the band: `sub·u_{i-1} + diag·u_i + sup·u_{i+1} (+ far·u_far) = rhs`.
/// `far` is only meaningful on the first row (column 2) and the last row (column n-3).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandRow {
    pub sub: f64,
    pub diag: f64,
    pub sup: f64,
    pub far: f64,
    pub rhs: f64,
}

fn is_pivot(value: f64) -> bool {
    value.abs() >= f64::MIN_POSITIVE
}

/// Fold the off-band entries of the first and last rows into the band
pub fn fold_off_band(mut rows: Vec<BandRow>) -> Result<Vec<BandRow>, ParabolicError> {
    let n = rows.len();
    if n < 3 {
        return Ok(rows);
    }
    let last = n - 1;

    if rows[0].far != 0.0 {
        let far = rows[0].far;
        let next = rows[1];
        if is_pivot(next.sup) {
            let m = far / next.sup;
            let row = &mut rows[0];
            row.diag -= m * next.sub;
            row.sup -= m * next.diag;
            row.rhs -= m * next.rhs;
        } else if n > 3 && is_pivot(rows[2].diag) && rows[2].sup == 0.0 {
            let second = rows[2];
            let m = far / second.diag;
            let row = &mut rows[0];
            row.sup -= m * second.sub;
            row.rhs -= m * second.rhs;
        } else {
            return Err(ParabolicError::UnusableOffBand { row: 0 });
        }
        rows[0].far = 0.0;
        debug!("off-band entry of row 0 folded");
    }

    if rows[last].far != 0.0 {
        let far = rows[last].far;
        let previous = rows[last - 1];
        if is_pivot(previous.sub) {
            let m = far / previous.sub;
            let row = &mut rows[last];
            row.sub -= m * previous.diag;
            row.diag -= m * previous.sup;
            row.rhs -= m * previous.rhs;
        } else if n > 3 && is_pivot(rows[last - 2].diag) && rows[last - 2].sub == 0.0 {
            let second = rows[last - 2];
            let m = far / second.diag;
            let row = &mut rows[last];
            row.sub -= m * second.sup;
            row.rhs -= m * second.rhs;
        } else {
            return Err(ParabolicError::UnusableOffBand { row: last });
        }
        rows[last].far = 0.0;
        debug!("off-band entry of row {} folded", last);
    }
    Ok(rows)
}

/// Forward and backward elimination of a strictly tridiagonal band; returns the rows
/// with unit diagonal, the right-hand sides holding the solution
pub fn thomas_sweep(mut rows: Vec<BandRow>) -> Result<Vec<BandRow>, ParabolicError> {
    let n = rows.len();
    if n == 0 {
        return Ok(rows);
    }
    for i in 1..n {
        let previous = rows[i - 1];
        if !is_pivot(previous.diag) {
            return Err(ParabolicError::ZeroPivot { row: i - 1 });
        }
        let m = rows[i].sub / previous.diag;
        let row = &mut rows[i];
        row.diag -= m * previous.sup;
        row.rhs -= m * previous.rhs;
        row.sub = 0.0;
    }
    if !is_pivot(rows[n - 1].diag) {
        return Err(ParabolicError::ZeroPivot { row: n - 1 });
    }
    for i in (0..n - 1).rev() {
        let next = rows[i + 1];
        let m = rows[i].sup / next.diag;
        let row = &mut rows[i];
        row.rhs -= m * next.rhs;
        row.sup = 0.0;
    }
    for row in rows.iter_mut() {
        row.rhs /= row.diag;
        row.diag = 1.0;
    }
    Ok(rows)
}

/// Solve the rows of one time level
pub fn solve_band(rows: Vec<BandRow>) -> Result<DVector<f64>, ParabolicError> {
    let rows = thomas_sweep(fold_off_band(rows)?)?;
    Ok(DVector::from_iterator(rows.len(), rows.iter().map(|row| row.rhs)))
}

/// Rows where |diag| < |sub| + |sup| + |far|. Diagnostic only, the sweep does not need it.
pub fn diagonal_dominance(rows: &[BandRow]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.diag.abs() < row.sub.abs() + row.sup.abs() + row.far.abs())
        .map(|(i, _)| i)
        .collect()
}

/// Dense matrix and right-hand side of the rows
pub fn to_dense(rows: &[BandRow]) -> (DMatrix<f64>, DVector<f64>) {
    let n = rows.len();
    let mut matrix = DMatrix::zeros(n, n);
    let mut rhs = DVector::zeros(n);
    for (i, row) in rows.iter().enumerate() {
        matrix[(i, i)] = row.diag;
        if i > 0 {
            matrix[(i, i - 1)] = row.sub;
        }
        if i + 1 < n {
            matrix[(i, i + 1)] = row.sup;
        }
        if row.far != 0.0 && n >= 3 {
            if i == 0 {
                matrix[(0, 2)] += row.far;
            } else if i == n - 1 {
                matrix[(i, n - 3)] += row.far;
            }
        }
        rhs[i] = row.rhs;
    }
    (matrix, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dominant_band(n: usize) -> Vec<BandRow> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                BandRow {
                    sub: if i == 0 { 0.0 } else { -1.0 - 0.1 * x.sin() },
                    diag: 4.0 + 0.5 * x.cos(),
                    sup: if i == n - 1 { 0.0 } else { -1.3 + 0.2 * x.cos() },
                    far: 0.0,
                    rhs: (0.7 * x).sin() + 1.0,
                }
            })
            .collect()
    }

    fn dense_solution(rows: &[BandRow]) -> DVector<f64> {
        let (matrix, rhs) = to_dense(rows);
        matrix.lu().solve(&rhs).unwrap()
    }

    #[test]
    fn test_band_matches_dense_lu() {
        for n in [3, 4, 7, 25] {
            let rows = dominant_band(n);
            assert!(diagonal_dominance(&rows).is_empty());
            let expected = dense_solution(&rows);
            let solution = solve_band(rows).unwrap();
            for i in 0..n {
                assert_relative_eq!(solution[i], expected[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_fold_uses_neighbor_row() {
        let mut rows = dominant_band(6);
        rows[0].far = 0.6;
        rows[5].far = -0.4;
        let expected = dense_solution(&rows);

        let folded = fold_off_band(rows).unwrap();
        assert_eq!(folded[0].far, 0.0);
        assert_eq!(folded[5].far, 0.0);
        // the folded rows are still satisfied by the solution of the unfolded system
        let r0 = folded[0].diag * expected[0] + folded[0].sup * expected[1];
        assert_relative_eq!(r0, folded[0].rhs, epsilon = 1e-12);
        let r5 = folded[5].sub * expected[4] + folded[5].diag * expected[5];
        assert_relative_eq!(r5, folded[5].rhs, epsilon = 1e-12);

        let solution = solve_band(folded).unwrap();
        for i in 0..6 {
            assert_relative_eq!(solution[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fold_falls_back_to_second_row() {
        // explicit-like neighbor rows: only the diagonal is set
        let mut rows = dominant_band(5);
        for i in 1..4 {
            rows[i].sub = 0.0;
            rows[i].sup = 0.0;
        }
        rows[0].far = -0.5;
        rows[4].far = 0.25;
        let expected = dense_solution(&rows);
        let folded = fold_off_band(rows).unwrap();
        assert_eq!(folded[0].far, 0.0);
        assert_eq!(folded[4].far, 0.0);
        let solution = solve_band(folded).unwrap();
        for i in 0..5 {
            assert_relative_eq!(solution[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unusable_off_band() {
        let rows = vec![
            BandRow { diag: 1.0, far: 1.0, ..Default::default() },
            BandRow { diag: 1.0, ..Default::default() },
            BandRow { diag: 1.0, ..Default::default() },
        ];
        assert!(matches!(
            fold_off_band(rows),
            Err(ParabolicError::UnusableOffBand { row: 0 })
        ));
    }

    #[test]
    fn test_zero_pivot_is_reported() {
        let rows = vec![
            BandRow { diag: 0.0, sup: 1.0, rhs: 1.0, ..Default::default() },
            BandRow { sub: 1.0, diag: 1.0, rhs: 1.0, ..Default::default() },
        ];
        assert!(matches!(
            thomas_sweep(rows),
            Err(ParabolicError::ZeroPivot { row: 0 })
        ));
    }

    #[test]
    fn test_dominance_flags_weak_rows() {
        let mut rows = dominant_band(4);
        rows[2].diag = 0.5;
        assert_eq!(diagonal_dominance(&rows), vec![2]);
    }
}
