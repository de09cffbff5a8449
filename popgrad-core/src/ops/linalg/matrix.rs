use crate::error::PopGradError;

/// A constant, row-major matrix supplied by the caller.
///
/// Matrices are not graph nodes and never carry a gradient. Construction
/// validates the shape once so that `matvec` can trust it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from a sequence of rows.
    ///
    /// # Errors
    /// `InvalidMatrixSpec` if there are no rows, the rows are empty, or the
    /// rows have unequal lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, PopGradError> {
        let first = rows.first().ok_or_else(|| PopGradError::InvalidMatrixSpec {
            reason: "matrix must have at least one row".to_string(),
        })?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(PopGradError::InvalidMatrixSpec {
                reason: "matrix rows must not be empty".to_string(),
            });
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PopGradError::InvalidMatrixSpec {
                    reason: format!(
                        "all rows must have the same length: row 0 has {} columns, row {} has {}",
                        cols,
                        i,
                        row.len()
                    ),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Matrix {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Builds a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, PopGradError> {
        if rows == 0 || cols == 0 {
            return Err(PopGradError::InvalidMatrixSpec {
                reason: format!("matrix dimensions must be non-zero, got {}x{}", rows, cols),
            });
        }
        if data.len() != rows * cols {
            return Err(PopGradError::InvalidMatrixSpec {
                reason: format!(
                    "buffer of {} values cannot form a {}x{} matrix",
                    data.len(),
                    rows,
                    cols
                ),
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.data.chunks_exact(self.cols).nth(i)
    }

    /// Element at row `i`, column `j`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if j >= self.cols {
            return None;
        }
        self.row(i).map(|row| row[j])
    }

    /// `A x`. `x` must have `cols` elements.
    pub(crate) fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        self.data
            .chunks_exact(self.cols)
            .map(|row| row.iter().zip(x).map(|(a, v)| a * v).sum())
            .collect()
    }

    /// `A^T y`. `y` must have `rows` elements.
    pub(crate) fn transpose_mul_vec(&self, y: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.cols];
        for (row, y_i) in self.data.chunks_exact(self.cols).zip(y) {
            for (o, a) in out.iter_mut().zip(row) {
                *o += a * y_i;
            }
        }
        out
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = PopGradError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

impl TryFrom<&Vec<Vec<f64>>> for Matrix {
    type Error = PopGradError;

    fn try_from(rows: &Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl TryFrom<&[Vec<f64>]> for Matrix {
    type Error = PopGradError;

    fn try_from(rows: &[Vec<f64>]) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl<const R: usize, const C: usize> TryFrom<[[f64; C]; R]> for Matrix {
    type Error = PopGradError;

    fn try_from(rows: [[f64; C]; R]) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

impl<const R: usize, const C: usize> TryFrom<&[[f64; C]; R]> for Matrix {
    type Error = PopGradError;

    fn try_from(rows: &[[f64; C]; R]) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl TryFrom<&Matrix> for Matrix {
    type Error = PopGradError;

    fn try_from(matrix: &Matrix) -> Result<Self, Self::Error> {
        Ok(matrix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_row_major() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.get(0, 2), Some(3.0));
    }

    #[test]
    fn test_out_of_range_access_is_none() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.row(2), None);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(1, 1), Some(4.0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Matrix::try_from(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(PopGradError::InvalidMatrixSpec { .. })));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let no_rows: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            Matrix::try_from(no_rows),
            Err(PopGradError::InvalidMatrixSpec { .. })
        ));
        assert!(matches!(
            Matrix::try_from(vec![Vec::<f64>::new()]),
            Err(PopGradError::InvalidMatrixSpec { .. })
        ));
    }

    #[test]
    fn test_from_flat_checks_dimensions() {
        assert!(Matrix::from_flat(vec![1.0; 6], 2, 3).is_ok());
        assert!(matches!(
            Matrix::from_flat(vec![1.0; 5], 2, 3),
            Err(PopGradError::InvalidMatrixSpec { .. })
        ));
        assert!(matches!(
            Matrix::from_flat(vec![], 0, 3),
            Err(PopGradError::InvalidMatrixSpec { .. })
        ));
    }

    #[test]
    fn test_products() {
        let m = Matrix::try_from([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(m.mul_vec(&[1.0, -1.0]), vec![-1.0, -1.0, -1.0]);
        assert_eq!(m.transpose_mul_vec(&[1.0, 1.0, 1.0]), vec![9.0, 12.0]);
    }
}
