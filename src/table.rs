//! Column-oriented numeric table.
//!
//! Model inputs arrive as columns of equal length, one column per variable,
//! with observations running down the rows. [`ValueTable`] enforces the equal
//! length invariant and converts to and from the row-major [`Matrix`] layout
//! the solvers work with.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::LinalgError;
use crate::linalg::{Matrix, Vector};
use crate::real::Real;

/// A set of equally sized columns.
///
/// # Example
///
/// ```
/// use linstat::{ValueTable, Vector};
///
/// let table: ValueTable<f64> = ValueTable::from_columns(vec![
///     Vector::from_vec(vec![1.0, 2.0, 3.0]),
///     Vector::from_vec(vec![4.0, 5.0, 6.0]),
/// ])
/// .unwrap();
///
/// assert_eq!(table.nrows(), 3);
/// assert_eq!(table.row(1).as_slice(), &[2.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTable<T> {
    columns: Vec<Vector<T>>,
    labels: Vec<String>,
}

impl<T: Real> ValueTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Create a table from columns.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the columns differ in length.
    pub fn from_columns(columns: Vec<Vector<T>>) -> Result<Self, LinalgError> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Build a table whose columns are the columns of `m`.
    pub fn from_matrix(m: &Matrix<T>) -> Self {
        let columns = (0..m.ncols()).map(|j| m.column(j)).collect();
        Self {
            columns,
            labels: Vec::new(),
        }
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the table already has columns of a
    /// different length.
    pub fn push_column(&mut self, column: Vector<T>) -> Result<(), LinalgError> {
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(LinalgError::DimensionMismatch {
                    expected: first.len(),
                    found: column.len(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Attach column labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Label of column `i`, if one was attached.
    pub fn label(&self, i: usize) -> Option<&str> {
        self.labels.get(i).map(String::as_str)
    }

    pub fn column(&self, i: usize) -> &Vector<T> {
        &self.columns[i]
    }

    pub fn columns(&self) -> &[Vector<T>] {
        &self.columns
    }

    pub fn ncolumns(&self) -> usize {
        self.columns.len()
    }

    /// Number of observations (zero for a table without columns).
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Vector::len)
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    /// Observation `i` across all columns.
    pub fn row(&self, i: usize) -> Vector<T> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    /// Row-major matrix with one row per observation.
    pub fn to_matrix(&self) -> Matrix<T> {
        let nrows = self.nrows();
        let ncols = self.ncolumns();
        let mut m = Matrix::zeros(nrows, ncols);
        for (j, column) in self.columns.iter().enumerate() {
            for (i, &x) in column.iter().enumerate() {
                m[i][j] = x;
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_rejects_unequal_columns() {
        let result: Result<ValueTable<f64>, _> = ValueTable::from_columns(vec![
            Vector::from_vec(vec![1.0, 2.0]),
            Vector::from_vec(vec![1.0]),
        ]);
        assert_eq!(
            result,
            Err(LinalgError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_matrix_round_trip() {
        let m: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let table = ValueTable::from_matrix(&m);

        assert_eq!(table.ncolumns(), 2);
        assert_eq!(table.nrows(), 3);
        assert_eq!(table.column(1).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(table.to_matrix(), m);
    }

    #[test]
    fn test_labels() {
        let table: ValueTable<f64> =
            ValueTable::from_columns(vec![Vector::zeros(2), Vector::ones(2)])
                .unwrap()
                .with_labels(["pressure", "temperature"]);

        assert_eq!(table.label(1), Some("temperature"));
        assert_eq!(table.label(2), None);
    }

    #[test]
    fn test_empty_table() {
        let table: ValueTable<f64> = ValueTable::new();
        assert!(table.is_empty());
        assert_eq!(table.nrows(), 0);
        assert_eq!(table.to_matrix().len(), 0);
    }
}
