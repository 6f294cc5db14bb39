//! Типы матриц и связанные структуры

use std::fmt;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Operand, Result};

/// Прямоугольная матрица вещественных чисел.
///
/// Создается только через проверку: хотя бы одна строка, хотя бы один
/// столбец, все строки одной длины.
///
/// ```
/// use matrix_kernel::Matrix;
///
/// let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Строит матрицу из строк, проверяя прямоугольность
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::from_operand(rows, Operand::A)
    }

    pub(crate) fn from_operand(rows: &[Vec<f64>], operand: Operand) -> Result<Self> {
        let first = rows.first().ok_or(MatrixError::EmptyMatrix { operand })?;
        let cols = first.len();

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(MatrixError::NonRectangular {
                operand,
                row,
                expected: cols,
                found,
            });
        }
        // строки одной длины, но без столбцов
        if cols == 0 {
            return Err(MatrixError::EmptyMatrix { operand });
        }

        let data = Array2::from_shape_fn((rows.len(), cols), |(i, j)| rows[i][j]);
        Ok(Self { data })
    }

    /// Обертка над уже построенным массивом; вызывающий гарантирует ненулевые размеры
    pub(crate) fn from_array(data: Array2<f64>) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data }
    }

    /// Единичная матрица n x n.
    ///
    /// # Panics
    ///
    /// Паникует при n == 0.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "identity matrix needs at least one row");
        Self::from_array(Array2::eye(n))
    }

    /// Возвращает размерность (строки, столбцы)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Элемент (row, col).
    ///
    /// # Panics
    ///
    /// Паникует при выходе за границы.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// Представление в виде ndarray
    #[must_use]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub(crate) fn array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Копия в виде строк
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Поэлементное преобразование, форма сохраняется
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.data.mapv(f))
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

/// Строки в виде `[1, 2, 3]`, по одной на строку текста
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            // -0 выводится как 0
            let cells: Vec<String> = row.iter().map(|v| (v + 0.0).to_string()).collect();
            write!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// Операция над двумя матрицами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    /// Знак операции для описания шагов
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        };
        f.write_str(name)
    }
}

/// Один элементарный шаг вычисления. Индексы начинаются с нуля,
/// в текстовом описании выводятся с единицы.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationStep {
    /// Сложение или вычитание одной пары элементов
    Elementwise {
        operation: Operation,
        row: usize,
        col: usize,
        lhs: f64,
        rhs: f64,
        result: f64,
    },
    /// Один шаг накопления `C[i][j] += A[i][k] * B[k][j]`
    MultiplyAccumulate {
        row: usize,
        col: usize,
        k: usize,
        lhs: f64,
        rhs: f64,
        product: f64,
        before: f64,
        after: f64,
    },
}

impl fmt::Display for OperationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OperationStep::Elementwise {
                operation,
                row,
                col,
                lhs,
                rhs,
                result,
            } => write!(
                f,
                "C({}, {}) = {} {} {} = {}",
                row + 1,
                col + 1,
                lhs,
                operation.symbol(),
                rhs,
                result
            ),
            OperationStep::MultiplyAccumulate {
                row,
                col,
                k,
                lhs,
                rhs,
                product,
                before,
                after,
            } => write!(
                f,
                "C({i}, {j}) += A({i}, {k}) * B({k}, {j}) = {lhs} * {rhs} = {product}; {before} -> {after}",
                i = row + 1,
                j = col + 1,
                k = k + 1,
            ),
        }
    }
}

/// Результат операции вместе с журналом ее шагов
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub result: Matrix,
    pub steps: Vec<OperationStep>,
}

impl Computation {
    /// Разбирает на (результат, шаги)
    #[must_use]
    pub fn into_parts(self) -> (Matrix, Vec<OperationStep>) {
        (self.result, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_empty_input() {
        let err = Matrix::from_rows(&[]).unwrap_err();
        assert_eq!(err, MatrixError::EmptyMatrix { operand: Operand::A });

        let err = Matrix::from_rows(&[vec![]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyMatrix);

        let err = Matrix::from_rows(&[vec![], vec![]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyMatrix);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NonRectangular {
                operand: Operand::A,
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_first_row_is_ragged() {
        let err = Matrix::from_rows(&[vec![], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NonRectangular {
                operand: Operand::A,
                row: 1,
                expected: 0,
                found: 1
            }
        );
    }

    #[test]
    fn display_lists_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.5], vec![-3.0, 0.0]]).unwrap();
        assert_eq!(m.to_string(), "[1, 2.5]\n[-3, 0]");
    }

    #[test]
    fn serde_uses_nested_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,2.0]]");

        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Matrix>("[[1.0],[2.0,3.0]]").is_err());
    }

    #[test]
    fn steps_render_one_based_indices() {
        let step = OperationStep::MultiplyAccumulate {
            row: 0,
            col: 1,
            k: 1,
            lhs: 2.0,
            rhs: 3.0,
            product: 6.0,
            before: 1.0,
            after: 7.0,
        };
        assert_eq!(
            step.to_string(),
            "C(1, 2) += A(1, 2) * B(2, 2) = 2 * 3 = 6; 1 -> 7"
        );
    }
}
