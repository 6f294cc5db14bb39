//! Ошибки матричного ядра
//!
//! Каждая операция либо возвращает результат, либо ровно одну
//! классифицированную ошибку. Частичных результатов не бывает.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::matrix::Operation;

/// Результат операций ядра
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Операнд, к которому относится ошибка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => f.write_str("A"),
            Operand::B => f.write_str("B"),
        }
    }
}

/// Размерность матрицы (строки, столбцы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Ошибки валидации и вычислений
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Матрица без строк (или без столбцов)
    #[error("matrix {operand} is empty")]
    EmptyMatrix { operand: Operand },

    /// Строка отличается по длине от первой строки
    #[error("matrix {operand} must be rectangular: row {row} has {found} values, expected {expected}")]
    NonRectangular {
        operand: Operand,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Размеры операндов несовместимы с операцией
    #[error("cannot {operation} a {left} matrix and a {right} matrix")]
    DimensionMismatch {
        operation: Operation,
        left: Shape,
        right: Shape,
    },

    /// Операция определена только для матриц 2x2 или 3x3
    #[error("expected a {expected} matrix, got {found}")]
    InvalidShape { expected: String, found: Shape },

    /// Определитель равен нулю
    #[error("matrix is singular (determinant is exactly 0)")]
    SingularMatrix,

    /// Нет ненулевого ведущего элемента при исключении
    #[error("no usable pivot in column {column}")]
    SingularOrDegenerate { column: usize },
}

/// Вид ошибки без подробностей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    EmptyMatrix,
    NonRectangular,
    DimensionMismatch,
    InvalidShape,
    SingularMatrix,
    SingularOrDegenerate,
}

impl MatrixError {
    /// Классификация ошибки
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::EmptyMatrix { .. } => ErrorKind::EmptyMatrix,
            MatrixError::NonRectangular { .. } => ErrorKind::NonRectangular,
            MatrixError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MatrixError::InvalidShape { .. } => ErrorKind::InvalidShape,
            MatrixError::SingularMatrix => ErrorKind::SingularMatrix,
            MatrixError::SingularOrDegenerate { .. } => ErrorKind::SingularOrDegenerate,
        }
    }

    pub(crate) fn invalid_shape(size: usize, found: (usize, usize)) -> Self {
        MatrixError::InvalidShape {
            expected: format!("{size}x{size}"),
            found: found.into(),
        }
    }
}
