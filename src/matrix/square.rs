//! Операции фиксированного размера: определитель, обратная матрица и
//! метод Гаусса для 2x2 и 3x3.
//!
//! Вырожденность проверяется точным сравнением с нулем.

use std::fmt;

use log::debug;
use ndarray::{Array2, Axis};
use serde::Serialize;

use super::types::Matrix;
use crate::error::{MatrixError, Result};

/// Определитель 2x2: `a·d − b·c`
pub fn determinant2x2(a: &Matrix) -> Result<f64> {
    ensure_shape!(a, 2);
    Ok(a.get(0, 0) * a.get(1, 1) - a.get(0, 1) * a.get(1, 0))
}

/// Определитель 3x3 разложением по первой строке:
/// `a(ei − fh) − b(di − fg) + c(dh − eg)`
pub fn determinant3x3(m: &Matrix) -> Result<f64> {
    ensure_shape!(m, 3);
    let (a, b, c) = (m.get(0, 0), m.get(0, 1), m.get(0, 2));
    let (d, e, f) = (m.get(1, 0), m.get(1, 1), m.get(1, 2));
    let (g, h, i) = (m.get(2, 0), m.get(2, 1), m.get(2, 2));

    Ok(a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g))
}

/// Определитель 2x2 или 3x3 в зависимости от размера
pub fn determinant(a: &Matrix) -> Result<f64> {
    match a.shape() {
        (2, 2) => determinant2x2(a),
        (3, 3) => determinant3x3(a),
        found => Err(fixed_size_error(found)),
    }
}

/// Минор: матрица без строки `row` и столбца `col`, порядок сохраняется
pub(crate) fn minor(a: &Matrix, row: usize, col: usize) -> Matrix {
    let (rows, cols) = a.shape();
    let keep_rows: Vec<usize> = (0..rows).filter(|&i| i != row).collect();
    let keep_cols: Vec<usize> = (0..cols).filter(|&j| j != col).collect();

    Matrix::from_array(
        a.array()
            .select(Axis(0), &keep_rows)
            .select(Axis(1), &keep_cols),
    )
}

/// Присоединенная матрица 2x2: `[[d, −b], [−c, a]]`
pub fn adjugate2x2(a: &Matrix) -> Result<Matrix> {
    ensure_shape!(a, 2);
    let adj = Array2::from_shape_fn((2, 2), |(i, j)| match (i, j) {
        (0, 0) => a.get(1, 1),
        (0, 1) => -a.get(0, 1),
        (1, 0) => -a.get(1, 0),
        _ => a.get(0, 0),
    });
    Ok(Matrix::from_array(adj))
}

/// Присоединенная матрица 3x3: транспонированная матрица алгебраических дополнений
pub fn adjugate3x3(a: &Matrix) -> Result<Matrix> {
    ensure_shape!(a, 3);
    let mut cofactors = Array2::<f64>::zeros((3, 3));
    for i in 0..3 {
        for j in 0..3 {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            cofactors[[i, j]] = sign * determinant2x2(&minor(a, i, j))?;
        }
    }
    Ok(Matrix::from_array(cofactors.reversed_axes()))
}

/// Присоединенная матрица 2x2 или 3x3
pub fn adjugate(a: &Matrix) -> Result<Matrix> {
    match a.shape() {
        (2, 2) => adjugate2x2(a),
        (3, 3) => adjugate3x3(a),
        found => Err(fixed_size_error(found)),
    }
}

/// Обратная матрица 2x2
pub fn inverse2x2(a: &Matrix) -> Result<Matrix> {
    let det = determinant2x2(a)?;
    scale_adjugate(adjugate2x2(a)?, det)
}

/// Обратная матрица 3x3 через алгебраические дополнения
pub fn inverse3x3(a: &Matrix) -> Result<Matrix> {
    let det = determinant3x3(a)?;
    scale_adjugate(adjugate3x3(a)?, det)
}

/// Обратная матрица 2x2 или 3x3
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    match a.shape() {
        (2, 2) => inverse2x2(a),
        (3, 3) => inverse3x3(a),
        found => Err(fixed_size_error(found)),
    }
}

fn scale_adjugate(adj: Matrix, det: f64) -> Result<Matrix> {
    if det == 0.0 {
        return Err(MatrixError::SingularMatrix);
    }
    debug!("inverse: det = {det}");
    Ok(adj.map(|v| v / det))
}

fn fixed_size_error(found: (usize, usize)) -> MatrixError {
    MatrixError::InvalidShape {
        expected: "2x2 or 3x3".to_string(),
        found: found.into(),
    }
}

/// Элементарное преобразование строк (индексы с нуля)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowOperation {
    /// Перестановка двух строк
    Swap { first: usize, second: usize },
    /// Деление строки на ведущий элемент
    Normalize { row: usize, pivot: f64 },
    /// `target := target − factor · source`
    Eliminate {
        target: usize,
        source: usize,
        factor: f64,
    },
}

impl fmt::Display for RowOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RowOperation::Swap { first, second } => {
                write!(f, "R{} <-> R{}", first + 1, second + 1)
            }
            RowOperation::Normalize { row, pivot } => write!(f, "R{0} := R{0} / {1}", row + 1, pivot),
            RowOperation::Eliminate {
                target,
                source,
                factor,
            } => write!(f, "R{0} := R{0} - {2} * R{1}", target + 1, source + 1, factor),
        }
    }
}

/// Результат прямого хода метода Гаусса
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReduction {
    pub result: Matrix,
    pub row_operations: Vec<RowOperation>,
}

/// Рабочая копия матрицы для прямого хода; исходная матрица не меняется
struct Reducer {
    data: Array2<f64>,
    log: Vec<RowOperation>,
}

impl Reducer {
    fn new(a: &Matrix) -> Self {
        Self {
            data: a.array().clone(),
            log: Vec::new(),
        }
    }

    fn pivot(&self, row: usize) -> f64 {
        self.data[[row, row]]
    }

    fn swap(&mut self, first: usize, second: usize) {
        for j in 0..self.data.ncols() {
            self.data.swap([first, j], [second, j]);
        }
        self.log.push(RowOperation::Swap { first, second });
    }

    fn normalize(&mut self, row: usize) {
        let pivot = self.pivot(row);
        self.data.row_mut(row).mapv_inplace(|v| v / pivot);
        self.log.push(RowOperation::Normalize { row, pivot });
    }

    fn eliminate(&mut self, target: usize, source: usize) {
        let factor = self.data[[target, source]];
        for j in 0..self.data.ncols() {
            self.data[[target, j]] -= factor * self.data[[source, j]];
        }
        self.log.push(RowOperation::Eliminate {
            target,
            source,
            factor,
        });
    }

    fn finish(self) -> RowReduction {
        debug!("row reduction: {} operations", self.log.len());
        RowReduction {
            result: Matrix::from_array(self.data),
            row_operations: self.log,
        }
    }
}

/// Прямой ход для 2x2 с журналом преобразований строк
pub fn row_reduce2x2(a: &Matrix) -> Result<RowReduction> {
    ensure_shape!(a, 2);
    let mut r = Reducer::new(a);

    if r.pivot(0) == 0.0 {
        r.swap(0, 1);
        if r.pivot(0) == 0.0 {
            return Err(MatrixError::SingularOrDegenerate { column: 0 });
        }
    }
    r.normalize(0);
    r.eliminate(1, 0);

    Ok(r.finish())
}

/// Прямой ход для 3x3 с журналом преобразований строк.
/// Третья строка не нормируется.
pub fn row_reduce3x3(a: &Matrix) -> Result<RowReduction> {
    ensure_shape!(a, 3);
    let mut r = Reducer::new(a);

    if r.pivot(0) == 0.0 {
        let candidate = (1..3)
            .find(|&row| r.data[[row, 0]] != 0.0)
            .ok_or(MatrixError::SingularOrDegenerate { column: 0 })?;
        r.swap(0, candidate);
    }
    r.normalize(0);
    r.eliminate(1, 0);
    r.eliminate(2, 0);

    if r.pivot(1) == 0.0 {
        if r.data[[2, 1]] == 0.0 {
            return Err(MatrixError::SingularOrDegenerate { column: 1 });
        }
        r.swap(1, 2);
    }
    r.normalize(1);
    r.eliminate(2, 1);

    Ok(r.finish())
}

/// Метод Гаусса для 2x2: ступенчатый вид
pub fn gaussian_elimination2x2(a: &Matrix) -> Result<Matrix> {
    row_reduce2x2(a).map(|reduction| reduction.result)
}

/// Метод Гаусса для 3x3: ступенчатый вид по первым двум ведущим элементам
pub fn gaussian_elimination3x3(a: &Matrix) -> Result<Matrix> {
    row_reduce3x3(a).map(|reduction| reduction.result)
}

/// Прямой ход для 2x2 или 3x3
pub fn row_reduce(a: &Matrix) -> Result<RowReduction> {
    match a.shape() {
        (2, 2) => row_reduce2x2(a),
        (3, 3) => row_reduce3x3(a),
        found => Err(fixed_size_error(found)),
    }
}
