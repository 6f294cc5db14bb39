//! Генерация матриц-операндов для демонстрации и проверок

use rand::Rng;

use super::types::Matrix;
use crate::error::Result;

/// Способ заполнения пары матриц
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixKind {
    /// Матрицы заполненные 1 и 2
    OnesAndTwos,
    /// Матрицы заполненные 3 и 4
    ThreesAndFours,
    /// Случайные значения из [0, 1)
    Random,
}

/// Инициализирует пару матриц заданного вида и размера
pub fn initialize_matrices(kind: MatrixKind, rows: usize, cols: usize) -> Result<(Matrix, Matrix)> {
    let (a, b) = match kind {
        MatrixKind::OnesAndTwos => (vec![vec![1.0; cols]; rows], vec![vec![2.0; cols]; rows]),
        MatrixKind::ThreesAndFours => (vec![vec![3.0; cols]; rows], vec![vec![4.0; cols]; rows]),
        MatrixKind::Random => {
            let mut rng = rand::thread_rng();
            let mut random = || -> Vec<Vec<f64>> {
                (0..rows)
                    .map(|_| (0..cols).map(|_| rng.gen_range(0.0..1.0)).collect())
                    .collect()
            };
            (random(), random())
        }
    };
    Ok((Matrix::from_rows(&a)?, Matrix::from_rows(&b)?))
}
