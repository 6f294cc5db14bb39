//! Вспомогательные функции и утилиты

use std::time::Instant;

use log::debug;

use crate::matrix::Matrix;

/// Измеряет время выполнения функции
pub fn measure_time<F, T>(f: F) -> (T, std::time::Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

/// Сравнивает две матрицы с допуском `epsilon` по каждому элементу
pub fn compare_results(actual: &Matrix, expected: &Matrix, epsilon: f64) -> bool {
    if actual.shape() != expected.shape() {
        debug!(
            "shape differs: {:?} vs {:?}",
            actual.shape(),
            expected.shape()
        );
        return false;
    }

    let mut max_diff = 0.0f64;
    let mut diff_count = 0;
    for (x, y) in actual.view().iter().zip(expected.view().iter()) {
        let diff = (x - y).abs();
        if diff > epsilon || diff.is_nan() {
            diff_count += 1;
            max_diff = max_diff.max(diff);
        }
    }

    if diff_count > 0 {
        debug!("{diff_count} elements differ, max difference {max_diff}");
        false
    } else {
        true
    }
}

/// Округляет элементы до `decimals` знаков (только для вывода)
#[must_use]
pub fn round_to(matrix: &Matrix, decimals: u32) -> Matrix {
    let scale = 10f64.powi(decimals as i32);
    // + 0.0 убирает -0
    matrix.map(|v| (v * scale).round() / scale + 0.0)
}
