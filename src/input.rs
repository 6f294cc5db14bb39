//! Разбор матрицы из текста.
//!
//! Строки разделяются переводом строки или `;`, числа любым количеством
//! пробельных символов: повторные пробелы не порождают лишних нулей.
//! Нечисловой или бесконечный токен (`x`, `NaN`, `inf`) превращается в 0.
//! Пустые строки пропускаются,
//! поэтому пустой текст дает матрицу без строк, и ядро отклонит ее
//! как `EmptyMatrix`.

use log::warn;

/// Разбирает текст в строки чисел без проверки прямоугольности
pub fn parse_matrix(input: &str) -> Vec<Vec<f64>> {
    input
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Vec<f64> {
    line.split_whitespace().map(parse_value).collect()
}

fn parse_value(token: &str) -> f64 {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("not a number: {token:?}, using 0");
            0.0
        }
    }
}
