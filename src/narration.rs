//! Пошаговые пояснения к операциям для вывода пользователю.
//!
//! Пояснения строятся по уже вычисленным результатам ядра и никак
//! на них не влияют.

use std::fmt;

use serde::Serialize;

use crate::matrix::{Matrix, Operation, RowOperation, RowReduction};

/// Нумерованный список шагов и строк пояснения
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Narration {
    lines: Vec<String>,
    #[serde(skip)]
    steps: usize,
}

impl Narration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Новый нумерованный шаг
    #[must_use]
    pub fn step(mut self, text: impl AsRef<str>) -> Self {
        self.steps += 1;
        self.lines.push(format!("Шаг {}: {}", self.steps, text.as_ref()));
        self
    }

    /// Строка без номера
    #[must_use]
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    /// Строки матрицы, по одной на строку пояснения
    #[must_use]
    pub fn matrix(mut self, matrix: &Matrix) -> Self {
        self.lines.extend(matrix.to_string().lines().map(str::to_owned));
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Сложение, вычитание, умножение
pub fn binary(operation: Operation, a: &Matrix, b: &Matrix, result: &Matrix) -> Narration {
    let name = match operation {
        Operation::Add => "сложение",
        Operation::Subtract => "вычитание",
        Operation::Multiply => "умножение",
    };

    Narration::new()
        .step("Матрица A:")
        .matrix(a)
        .step("Матрица B:")
        .matrix(b)
        .step(format!("Выполнить {name} A {} B", operation.symbol()))
        .matrix(result)
}

/// Транспонирование: перемещение каждого элемента
pub fn transpose(a: &Matrix, result: &Matrix) -> Narration {
    let mut narration = Narration::new()
        .step("Матрица A:")
        .matrix(a)
        .step("Транспонировать матрицу A, меняя строки и столбцы местами:");

    let (rows, cols) = a.shape();
    for i in 0..rows {
        for j in 0..cols {
            narration = narration.line(format!(
                "Переместить элемент A({}, {}) = {} в позицию ({}, {})",
                i + 1,
                j + 1,
                a.get(i, j),
                j + 1,
                i + 1
            ));
        }
    }

    narration.step("Результат:").matrix(result)
}

const LETTERS: [[char; 3]; 3] = [['a', 'b', 'c'], ['d', 'e', 'f'], ['g', 'h', 'i']];

/// Определитель: формула и подстановка значений
pub fn determinant(a: &Matrix, det: f64) -> Narration {
    let narration = Narration::new().step("Матрица A:");
    let v = |i: usize, j: usize| a.get(i, j);

    match a.shape() {
        (2, 2) => narration
            .matrix(a)
            .step("Формула определителя матрицы 2x2:")
            .line("det(A) = (a * d) - (b * c)")
            .step(format!(
                "Подставить значения: ({} * {}) - ({} * {}) = {det}",
                v(0, 0),
                v(1, 1),
                v(0, 1),
                v(1, 0)
            )),
        (3, 3) => {
            let mut narration = narration;
            for (i, letters) in LETTERS.iter().enumerate() {
                let names: Vec<String> = letters.iter().map(char::to_string).collect();
                let values: Vec<String> = (0..3).map(|j| v(i, j).to_string()).collect();
                narration = narration.line(format!("[{}]  [{}]", names.join(", "), values.join(", ")));
            }
            narration
                .step("Формула определителя матрицы 3x3:")
                .line("det(A) = a(ei − fh) − b(di − fg) + c(dh − eg)")
                .step(format!(
                    "Подставить значения: {}({} * {} - {} * {}) - {}({} * {} - {} * {}) + {}({} * {} - {} * {})",
                    v(0, 0), v(1, 1), v(2, 2), v(1, 2), v(2, 1),
                    v(0, 1), v(1, 0), v(2, 2), v(1, 2), v(2, 0),
                    v(0, 2), v(1, 0), v(2, 1), v(1, 1), v(2, 0),
                ))
                .step(format!("Результат: det(A) = {det}"))
        }
        _ => narration.matrix(a).step(format!("Результат: det(A) = {det}")),
    }
}

/// Обратная матрица через присоединенную
pub fn inverse(a: &Matrix, det: f64, adjugate: &Matrix, inverse: &Matrix) -> Narration {
    Narration::new()
        .step("Матрица A:")
        .matrix(a)
        .step("Формула обратной матрицы: A^-1 = (1 / det(A)) * adj(A)")
        .line("где det(A) - определитель A, adj(A) - присоединенная матрица.")
        .step(format!("Вычислить определитель: det(A) = {det}"))
        .step("Вычислить присоединенную матрицу adj(A):")
        .matrix(adjugate)
        .step(format!("Умножить adj(A) на (1 / {det}):"))
        .matrix(inverse)
}

/// Прямой ход метода Гаусса по журналу преобразований строк
pub fn elimination(a: &Matrix, reduction: &RowReduction) -> Narration {
    let mut narration = Narration::new()
        .step("Матрица A:")
        .matrix(a)
        .step("Привести матрицу к верхнетреугольному виду:");

    for op in &reduction.row_operations {
        let text = match *op {
            RowOperation::Swap { first, second } => {
                format!("Поменять местами строки {} и {}", first + 1, second + 1)
            }
            RowOperation::Normalize { row, pivot } => {
                format!("Разделить строку {} на {pivot}", row + 1)
            }
            RowOperation::Eliminate {
                target,
                source,
                factor,
            } => format!(
                "Вычесть из строки {} строку {}, умноженную на {factor}",
                target + 1,
                source + 1
            ),
        };
        narration = narration.line(format!("{text}  ({op})"));
    }

    narration.step("Результат:").matrix(&reduction.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{operations, square};

    fn m(rows: &[&[f64]]) -> Matrix {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        Matrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn binary_lists_operands_and_result() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[3.0, 4.0]]);
        let sum = operations::add(&a, &b).unwrap();
        let n = binary(Operation::Add, &a, &b, &sum.result);

        assert_eq!(
            n.lines(),
            &[
                "Шаг 1: Матрица A:",
                "[1, 2]",
                "Шаг 2: Матрица B:",
                "[3, 4]",
                "Шаг 3: Выполнить сложение A + B",
                "[4, 6]",
            ]
        );
    }

    #[test]
    fn transpose_moves_every_element() {
        let a = m(&[&[1.0, 2.0, 3.0]]);
        let n = transpose(&a, &operations::transpose(&a));
        assert!(n
            .lines()
            .contains(&"Переместить элемент A(1, 3) = 3 в позицию (3, 1)".to_string()));
        assert_eq!(n.lines().last().map(String::as_str), Some("[3]"));
    }

    #[test]
    fn determinant_substitutes_values() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let det = square::determinant(&a).unwrap();
        let n = determinant(&a, det);
        assert_eq!(
            n.lines().last().map(String::as_str),
            Some("Шаг 3: Подставить значения: (1 * 4) - (2 * 3) = -2")
        );

        let a = Matrix::identity(3);
        let n = determinant(&a, 1.0);
        assert_eq!(n.lines()[1], "[a, b, c]  [1, 0, 0]");
        assert_eq!(n.lines().last().map(String::as_str), Some("Шаг 4: Результат: det(A) = 1"));
    }

    #[test]
    fn inverse_shows_adjugate() {
        let a = m(&[&[2.0, 0.0], &[0.0, 2.0]]);
        let adj = square::adjugate(&a).unwrap();
        let inv = square::inverse(&a).unwrap();
        let n = inverse(&a, 4.0, &adj, &inv);
        let text = n.to_string();
        assert!(text.contains("Шаг 3: Вычислить определитель: det(A) = 4"));
        assert!(text.ends_with("Шаг 5: Умножить adj(A) на (1 / 4):\n[0.5, 0]\n[0, 0.5]"));
    }

    #[test]
    fn elimination_describes_row_operations() {
        let a = m(&[&[0.0, 1.0], &[1.0, 1.0]]);
        let reduction = square::row_reduce(&a).unwrap();
        let n = elimination(&a, &reduction);
        assert!(n
            .lines()
            .contains(&"Поменять местами строки 1 и 2  (R1 <-> R2)".to_string()));
        assert_eq!(n.lines().last().map(String::as_str), Some("[0, 1]"));
    }
}
