//! Ядро калькулятора: принимает уже разобранные строки чисел,
//! проверяет их и выполняет операцию.
//!
//! Ядро не хранит состояния между вызовами: шаги каждой операции
//! возвращаются вместе с ее результатом.

use log::debug;

use super::operations;
use super::square::{self, RowReduction};
use super::types::{Computation, Matrix, Operation};
use crate::error::{Operand, Result};

/// Точка входа для слоя представления
#[derive(Debug, Default, Clone, Copy)]
pub struct MatrixKernel;

impl MatrixKernel {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Проверка пары операндов для `operation`
    pub fn validate(
        &self,
        a: &[Vec<f64>],
        b: &[Vec<f64>],
        operation: Operation,
    ) -> Result<(Matrix, Matrix)> {
        operations::validate(a, b, operation)
    }

    pub fn add(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Computation> {
        let (a, b) = self.validate(a, b, Operation::Add)?;
        operations::add(&a, &b)
    }

    pub fn subtract(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Computation> {
        let (a, b) = self.validate(a, b, Operation::Subtract)?;
        operations::subtract(&a, &b)
    }

    pub fn multiply(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Computation> {
        let (a, b) = self.validate(a, b, Operation::Multiply)?;
        operations::multiply(&a, &b)
    }

    /// Выполняет любую из двухместных операций
    pub fn apply(
        &self,
        operation: Operation,
        a: &[Vec<f64>],
        b: &[Vec<f64>],
    ) -> Result<Computation> {
        debug!("kernel: {operation}");
        match operation {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
        }
    }

    pub fn transpose(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        Ok(operations::transpose(&single(a)?))
    }

    pub fn determinant2x2(&self, a: &[Vec<f64>]) -> Result<f64> {
        square::determinant2x2(&single(a)?)
    }

    pub fn determinant3x3(&self, a: &[Vec<f64>]) -> Result<f64> {
        square::determinant3x3(&single(a)?)
    }

    /// Определитель с выбором формулы по размеру
    pub fn determinant(&self, a: &[Vec<f64>]) -> Result<f64> {
        square::determinant(&single(a)?)
    }

    pub fn inverse2x2(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        square::inverse2x2(&single(a)?)
    }

    pub fn inverse3x3(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        square::inverse3x3(&single(a)?)
    }

    pub fn inverse(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        square::inverse(&single(a)?)
    }

    /// Метод Гаусса 2x2; исходные строки не изменяются
    pub fn gaussian_elimination2x2(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        square::gaussian_elimination2x2(&single(a)?)
    }

    /// Метод Гаусса 3x3; исходные строки не изменяются
    pub fn gaussian_elimination3x3(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        square::gaussian_elimination3x3(&single(a)?)
    }

    /// Прямой ход с журналом преобразований строк
    pub fn row_reduce(&self, a: &[Vec<f64>]) -> Result<RowReduction> {
        square::row_reduce(&single(a)?)
    }
}

/// Одноместные операции проверяют только свой операнд
fn single(a: &[Vec<f64>]) -> Result<Matrix> {
    Matrix::from_operand(a, Operand::A)
}
