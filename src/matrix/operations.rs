//! Операции над матрицами: проверка совместимости, сложение, вычитание,
//! умножение и транспонирование.
//!
//! Операции, которым нужно пошаговое описание, возвращают его вместе
//! с результатом в [`Computation`]. Общего журнала нет.

use log::{debug, trace};
use ndarray::Array2;

use super::types::{Computation, Matrix, Operation, OperationStep};
use crate::error::{MatrixError, Operand, Result};

/// Проверяет два операнда в «сыром» виде и строит из них матрицы.
///
/// Порядок проверок: пустота любой из матриц, прямоугольность A,
/// прямоугольность B, совместимость размеров для `operation`.
pub fn validate(
    a: &[Vec<f64>],
    b: &[Vec<f64>],
    operation: Operation,
) -> Result<(Matrix, Matrix)> {
    if a.is_empty() {
        return Err(MatrixError::EmptyMatrix { operand: Operand::A });
    }
    if b.is_empty() {
        return Err(MatrixError::EmptyMatrix { operand: Operand::B });
    }

    let a = Matrix::from_operand(a, Operand::A)?;
    let b = Matrix::from_operand(b, Operand::B)?;
    check_compatible(&a, &b, operation)?;
    Ok((a, b))
}

/// Проверяет совместимость размеров уже построенных матриц
pub fn check_compatible(a: &Matrix, b: &Matrix, operation: Operation) -> Result<()> {
    let compatible = match operation {
        Operation::Add | Operation::Subtract => a.shape() == b.shape(),
        Operation::Multiply => a.n_cols() == b.n_rows(),
    };

    if compatible {
        Ok(())
    } else {
        Err(MatrixError::DimensionMismatch {
            operation,
            left: a.shape().into(),
            right: b.shape().into(),
        })
    }
}

/// Поэлементная сумма `C = A + B`
pub fn add(a: &Matrix, b: &Matrix) -> Result<Computation> {
    elementwise(a, b, Operation::Add, |lhs, rhs| lhs + rhs)
}

/// Поэлементная разность `C = A - B`
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Computation> {
    elementwise(a, b, Operation::Subtract, |lhs, rhs| lhs - rhs)
}

fn elementwise(
    a: &Matrix,
    b: &Matrix,
    operation: Operation,
    apply: impl Fn(f64, f64) -> f64,
) -> Result<Computation> {
    check_compatible(a, b, operation)?;
    debug!("{operation}: {}x{}", a.n_rows(), a.n_cols());

    let (rows, cols) = a.shape();
    let mut result = Array2::zeros((rows, cols));
    let mut steps = Vec::with_capacity(rows * cols);

    for i in 0..rows {
        for j in 0..cols {
            let lhs = a.get(i, j);
            let rhs = b.get(i, j);
            let value = apply(lhs, rhs);
            result[[i, j]] = value;

            let step = OperationStep::Elementwise {
                operation,
                row: i,
                col: j,
                lhs,
                rhs,
                result: value,
            };
            trace!("{step}");
            steps.push(step);
        }
    }

    Ok(Computation {
        result: Matrix::from_array(result),
        steps,
    })
}

/// Произведение `C = A * B`.
///
/// Шаги записываются в порядке накопления: `i` внешний, `j` средний,
/// `k` внутренний.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Computation> {
    check_compatible(a, b, Operation::Multiply)?;

    let (rows, inner) = a.shape();
    let cols = b.n_cols();
    debug!("multiply: {rows}x{inner} * {inner}x{cols}");

    let mut result = Array2::<f64>::zeros((rows, cols));
    let mut steps = Vec::with_capacity(rows * cols * inner);

    for i in 0..rows {
        for j in 0..cols {
            for k in 0..inner {
                let lhs = a.get(i, k);
                let rhs = b.get(k, j);
                let product = lhs * rhs;
                let before = result[[i, j]];
                result[[i, j]] += product;

                let step = OperationStep::MultiplyAccumulate {
                    row: i,
                    col: j,
                    k,
                    lhs,
                    rhs,
                    product,
                    before,
                    after: result[[i, j]],
                };
                trace!("{step}");
                steps.push(step);
            }
        }
    }

    Ok(Computation {
        result: Matrix::from_array(result),
        steps,
    })
}

/// Транспонирование: `result[j][i] = A[i][j]`
#[must_use]
pub fn transpose(a: &Matrix) -> Matrix {
    debug!("transpose: {}x{}", a.n_rows(), a.n_cols());
    Matrix::from_array(a.array().t().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn m(rows: &[&[f64]]) -> Matrix {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        Matrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn add_and_subtract_cellwise() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);

        let sum = add(&a, &b).unwrap();
        assert_eq!(sum.result, m(&[&[6.0, 8.0], &[10.0, 12.0]]));
        assert_eq!(sum.steps.len(), 4);
        assert_eq!(sum.steps[1].to_string(), "C(1, 2) = 2 + 6 = 8");

        let diff = subtract(&a, &b).unwrap();
        assert_eq!(diff.result, m(&[&[-4.0, -4.0], &[-4.0, -4.0]]));
        assert_eq!(diff.steps[3].to_string(), "C(2, 2) = 4 - 8 = -4");
    }

    #[test]
    fn add_rejects_mismatched_shapes() {
        let err = validate(&[vec![1.0, 2.0]], &[vec![1.0], vec![2.0]], Operation::Add).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn validate_checks_emptiness_before_shape() {
        let err = validate(&[vec![1.0, 2.0], vec![1.0]], &[], Operation::Add).unwrap_err();
        assert_eq!(err, MatrixError::EmptyMatrix { operand: Operand::B });

        let err = validate(&[vec![1.0], vec![1.0, 2.0]], &[vec![1.0], vec![]], Operation::Add)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonRectangular);
        assert!(matches!(err, MatrixError::NonRectangular { operand: Operand::A, .. }));

        let err = validate(&[vec![1.0]], &[vec![1.0], vec![]], Operation::Add).unwrap_err();
        assert!(matches!(err, MatrixError::NonRectangular { operand: Operand::B, row: 1, .. }));

        let err = validate(&[vec![], vec![1.0]], &[vec![1.0]], Operation::Add).unwrap_err();
        assert!(matches!(err, MatrixError::NonRectangular { operand: Operand::A, row: 1, .. }));

        let err = validate(&[vec![1.0]], &[vec![], vec![1.0]], Operation::Add).unwrap_err();
        assert!(matches!(err, MatrixError::NonRectangular { operand: Operand::B, row: 1, .. }));

        let err = validate(&[vec![1.0]], &[vec![]], Operation::Add).unwrap_err();
        assert_eq!(err, MatrixError::EmptyMatrix { operand: Operand::B });
    }

    #[test]
    fn multiply_requires_inner_dimensions() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                operation: Operation::Multiply,
                left: (2, 3).into(),
                right: (2, 2).into(),
            }
        );
    }

    #[test]
    fn multiply_records_steps_in_accumulation_order() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let (result, steps) = multiply(&a, &b).unwrap().into_parts();

        assert_eq!(result, m(&[&[19.0, 22.0], &[43.0, 50.0]]));
        assert_eq!(steps.len(), 8);

        let order: Vec<(usize, usize, usize)> = steps
            .iter()
            .map(|step| match *step {
                OperationStep::MultiplyAccumulate { row, col, k, .. } => (row, col, k),
                OperationStep::Elementwise { .. } => panic!("unexpected step {step}"),
            })
            .collect();
        assert_eq!(
            order,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, 1, 1),
                (1, 0, 0),
                (1, 0, 1),
                (1, 1, 0),
                (1, 1, 1),
            ]
        );

        assert_eq!(
            steps[1],
            OperationStep::MultiplyAccumulate {
                row: 0,
                col: 0,
                k: 1,
                lhs: 2.0,
                rhs: 7.0,
                product: 14.0,
                before: 5.0,
                after: 19.0,
            }
        );
    }

    #[test]
    fn multiply_non_square() {
        let a = m(&[&[1.0, 2.0, 3.0]]);
        let b = m(&[&[1.0], &[1.0], &[1.0]]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.result, m(&[&[6.0]]));
        assert_eq!(c.steps.len(), 3);
    }

    #[test]
    fn transpose_swaps_axes() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(t, m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]));
        assert_eq!(transpose(&t), a);
    }
}
