//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Тип матрицы и журнал шагов
//! - Операции над матрицами
//! - Операции фиксированного размера (2x2, 3x3)
//! - Ядро для слоя представления

mod types;
pub mod operations;
pub mod square;
pub mod kernel;
pub mod fixtures;

pub use types::{Computation, Matrix, Operation, OperationStep};
pub use kernel::MatrixKernel;
pub use square::{RowOperation, RowReduction};
pub use fixtures::{initialize_matrices, MatrixKind};
