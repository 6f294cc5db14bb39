//! Small linear-algebra kernel: addition, subtraction, multiplication,
//! transposition, 2x2/3x3 determinants and inverses, and Gaussian
//! elimination, with a step log for the operations that narrate their work.

#[macro_use]
mod macros;

pub mod error;
pub mod matrix;
pub mod input;
pub mod narration;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use error::{ErrorKind, MatrixError, Result};
pub use matrix::{Computation, Matrix, MatrixKernel, Operation, OperationStep};
