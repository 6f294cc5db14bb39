//! Внутренние макросы крейта

/// Проверка размера n x n с досрочным возвратом `InvalidShape`
macro_rules! ensure_shape {
    ($matrix:expr, $size:expr) => {
        if $matrix.shape() != ($size, $size) {
            return Err($crate::error::MatrixError::invalid_shape($size, $matrix.shape()));
        }
    };
}
