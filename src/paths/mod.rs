pub mod floyd;
pub mod matrix;
pub mod precision;
