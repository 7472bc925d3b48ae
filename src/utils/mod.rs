// src/utils/mod.rs
pub mod error;
pub mod logging;
#[cfg(test)]
pub mod testing;

pub use error::AppError; // Re-export main error type for convenience
