// src/extractors/mod.rs
pub mod product;
pub mod prompt;

// Re-export key extraction types for convenience
pub use product::{with_header, ProductExtractor};
