// src/edgar/mod.rs
pub mod client;
pub mod locator;
pub mod models;
pub mod universe;

pub use client::{DocumentSource, EdgarClient, EdgarConfig};
pub use locator::FilingLocator;
pub use models::{CompanyRecord, FormType, Quarter};
