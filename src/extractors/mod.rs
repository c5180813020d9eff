// src/extractors/mod.rs
pub mod number;
pub mod overview;
pub mod ratios;
pub mod snapshot;
pub mod statements;
pub mod table;

// Re-export key extraction types for convenience
pub use snapshot::CompanySnapshot;
