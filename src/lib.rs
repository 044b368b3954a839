pub mod cli;
pub mod domain;
pub mod models;
pub mod processing;
pub mod repository;
pub mod search;

/// Shared similarity threshold for company-name matching.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
