//! Recipe module: three-layer architecture (domain, repository, service).
//!
//! Ratings and comments are owned by a recipe and only reachable through it.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::RecipeService;
