//! Service layer providing the recipe catalog operations on top of models.
//! - Separates business rules (validation order, not-found policy) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod runtime;
pub mod recipe;
#[cfg(test)]
pub mod test_support;
