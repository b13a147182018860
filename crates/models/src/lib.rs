pub mod errors;
pub mod db;
pub mod validation;
pub mod recipe;
pub mod rating;
pub mod comment;

#[cfg(test)]
mod tests;
