//! Offset/limit window for recipe listing.
//!
//! Inputs arrive signed so that a negative `skip` is reported as a
//! validation error instead of a query-string parse failure.

use serde::Deserialize;

use crate::errors::ServiceError;

pub const DEFAULT_LIMIT: i64 = 100;

/// Offset/limit parameters
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ListWindow {
    /// rows to skip, `>= 0`
    #[serde(default)]
    pub skip: i64,
    /// rows to return, `> 0`
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 { DEFAULT_LIMIT }

impl ListWindow {
    /// Check bounds and convert to `(offset, limit)`.
    pub fn validate(self) -> Result<(u64, u64), ServiceError> {
        if self.skip < 0 {
            return Err(ServiceError::Validation("skip must be >= 0".into()));
        }
        if self.limit <= 0 {
            return Err(ServiceError::Validation("limit must be > 0".into()));
        }
        Ok((self.skip as u64, self.limit as u64))
    }
}

impl Default for ListWindow {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}
