//! Error types for catalog operations.
//!
//! Each layer has its own error enum; layers translate rather than
//! compare shared sentinel values. `is_not_found()` accessors give
//! callers a stable way to test for the absence case.

use thiserror::Error;

/// Input validation errors. Messages name the offending field and rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    RequiredFieldMissing { field: &'static str },

    #[error("field '{field}' cannot be blank")]
    FieldBlank { field: &'static str },

    #[error("field '{field}' exceeds max length ({max})")]
    FieldTooLong { field: &'static str, max: usize },
}

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("goods {goods_id} not found in project {project_id}")]
    NotFound { project_id: i64, goods_id: i64 },

    #[error("query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("connection pool unavailable: {reason}")]
    PoolUnavailable { reason: String },
}

impl StoreError {
    /// Whether this error means "no matching row", as opposed to an
    /// infrastructure fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Cache layer errors.
///
/// These never escape the data-access layer: every cache failure
/// degrades to a store round-trip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("cache operation failed: {reason}")]
    OperationFailed { reason: String },
}

/// Errors surfaced at the data-access boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GoodsError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid project ID")]
    InvalidProjectId,

    #[error("invalid goods ID")]
    InvalidGoodsId,

    #[error("project does not exist")]
    ProjectNotExist,

    #[error("goods not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(StoreError),
}

impl GoodsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GoodsError::NotFound)
    }
}

/// Store-level not-found becomes the domain-level `NotFound`; every
/// other store fault is wrapped untranslated.
impl From<StoreError> for GoodsError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            GoodsError::NotFound
        } else {
            GoodsError::Store(err)
        }
    }
}

/// Result type alias for data-access operations.
pub type GoodsResult<T> = Result<T, GoodsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_translates_to_domain_not_found() {
        let err: GoodsError = StoreError::NotFound {
            project_id: 1,
            goods_id: 2,
        }
        .into();
        assert_eq!(err, GoodsError::NotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_fault_is_wrapped_not_translated() {
        let fault = StoreError::QueryFailed {
            reason: "connection reset".to_string(),
        };
        let err: GoodsError = fault.clone().into();
        assert_eq!(err, GoodsError::Store(fault));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_validation_error_names_field_and_rule() {
        let err = ValidationError::FieldTooLong {
            field: "name",
            max: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_validation_wraps_into_goods_error() {
        let err: GoodsError = ValidationError::FieldBlank { field: "name" }.into();
        assert!(matches!(err, GoodsError::Validation(_)));
        assert!(err.to_string().contains("cannot be blank"));
    }
}
