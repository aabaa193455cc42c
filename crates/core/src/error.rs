//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// ownership, stock). Transport concerns (HTTP status codes) belong to the
/// routing layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A role or ownership check failed.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The caller presented no credential, or an invalid one.
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed id, invalid action string, missing required field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A requested quantity exceeds the product's current stock.
    #[error("not enough stock for product: {product}")]
    InsufficientStock { product: String },

    /// The conditional stock decrement lost a race against a competing order.
    #[error("failed to secure stock for product: {product}")]
    StockConflict { product: String },

    /// Duplicate storefront, duplicate email, or conflicting re-decision.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage-layer failure (lock poisoning, backend error).
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn insufficient_stock(product: impl Into<String>) -> Self {
        Self::InsufficientStock {
            product: product.into(),
        }
    }

    pub fn stock_conflict(product: impl Into<String>) -> Self {
        Self::StockConflict {
            product: product.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
