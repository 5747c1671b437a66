use thiserror::Error;

use crate::model::GenericError;

/// Errors surfaced by the cart persister.
///
/// Storage implementations keep returning boxed errors at the trait seam;
/// the persister wraps those so callers can still tell a missing token from
/// a broken payload.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart with token {token} was not found")]
    TokenNotFound { token: String },

    #[error("cart payload could not be deserialized: {reason}")]
    DeserializeFailed { reason: String },

    #[error("cart could not be serialized: {reason}")]
    SerializeFailed { reason: String },

    #[error("cart storage operation failed: {0}")]
    Storage(GenericError),
}
