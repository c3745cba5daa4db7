//! Content-addressed hashing of canonical prototypes.
//!
//! Downstream database code keys stored objects by their canonical
//! form. The engine guarantees reproducibility of the canonical value;
//! this helper additionally fixes one reproducible textual encoding
//! (canonical JSON, SHA-256, lowercase hex). Two prototypes produced by
//! comparisons with the same tolerance and strategy hash identically
//! exactly when they are the same value.

use clex_core::{ClexError, ErrorInfo};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Computes the canonical content key of a serializable value.
pub fn canonical_key<T: Serialize>(value: &T) -> Result<String, ClexError> {
    let bytes = serde_json::to_vec(value)
        .map_err(|err| ClexError::Serde(ErrorInfo::new("canonical-key", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
