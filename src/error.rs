// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input was rejected before anything was written.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The underlying SQLite store failed. The request did not apply, but the
    /// store can be used again once the medium recovers.
    #[error("store unavailable: {0}")]
    Storage(rusqlite::Error),

    /// A persisted row could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl LedgerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    /// Short machine-readable tag used by the JSON transport.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "validation",
            LedgerError::NotFound { .. } => "notFound",
            LedgerError::Storage(_) => "storage",
            LedgerError::Corrupt(_) => "corrupt",
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::FromSqlConversionFailure(idx, _, err) => {
                LedgerError::Corrupt(format!("column {}: {}", idx, err))
            }
            value => {
                tracing::error!("storage error: {}", value);
                LedgerError::Storage(value)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
