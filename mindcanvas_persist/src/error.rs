// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mindcanvas_elements::StoreError;
use thiserror::Error;

/// Result alias for persistence operations.
pub type Result<T> = core::result::Result<T, PersistError>;

/// Why a save, load, or clear failed.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage medium could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not valid JSON for a canvas snapshot.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record decoded but does not describe a valid canvas.
    #[error("invalid canvas record: {0}")]
    Invalid(#[from] StoreError),

    /// The saved view is unusable (non-positive or non-finite scale).
    #[error("invalid saved view: scale {scale}")]
    InvalidView {
        /// The rejected scale.
        scale: f64,
    },

    /// The backend cannot be used at all.
    #[error("storage backend unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause.
        reason: String,
    },
}
