// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Intentbridge.

use thiserror::Error;

/// Top-level error type for platform and host operations.
///
/// Argument validation has its own type ([`crate::types::ArgumentError`]);
/// everything here happens after a call has been accepted.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    /// A Java exception raised while building or launching an intent.
    /// Carries the exception message verbatim.
    #[error("{0}")]
    Platform(String),

    #[error("no activity can handle the intent")]
    NoHandler,

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Host / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
