// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the shell.

use thiserror::Error;

/// Top-level error type for all shell operations.
#[derive(Debug, Error)]
pub enum ShellError {
    // -- Configuration --
    #[error("invalid remote address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Host runtime --
    #[error("embedded view error: {0}")]
    WebView(String),

    #[error("event loop error: {0}")]
    EventLoop(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShellError>;
