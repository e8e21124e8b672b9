// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZAT ERP shell: core types, configuration, and the in-page message protocol
// shared across all crates.

pub mod config;
pub mod error;
pub mod history;
pub mod message;
pub mod types;

pub use config::ShellConfig;
pub use error::ShellError;
pub use message::BridgeMessage;
pub use types::*;
