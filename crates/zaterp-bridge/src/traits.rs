// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The shell only ever talks to the platform through these traits, so the
// navigation and print logic can be exercised against in-memory fakes.

use zaterp_core::config::ExitPrompt;
use zaterp_core::error::Result;
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativePrint + NativeDialog + NativeProcess + NativeDisplay {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;
}

/// Render markup through the OS print dialog.
pub trait NativePrint {
    /// Open the native print dialog for the given HTML.
    /// Returns Ok(()) once the dialog was presented; the user may still cancel,
    /// and that outcome is not reported.
    fn print_html(&self, html: &str) -> Result<()>;
}

/// Modal two-button confirmation.
pub trait NativeDialog {
    /// Show the prompt and block until the user answers.
    /// Returns true when the confirm button was chosen.
    fn confirm(&self, prompt: &ExitPrompt) -> Result<bool>;
}

/// Process lifecycle.
pub trait NativeProcess {
    /// Terminate the application. Real implementations do not return on
    /// success.
    fn exit_app(&self) -> Result<()>;
}

/// Display environment of the hosting window.
pub trait NativeDisplay {
    /// Insets of the system UI (status bar, notch) in logical pixels.
    fn safe_area_insets(&self) -> Result<SafeAreaInsets>;

    /// Current light/dark appearance.
    fn color_scheme(&self) -> Result<ColorScheme>;
}
