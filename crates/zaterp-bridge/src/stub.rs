// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for the web target, where the shell only renders a frame and no
// native capability exists.
//
// Every trait method returns `PlatformUnavailable`.

use zaterp_core::config::ExitPrompt;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

use crate::traits::*;

/// No-op bridge returned on the web target.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Web (stub)"
    }
}

impl NativePrint for StubBridge {
    fn print_html(&self, _html: &str) -> Result<()> {
        tracing::warn!("NativePrint::print_html called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeDialog for StubBridge {
    fn confirm(&self, _prompt: &ExitPrompt) -> Result<bool> {
        tracing::warn!("NativeDialog::confirm called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeProcess for StubBridge {
    fn exit_app(&self) -> Result<()> {
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeDisplay for StubBridge {
    fn safe_area_insets(&self) -> Result<SafeAreaInsets> {
        Err(ShellError::PlatformUnavailable)
    }

    fn color_scheme(&self) -> Result<ColorScheme> {
        Err(ShellError::PlatformUnavailable)
    }
}
