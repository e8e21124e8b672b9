// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop development bridge (Linux, macOS, Windows).
//
// Confirmation uses rfd message dialogs. There is no HTML print service
// reachable without a second browser engine, so printing reports
// `PlatformUnavailable`. The colour scheme comes from the host window, not
// from here.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use zaterp_core::config::ExitPrompt;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

use crate::traits::*;

/// Bridge used when running the shell on a desktop OS.
pub struct DesktopBridge;

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativePrint for DesktopBridge {
    fn print_html(&self, html: &str) -> Result<()> {
        tracing::warn!(bytes = html.len(), "NativePrint::print_html called on desktop bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeDialog for DesktopBridge {
    fn confirm(&self, prompt: &ExitPrompt) -> Result<bool> {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(prompt.title.as_str())
            .set_description(prompt.message.as_str())
            .set_buttons(MessageButtons::OkCancelCustom(
                prompt.confirm_label.clone(),
                prompt.cancel_label.clone(),
            ))
            .show();

        Ok(confirmed(&answer, prompt))
    }
}

/// Interpret a dialog result. Backends differ in whether custom buttons come
/// back as `Custom(label)` or as the plain `Ok`/`Cancel` variants.
fn confirmed(answer: &MessageDialogResult, prompt: &ExitPrompt) -> bool {
    match answer {
        MessageDialogResult::Ok | MessageDialogResult::Yes => true,
        MessageDialogResult::Custom(label) => *label == prompt.confirm_label,
        _ => false,
    }
}

impl NativeProcess for DesktopBridge {
    fn exit_app(&self) -> Result<()> {
        tracing::info!("exiting on user confirmation");
        std::process::exit(0)
    }
}

impl NativeDisplay for DesktopBridge {
    fn safe_area_insets(&self) -> Result<SafeAreaInsets> {
        // Desktop windows have no system overlays inside the client area.
        Ok(SafeAreaInsets::default())
    }

    fn color_scheme(&self) -> Result<ColorScheme> {
        Err(ShellError::PlatformUnavailable)
    }
}
