// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell configuration. Built at composition time and injected; never persisted.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ShellError};
use crate::types::{ColorScheme, Rgba};

/// The remote web application loaded on every platform.
pub const REMOTE_URL: &str = "https://zaterp.com/login";

/// Markup printed when the page sends the bare `print` signal.
pub const FALLBACK_PRINT_MARKUP: &str = "<h1>No HTML captured from page.</h1>";

/// Shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Address loaded by the frame or embedded view.
    pub remote_url: String,
    /// Title of the host window (desktop) or task (mobile).
    pub window_title: String,
    /// Wording of the exit confirmation dialog.
    pub exit_prompt: ExitPrompt,
    /// Markup printed for the bare `print` signal.
    pub fallback_print_markup: String,
    /// Background colours per colour scheme.
    pub palette: ThemePalette,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            remote_url: REMOTE_URL.into(),
            window_title: "ZAT ERP".into(),
            exit_prompt: ExitPrompt::default(),
            fallback_print_markup: FALLBACK_PRINT_MARKUP.into(),
            palette: ThemePalette::default(),
        }
    }
}

impl ShellConfig {
    /// Check that the configuration can be used to start the shell.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.remote_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShellError::InvalidConfig(format!(
                "remote_url must be http(s), got scheme {:?}",
                url.scheme()
            )));
        }
        if self.exit_prompt.confirm_label.trim().is_empty()
            || self.exit_prompt.cancel_label.trim().is_empty()
        {
            return Err(ShellError::InvalidConfig(
                "exit prompt buttons need non-empty labels".into(),
            ));
        }
        if self.fallback_print_markup.trim().is_empty() {
            return Err(ShellError::InvalidConfig(
                "fallback_print_markup must not be blank".into(),
            ));
        }
        Ok(())
    }
}

/// Two-option exit confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub confirm_label: String,
}

impl Default for ExitPrompt {
    fn default() -> Self {
        Self {
            title: "Hold on!".into(),
            message: "Do you want to exit ZAT ERP?".into(),
            cancel_label: "Cancel".into(),
            confirm_label: "YES".into(),
        }
    }
}

/// Background colours behind the embedded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub light: Rgba,
    pub dark: Rgba,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            light: Rgba::rgb(0xff, 0xff, 0xff),
            dark: Rgba::rgb(0x15, 0x17, 0x18),
        }
    }
}

impl ThemePalette {
    pub fn background(&self, scheme: ColorScheme) -> Rgba {
        match scheme {
            ColorScheme::Light => self.light,
            ColorScheme::Dark => self.dark,
        }
    }
}
