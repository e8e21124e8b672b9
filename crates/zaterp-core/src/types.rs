// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the shell.

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// The platform the shell is running on.
///
/// Chosen once at composition time and passed explicitly to everything that
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Browser target (wasm). Renders a full-viewport frame only.
    Web,
    Android,
    Ios,
    /// Desktop development host (Linux, macOS, Windows).
    Desktop,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::Web
        }
        #[cfg(target_os = "android")]
        {
            Self::Android
        }
        #[cfg(target_os = "ios")]
        {
            Self::Ios
        }
        #[cfg(not(any(target_arch = "wasm32", target_os = "android", target_os = "ios")))]
        {
            Self::Desktop
        }
    }

    /// Whether the shell hosts a native embedded browser view (and with it the
    /// back-button and print bridge wiring).
    pub fn is_native(self) -> bool {
        !matches!(self, Self::Web)
    }

    /// Short lowercase identifier, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Safe-area insets in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Light or dark appearance reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// An opaque-by-default RGBA colour. Serialised as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ShellError> {
        let invalid = || ShellError::InvalidConfig(format!("not a hex colour: {s:?}"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|n| n * 0x11)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(invalid()),
        }
    }

    /// CSS hex notation. The alpha byte is only emitted when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Rgba> for (u8, u8, u8, u8) {
    fn from(c: Rgba) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ShellError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A navigation-state change reported by the embedded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Whether backward history exists after this navigation.
    pub can_go_back: bool,
    /// The address the view is now showing, when known.
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse_in_all_lengths() {
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::from_hex("#151718").unwrap(), Rgba::rgb(0x15, 0x17, 0x18));
        let translucent = Rgba::from_hex("#00000080").unwrap();
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn malformed_colours_are_rejected() {
        for bad in ["fff", "#ff", "#gggggg", "#12345", "#ééé"] {
            assert!(Rgba::from_hex(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn colours_serialise_as_hex_strings() {
        let json = serde_json::to_string(&Rgba::rgb(0x15, 0x17, 0x18)).unwrap();
        assert_eq!(json, "\"#151718\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::rgb(0x15, 0x17, 0x18));
    }

    #[test]
    fn only_web_is_non_native() {
        assert!(!Platform::Web.is_native());
        assert!(Platform::Android.is_native());
        assert!(Platform::Ios.is_native());
        assert!(Platform::Desktop.is_native());
    }

    #[cfg(not(any(target_arch = "wasm32", target_os = "android", target_os = "ios")))]
    #[test]
    fn host_builds_report_desktop() {
        assert_eq!(Platform::current(), Platform::Desktop);
    }
}
