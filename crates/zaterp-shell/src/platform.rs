// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform selection: which entry view the shell mounts.
//
// The web target gets a full-viewport frame and nothing else. Native
// platforms get the embedded browser view; only Android pads it by the
// safe-area top inset, since the iOS view already keeps clear of the status
// bar on its own.

use tracing::{debug, warn};

use zaterp_bridge::traits::PlatformBridge;
use zaterp_core::config::{ShellConfig, ThemePalette};
use zaterp_core::types::{ColorScheme, Platform, Rgba};

/// Inline style of the web frame: fixed, borderless, covering the viewport.
pub const FRAME_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
     border: none; margin: 0; padding: 0; overflow: hidden; z-index: 9999;";

/// The entry view chosen at mount time.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryView {
    Frame(FrameEntry),
    Native(NativeEntry),
}

/// Full-viewport frame for the web target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    pub src: String,
}

impl FrameEntry {
    pub fn style(&self) -> &'static str {
        FRAME_STYLE
    }
}

/// Layout of the native embedded browser view.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEntry {
    pub url: String,
    /// Extra space above the view, in logical pixels.
    pub padding_top: f64,
    pub scheme: ColorScheme,
    /// Fill behind and inside the view while content loads.
    pub background: Rgba,
}

/// Rectangle of the embedded view inside its window, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NativeEntry {
    /// Switch to another colour scheme (for hosts that learn the scheme only
    /// once their window exists).
    pub fn recolor(&mut self, scheme: ColorScheme, palette: &ThemePalette) {
        self.scheme = scheme;
        self.background = palette.background(scheme);
    }

    /// Style script that reproduces the top padding inside the page, for
    /// hosts whose view always fills the window. `None` when no padding is
    /// needed.
    pub fn padding_script(&self) -> Option<String> {
        if self.padding_top <= 0.0 {
            return None;
        }
        Some(format!(
            "(function() {{\n    var s = document.createElement('style');\n    \
             s.textContent = 'html {{ padding-top: {}px !important; background: {}; }}';\n    \
             document.documentElement.appendChild(s);\n}})();",
            self.padding_top,
            self.background.to_hex()
        ))
    }

    /// Where the view sits in a window of the given logical size.
    pub fn content_frame(&self, width: f64, height: f64) -> ContentFrame {
        let top = self.padding_top.clamp(0.0, height.max(0.0));
        ContentFrame {
            x: 0.0,
            y: top,
            width: width.max(0.0),
            height: (height - top).max(0.0),
        }
    }
}

/// Pick the entry view for `platform`.
///
/// `bridge` is only consulted on native platforms and may be `None` on the
/// web, where no native capability is constructed at all.
pub fn select_entry_view(
    platform: Platform,
    config: &ShellConfig,
    bridge: Option<&dyn PlatformBridge>,
) -> EntryView {
    if !platform.is_native() {
        debug!(%platform, "mounting full-viewport frame");
        return EntryView::Frame(FrameEntry {
            src: config.remote_url.clone(),
        });
    }

    let (padding_top, scheme) = match bridge {
        Some(bridge) => (padding_top(platform, bridge), color_scheme(bridge)),
        None => {
            warn!(%platform, "native platform without a bridge, using defaults");
            (0.0, ColorScheme::default())
        }
    };

    debug!(%platform, padding_top, ?scheme, "mounting embedded view");

    EntryView::Native(NativeEntry {
        url: config.remote_url.clone(),
        padding_top,
        scheme,
        background: config.palette.background(scheme),
    })
}

fn padding_top(platform: Platform, bridge: &dyn PlatformBridge) -> f64 {
    if platform != Platform::Android {
        return 0.0;
    }
    match bridge.safe_area_insets() {
        Ok(insets) => insets.top,
        Err(e) => {
            warn!(error = %e, "safe-area insets unavailable, no top padding");
            0.0
        }
    }
}

fn color_scheme(bridge: &dyn PlatformBridge) -> ColorScheme {
    bridge.color_scheme().unwrap_or_else(|e| {
        debug!(error = %e, "colour scheme unavailable, assuming light");
        ColorScheme::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBridge;
    use zaterp_core::types::SafeAreaInsets;

    fn notched() -> FakeBridge {
        FakeBridge::answering(false).with_display(
            SafeAreaInsets {
                top: 24.0,
                bottom: 16.0,
                ..SafeAreaInsets::default()
            },
            Some(ColorScheme::Dark),
        )
    }

    #[test]
    fn web_mounts_only_the_frame() {
        let config = ShellConfig::default();
        let view = select_entry_view(Platform::Web, &config, None);
        let EntryView::Frame(frame) = view else {
            panic!("web must mount a frame");
        };
        assert_eq!(frame.src, "https://zaterp.com/login");
        assert!(frame.style().contains("100vw"));
        assert!(frame.style().contains("border: none"));
    }

    #[test]
    fn web_never_consults_the_bridge() {
        let bridge = notched();
        select_entry_view(Platform::Web, &ShellConfig::default(), Some(&bridge));
        assert_eq!(bridge.display_queries.get(), 0);
    }

    #[test]
    fn android_is_padded_by_top_inset() {
        let bridge = notched();
        let EntryView::Native(entry) =
            select_entry_view(Platform::Android, &ShellConfig::default(), Some(&bridge))
        else {
            panic!("android must mount the embedded view");
        };
        assert_eq!(entry.url, "https://zaterp.com/login");
        assert_eq!(entry.padding_top, 24.0);
        assert_eq!(entry.scheme, ColorScheme::Dark);
        assert_eq!(entry.background, Rgba::rgb(0x15, 0x17, 0x18));
    }

    #[test]
    fn ios_and_desktop_are_not_padded() {
        for platform in [Platform::Ios, Platform::Desktop] {
            let bridge = notched();
            let EntryView::Native(entry) =
                select_entry_view(platform, &ShellConfig::default(), Some(&bridge))
            else {
                panic!("{platform} must mount the embedded view");
            };
            assert_eq!(entry.padding_top, 0.0, "{platform}");
        }
    }

    #[test]
    fn unknown_scheme_defaults_to_light() {
        let bridge = FakeBridge::answering(false);
        let EntryView::Native(entry) =
            select_entry_view(Platform::Android, &ShellConfig::default(), Some(&bridge))
        else {
            panic!("expected native entry");
        };
        assert_eq!(entry.scheme, ColorScheme::Light);
        assert_eq!(entry.background, Rgba::rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn recolor_follows_palette() {
        let config = ShellConfig::default();
        let EntryView::Native(mut entry) =
            select_entry_view(Platform::Desktop, &config, Some(&FakeBridge::answering(false)))
        else {
            panic!("expected native entry");
        };
        entry.recolor(ColorScheme::Dark, &config.palette);
        assert_eq!(entry.background, config.palette.dark);
    }

    #[test]
    fn content_frame_sits_below_padding() {
        let entry = NativeEntry {
            url: String::new(),
            padding_top: 24.0,
            scheme: ColorScheme::Light,
            background: Rgba::rgb(0xff, 0xff, 0xff),
        };
        let frame = entry.content_frame(360.0, 640.0);
        assert_eq!(
            frame,
            ContentFrame {
                x: 0.0,
                y: 24.0,
                width: 360.0,
                height: 616.0
            }
        );
        // Tiny windows never produce a negative height.
        assert_eq!(entry.content_frame(100.0, 10.0).height, 0.0);
    }

    #[test]
    fn padding_script_only_when_padded() {
        let mut entry = NativeEntry {
            url: String::new(),
            padding_top: 0.0,
            scheme: ColorScheme::Dark,
            background: Rgba::rgb(0x15, 0x17, 0x18),
        };
        assert_eq!(entry.padding_script(), None);

        entry.padding_top = 24.0;
        let script = entry.padding_script().unwrap();
        assert!(script.contains("padding-top: 24px !important"));
        assert!(script.contains(&entry.background.to_hex()));
    }
}
