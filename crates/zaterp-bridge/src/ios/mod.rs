// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). All UIKit interactions
// require the main thread; methods return `ShellError::Bridge` when called
// off-main.
//
// iOS has no hardware back button, so nothing ever dispatches a back press
// here and the confirmation dialog is never needed. `confirm` reports
// `PlatformUnavailable` for that reason.
//
// Unsafe code in this module is limited to objc2 message sends to documented
// UIKit selectors.

#![cfg(target_os = "ios")]

use objc2::rc::{Allocated, Retained};
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{MainThreadMarker, msg_send};
use objc2_foundation::NSString;
use objc2_ui_kit::{UIApplication, UIEdgeInsets, UIPrintInteractionController};

use zaterp_core::config::ExitPrompt;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

use crate::traits::*;

/// `UIUserInterfaceStyleDark`.
const USER_INTERFACE_STYLE_DARK: isize = 2;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| ShellError::Bridge("must be called from the main thread".into()))
}

/// The application's key window, if one is attached.
fn key_window(mtm: MainThreadMarker) -> Option<Retained<AnyObject>> {
    let app = UIApplication::sharedApplication(mtm);
    // SAFETY: `keyWindow` is a documented UIApplication property; the marker
    // guarantees we are on the main thread.
    unsafe { msg_send![&app, keyWindow] }
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// iOS implementation of the shell's platform bridge.
pub struct IosBridge;

impl IosBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

// ---------------------------------------------------------------------------
// NativePrint -- UIPrintInteractionController + UIMarkupTextPrintFormatter
// ---------------------------------------------------------------------------

impl NativePrint for IosBridge {
    /// Present the system print sheet for the given markup.
    ///
    /// Fire-and-forget: once the sheet is up the user drives the rest of the
    /// interaction and the outcome is not reported back.
    fn print_html(&self, html: &str) -> Result<()> {
        let mtm = require_main_thread()?;

        tracing::info!(bytes = html.len(), "iOS: presenting print sheet for markup");

        let class = AnyClass::get(c"UIMarkupTextPrintFormatter")
            .ok_or_else(|| ShellError::Bridge("UIMarkupTextPrintFormatter missing".into()))?;
        let markup = NSString::from_str(html);

        // SAFETY: alloc/initWithMarkupText: is the designated initialiser of
        // UIMarkupTextPrintFormatter and takes an NSString.
        let formatter: Option<Retained<AnyObject>> = unsafe {
            let allocated: Allocated<AnyObject> = msg_send![class, alloc];
            msg_send![allocated, initWithMarkupText: &*markup]
        };
        let formatter = formatter
            .ok_or_else(|| ShellError::Bridge("print formatter init returned nil".into()))?;

        let controller = UIPrintInteractionController::sharedPrintController(mtm);

        // SAFETY: `setPrintFormatter:` accepts any UIPrintFormatter subclass;
        // main-thread execution is guaranteed by the marker above.
        unsafe {
            let _: () = msg_send![&controller, setPrintFormatter: &*formatter];
        }

        // SAFETY: documented UIKit method, main thread as above.
        let presented = unsafe { controller.presentAnimated_completionHandler(true, None) };

        if presented {
            Ok(())
        } else {
            Err(ShellError::Bridge(
                "UIPrintInteractionController refused to present".into(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// NativeDialog / NativeProcess
// ---------------------------------------------------------------------------

impl NativeDialog for IosBridge {
    fn confirm(&self, _prompt: &ExitPrompt) -> Result<bool> {
        tracing::debug!("NativeDialog::confirm called on iOS, which has no back button");
        Err(ShellError::PlatformUnavailable)
    }
}

impl NativeProcess for IosBridge {
    fn exit_app(&self) -> Result<()> {
        tracing::info!("iOS: exiting on user confirmation");
        std::process::exit(0)
    }
}

// ---------------------------------------------------------------------------
// NativeDisplay -- UIWindow.safeAreaInsets, UITraitCollection
// ---------------------------------------------------------------------------

impl NativeDisplay for IosBridge {
    fn safe_area_insets(&self) -> Result<SafeAreaInsets> {
        let mtm = require_main_thread()?;
        let Some(window) = key_window(mtm) else {
            tracing::debug!("iOS: no key window yet, reporting zero insets");
            return Ok(SafeAreaInsets::default());
        };

        // SAFETY: `safeAreaInsets` is a UIView property returning UIEdgeInsets
        // by value; main thread is guaranteed above.
        let insets: UIEdgeInsets = unsafe { msg_send![&window, safeAreaInsets] };

        Ok(SafeAreaInsets {
            top: insets.top,
            right: insets.right,
            bottom: insets.bottom,
            left: insets.left,
        })
    }

    fn color_scheme(&self) -> Result<ColorScheme> {
        let _mtm = require_main_thread()?;
        let class = AnyClass::get(c"UITraitCollection")
            .ok_or_else(|| ShellError::Bridge("UITraitCollection missing".into()))?;

        // SAFETY: `currentTraitCollection` (class property, iOS 13+) and
        // `userInterfaceStyle` (NSInteger) are documented UIKit API.
        let style: isize = unsafe {
            let traits: Retained<AnyObject> = msg_send![class, currentTraitCollection];
            msg_send![&traits, userInterfaceStyle]
        };

        Ok(if style == USER_INTERFACE_STYLE_DARK {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        })
    }
}
