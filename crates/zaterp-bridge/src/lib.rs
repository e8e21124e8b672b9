// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! ZAT ERP shell: native platform bridge abstractions.
//!
//! Defines the capability traits the shell consumes (print, confirmation
//! dialog, process exit, safe-area insets, colour scheme) and picks the
//! implementation for the target OS. The hardware back-press source lives in
//! [`back_press`]; it is fed by the Android JNI entry point or by the desktop
//! host's key handling.

pub mod back_press;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android", target_arch = "wasm32")))]
pub mod desktop;

#[cfg(target_arch = "wasm32")]
pub mod stub;

pub use back_press::BackPressSubscription;
pub use traits::PlatformBridge;

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: UIKit through objc2 message sends.
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: JNI calls into the hosting Activity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android", target_arch = "wasm32")))]
    {
        // Desktop development host: rfd dialogs, no native print.
        Box::new(desktop::DesktopBridge)
    }
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(stub::StubBridge)
    }
}
