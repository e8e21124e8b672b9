// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZAT ERP shell: application host.
//
// Initialises logging, validates the configuration, picks the entry view for
// the current platform, and hands over to either the native browser host
// (tao + wry) or, on the web, a single full-viewport frame.

#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(not(target_arch = "wasm32"))]
mod host;

use zaterp_core::ShellConfig;
use zaterp_core::types::Platform;
use zaterp_shell::{EntryView, select_entry_view};

/// Start the shell. Returns only if start-up fails.
pub fn run() {
    init_logging();

    let platform = Platform::current();
    tracing::info!(%platform, "ZAT ERP shell starting");

    let config = ShellConfig::default();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid shell configuration");
        return;
    }

    if let Err(e) = launch(platform, config) {
        tracing::error!(error = %e, "shell terminated");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn launch(platform: Platform, config: ShellConfig) -> zaterp_core::error::Result<()> {
    let bridge = zaterp_bridge::platform_bridge();
    tracing::info!(bridge = bridge.platform_name(), "platform bridge ready");

    match select_entry_view(platform, &config, Some(bridge.as_ref())) {
        EntryView::Native(entry) => host::run(config, entry, bridge),
        EntryView::Frame(_) => Err(zaterp_core::ShellError::PlatformUnavailable),
    }
}

#[cfg(target_arch = "wasm32")]
fn launch(platform: Platform, config: ShellConfig) -> zaterp_core::error::Result<()> {
    match select_entry_view(platform, &config, None) {
        EntryView::Frame(entry) => {
            frame::launch(entry);
            Ok(())
        }
        EntryView::Native(_) => Err(zaterp_core::ShellError::PlatformUnavailable),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

// Browser console through the logger dioxus ships; it must own the global
// subscriber before `launch` runs.
#[cfg(target_arch = "wasm32")]
fn init_logging() {
    let _ = dioxus::logger::init(tracing::Level::INFO);
}

// ---------------------------------------------------------------------------
// Mobile entry points
// ---------------------------------------------------------------------------

#[cfg(any(target_os = "android", target_os = "ios"))]
fn stop_unwind<F: FnOnce() -> T, T>(f: F) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(t) => t,
        Err(_) => {
            tracing::error!("panic in shell; aborting");
            std::process::abort()
        }
    }
}

#[cfg(any(target_os = "android", target_os = "ios"))]
fn _start_app() {
    stop_unwind(run);
}

/// Entry point called by the generated mobile project.
#[cfg(any(target_os = "android", target_os = "ios"))]
#[unsafe(no_mangle)]
#[inline(never)]
pub extern "C" fn start_app() {
    #[cfg(target_os = "android")]
    {
        tao::android_binding!(com_zaterp, shell, WryActivity, wry::android_setup, _start_app, tao);
        wry::android_binding!(com_zaterp, shell, wry);
    }
    #[cfg(target_os = "ios")]
    _start_app()
}
