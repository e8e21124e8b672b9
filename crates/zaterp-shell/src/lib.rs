// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZAT ERP shell: the three collaborations wired by the host: back-button
// navigation, the print bridge, and platform selection. Everything here is
// platform-neutral and talks to the device only through `zaterp-bridge`
// traits.

pub mod navigation;
pub mod platform;
pub mod print_bridge;

#[cfg(test)]
pub(crate) mod fake;

pub use navigation::{BackPressOutcome, EmbeddedView, NavigationController, NavigationState};
pub use platform::{ContentFrame, EntryView, FrameEntry, NativeEntry, select_entry_view};
pub use print_bridge::{PRINT_BRIDGE_SCRIPT, PrintBridge, PrintOutcome};
