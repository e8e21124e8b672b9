// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Back-button navigation and the exit confirmation.
//
// `NavigationState` is owned by the host screen and written only by
// navigation-state changes; the back-press handler receives it by reference.
// Every back press is reported as handled: either the view went back, or the
// user was asked whether to leave.

use tracing::{debug, error, info, warn};

use zaterp_bridge::back_press::{self, BackPressSubscription};
use zaterp_bridge::traits::{NativeDialog, NativeProcess};
use zaterp_core::config::ExitPrompt;
use zaterp_core::error::Result;
use zaterp_core::types::NavigationEvent;

/// Whether the embedded view has backward history.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    can_go_back: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }
}

/// The embedded browser view, as seen by the navigation controller.
pub trait EmbeddedView {
    /// Ask the view to navigate one entry back in its history.
    fn go_back(&mut self) -> Result<()>;
}

/// What a back press resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackPressOutcome {
    /// The view was asked to go back.
    NavigatedBack,
    /// The user confirmed; the process is being terminated.
    ExitConfirmed,
    /// The user dismissed the prompt. Nothing changed.
    ExitCancelled,
    /// The prompt could not be shown. Treated like a cancel.
    PromptUnavailable,
}

impl BackPressOutcome {
    /// Whether the platform's default back action must be suppressed.
    /// Every outcome suppresses it; the shell never lets the OS close the
    /// screen without asking.
    pub const fn handled(self) -> bool {
        true
    }
}

/// Decides what a hardware back press does.
#[derive(Debug, Clone)]
pub struct NavigationController {
    prompt: ExitPrompt,
}

impl NavigationController {
    pub fn new(prompt: ExitPrompt) -> Self {
        Self { prompt }
    }

    /// Subscribe a back-press handler for the lifetime of the returned guard.
    ///
    /// The handler should only forward the press to wherever the screen's
    /// state lives (typically the UI event loop) and report whether that
    /// succeeded; the decision itself is made in [`Self::on_back_press`].
    pub fn subscribe<F>(on_press: F) -> BackPressSubscription
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        back_press::subscribe(on_press)
    }

    /// Record a navigation-state change reported by the embedded view. The
    /// reported value replaces whatever was there before.
    pub fn on_navigation_state_change(&self, state: &mut NavigationState, event: &NavigationEvent) {
        if state.can_go_back != event.can_go_back {
            debug!(
                can_go_back = event.can_go_back,
                url = event.url.as_deref().unwrap_or(""),
                "navigation state changed"
            );
        }
        state.can_go_back = event.can_go_back;
    }

    /// Handle one hardware back press.
    ///
    /// A missing view handle, or a view that fails to go back, is treated as
    /// "cannot go back" and leads to the exit prompt.
    pub fn on_back_press<V, B>(
        &self,
        state: &NavigationState,
        view: Option<&mut V>,
        bridge: &B,
    ) -> BackPressOutcome
    where
        V: EmbeddedView + ?Sized,
        B: NativeDialog + NativeProcess + ?Sized,
    {
        if state.can_go_back() {
            match view {
                Some(view) => match view.go_back() {
                    Ok(()) => {
                        debug!("back press: navigating back");
                        return BackPressOutcome::NavigatedBack;
                    }
                    Err(e) => warn!(error = %e, "back navigation failed, asking to exit"),
                },
                None => debug!("back press: no view handle, asking to exit"),
            }
        }

        match bridge.confirm(&self.prompt) {
            Ok(true) => {
                info!("exit confirmed by user");
                if let Err(e) = bridge.exit_app() {
                    error!(error = %e, "exit failed");
                }
                BackPressOutcome::ExitConfirmed
            }
            Ok(false) => {
                debug!("exit cancelled by user");
                BackPressOutcome::ExitCancelled
            }
            Err(e) => {
                warn!(error = %e, "exit prompt unavailable");
                BackPressOutcome::PromptUnavailable
            }
        }
    }
}
