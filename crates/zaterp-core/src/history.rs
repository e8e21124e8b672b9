// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Back-history tracking for embedded views that do not report `canGoBack`.
//
// The host sees one page-load per top-level navigation. A load is pushed as a
// new entry unless the host itself asked the view to go back and the load
// lands on the previous entry, in which case the top entry is popped.
// Same-document navigations (pushState, hash changes) produce no page-load and
// are invisible here.

use tracing::debug;

use crate::types::NavigationEvent;

/// Host-side model of the view's session history.
#[derive(Debug, Default, Clone)]
pub struct HistoryTracker {
    entries: Vec<String>,
    back_pending: bool,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that the host has asked the view to navigate backwards. The next
    /// recorded load is treated as the result of that request if it lands on
    /// the previous entry.
    pub fn begin_back(&mut self) {
        self.back_pending = true;
    }

    /// Record a finished page-load and return the resulting navigation state.
    ///
    /// A back request may land on a same-document entry and produce no load
    /// at all, so a pending request is dropped by the next load that does not
    /// match the previous entry, and that load counts as a forward one.
    pub fn record_load(&mut self, url: &str) -> NavigationEvent {
        let back_pending = std::mem::take(&mut self.back_pending);
        let previous = self
            .entries
            .len()
            .checked_sub(2)
            .and_then(|i| self.entries.get(i));

        if back_pending && previous.is_some_and(|prev| prev == url) {
            self.entries.pop();
        } else if self.entries.last().map(String::as_str) != Some(url) {
            if back_pending {
                debug!(url, "back request produced no page load");
            }
            self.entries.push(url.to_owned());
        }

        debug!(depth = self.entries.len(), url, "page load recorded");

        NavigationEvent {
            can_go_back: self.can_go_back(),
            url: Some(url.to_owned()),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}
