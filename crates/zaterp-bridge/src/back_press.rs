// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hardware back-press event source.
//
// Platform code calls `dispatch()` when the back button is pressed; screens
// register handlers with `subscribe()` and hold the returned guard for as long
// as they want events. Handlers run most-recent-first until one reports the
// press as handled. If none does, `dispatch()` returns false and the platform
// performs its default action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

type Handler = Arc<dyn Fn() -> bool + Send + Sync>;

static HANDLERS: Mutex<Vec<(u64, Handler)>> = Mutex::new(Vec::new());
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Register a back-press handler. The handler returns true when it handled
/// the press. Dropping the returned guard unregisters it.
#[must_use = "the handler is removed as soon as the subscription is dropped"]
pub fn subscribe<F>(handler: F) -> BackPressSubscription
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let mut handlers = HANDLERS.lock().unwrap_or_else(PoisonError::into_inner);
    handlers.push((id, Arc::new(handler)));
    debug!(id, active = handlers.len(), "back-press handler subscribed");
    BackPressSubscription { id }
}

/// Deliver one back press. Returns true if a handler consumed it.
pub fn dispatch() -> bool {
    // Snapshot so handlers may subscribe or unsubscribe without deadlocking.
    let snapshot: Vec<Handler> = HANDLERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .rev()
        .map(|(_, h)| Arc::clone(h))
        .collect();

    let handled = snapshot.iter().any(|handler| handler());
    trace!(handled, candidates = snapshot.len(), "back press dispatched");
    handled
}

/// Number of live subscriptions.
pub fn subscriber_count() -> usize {
    HANDLERS.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// Scoped registration of a back-press handler.
#[derive(Debug)]
pub struct BackPressSubscription {
    id: u64,
}

impl Drop for BackPressSubscription {
    fn drop(&mut self) {
        let mut handlers = HANDLERS.lock().unwrap_or_else(PoisonError::into_inner);
        handlers.retain(|(id, _)| *id != self.id);
        debug!(id = self.id, active = handlers.len(), "back-press handler released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    // The registry is process-global; tests touching it run under this lock.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> std::sync::MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn no_subscribers_means_default_action() {
        let _guard = serial();
        assert!(!dispatch());
    }

    #[test]
    fn most_recent_handler_wins() {
        let _guard = serial();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&first);
        let _a = subscribe(move || {
            f.fetch_add(1, Ordering::SeqCst);
            true
        });
        let s = Arc::clone(&second);
        let _b = subscribe(move || {
            s.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert!(dispatch());
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unhandled_press_falls_through_to_older_handler() {
        let _guard = serial();
        let older = Arc::new(AtomicUsize::new(0));
        let o = Arc::clone(&older);
        let _a = subscribe(move || {
            o.fetch_add(1, Ordering::SeqCst);
            true
        });
        let _b = subscribe(|| false);

        assert!(dispatch());
        assert_eq!(older.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_the_guard_unsubscribes() {
        let _guard = serial();
        let before = subscriber_count();
        let sub = subscribe(|| true);
        assert_eq!(subscriber_count(), before + 1);
        assert!(dispatch());
        drop(sub);
        assert_eq!(subscriber_count(), before);
        assert!(!dispatch());
    }

    #[test]
    fn handler_may_resubscribe_during_dispatch() {
        let _guard = serial();
        let slot: Arc<Mutex<Option<BackPressSubscription>>> = Arc::new(Mutex::new(None));
        let s = Arc::clone(&slot);
        let outer = subscribe(move || {
            // Replacing the inner subscription releases the previous one.
            *s.lock().unwrap() = Some(subscribe(|| true));
            true
        });
        assert!(dispatch());
        assert!(dispatch());
        assert_eq!(subscriber_count(), 2);
        drop(outer);
        slot.lock().unwrap().take();
        assert_eq!(subscriber_count(), 0);
    }
}
