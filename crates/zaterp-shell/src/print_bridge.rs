// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print bridge: page-side override of `window.print` plus the host-side
// handler that turns inbound messages into native print jobs.
//
// The page cannot reach the native print service itself. The injected script
// serialises the current document and posts it over the view's message
// channel; the host classifies each message (see `zaterp_core::message`) and
// prints captured markup, or the fallback markup for the bare `print` signal.
// Everything else is dropped.

use tracing::{debug, info, warn};

use zaterp_bridge::traits::NativePrint;
use zaterp_core::config::ShellConfig;
use zaterp_core::message::BridgeMessage;

/// Injected into every page at load, before page scripts run.
///
/// Posts `{"type":"print","html":...}` with the document's outerHTML, or
/// `{"type":"print","error":...}` if serialising throws. The override is
/// installed again on `load` so that it wins over a page script that assigns
/// its own `window.print`.
pub const PRINT_BRIDGE_SCRIPT: &str = r#"
(function() {
    if (window.__zaterpPrintBridge) {
        return;
    }
    window.__zaterpPrintBridge = true;

    function post(payload) {
        window.ipc.postMessage(JSON.stringify(payload));
    }

    function printPage() {
        try {
            var html = document.documentElement.outerHTML;
            post({ type: "print", html: html });
        } catch (e) {
            post({ type: "print", error: String(e) });
        }
    }

    function install() {
        window.print = printPage;
    }

    install();
    window.addEventListener("load", install);
})();
"#;

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The native print dialog was invoked.
    Printed { bytes: usize, fallback: bool },
    /// The native print capability reported an error. Not surfaced to the
    /// user.
    NativeFailed,
    /// Not a usable print message; nothing was done.
    Ignored { kind: &'static str },
}

/// Host side of the print bridge.
#[derive(Debug, Clone)]
pub struct PrintBridge {
    fallback_markup: String,
}

impl PrintBridge {
    pub fn new(fallback_markup: impl Into<String>) -> Self {
        Self {
            fallback_markup: fallback_markup.into(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.fallback_print_markup.clone())
    }

    /// The page-side script to inject.
    pub fn script(&self) -> &'static str {
        PRINT_BRIDGE_SCRIPT
    }

    /// Markup to print for a classified message, if any.
    pub fn markup_for<'a>(&'a self, message: &'a BridgeMessage) -> Option<&'a str> {
        match message {
            BridgeMessage::PrintMarkup { html } => Some(html.as_str()),
            BridgeMessage::PrintSignal => Some(self.fallback_markup.as_str()),
            BridgeMessage::PrintFailed { .. } | BridgeMessage::Unrecognized(_) => None,
        }
    }

    /// Handle one raw payload from the message channel. Blocks until the
    /// native print call returns.
    pub fn handle_message<P>(&self, raw: &str, printer: &P) -> PrintOutcome
    where
        P: NativePrint + ?Sized,
    {
        let message = BridgeMessage::parse(raw);

        if let BridgeMessage::PrintFailed { error } = &message {
            warn!(error = %error, "page could not serialise itself for printing");
        }

        let Some(markup) = self.markup_for(&message) else {
            debug!(kind = message.kind(), bytes = raw.len(), "bridge message ignored");
            return PrintOutcome::Ignored {
                kind: message.kind(),
            };
        };

        let fallback = matches!(message, BridgeMessage::PrintSignal);
        info!(bytes = markup.len(), fallback, "printing page");

        match printer.print_html(markup) {
            Ok(()) => PrintOutcome::Printed {
                bytes: markup.len(),
                fallback,
            },
            Err(e) => {
                warn!(error = %e, "native print failed");
                PrintOutcome::NativeFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBridge;
    use zaterp_core::config::FALLBACK_PRINT_MARKUP;

    fn bridge() -> PrintBridge {
        PrintBridge::from_config(&ShellConfig::default())
    }

    #[test]
    fn captured_markup_is_printed() {
        let printer = FakeBridge::answering(false);
        let outcome = bridge().handle_message(r#"{"type":"print","html":"<p>x</p>"}"#, &printer);

        assert_eq!(
            outcome,
            PrintOutcome::Printed {
                bytes: 8,
                fallback: false
            }
        );
        assert_eq!(printer.printed(), vec!["<p>x</p>".to_string()]);
    }

    #[test]
    fn blank_markup_is_not_printed() {
        let printer = FakeBridge::answering(false);
        for raw in [r#"{"type":"print","html":""}"#, r#"{"type":"print","html":"  \n "}"#] {
            let outcome = bridge().handle_message(raw, &printer);
            assert_eq!(outcome, PrintOutcome::Ignored { kind: "blank-markup" });
        }
        assert!(printer.printed().is_empty());
    }

    #[test]
    fn bare_signal_prints_fallback() {
        let printer = FakeBridge::answering(false);
        let outcome = bridge().handle_message("print", &printer);

        assert!(matches!(outcome, PrintOutcome::Printed { fallback: true, .. }));
        assert_eq!(
            printer.printed(),
            vec!["<h1>No HTML captured from page.</h1>".to_string()]
        );
        assert_eq!(printer.printed()[0], FALLBACK_PRINT_MARKUP);
    }

    #[test]
    fn garbage_does_nothing() {
        let printer = FakeBridge::answering(false);
        for raw in ["hello", "{\"type\":", r#"{"type":"scan"}"#, "\"print\""] {
            let outcome = bridge().handle_message(raw, &printer);
            assert!(matches!(outcome, PrintOutcome::Ignored { .. }), "{raw}");
        }
        assert!(printer.printed().is_empty());
    }

    #[test]
    fn serialisation_error_is_swallowed() {
        let printer = FakeBridge::answering(false);
        let outcome =
            bridge().handle_message(r#"{"type":"print","error":"DOMException"}"#, &printer);
        assert_eq!(outcome, PrintOutcome::Ignored { kind: "print-failed" });
        assert!(printer.printed().is_empty());
    }

    #[test]
    fn native_failure_is_absorbed() {
        let printer = FakeBridge::answering(false).with_failing_print();
        let outcome = bridge().handle_message("print", &printer);
        assert_eq!(outcome, PrintOutcome::NativeFailed);
    }

    #[test]
    fn script_reinstalls_override_after_page_scripts() {
        let script = bridge().script();
        let install = script.find("install();").unwrap();
        let on_load = script.find(r#"window.addEventListener("load", install)"#).unwrap();
        assert!(install < on_load);
    }

    #[test]
    fn markup_with_cut_emoji_is_still_printed() {
        let printer = FakeBridge::answering(false);
        let outcome = bridge().handle_message(
            r#"{"type":"print","html":"<td>Caf\u00e9 \ud83d</td>"}"#,
            &printer,
        );

        assert!(matches!(outcome, PrintOutcome::Printed { fallback: false, .. }));
        assert_eq!(printer.printed(), vec!["<td>Caf\u{e9} \u{FFFD}</td>".to_string()]);
    }

    #[test]
    fn custom_fallback_markup_is_used() {
        let printer = FakeBridge::answering(false);
        PrintBridge::new("<p>nothing to print</p>").handle_message("print", &printer);
        assert_eq!(printer.printed(), vec!["<p>nothing to print</p>".to_string()]);
    }

    #[test]
    fn script_overrides_print_and_posts_both_shapes() {
        let script = bridge().script();
        assert!(script.contains("window.print = printPage"));
        assert!(script.contains("document.documentElement.outerHTML"));
        assert!(script.contains(r#"post({ type: "print", html: html })"#));
        assert!(script.contains(r#"post({ type: "print", error: String(e) })"#));
        assert!(script.contains("window.ipc.postMessage(JSON.stringify(payload))"));
    }
}
