// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-page message protocol (embedded page -> host).
//
// The page posts one string per message over the view's message channel.
// Two encodings exist:
//
//   {"type":"print","html":"<html>...</html>"}   captured markup
//   {"type":"print","error":"TypeError: ..."}    serialisation threw
//   print                                        bare signal, no markup
//
// Everything arriving here is untrusted. Classification never fails: any
// payload that does not match one of the shapes above becomes
// `BridgeMessage::Unrecognized` with the reason attached.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

/// Value of the `type` field for print requests.
pub const PRINT_MESSAGE_TYPE: &str = "print";

/// Raw payload of the bare print signal (not JSON).
pub const BARE_PRINT_SIGNAL: &str = "print";

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// Markup captured by the injected print override. Never blank.
    PrintMarkup { html: String },
    /// The override ran but serialising the page threw.
    PrintFailed { error: String },
    /// Bare `print` signal.
    PrintSignal,
    Unrecognized(Unrecognized),
}

/// Why a payload was not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unrecognized {
    /// Not JSON and not the bare signal.
    NotJson,
    /// JSON, but not an object with `"type":"print"`.
    UnknownType,
    /// A print object with neither a string `html` nor a string `error`.
    MissingMarkup,
    /// A print object whose `html` is empty or whitespace.
    BlankMarkup,
}

/// Wire shape of structured messages. Fields are kept as raw JSON values so
/// that each one can be shape-checked on its own.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    html: Value,
    #[serde(default)]
    error: Value,
}

impl BridgeMessage {
    /// Classify a raw payload from the message channel.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(_) if raw == BARE_PRINT_SIGNAL => Self::PrintSignal,
            Err(e) => {
                // `JSON.stringify` emits unpaired surrogates as `\uXXXX`
                // escapes, which serde_json refuses.
                let repaired = replace_lone_surrogates(raw)
                    .and_then(|fixed| serde_json::from_str::<Value>(&fixed).ok());
                match repaired {
                    Some(value) => {
                        debug!("unpaired surrogates replaced in bridge message");
                        Self::from_value(value)
                    }
                    None => {
                        trace!(error = %e, "bridge message is not JSON");
                        Self::Unrecognized(Unrecognized::NotJson)
                    }
                }
            }
        }
    }

    fn from_value(value: Value) -> Self {
        // Derived struct impls also accept sequences; only objects are messages.
        if !value.is_object() {
            return Self::Unrecognized(Unrecognized::UnknownType);
        }
        let Ok(envelope) = serde_json::from_value::<Envelope>(value) else {
            return Self::Unrecognized(Unrecognized::UnknownType);
        };
        if envelope.kind.as_str() != Some(PRINT_MESSAGE_TYPE) {
            return Self::Unrecognized(Unrecognized::UnknownType);
        }
        match (envelope.html, envelope.error) {
            (Value::String(html), _) if html.trim_matches(is_js_whitespace).is_empty() => {
                Self::Unrecognized(Unrecognized::BlankMarkup)
            }
            (Value::String(html), _) => Self::PrintMarkup { html },
            (_, Value::String(error)) => Self::PrintFailed { error },
            _ => Self::Unrecognized(Unrecognized::MissingMarkup),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PrintMarkup { .. } => "print-markup",
            Self::PrintFailed { .. } => "print-failed",
            Self::PrintSignal => "print-signal",
            Self::Unrecognized(Unrecognized::NotJson) => "not-json",
            Self::Unrecognized(Unrecognized::UnknownType) => "unknown-type",
            Self::Unrecognized(Unrecognized::MissingMarkup) => "missing-markup",
            Self::Unrecognized(Unrecognized::BlankMarkup) => "blank-markup",
        }
    }
}

/// Whitespace and line terminators as stripped by `String.prototype.trim`.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Rewrite every `\uXXXX` escape that encodes an unpaired UTF-16 surrogate as
/// `\uFFFD`. Returns `None` when there is nothing to rewrite.
fn replace_lone_surrogates(raw: &str) -> Option<String> {
    const HIGH: std::ops::Range<u16> = 0xD800..0xDC00;
    const LOW: std::ops::Range<u16> = 0xDC00..0xE000;

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) != Some(&b'u') {
            // Any other escape, including `\\`, is two bytes long.
            i += 2;
            continue;
        }
        let Some(unit) = escaped_unit(bytes, i) else {
            i += 2;
            continue;
        };
        let paired = HIGH.contains(&unit)
            && escaped_unit(bytes, i + 6).is_some_and(|next| LOW.contains(&next));
        if paired {
            i += 12;
        } else if HIGH.contains(&unit) || LOW.contains(&unit) {
            out.push_str(&raw[copied..i]);
            out.push_str("\\uFFFD");
            i += 6;
            copied = i;
        } else {
            i += 6;
        }
    }

    if copied == 0 {
        return None;
    }
    out.push_str(&raw[copied..]);
    Some(out)
}

/// The code unit of a `\uXXXX` escape starting at `at`.
fn escaped_unit(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let digits = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_markup_is_kept_verbatim() {
        let msg = BridgeMessage::parse(r#"{"type":"print","html":"  <p>x</p>\n"}"#);
        assert_eq!(
            msg,
            BridgeMessage::PrintMarkup {
                html: "  <p>x</p>\n".into()
            }
        );
    }

    #[test]
    fn empty_and_whitespace_markup_is_blank() {
        for raw in [
            r#"{"type":"print","html":""}"#,
            r#"{"type":"print","html":"   \n\t"}"#,
        ] {
            assert_eq!(
                BridgeMessage::parse(raw),
                BridgeMessage::Unrecognized(Unrecognized::BlankMarkup)
            );
        }
    }

    #[test]
    fn blank_markup_wins_over_error_field() {
        let msg = BridgeMessage::parse(r#"{"type":"print","html":" ","error":"boom"}"#);
        assert_eq!(msg, BridgeMessage::Unrecognized(Unrecognized::BlankMarkup));
    }

    #[test]
    fn serialisation_errors_are_carried() {
        let msg = BridgeMessage::parse(r#"{"type":"print","error":"SecurityError: denied"}"#);
        assert_eq!(
            msg,
            BridgeMessage::PrintFailed {
                error: "SecurityError: denied".into()
            }
        );
    }

    #[test]
    fn bare_signal_is_recognised_only_unquoted() {
        assert_eq!(BridgeMessage::parse("print"), BridgeMessage::PrintSignal);
        // JSON string "print" parses fine, so it is not the bare signal.
        assert_eq!(
            BridgeMessage::parse(r#""print""#),
            BridgeMessage::Unrecognized(Unrecognized::UnknownType)
        );
        assert_eq!(
            BridgeMessage::parse(" print"),
            BridgeMessage::Unrecognized(Unrecognized::NotJson)
        );
        assert_eq!(
            BridgeMessage::parse("PRINT"),
            BridgeMessage::Unrecognized(Unrecognized::NotJson)
        );
    }

    #[test]
    fn wrong_shapes_are_unrecognised() {
        let cases = [
            (r#"{"type":"navigate","html":"<p>x</p>"}"#, Unrecognized::UnknownType),
            (r#"{"html":"<p>x</p>"}"#, Unrecognized::UnknownType),
            (r#"{"type":1,"html":"<p>x</p>"}"#, Unrecognized::UnknownType),
            (r#"["print","<p>x</p>"]"#, Unrecognized::UnknownType),
            ("null", Unrecognized::UnknownType),
            ("42", Unrecognized::UnknownType),
            (r#"{"type":"print"}"#, Unrecognized::MissingMarkup),
            (r#"{"type":"print","html":7}"#, Unrecognized::MissingMarkup),
            ("{not json", Unrecognized::NotJson),
            ("", Unrecognized::NotJson),
        ];
        for (raw, reason) in cases {
            assert_eq!(
                BridgeMessage::parse(raw),
                BridgeMessage::Unrecognized(reason),
                "payload {raw:?}"
            );
        }
    }

    #[test]
    fn unpaired_surrogates_become_replacement_characters() {
        let msg = BridgeMessage::parse(r#"{"type":"print","html":"<p>caf\ud83d</p>"}"#);
        assert_eq!(
            msg,
            BridgeMessage::PrintMarkup {
                html: "<p>caf\u{FFFD}</p>".into()
            }
        );

        let msg = BridgeMessage::parse(r#"{"type":"print","html":"\udc00a\uD83D"}"#);
        assert_eq!(
            msg,
            BridgeMessage::PrintMarkup {
                html: "\u{FFFD}a\u{FFFD}".into()
            }
        );
    }

    #[test]
    fn surrogate_pairs_and_escaped_backslashes_are_untouched() {
        let msg = BridgeMessage::parse(r#"{"type":"print","html":"\ud83d\ude00 \\ud83d"}"#);
        assert_eq!(
            msg,
            BridgeMessage::PrintMarkup {
                html: "\u{1F600} \\ud83d".into()
            }
        );
        assert_eq!(replace_lone_surrogates(r#"{"html":"\\ud83d \u00e9"}"#), None);
    }

    #[test]
    fn surrogate_repair_does_not_rescue_broken_json() {
        assert_eq!(
            BridgeMessage::parse(r#"{"type":"print","html":"\ud83d"#),
            BridgeMessage::Unrecognized(Unrecognized::NotJson)
        );
    }

    #[test]
    fn blankness_follows_javascript_trim() {
        // BOM and ideographic space are trimmed by the page's `trim()`.
        for raw in [
            r#"{"type":"print","html":"\ufeff"}"#,
            r#"{"type":"print","html":"\u3000\u2028"}"#,
        ] {
            assert_eq!(
                BridgeMessage::parse(raw),
                BridgeMessage::Unrecognized(Unrecognized::BlankMarkup),
                "payload {raw:?}"
            );
        }
        // NEL is not whitespace there, so it is printable markup.
        assert_eq!(
            BridgeMessage::parse(r#"{"type":"print","html":"\u0085"}"#),
            BridgeMessage::PrintMarkup {
                html: "\u{0085}".into()
            }
        );
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let msg = BridgeMessage::parse(r#"{"type":"print","html":"<b>ok</b>","v":2}"#);
        assert_eq!(msg.kind(), "print-markup");
    }
}
