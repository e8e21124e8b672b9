// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Web target: the remote app in a single full-viewport frame. No back
// handling and no print bridge; the browser provides both.

use dioxus::prelude::*;

use zaterp_shell::FrameEntry;

pub fn launch(entry: FrameEntry) {
    tracing::info!(src = %entry.src, "mounting frame");
    dioxus::LaunchBuilder::new().with_context(entry).launch(app);
}

fn app() -> Element {
    let entry = use_context::<FrameEntry>();

    rsx! {
        iframe {
            src: "{entry.src}",
            style: entry.style(),
            width: "100%",
            height: "100%",
            "frameborder": "0",
            "allowfullscreen": "true",
        }
    }
}
