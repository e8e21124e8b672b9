// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZAT ERP shell: desktop and web entry point. Mobile builds enter through
// `zaterp_app::start_app` instead.

fn main() {
    zaterp_app::run();
}
