// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory platform bridge and view used by the unit tests.

use std::cell::{Cell, RefCell};

use zaterp_bridge::traits::*;
use zaterp_core::config::ExitPrompt;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

use crate::navigation::EmbeddedView;

/// Records every capability call. `answer == None` makes the dialog fail.
pub struct FakeBridge {
    answer: Option<bool>,
    fail_print: bool,
    insets: SafeAreaInsets,
    scheme: Option<ColorScheme>,
    printed: RefCell<Vec<String>>,
    prompts_seen: RefCell<Vec<ExitPrompt>>,
    pub prompts: Cell<usize>,
    pub exits: Cell<usize>,
    pub display_queries: Cell<usize>,
}

impl FakeBridge {
    pub fn answering(confirm: bool) -> Self {
        Self::with_answer(Some(confirm))
    }

    pub fn without_dialog() -> Self {
        Self::with_answer(None)
    }

    fn with_answer(answer: Option<bool>) -> Self {
        Self {
            answer,
            fail_print: false,
            insets: SafeAreaInsets::default(),
            scheme: None,
            printed: RefCell::new(Vec::new()),
            prompts_seen: RefCell::new(Vec::new()),
            prompts: Cell::new(0),
            exits: Cell::new(0),
            display_queries: Cell::new(0),
        }
    }

    pub fn with_failing_print(mut self) -> Self {
        self.fail_print = true;
        self
    }

    pub fn with_display(mut self, insets: SafeAreaInsets, scheme: Option<ColorScheme>) -> Self {
        self.insets = insets;
        self.scheme = scheme;
        self
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed.borrow().clone()
    }

    pub fn last_prompt(&self) -> Option<ExitPrompt> {
        self.prompts_seen.borrow().last().cloned()
    }
}

impl PlatformBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl NativePrint for FakeBridge {
    fn print_html(&self, html: &str) -> Result<()> {
        if self.fail_print {
            return Err(ShellError::Bridge("printer offline".into()));
        }
        self.printed.borrow_mut().push(html.to_owned());
        Ok(())
    }
}

impl NativeDialog for FakeBridge {
    fn confirm(&self, prompt: &ExitPrompt) -> Result<bool> {
        self.prompts.set(self.prompts.get() + 1);
        self.prompts_seen.borrow_mut().push(prompt.clone());
        self.answer.ok_or(ShellError::PlatformUnavailable)
    }
}

impl NativeProcess for FakeBridge {
    fn exit_app(&self) -> Result<()> {
        self.exits.set(self.exits.get() + 1);
        Ok(())
    }
}

impl NativeDisplay for FakeBridge {
    fn safe_area_insets(&self) -> Result<SafeAreaInsets> {
        self.display_queries.set(self.display_queries.get() + 1);
        Ok(self.insets)
    }

    fn color_scheme(&self) -> Result<ColorScheme> {
        self.display_queries.set(self.display_queries.get() + 1);
        self.scheme.ok_or(ShellError::PlatformUnavailable)
    }
}

/// Embedded view that counts back requests.
#[derive(Default)]
pub struct FakeView {
    pub backs: usize,
    fail: bool,
}

impl FakeView {
    pub fn failing() -> Self {
        Self {
            backs: 0,
            fail: true,
        }
    }
}

impl EmbeddedView for FakeView {
    fn go_back(&mut self) -> Result<()> {
        if self.fail {
            return Err(ShellError::WebView("view detached".into()));
        }
        self.backs += 1;
        Ok(())
    }
}
