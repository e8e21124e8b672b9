// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native host: one tao window holding one wry view of the remote app.
//
// All screen state (history, navigation state, the view itself) lives on the
// event-loop thread. The three event sources (hardware back press, page
// loads, page messages) only forward into the loop through an
// `EventLoopProxy`, so every decision runs one at a time on that thread.

use std::sync::Mutex;

use tao::event::{ElementState, Event, KeyEvent, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::keyboard::KeyCode;
use tao::window::{Theme, Window, WindowBuilder};
use tracing::{debug, error, info, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use zaterp_bridge::back_press;
use zaterp_bridge::traits::PlatformBridge;
use zaterp_core::ShellConfig;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::history::HistoryTracker;
use zaterp_core::types::ColorScheme;
use zaterp_shell::{
    ContentFrame, EmbeddedView, NativeEntry, NavigationController, NavigationState, PrintBridge,
};

/// Events forwarded into the loop.
#[derive(Debug, Clone)]
enum ShellEvent {
    BackPressed,
    PageLoaded(String),
    Message(String),
}

/// The embedded view plus the history derived from its page loads.
struct NativeScreen {
    webview: WebView,
    history: HistoryTracker,
}

impl EmbeddedView for NativeScreen {
    fn go_back(&mut self) -> Result<()> {
        self.webview
            .evaluate_script("history.back()")
            .map_err(webview_err)?;
        self.history.begin_back();
        Ok(())
    }
}

fn webview_err(e: wry::Error) -> ShellError {
    ShellError::WebView(e.to_string())
}

fn bounds(frame: ContentFrame) -> Rect {
    Rect {
        position: LogicalPosition::new(frame.x, frame.y).into(),
        // Zero-sized bounds trip scale-factor assertions on some backends.
        size: LogicalSize::new(frame.width.max(1.0), frame.height.max(1.0)).into(),
    }
}

fn logical_size(window: &Window) -> (f64, f64) {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    (size.width, size.height)
}

fn scheme_of(theme: Theme) -> ColorScheme {
    match theme {
        Theme::Dark => ColorScheme::Dark,
        _ => ColorScheme::Light,
    }
}

/// Run the shell until the window closes or the user confirms exit.
pub fn run(
    config: ShellConfig,
    mut entry: NativeEntry,
    bridge: Box<dyn PlatformBridge>,
) -> Result<()> {
    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(config.window_title.as_str())
        .build(&event_loop)
        .map_err(|e| ShellError::EventLoop(format!("failed to create window: {e}")))?;

    // Desktop bridges cannot report the scheme; the window can.
    if cfg!(not(any(target_os = "android", target_os = "ios"))) {
        entry.recolor(scheme_of(window.theme()), &config.palette);
    }

    let print_bridge = PrintBridge::from_config(&config);
    let nav = NavigationController::new(config.exit_prompt.clone());

    let (width, height) = logical_size(&window);
    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();

    let mut builder = WebViewBuilder::new()
        .with_url(entry.url.as_str())
        .with_background_color(entry.background.into())
        .with_initialization_script(print_bridge.script())
        .with_bounds(bounds(entry.content_frame(width, height)))
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(ShellEvent::Message(request.into_body()));
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                let _ = load_proxy.send_event(ShellEvent::PageLoaded(url));
            }
        });

    // Mobile views always fill the window, so the top padding moves into
    // the page.
    if cfg!(any(target_os = "android", target_os = "ios")) {
        if let Some(script) = entry.padding_script() {
            builder = builder.with_initialization_script(&script);
        }
    }

    let webview = build_webview(builder, &window)?;
    info!(url = %entry.url, padding_top = entry.padding_top, "embedded view created");

    let back_proxy = Mutex::new(proxy);
    let mut subscription = Some(NavigationController::subscribe(move || {
        back_proxy
            .lock()
            .map(|p| p.send_event(ShellEvent::BackPressed).is_ok())
            .unwrap_or(false)
    }));

    let mut screen = NativeScreen {
        webview,
        history: HistoryTracker::new(),
    };
    let mut state = NavigationState::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                let (width, height) = logical_size(&window);
                if let Err(e) = screen
                    .webview
                    .set_bounds(bounds(entry.content_frame(width, height)))
                {
                    warn!(error = %e, "failed to resize embedded view");
                }
            }
            Event::WindowEvent {
                event: WindowEvent::ThemeChanged(theme),
                ..
            } => {
                entry.recolor(scheme_of(theme), &config.palette);
                if let Err(e) = screen.webview.set_background_color(entry.background.into()) {
                    warn!(error = %e, "failed to recolour embedded view");
                }
            }
            // Desktop stand-in for the hardware back button.
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: KeyCode::BrowserBack,
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                if !back_press::dispatch() {
                    debug!("back key with no subscriber");
                }
            }
            Event::UserEvent(ShellEvent::PageLoaded(url)) => {
                let change = screen.history.record_load(&url);
                nav.on_navigation_state_change(&mut state, &change);
            }
            Event::UserEvent(ShellEvent::Message(raw)) => {
                print_bridge.handle_message(&raw, bridge.as_ref());
            }
            Event::UserEvent(ShellEvent::BackPressed) => {
                let outcome = nav.on_back_press(&state, Some(&mut screen), bridge.as_ref());
                debug!(?outcome, depth = screen.history.depth(), "back press handled");
            }
            Event::LoopDestroyed => {
                // Unsubscribe before the view goes away.
                drop(subscription.take());
            }
            _ => {}
        }
    })
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn build_webview(builder: WebViewBuilder<'_>, window: &Window) -> Result<WebView> {
    use tao::platform::unix::WindowExtUnix;
    use wry::WebViewBuilderExtUnix;

    let vbox = window
        .default_vbox()
        .ok_or_else(|| ShellError::WebView("window has no GTK container".into()))?;
    builder.build_gtk(vbox).map_err(|e| {
        error!(error = %e, "failed to create embedded view");
        webview_err(e)
    })
}

#[cfg(any(target_os = "android", target_os = "ios"))]
fn build_webview(builder: WebViewBuilder<'_>, window: &Window) -> Result<WebView> {
    builder.build(window).map_err(|e| {
        error!(error = %e, "failed to create embedded view");
        webview_err(e)
    })
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn build_webview(builder: WebViewBuilder<'_>, window: &Window) -> Result<WebView> {
    builder.build_as_child(window).map_err(|e| {
        error!(error = %e, "failed to create embedded view");
        webview_err(e)
    })
}
