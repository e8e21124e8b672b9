// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Trait methods call into the hosting Activity
// through JNI.
//
// ## Architecture notes
//
// Queries that complete synchronously (insets, resources, finishing the task)
// are done with plain JNI calls here.
//
// HTML printing and the confirmation dialog need UI-thread callbacks
// (WebViewClient.onPageFinished, DialogInterface.OnClickListener) that cannot
// be expressed as single JNI calls. They go through two small host classes,
// `ShellPrint` and `ShellDialogs`, shipped with the Android project and loaded
// through the Activity's class loader; see `ANDROID-INTEGRATION.md`.
//
// The hardware back button arrives through
// `Java_com_zaterp_shell_MainActivity_onBackPressedNative`, which feeds
// `crate::back_press::dispatch`.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JClass, JObject, JString, JValue};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean};
use jni::{JNIEnv, JavaVM};

use zaterp_core::config::ExitPrompt;
use zaterp_core::error::{Result, ShellError};
use zaterp_core::types::{ColorScheme, SafeAreaInsets};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Host helper that renders HTML in an off-screen WebView and hands it to
/// `PrintManager`.
const PRINT_HELPER_CLASS: &str = "com.zaterp.shell.ShellPrint";

/// Host helper that shows a blocking two-button `AlertDialog`.
const DIALOG_HELPER_CLASS: &str = "com.zaterp.shell.ShellDialogs";

/// `Configuration.UI_MODE_NIGHT_MASK` / `UI_MODE_NIGHT_YES`.
const UI_MODE_NIGHT_MASK: i32 = 0x30;
const UI_MODE_NIGHT_YES: i32 = 0x20;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, taken from the NDK context on first use.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| ShellError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| ShellError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ptr = ndk_context::android_context().context();
    if ptr.is_null() {
        return Err(ShellError::Bridge(
            "Android context is null; activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map any `jni::errors::Error` into `ShellError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> ShellError {
    ShellError::Bridge(format!("{context}: {e}"))
}

/// Load an application class through the Activity's class loader.
///
/// `FindClass` on a natively attached thread only sees the system class
/// loader, which does not contain the app's own classes.
fn load_app_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
    name: &str,
) -> Result<JClass<'local>> {
    let loader: JObject = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| jni_err("getClassLoader", e))?
        .l()
        .map_err(|e| jni_err("getClassLoader->l", e))?;

    let j_name: JString = env
        .new_string(name)
        .map_err(|e| jni_err("new_string(class name)", e))?;

    let class: JObject = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| jni_err(&format!("loadClass({name})"), e))?
        .l()
        .map_err(|e| jni_err("loadClass->l", e))?;

    Ok(JClass::from(class))
}

/// `activity.getResources()`.
fn resources<'local>(env: &mut JNIEnv<'local>, activity: &JObject<'_>) -> Result<JObject<'local>> {
    env.call_method(activity, "getResources", "()Landroid/content/res/Resources;", &[])
        .map_err(|e| jni_err("getResources", e))?
        .l()
        .map_err(|e| jni_err("getResources->l", e))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the shell's platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily when a
    /// trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativePrint: ShellPrint helper (WebView + PrintManager)
// ---------------------------------------------------------------------------

impl NativePrint for AndroidBridge {
    /// Hand the markup to `ShellPrint.printHtml(Activity, String)`.
    ///
    /// The helper posts to the UI thread, loads the markup into an off-screen
    /// WebView and starts a `PrintManager` job once the page has rendered.
    /// Returns as soon as the job has been scheduled.
    fn print_html(&self, html: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(bytes = html.len(), "Android: dispatching HTML print job");

        let helper = load_app_class(&mut env, &activity, PRINT_HELPER_CLASS)?;
        let j_html: JString = env
            .new_string(html)
            .map_err(|e| jni_err("new_string(html)", e))?;

        env.call_static_method(
            &helper,
            "printHtml",
            "(Landroid/app/Activity;Ljava/lang/String;)V",
            &[JValue::Object(&activity), JValue::Object(&j_html)],
        )
        .map_err(|e| jni_err("ShellPrint.printHtml", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeDialog: ShellDialogs helper (AlertDialog)
// ---------------------------------------------------------------------------

impl NativeDialog for AndroidBridge {
    /// Show the exit prompt through `ShellDialogs.confirm`.
    ///
    /// The helper shows the dialog on the UI thread and blocks the calling
    /// (event-loop) thread until a button is pressed. It must not be called
    /// from the UI thread itself.
    fn confirm(&self, prompt: &ExitPrompt) -> Result<bool> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let helper = load_app_class(&mut env, &activity, DIALOG_HELPER_CLASS)?;

        let mut string = |s: &str| {
            env.new_string(s)
                .map_err(|e| jni_err("new_string(prompt)", e))
        };
        let title = string(&prompt.title)?;
        let message = string(&prompt.message)?;
        let cancel = string(&prompt.cancel_label)?;
        let confirm = string(&prompt.confirm_label)?;

        let confirmed = env
            .call_static_method(
                &helper,
                "confirm",
                "(Landroid/app/Activity;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Z",
                &[
                    JValue::Object(&activity),
                    JValue::Object(&title),
                    JValue::Object(&message),
                    JValue::Object(&cancel),
                    JValue::Object(&confirm),
                ],
            )
            .map_err(|e| jni_err("ShellDialogs.confirm", e))?
            .z()
            .map_err(|e| jni_err("ShellDialogs.confirm->z", e))?;

        tracing::debug!(confirmed, "Android: exit prompt answered");
        Ok(confirmed)
    }
}

// ---------------------------------------------------------------------------
// NativeProcess: Activity.finishAffinity
// ---------------------------------------------------------------------------

impl NativeProcess for AndroidBridge {
    fn exit_app(&self) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!("Android: finishing task on user confirmation");

        env.call_method(&activity, "finishAffinity", "()V", &[])
            .map_err(|e| jni_err("finishAffinity", e))?;

        std::process::exit(0)
    }
}

// ---------------------------------------------------------------------------
// NativeDisplay: WindowInsets and Configuration.uiMode
// ---------------------------------------------------------------------------

impl NativeDisplay for AndroidBridge {
    /// Read the decor view's root window insets and convert them from
    /// physical pixels to density-independent pixels.
    ///
    /// Before the decor view is attached `getRootWindowInsets()` is null;
    /// that is reported as zero insets rather than an error.
    fn safe_area_insets(&self) -> Result<SafeAreaInsets> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let window: JObject = env
            .call_method(&activity, "getWindow", "()Landroid/view/Window;", &[])
            .map_err(|e| jni_err("getWindow", e))?
            .l()
            .map_err(|e| jni_err("getWindow->l", e))?;

        let decor: JObject = env
            .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
            .map_err(|e| jni_err("getDecorView", e))?
            .l()
            .map_err(|e| jni_err("getDecorView->l", e))?;

        let insets: JObject = env
            .call_method(&decor, "getRootWindowInsets", "()Landroid/view/WindowInsets;", &[])
            .map_err(|e| jni_err("getRootWindowInsets", e))?
            .l()
            .map_err(|e| jni_err("getRootWindowInsets->l", e))?;

        if insets.is_null() {
            tracing::debug!("Android: root window insets not available yet");
            return Ok(SafeAreaInsets::default());
        }

        let mut edge = |method: &str| -> Result<i32> {
            env.call_method(&insets, method, "()I", &[])
                .map_err(|e| jni_err(method, e))?
                .i()
                .map_err(|e| jni_err(method, e))
        };
        let top = edge("getSystemWindowInsetTop")?;
        let right = edge("getSystemWindowInsetRight")?;
        let bottom = edge("getSystemWindowInsetBottom")?;
        let left = edge("getSystemWindowInsetLeft")?;

        let res = resources(&mut env, &activity)?;
        let metrics: JObject = env
            .call_method(&res, "getDisplayMetrics", "()Landroid/util/DisplayMetrics;", &[])
            .map_err(|e| jni_err("getDisplayMetrics", e))?
            .l()
            .map_err(|e| jni_err("getDisplayMetrics->l", e))?;
        let density = env
            .get_field(&metrics, "density", "F")
            .map_err(|e| jni_err("DisplayMetrics.density", e))?
            .f()
            .map_err(|e| jni_err("DisplayMetrics.density->f", e))?;
        let density = if density > 0.0 { f64::from(density) } else { 1.0 };

        let insets = SafeAreaInsets {
            top: f64::from(top) / density,
            right: f64::from(right) / density,
            bottom: f64::from(bottom) / density,
            left: f64::from(left) / density,
        };
        tracing::debug!(?insets, density, "Android: safe-area insets");
        Ok(insets)
    }

    fn color_scheme(&self) -> Result<ColorScheme> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let res = resources(&mut env, &activity)?;
        let configuration: JObject = env
            .call_method(&res, "getConfiguration", "()Landroid/content/res/Configuration;", &[])
            .map_err(|e| jni_err("getConfiguration", e))?
            .l()
            .map_err(|e| jni_err("getConfiguration->l", e))?;

        let ui_mode = env
            .get_field(&configuration, "uiMode", "I")
            .map_err(|e| jni_err("Configuration.uiMode", e))?
            .i()
            .map_err(|e| jni_err("Configuration.uiMode->i", e))?;

        Ok(scheme_from_ui_mode(ui_mode))
    }
}

fn scheme_from_ui_mode(ui_mode: i32) -> ColorScheme {
    if ui_mode & UI_MODE_NIGHT_MASK == UI_MODE_NIGHT_YES {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

// ---------------------------------------------------------------------------
// Hardware back button
// ---------------------------------------------------------------------------

/// Called from `MainActivity.onBackPressed()`.
///
/// Returns `true` when a subscribed screen handled the press. On `false` the
/// Activity falls back to `super.onBackPressed()`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_zaterp_shell_MainActivity_onBackPressedNative(
    _env: JNIEnv,
    _activity: JObject,
) -> jboolean {
    if crate::back_press::dispatch() {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}
