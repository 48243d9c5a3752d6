// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android locale source via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. The locale is read from
// `java.util.Locale.getDefault()` in the ART runtime.
//
// ## Lifecycle wiring
//
// The hosting activity loads this library with `System.loadLibrary` (which
// runs `JNI_OnLoad` and records the `JavaVM`) and declares
//
// ```java
// private static native void nativeOnCreate();
// public static native char[] getLang();
// public static native char[] getCountry();
// public static native String getLocale();
// ```
//
// `nativeOnCreate` is called from `onCreate`, before SDL loads the engine
// libraries. Each call re-captures the locale (last write wins), so an
// activity recreated after a language change reports the new locale.
//
// The engine reads the locale back through the static `getLang()` and
// `getCountry()` methods (`()[C`), which these exports answer from the cell
// registered with the accessors.

#![cfg(target_os = "android")]

use std::ffi::c_void;
use std::sync::{Mutex, OnceLock, PoisonError};

use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_ERR, JNI_VERSION_1_6, jcharArray, jint, jsize, jstring};
use jni::{JNIEnv, JavaVM};
use tracing::{error, info, warn};

use tuxshell_core::{Confidence, LocaleField, LocaleSnapshot};
use tuxshell_core::error::{Result, ShellError};
use tuxshell_locale::{LocaleWriter, locale_cell, parse_locale};

use crate::traits::LocaleSource;
use crate::{ffi, publish_capture};

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, recorded by `JNI_OnLoad` or the first
/// `nativeOnCreate`.
fn java_vm() -> Result<&'static JavaVM> {
    JAVA_VM
        .get()
        .ok_or_else(|| ShellError::Bridge("no JavaVM recorded for this process".into()))
}

/// Record the VM behind `env` if none is known yet.
fn remember_vm(env: &JNIEnv<'_>) {
    if JAVA_VM.get().is_some() {
        return;
    }
    match env.get_java_vm() {
        Ok(vm) => {
            let _ = JAVA_VM.set(vm);
        }
        Err(e) => warn!(error = %e, "could not obtain JavaVM from JNIEnv"),
    }
}

/// Called by the runtime when `System.loadLibrary` loads this library.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    // SAFETY: the runtime passes its own, process-lifetime `JavaVM*`.
    match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => {
            let _ = JAVA_VM.set(vm);
            JNI_VERSION_1_6
        }
        Err(e) => {
            error!(error = %e, "JNI_OnLoad received an unusable JavaVM");
            JNI_ERR
        }
    }
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| ShellError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Map any `jni::errors::Error` into `ShellError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> ShellError {
    ShellError::Bridge(format!("{context}: {e}"))
}

/// Call a `()Ljava/lang/String;` getter on `locale`.
fn string_getter(env: &mut JNIEnv<'_>, locale: &JObject<'_>, method: &str) -> Result<String> {
    let obj: JObject = env
        .call_method(locale, method, "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err(method, e))?
        .l()
        .map_err(|e| jni_err(method, e))?;
    if obj.is_null() {
        return Ok(String::new());
    }
    let value: String = env
        .get_string(&JString::from(obj))
        .map_err(|e| jni_err(method, e))?
        .into();
    Ok(value)
}

/// Read `Locale.getDefault()` through `env`.
pub fn locale_from_jni(env: &mut JNIEnv<'_>) -> Result<LocaleSnapshot> {
    let locale: JObject = env
        .call_static_method("java/util/Locale", "getDefault", "()Ljava/util/Locale;", &[])
        .map_err(|e| jni_err("Locale.getDefault", e))?
        .l()
        .map_err(|e| jni_err("Locale.getDefault->l", e))?;
    if locale.is_null() {
        return Err(ShellError::LocaleUnavailable("Locale.getDefault() returned null".into()));
    }

    let language = string_getter(env, &locale, "getLanguage")?;
    let country = string_getter(env, &locale, "getCountry")?;
    let variant = string_getter(env, &locale, "getVariant")?;

    // Route through the parser so legacy codes (iw, in, ji) are canonicalised
    // the same way as on desktop.
    let mut parsed = parse_locale(&format!("{language}_{country}")).ok_or_else(|| {
        ShellError::LocaleUnavailable(format!("Java locale {language:?} names no language"))
    })?;
    if !variant.is_empty() {
        parsed.variant = variant;
    }
    Ok(parsed.into_snapshot(Confidence::Confident))
}

/// Locale source backed by the ART runtime of the hosting activity.
pub struct AndroidLocaleSource;

impl LocaleSource for AndroidLocaleSource {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        let mut env = jni_env()?;
        locale_from_jni(&mut env)
    }
}

/// Writer for the cell owned by the Java lifecycle. Created on the first
/// `nativeOnCreate` and registered with the exported accessors.
static LIFECYCLE_WRITER: Mutex<Option<LocaleWriter>> = Mutex::new(None);

/// `MainActivity.nativeOnCreate()`, the lifecycle capture hook.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_lethargik_supertux2_MainActivity_nativeOnCreate(
    mut env: JNIEnv,
    _class: JClass,
) {
    remember_vm(&env);
    let mut guard = LIFECYCLE_WRITER
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let writer = guard.get_or_insert_with(|| {
        let (writer, reader) = locale_cell();
        if let Err(e) = ffi::install(reader) {
            error!(error = %e, "lifecycle locale cell not registered with accessors");
        }
        writer
    });

    let snapshot = publish_capture(locale_from_jni(&mut env), writer);
    info!(locale = %snapshot, "Android onCreate: locale captured");
}

/// Build a Java `char[]` holding `units`.
fn char_array(env: &mut JNIEnv<'_>, units: &[u16]) -> Result<jcharArray> {
    let len = jsize::try_from(units.len())
        .map_err(|_| ShellError::Bridge(format!("{} chars do not fit a Java array", units.len())))?;
    let array = env
        .new_char_array(len)
        .map_err(|e| jni_err("NewCharArray", e))?;
    env.set_char_array_region(&array, 0, units)
        .map_err(|e| jni_err("SetCharArrayRegion", e))?;
    Ok(array.into_raw())
}

fn export_field(env: &mut JNIEnv<'_>, field: LocaleField) -> jcharArray {
    let units = ffi::field_chars(ffi::registered(), field);
    char_array(env, &units).unwrap_or_else(|e| {
        error!(%field, error = %e, "locale field not returned to Java");
        std::ptr::null_mut()
    })
}

/// `MainActivity.getLang()`: the language subtag as `char[]`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_lethargik_supertux2_MainActivity_getLang(
    mut env: JNIEnv,
    _class: JClass,
) -> jcharArray {
    export_field(&mut env, LocaleField::Language)
}

/// `MainActivity.getCountry()`: the region subtag as `char[]`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_lethargik_supertux2_MainActivity_getCountry(
    mut env: JNIEnv,
    _class: JClass,
) -> jcharArray {
    export_field(&mut env, LocaleField::Country)
}

/// `MainActivity.getLocale()`: the full tag as a Java string.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_lethargik_supertux2_MainActivity_getLocale(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let tag = ffi::registered()
        .map(|r| r.snapshot().language_tag)
        .unwrap_or_default();
    match env.new_string(tag) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            error!(error = %e, "locale tag not returned to Java");
            std::ptr::null_mut()
        }
    }
}
