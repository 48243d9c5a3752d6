// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Locale accessors exported to the native engine.
//
// ## ABI
//
// Six unmangled `extern "C"` functions, three fields in two encodings:
//
// ```c
// size_t tuxshell_locale_tag(char *buf, size_t cap);
// size_t tuxshell_country_code(char *buf, size_t cap);
// size_t tuxshell_language_code(char *buf, size_t cap);
//
// size_t tuxshell_locale_tag_utf16(uint16_t *buf, size_t cap);
// size_t tuxshell_country_code_utf16(uint16_t *buf, size_t cap);
// size_t tuxshell_language_code_utf16(uint16_t *buf, size_t cap);
// ```
//
// The caller owns `buf`; nothing is allocated on its behalf. The return value
// is the full length of the field (bytes excluding NUL, or UTF-16 code units),
// so `ret >= cap` (UTF-8) or `ret > cap` (UTF-16) signals truncation. A null
// `buf` or `cap == 0` only measures. See `tuxshell_locale::marshal` for the
// truncation rules.
//
// Until a reader has been registered with [`install`] and a snapshot has been
// published, every accessor reports the empty string.

use std::ffi::c_char;
use std::sync::OnceLock;

use tracing::debug;
use tuxshell_core::LocaleField;
use tuxshell_core::error::{Result, ShellError};
use tuxshell_locale::{LocaleReader, copy_utf8, copy_utf16};

static REGISTERED: OnceLock<LocaleReader> = OnceLock::new();

/// Register the cell the exported accessors read from.
///
/// Registration happens once per process. Registering the same cell again is
/// a no-op; registering a different one fails with
/// [`ShellError::AlreadyRegistered`].
pub fn install(reader: LocaleReader) -> Result<()> {
    let registered = REGISTERED.get_or_init(|| {
        debug!("locale reader registered with native accessors");
        reader.clone()
    });
    if registered.same_cell(&reader) {
        Ok(())
    } else {
        Err(ShellError::AlreadyRegistered)
    }
}

/// The reader registered with [`install`], if any.
pub fn registered() -> Option<&'static LocaleReader> {
    REGISTERED.get()
}

/// Copy `field` as UTF-8 from `reader` (or the empty string) into `buf`.
pub fn read_utf8(reader: Option<&LocaleReader>, field: LocaleField, buf: &mut [u8]) -> usize {
    match reader {
        Some(r) => r.with(|s| copy_utf8(s.field(field), buf)),
        None => copy_utf8("", buf),
    }
}

/// Copy `field` as UTF-16 from `reader` (or the empty string) into `buf`.
pub fn read_utf16(reader: Option<&LocaleReader>, field: LocaleField, buf: &mut [u16]) -> usize {
    match reader {
        Some(r) => r.with(|s| copy_utf16(s.field(field), buf)),
        None => copy_utf16("", buf),
    }
}

/// `field` as the UTF-16 units of a Java `char[]`; empty when `reader` is
/// `None` or nothing has been captured.
pub fn field_chars(reader: Option<&LocaleReader>, field: LocaleField) -> Vec<u16> {
    reader
        .map(|r| r.with(|s| s.field(field).encode_utf16().collect()))
        .unwrap_or_default()
}

/// # Safety
///
/// `buf` is null or valid for writes of `cap` elements of `T`.
unsafe fn out_slice<'a, T>(buf: *mut T, cap: usize) -> &'a mut [T] {
    if buf.is_null() || cap == 0 {
        Default::default()
    } else {
        // SAFETY: non-null and sized by the caller per the function contract.
        unsafe { std::slice::from_raw_parts_mut(buf, cap) }
    }
}

unsafe fn export_utf8(field: LocaleField, buf: *mut c_char, cap: usize) -> usize {
    // SAFETY: forwarded from the exported function's contract.
    let out = unsafe { out_slice(buf.cast::<u8>(), cap) };
    read_utf8(registered(), field, out)
}

unsafe fn export_utf16(field: LocaleField, buf: *mut u16, cap: usize) -> usize {
    // SAFETY: forwarded from the exported function's contract.
    let out = unsafe { out_slice(buf, cap) };
    read_utf16(registered(), field, out)
}

/// Full locale tag, e.g. `fr_FR`, as NUL-terminated UTF-8.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_locale_tag(buf: *mut c_char, cap: usize) -> usize {
    unsafe { export_utf8(LocaleField::Tag, buf, cap) }
}

/// Region subtag, e.g. `FR`, as NUL-terminated UTF-8.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_country_code(buf: *mut c_char, cap: usize) -> usize {
    unsafe { export_utf8(LocaleField::Country, buf, cap) }
}

/// Language subtag, e.g. `fr`, as NUL-terminated UTF-8.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_language_code(buf: *mut c_char, cap: usize) -> usize {
    unsafe { export_utf8(LocaleField::Language, buf, cap) }
}

/// Full locale tag as unterminated UTF-16.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` `u16`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_locale_tag_utf16(buf: *mut u16, cap: usize) -> usize {
    unsafe { export_utf16(LocaleField::Tag, buf, cap) }
}

/// Region subtag as unterminated UTF-16.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` `u16`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_country_code_utf16(buf: *mut u16, cap: usize) -> usize {
    unsafe { export_utf16(LocaleField::Country, buf, cap) }
}

/// Language subtag as unterminated UTF-16.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `cap` `u16`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tuxshell_language_code_utf16(buf: *mut u16, cap: usize) -> usize {
    unsafe { export_utf16(LocaleField::Language, buf, cap) }
}
