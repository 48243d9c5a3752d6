// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Keep the locale accessors in the executable.
//
// Nothing in the launcher calls them; the engine resolves them at runtime.
// Referencing them from a `#[used]` static stops the linker from discarding
// them before `--export-dynamic` (see build.rs) can publish them.

use std::ffi::c_char;

use tuxshell_bridge::ffi;

type Utf8Accessor = unsafe extern "C" fn(*mut c_char, usize) -> usize;
type Utf16Accessor = unsafe extern "C" fn(*mut u16, usize) -> usize;

#[used]
static UTF8_ACCESSORS: [Utf8Accessor; 3] = [
    ffi::tuxshell_locale_tag,
    ffi::tuxshell_country_code,
    ffi::tuxshell_language_code,
];

#[used]
static UTF16_ACCESSORS: [Utf16Accessor; 3] = [
    ffi::tuxshell_locale_tag_utf16,
    ffi::tuxshell_country_code_utf16,
    ffi::tuxshell_language_code_utf16,
];
