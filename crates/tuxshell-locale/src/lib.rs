// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tuxshell-locale — platform locale parsing, the shared snapshot cell, and
// the buffer copies used at the native accessor boundary.

pub mod cell;
pub mod env;
pub mod marshal;
pub mod parse;

pub use cell::{LocaleReader, LocaleWriter, locale_cell};
pub use env::{
    DEFAULT_GUESS, LOCALE_VARIABLES, default_guess, locale_from_env, locale_from_lookup,
    locale_from_system_name,
};
pub use marshal::{copy_utf8, copy_utf16, utf16_len};
pub use parse::{ParsedLocale, parse_locale};
