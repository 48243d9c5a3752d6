// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windows locale source.
//
// Asks the OS for the user's default locale name (`en-US`, `pt-BR`) rather
// than the POSIX variables, which a native Windows process does not have.

#![cfg(windows)]

use windows_sys::Win32::Globalization::GetUserDefaultLocaleName;

use tuxshell_core::LocaleSnapshot;
use tuxshell_core::error::Result;
use tuxshell_locale::locale_from_system_name;

use crate::traits::LocaleSource;

/// Buffer size documented for locale names, terminator included.
const LOCALE_NAME_MAX_LENGTH: usize = 85;

fn user_default_locale_name() -> Option<String> {
    let mut buf = [0u16; LOCALE_NAME_MAX_LENGTH];
    // SAFETY: `buf` is writable for the capacity passed alongside it.
    let written =
        unsafe { GetUserDefaultLocaleName(buf.as_mut_ptr(), LOCALE_NAME_MAX_LENGTH as i32) };
    // The count includes the NUL; zero means the call failed.
    let len = usize::try_from(written).ok()?.checked_sub(1)?;
    String::from_utf16(buf.get(..len)?).ok()
}

/// Locale source backed by `GetUserDefaultLocaleName`.
pub struct WindowsLocaleSource;

impl LocaleSource for WindowsLocaleSource {
    fn platform_name(&self) -> &str {
        "Windows"
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        Ok(locale_from_system_name(user_default_locale_name().as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use tuxshell_core::Confidence;

    use super::*;

    #[test]
    fn reports_a_language() {
        let snapshot = WindowsLocaleSource.current_locale().expect("never fails");
        assert!(!snapshot.language_code.is_empty());
        assert_ne!(snapshot.confidence, Confidence::Unavailable);
    }
}
