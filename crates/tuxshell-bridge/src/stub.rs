// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop locale source for Unix-like builds without a mobile runtime.
//
// Reads the POSIX locale variables of the shell process.

use tuxshell_core::LocaleSnapshot;
use tuxshell_core::error::Result;
use tuxshell_locale::locale_from_env;

use crate::traits::LocaleSource;

/// Locale source backed by `LC_ALL`, `LC_MESSAGES`, `LANG` and `LANGUAGE`.
pub struct EnvLocaleSource;

impl LocaleSource for EnvLocaleSource {
    fn platform_name(&self) -> &str {
        "Desktop (environment)"
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        Ok(locale_from_env())
    }
}
