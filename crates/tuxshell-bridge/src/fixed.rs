// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A locale source that reports whatever it was told to. Used to pin the
// reported locale (`tuxshell locale --simulate`) and in tests.

use std::sync::Mutex;

use tuxshell_core::error::{Result, ShellError};
use tuxshell_core::{Confidence, LocaleSnapshot};
use tuxshell_locale::parse_locale;

use crate::traits::LocaleSource;

/// Reports a fixed locale string, which may be changed between captures to
/// simulate the user switching the system language.
#[derive(Debug)]
pub struct FixedLocaleSource {
    locale: Mutex<Option<String>>,
}

impl FixedLocaleSource {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: Mutex::new(Some(locale.into())),
        }
    }

    /// A source for a platform that cannot report any locale.
    pub fn unavailable() -> Self {
        Self {
            locale: Mutex::new(None),
        }
    }

    pub fn set(&self, locale: impl Into<String>) {
        *self.lock() = Some(locale.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.locale
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LocaleSource for FixedLocaleSource {
    fn platform_name(&self) -> &str {
        "Fixed"
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        let guard = self.lock();
        let value = guard
            .as_deref()
            .ok_or_else(|| ShellError::LocaleUnavailable("no locale configured".into()))?;
        parse_locale(value)
            .map(|p| p.into_snapshot(Confidence::Confident))
            .ok_or_else(|| ShellError::LocaleUnavailable(format!("{value:?} names no language")))
    }
}
