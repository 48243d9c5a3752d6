// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for locale discovery.

use tuxshell_core::LocaleSnapshot;
use tuxshell_core::error::Result;

/// Where the platform's current locale comes from.
///
/// Implementations only *report* what the platform says; choosing a
/// translation is the engine's business.
pub trait LocaleSource {
    /// Human-readable platform name (e.g. "Android", "Desktop (environment)").
    fn platform_name(&self) -> &str;

    /// Ask the platform for its locale right now.
    ///
    /// Returns `ShellError::LocaleUnavailable` or `ShellError::Bridge` when
    /// the platform cannot answer; callers substitute the empty snapshot.
    fn current_locale(&self) -> Result<LocaleSnapshot>;
}

impl<T: LocaleSource + ?Sized> LocaleSource for Box<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        (**self).current_locale()
    }
}
