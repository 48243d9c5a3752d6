// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Locale discovery from the process environment (Linux, BSD, macOS CLI) and
// from locale names reported by the operating system.

use tracing::{debug, warn};
use tuxshell_core::{Confidence, LocaleSnapshot};

use crate::parse::parse_locale;

/// Consulted in decreasing order of authority.
pub const LOCALE_VARIABLES: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

/// Reported when no variable names a language.
pub const DEFAULT_GUESS: &str = "en_US";

/// Derive the locale from the real process environment.
pub fn locale_from_env() -> LocaleSnapshot {
    locale_from_lookup(|name| std::env::var(name).ok())
}

/// Derive the locale through `lookup`, which maps a variable name to its
/// value. The first variable whose value names a language wins; unset, empty
/// and `C`/`POSIX` values fall through to the next one.
pub fn locale_from_lookup<F>(lookup: F) -> LocaleSnapshot
where
    F: Fn(&str) -> Option<String>,
{
    for name in LOCALE_VARIABLES {
        let Some(value) = lookup(name) else {
            continue;
        };
        if let Some(parsed) = parse_locale(&value) {
            debug!(variable = name, value = %value, "locale taken from environment");
            return parsed.into_snapshot(Confidence::Confident);
        }
        debug!(variable = name, value = %value, "environment value names no language");
    }

    warn!(default = DEFAULT_GUESS, "no locale in environment, assuming default");
    default_guess()
}

/// The `en_US` snapshot reported when nothing better is known.
pub fn default_guess() -> LocaleSnapshot {
    parse_locale(DEFAULT_GUESS)
        .map(|p| p.into_snapshot(Confidence::DefaultGuess))
        .unwrap_or_default()
}

/// Snapshot for a locale name reported by the OS (`en-US`, `sr-Latn-RS`).
/// Falls back to [`default_guess`] when there is no usable name.
pub fn locale_from_system_name(name: Option<&str>) -> LocaleSnapshot {
    match name.and_then(parse_locale) {
        Some(parsed) => {
            debug!(name = ?name, "locale taken from system");
            parsed.into_snapshot(Confidence::Confident)
        }
        None => {
            warn!(name = ?name, default = DEFAULT_GUESS, "system reported no locale, assuming default");
            default_guess()
        }
    }
}
