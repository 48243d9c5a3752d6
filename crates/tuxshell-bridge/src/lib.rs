// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tuxshell — Locale bridge between the platform shell and the native engine.
//
// Platform modules discover the current locale; `capture_locale` publishes
// it into the locale cell; the `ffi` module exports the cell's fields to
// native code.

pub mod ffi;
pub mod fixed;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(windows)]
pub mod windows;

#[cfg(not(any(target_os = "ios", target_os = "android", windows)))]
pub mod stub;

use tracing::warn;
use tuxshell_core::LocaleSnapshot;
use tuxshell_core::error::Result;
use tuxshell_locale::LocaleWriter;

pub use fixed::FixedLocaleSource;
pub use traits::LocaleSource;

/// Locale source for the target operating system.
pub fn platform_locale_source() -> Box<dyn LocaleSource + Send + Sync> {
    #[cfg(target_os = "ios")]
    {
        Box::new(ios::IosLocaleSource)
    }
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidLocaleSource)
    }
    #[cfg(windows)]
    {
        Box::new(windows::WindowsLocaleSource)
    }
    #[cfg(not(any(target_os = "ios", target_os = "android", windows)))]
    {
        Box::new(stub::EnvLocaleSource)
    }
}

/// Ask `source` for the locale and publish it. Last write wins.
///
/// Never fails: when the platform cannot answer, the empty snapshot is
/// published so accessors keep returning well-defined (empty) values.
pub fn capture_locale(source: &dyn LocaleSource, writer: &mut LocaleWriter) -> LocaleSnapshot {
    publish_capture(source.current_locale(), writer)
}

/// Publish the outcome of a platform query, substituting the empty snapshot
/// for an error. Returns what was published.
pub fn publish_capture(result: Result<LocaleSnapshot>, writer: &mut LocaleWriter) -> LocaleSnapshot {
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "locale capture failed, publishing empty locale");
            LocaleSnapshot::default()
        }
    }
    .captured_now();
    writer.publish(snapshot.clone());
    snapshot
}

#[cfg(test)]
mod tests {
    use tuxshell_core::{Confidence, LocaleField};
    use tuxshell_locale::locale_cell;

    use super::*;

    #[test]
    fn capture_publishes_source_locale() {
        let (mut writer, reader) = locale_cell();
        let source = FixedLocaleSource::new("en_US");

        let captured = capture_locale(&source, &mut writer);
        assert_eq!(captured.language_code, "en");
        assert_eq!(captured.country_code, "US");
        assert!(captured.captured_at.is_some());
        assert!(reader.snapshot().same_locale(&captured));
    }

    #[test]
    fn second_capture_replaces_first() {
        let (mut writer, reader) = locale_cell();
        let source = FixedLocaleSource::new("en_US");
        capture_locale(&source, &mut writer);

        source.set("fr_FR");
        capture_locale(&source, &mut writer);

        let current = reader.snapshot();
        assert_eq!(current.field(LocaleField::Tag), "fr_FR");
        assert_eq!(current.field(LocaleField::Country), "FR");
        assert_eq!(current.field(LocaleField::Language), "fr");
        assert_eq!(reader.generation(), 2);
    }

    #[test]
    fn unavailable_platform_publishes_empty_snapshot() {
        let (mut writer, reader) = locale_cell();
        let source = FixedLocaleSource::new("de_DE");
        capture_locale(&source, &mut writer);

        let broken = FixedLocaleSource::unavailable();
        let captured = capture_locale(&broken, &mut writer);
        assert!(captured.is_empty());
        assert_eq!(captured.confidence, Confidence::Unavailable);
        assert!(reader.snapshot().is_empty());
        assert!(reader.has_capture());
    }

    #[test]
    fn unparseable_locale_is_unavailable() {
        let source = FixedLocaleSource::new("C");
        assert!(source.current_locale().is_err());
    }

    #[test]
    fn platform_source_has_a_name() {
        assert!(!platform_locale_source().platform_name().is_empty());
    }
}
