// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS locale source via objc2.
//
// Requires compilation with the iOS SDK (Xcode). `NSLocale.currentLocale` is
// safe to query from any thread.

#![cfg(target_os = "ios")]

use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_foundation::NSString;

use tuxshell_core::error::{Result, ShellError};
use tuxshell_core::{Confidence, LocaleSnapshot};
use tuxshell_locale::parse_locale;

use crate::traits::LocaleSource;

/// Locale source backed by `NSLocale.currentLocale`.
pub struct IosLocaleSource;

fn ns_string(value: Option<Retained<NSString>>) -> String {
    value.map(|s| s.to_string()).unwrap_or_default()
}

impl LocaleSource for IosLocaleSource {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn current_locale(&self) -> Result<LocaleSnapshot> {
        // SAFETY: class method on NSLocale, returns an autoreleased NSLocale.
        let locale: Option<Retained<AnyObject>> =
            unsafe { msg_send![objc2::class!(NSLocale), currentLocale] };
        let locale =
            locale.ok_or_else(|| ShellError::LocaleUnavailable("no current NSLocale".into()))?;

        // SAFETY: well-known NSLocale selectors, each returns NSString?.
        let language = ns_string(unsafe { msg_send![&*locale, languageCode] });
        let country = ns_string(unsafe { msg_send![&*locale, countryCode] });
        let variant = ns_string(unsafe { msg_send![&*locale, variantCode] });

        let mut parsed = parse_locale(&format!("{language}_{country}")).ok_or_else(|| {
            ShellError::LocaleUnavailable(format!("NSLocale language {language:?} is unusable"))
        })?;
        if !variant.is_empty() {
            parsed.variant = variant;
        }
        Ok(parsed.into_snapshot(Confidence::Confident))
    }
}
