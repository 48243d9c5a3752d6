// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the tuxshell locale bridge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a locale snapshot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// The platform reported a locale explicitly.
    Confident,
    /// Nothing was reported; a conventional default was substituted.
    DefaultGuess,
    /// No locale could be determined. All fields are empty.
    #[default]
    Unavailable,
}

/// One of the three fields the native side can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleField {
    /// Full identifier, e.g. `fr_FR`.
    Tag,
    /// Region subtag, e.g. `FR`.
    Country,
    /// Language subtag, e.g. `fr`.
    Language,
}

impl LocaleField {
    pub const ALL: [LocaleField; 3] = [LocaleField::Tag, LocaleField::Country, LocaleField::Language];
}

impl std::fmt::Display for LocaleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocaleField::Tag => "locale tag",
            LocaleField::Country => "country code",
            LocaleField::Language => "language code",
        };
        f.write_str(name)
    }
}

/// The platform locale at the moment of capture.
///
/// Snapshots are values: once published they are never modified, readers
/// always receive a copy. The default snapshot is the empty one handed out
/// before any capture has happened.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocaleSnapshot {
    /// `language[_COUNTRY][_variant]`, empty when nothing is known.
    pub language_tag: String,
    /// Upper-case region subtag, possibly empty.
    pub country_code: String,
    /// Lower-case language subtag, possibly empty.
    pub language_code: String,
    /// Modifier or variant subtag, possibly empty.
    pub variant: String,
    pub confidence: Confidence,
    pub captured_at: Option<DateTime<Utc>>,
}

impl LocaleSnapshot {
    /// Build a snapshot from its subtags, deriving the full tag.
    ///
    /// An empty language yields the empty snapshot regardless of the other
    /// parts: a country on its own is not a locale.
    pub fn from_parts(
        language: &str,
        country: &str,
        variant: &str,
        confidence: Confidence,
    ) -> Self {
        if language.is_empty() {
            return Self::default();
        }

        let mut language_tag = language.to_string();
        if !country.is_empty() {
            language_tag.push('_');
            language_tag.push_str(country);
        }
        if !variant.is_empty() {
            language_tag.push('_');
            language_tag.push_str(variant);
        }

        Self {
            language_tag,
            country_code: country.to_string(),
            language_code: language.to_string(),
            variant: variant.to_string(),
            confidence,
            captured_at: None,
        }
    }

    /// Stamp the snapshot with the current time.
    pub fn captured_now(mut self) -> Self {
        self.captured_at = Some(Utc::now());
        self
    }

    pub fn field(&self, field: LocaleField) -> &str {
        match field {
            LocaleField::Tag => &self.language_tag,
            LocaleField::Country => &self.country_code,
            LocaleField::Language => &self.language_code,
        }
    }

    /// True when no language is known.
    pub fn is_empty(&self) -> bool {
        self.language_code.is_empty()
    }

    /// Compare locale content, ignoring capture metadata.
    pub fn same_locale(&self, other: &LocaleSnapshot) -> bool {
        self.language_tag == other.language_tag
            && self.country_code == other.country_code
            && self.language_code == other.language_code
            && self.variant == other.variant
    }
}

impl std::fmt::Display for LocaleSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str("<unknown locale>")
        } else {
            f.write_str(&self.language_tag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_joins_subtags() {
        let snap = LocaleSnapshot::from_parts("fr", "FR", "", Confidence::Confident);
        assert_eq!(snap.language_tag, "fr_FR");
        assert_eq!(snap.field(LocaleField::Country), "FR");
        assert_eq!(snap.field(LocaleField::Language), "fr");
    }

    #[test]
    fn tag_includes_variant() {
        let snap = LocaleSnapshot::from_parts("ca", "ES", "valencia", Confidence::Confident);
        assert_eq!(snap.language_tag, "ca_ES_valencia");
    }

    #[test]
    fn language_only() {
        let snap = LocaleSnapshot::from_parts("eo", "", "", Confidence::Confident);
        assert_eq!(snap.language_tag, "eo");
        assert!(snap.country_code.is_empty());
    }

    #[test]
    fn missing_language_is_empty_snapshot() {
        let snap = LocaleSnapshot::from_parts("", "US", "", Confidence::Confident);
        assert!(snap.is_empty());
        assert_eq!(snap, LocaleSnapshot::default());
        assert_eq!(snap.confidence, Confidence::Unavailable);
    }

    #[test]
    fn default_fields_are_empty() {
        let snap = LocaleSnapshot::default();
        for field in LocaleField::ALL {
            assert_eq!(snap.field(field), "", "{field} should be empty");
        }
        assert_eq!(snap.to_string(), "<unknown locale>");
    }

    #[test]
    fn same_locale_ignores_timestamp() {
        let a = LocaleSnapshot::from_parts("de", "DE", "", Confidence::Confident);
        let b = a.clone().captured_now();
        assert_ne!(a, b);
        assert!(a.same_locale(&b));
    }
}
