// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Locale string parsing.
//
// Accepts the POSIX form `language[_territory][.codeset][@modifier]` as found
// in LC_ALL / LANG, BCP-47 style hyphenated tags (`ca-ES-valencia`), and
// colon-separated LANGUAGE lists, where the first usable entry wins.

use tuxshell_core::{Confidence, LocaleSnapshot};

/// The pieces of a locale string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocale {
    /// Lower case.
    pub language: String,
    /// Upper case, possibly empty.
    pub country: String,
    /// Script, variant and modifier subtags joined with `_`.
    pub variant: String,
    /// Character set named after `.`, if any. Not part of the locale tag.
    pub codeset: Option<String>,
}

impl ParsedLocale {
    pub fn into_snapshot(self, confidence: Confidence) -> LocaleSnapshot {
        LocaleSnapshot::from_parts(&self.language, &self.country, &self.variant, confidence)
    }
}

/// Parse a locale string, returning `None` when it names no language.
///
/// `C` and `POSIX` are the absence of a locale and yield `None`.
pub fn parse_locale(input: &str) -> Option<ParsedLocale> {
    input.split(':').find_map(parse_entry)
}

fn parse_entry(entry: &str) -> Option<ParsedLocale> {
    let entry = entry.trim();
    let (body, modifier) = match entry.split_once('@') {
        Some((body, modifier)) => (body, Some(modifier)),
        None => (entry, None),
    };
    let (body, codeset) = match body.split_once('.') {
        Some((body, codeset)) => (body, Some(codeset)),
        None => (body, None),
    };

    let mut subtags = body.split(['_', '-']);
    let language = subtags.next()?;
    if !is_language(language) || language.eq_ignore_ascii_case("posix") {
        return None;
    }

    let mut country = String::new();
    let mut variant: Vec<&str> = Vec::new();
    for subtag in subtags.filter(|s| !s.is_empty()) {
        if country.is_empty() && is_region(subtag) {
            country = subtag.to_ascii_uppercase();
        } else {
            variant.push(subtag);
        }
    }
    if let Some(modifier) = modifier.filter(|m| !m.is_empty()) {
        variant.push(modifier);
    }

    let mut parsed = ParsedLocale {
        language: language.to_ascii_lowercase(),
        country,
        variant: variant.join("_"),
        codeset: codeset.filter(|c| !c.is_empty()).map(str::to_string),
    };
    canonicalize(&mut parsed);
    Some(parsed)
}

fn is_language(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
}

/// Fix locale spellings that are common in the wild but not valid codes.
fn canonicalize(locale: &mut ParsedLocale) {
    match (locale.language.as_str(), locale.country.as_str()) {
        ("en", "UK") => locale.country = "GB".into(),
        ("ja", "JA") => locale.country = "JP".into(),
        _ => {}
    }

    // Legacy ISO 639 codes still reported by older Java runtimes.
    let modern = match locale.language.as_str() {
        "iw" => "he",
        "in" => "id",
        "ji" => "yi",
        _ => return,
    };
    locale.language = modern.into();
}
