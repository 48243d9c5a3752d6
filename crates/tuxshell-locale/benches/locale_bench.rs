// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for locale parsing and the accessor-side buffer copies
// in the tuxshell-locale crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tuxshell_core::{Confidence, LocaleSnapshot};
use tuxshell_locale::{copy_utf8, copy_utf16, locale_cell, parse_locale};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Parse the shapes seen in practice: plain, codeset + modifier, and a
/// LANGUAGE list whose first entry is unusable.
fn bench_parse(c: &mut Criterion) {
    let inputs = ["fr_FR", "sr_RS.UTF-8@latin", "C:de_AT:de:en"];
    c.bench_function("parse_locale (3 inputs)", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(parse_locale(black_box(input)));
            }
        });
    });
}

/// One accessor call as the engine makes it: read-lock the cell and copy a
/// field into a stack buffer, in both encodings.
fn bench_accessor_copy(c: &mut Criterion) {
    let (mut writer, reader) = locale_cell();
    writer.publish(LocaleSnapshot::from_parts(
        "pt",
        "BR",
        "",
        Confidence::Confident,
    ));

    c.bench_function("accessor copy utf8", |b| {
        let mut buf = [0u8; 32];
        b.iter(|| reader.with(|s| copy_utf8(&s.language_tag, black_box(&mut buf))));
    });

    c.bench_function("accessor copy utf16", |b| {
        let mut buf = [0u16; 32];
        b.iter(|| reader.with(|s| copy_utf16(&s.language_tag, black_box(&mut buf))));
    });
}

criterion_group!(benches, bench_parse, bench_accessor_copy);
criterion_main!(benches);
