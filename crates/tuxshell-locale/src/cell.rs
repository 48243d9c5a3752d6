// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-writer / multi-reader cell holding the current locale snapshot.
//
// The lifecycle thread owns the one `LocaleWriter` and publishes a complete
// snapshot on every creation hook. Any number of `LocaleReader`s (the native
// accessors, diagnostics) observe either the previous or the new snapshot as
// a whole. Readers never block each other; a publish briefly excludes them.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use tuxshell_core::LocaleSnapshot;

#[derive(Debug, Default)]
struct Slot {
    snapshot: LocaleSnapshot,
    /// Number of publishes so far. Zero means nothing was ever captured.
    generation: u64,
}

#[derive(Debug, Default)]
struct Shared {
    slot: RwLock<Slot>,
}

impl Shared {
    fn read<R>(&self, f: impl FnOnce(&Slot) -> R) -> R {
        // A panicking writer cannot leave a half-written snapshot behind: the
        // slot is replaced by a single assignment.
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        f(&slot)
    }
}

/// Create a fresh cell holding the empty snapshot.
pub fn locale_cell() -> (LocaleWriter, LocaleReader) {
    let shared = Arc::new(Shared::default());
    (
        LocaleWriter {
            shared: Arc::clone(&shared),
        },
        LocaleReader { shared },
    )
}

/// The only handle that can replace the snapshot. Deliberately not `Clone`.
#[derive(Debug)]
pub struct LocaleWriter {
    shared: Arc<Shared>,
}

impl LocaleWriter {
    /// Replace the current snapshot. Last write wins.
    ///
    /// Returns the new generation number.
    pub fn publish(&mut self, snapshot: LocaleSnapshot) -> u64 {
        let mut slot = self
            .shared
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = slot.generation + 1;
        info!(
            locale = %snapshot,
            confidence = ?snapshot.confidence,
            generation,
            "locale snapshot published"
        );
        *slot = Slot {
            snapshot,
            generation,
        };
        generation
    }

    /// A new reader onto this cell.
    pub fn reader(&self) -> LocaleReader {
        LocaleReader {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Read-only view of the snapshot; cheap to clone and `Send + Sync`.
#[derive(Debug, Clone)]
pub struct LocaleReader {
    shared: Arc<Shared>,
}

impl LocaleReader {
    /// A copy of the most recent snapshot, or the empty one before any capture.
    pub fn snapshot(&self) -> LocaleSnapshot {
        self.shared.read(|slot| slot.snapshot.clone())
    }

    /// Borrow the current snapshot for the duration of `f`, without copying.
    pub fn with<R>(&self, f: impl FnOnce(&LocaleSnapshot) -> R) -> R {
        self.shared.read(|slot| f(&slot.snapshot))
    }

    pub fn generation(&self) -> u64 {
        self.shared.read(|slot| slot.generation)
    }

    pub fn has_capture(&self) -> bool {
        self.generation() > 0
    }

    /// Whether both readers observe the same cell.
    pub fn same_cell(&self, other: &LocaleReader) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use tuxshell_core::{Confidence, LocaleField};

    use super::*;

    fn snap(lang: &str, country: &str) -> LocaleSnapshot {
        LocaleSnapshot::from_parts(lang, country, "", Confidence::Confident)
    }

    #[test]
    fn empty_before_first_publish() {
        let (_writer, reader) = locale_cell();
        assert!(!reader.has_capture());
        let current = reader.snapshot();
        for field in LocaleField::ALL {
            assert_eq!(current.field(field), "");
        }
    }

    #[test]
    fn last_write_wins() {
        let (mut writer, reader) = locale_cell();
        assert_eq!(writer.publish(snap("en", "US")), 1);
        assert_eq!(writer.publish(snap("fr", "FR")), 2);

        let current = reader.snapshot();
        assert_eq!(current.language_tag, "fr_FR");
        assert_eq!(reader.generation(), 2);
    }

    #[test]
    fn readers_share_the_cell() {
        let (mut writer, reader) = locale_cell();
        let second = writer.reader();
        let third = reader.clone();
        assert!(reader.same_cell(&second));
        assert!(reader.same_cell(&third));

        let (_other_writer, other) = locale_cell();
        assert!(!reader.same_cell(&other));

        writer.publish(snap("it", "IT"));
        assert_eq!(second.with(|s| s.country_code.clone()), "IT");
    }

    #[test]
    fn copies_are_detached() {
        let (mut writer, reader) = locale_cell();
        writer.publish(snap("en", "US"));
        let before = reader.snapshot();
        writer.publish(snap("de", "DE"));
        assert_eq!(before.language_tag, "en_US");
    }

    #[test]
    fn concurrent_readers_never_see_torn_snapshots() {
        let (mut writer, reader) = locale_cell();
        writer.publish(snap("en", "US"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reader = reader.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        let s = reader.snapshot();
                        let consistent = (s.language_code == "en" && s.country_code == "US")
                            || (s.language_code == "fr" && s.country_code == "FR");
                        assert!(consistent, "torn snapshot: {s:?}");
                    }
                })
            })
            .collect();

        for i in 0..200 {
            if i % 2 == 0 {
                writer.publish(snap("fr", "FR"));
            } else {
                writer.publish(snap("en", "US"));
            }
        }

        for h in handles {
            h.join().expect("reader thread panicked");
        }
    }
}
