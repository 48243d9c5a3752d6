// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The startup sequence.
//
// validate descriptor -> capture locale -> load libraries in order -> invoke
// entry. Everything runs on the calling (lifecycle) thread. Any failure
// aborts the sequence; nothing after the failing step runs.

use tracing::{error, info, instrument};

use tuxshell_bridge::{LocaleSource, capture_locale, ffi};
use tuxshell_core::error::Result;
use tuxshell_core::{BootstrapDescriptor, LocaleSnapshot};
use tuxshell_locale::{LocaleReader, LocaleWriter, locale_cell};

use crate::loader::{EntryOutcome, NativeLoader};

/// Owns the descriptor, the loader and the writing end of the locale cell.
pub struct Shell<L, S> {
    descriptor: BootstrapDescriptor,
    loader: L,
    source: S,
    writer: LocaleWriter,
    reader: LocaleReader,
}

impl<L: NativeLoader, S: LocaleSource> Shell<L, S> {
    pub fn new(descriptor: BootstrapDescriptor, loader: L, source: S) -> Self {
        let (writer, reader) = locale_cell();
        Self {
            descriptor,
            loader,
            source,
            writer,
            reader,
        }
    }

    pub fn descriptor(&self) -> &BootstrapDescriptor {
        &self.descriptor
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// A read handle on this shell's locale cell.
    pub fn reader(&self) -> LocaleReader {
        self.reader.clone()
    }

    /// Make this shell's locale the one the exported native accessors report.
    pub fn register_accessors(&self) -> Result<()> {
        ffi::install(self.reader.clone())
    }

    /// Lifecycle creation hook: re-capture the platform locale.
    ///
    /// Runs on every creation, so a recreated shell reports the current
    /// locale rather than the one seen at first launch.
    pub fn on_create(&mut self) -> LocaleSnapshot {
        capture_locale(&self.source, &mut self.writer)
    }

    /// Run the full startup sequence and block until the engine returns.
    #[instrument(skip_all)]
    pub fn start(&mut self) -> Result<EntryOutcome> {
        let entry = self.descriptor.validate().inspect_err(|e| {
            error!(error = %e, "invalid bootstrap descriptor, aborting startup");
        })?;

        let locale = self.on_create();
        info!(
            platform = self.source.platform_name(),
            locale = %locale,
            "startup: locale captured"
        );

        for library in self.descriptor.library_load_order() {
            self.loader.load(library).inspect_err(|e| {
                error!(library = %library, error = %e, "native library failed to load, aborting startup");
            })?;
        }
        info!(
            libraries = self.descriptor.library_load_order().len(),
            "startup: native libraries loaded"
        );

        let outcome = self.loader.invoke(&entry)?;
        info!(?outcome, "native engine returned");
        Ok(outcome)
    }
}
