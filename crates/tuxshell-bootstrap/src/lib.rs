// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tuxshell-bootstrap — brings the native engine up: capture the locale, load
// the declared libraries in order, transfer control to the entry symbol.

pub mod dylib;
pub mod loader;
pub mod shell;

pub use dylib::{DylibLoader, ResolvedLibrary};
pub use loader::{EntryOutcome, NativeLoader};
pub use shell::Shell;
