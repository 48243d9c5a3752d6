// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The host loader contract.

use tuxshell_core::config::EntryPoint;
use tuxshell_core::error::Result;

/// How control came back from the engine entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A `plain` entry returned.
    Returned,
    /// A `main` entry returned this exit code.
    Exited(i32),
}

impl EntryOutcome {
    /// Process exit code to report to the host.
    pub fn exit_code(self) -> i32 {
        match self {
            EntryOutcome::Returned => 0,
            EntryOutcome::Exited(code) => code,
        }
    }
}

/// Loads native libraries into the process and transfers control into them.
///
/// Both operations are one-shot. An error is final: the shell does not retry
/// and does not continue with a partial set of libraries.
pub trait NativeLoader {
    /// Load `library` so that its symbols are visible to libraries loaded
    /// after it.
    fn load(&mut self, library: &str) -> Result<()>;

    /// Resolve `entry.symbol` in the already-loaded `entry.shared_object` and
    /// call it. Blocks for as long as the engine runs.
    fn invoke(&mut self, entry: &EntryPoint) -> Result<EntryOutcome>;
}
