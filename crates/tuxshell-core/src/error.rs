// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for tuxshell.

use thiserror::Error;

/// Top-level error type for all tuxshell operations.
#[derive(Debug, Error)]
pub enum ShellError {
    // -- Configuration errors (fatal, abort startup) --
    #[error("bootstrap descriptor lists no native libraries to load")]
    EmptyLoadOrder,

    #[error("bootstrap descriptor has no entry symbol")]
    MissingEntrySymbol,

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("library {0:?} appears more than once in the load order")]
    DuplicateLibrary(String),

    #[error("entry shared object {0:?} is not part of the library load order")]
    EntryNotInLoadOrder(String),

    // -- Native loader errors (fatal, never retried) --
    #[error("failed to load native library {library:?}: {reason}")]
    LibraryLoad { library: String, reason: String },

    #[error("failed to resolve symbol {symbol:?} in {library:?}: {reason}")]
    SymbolResolve {
        library: String,
        symbol: String,
        reason: String,
    },

    #[error("library {0:?} was not loaded before entry invocation")]
    LibraryNotLoaded(String),

    #[error("entry argument {0:?} contains an interior NUL byte")]
    InvalidEntryArgument(String),

    // -- Locale capture (recovered with an empty snapshot) --
    #[error("platform locale unavailable: {0}")]
    LocaleUnavailable(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("a different locale cell is already registered with the native accessors")]
    AlreadyRegistered,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShellError {
    /// Whether this error stems from the bootstrap configuration rather than
    /// from the environment the shell runs in.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShellError::EmptyLoadOrder
                | ShellError::MissingEntrySymbol
                | ShellError::InvalidIdentifier { .. }
                | ShellError::DuplicateLibrary(_)
                | ShellError::EntryNotInLoadOrder(_)
                | ShellError::InvalidEntryArgument(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShellError>;
