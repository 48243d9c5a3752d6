// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `NativeLoader` backed by the system dynamic linker (dlopen / LoadLibrary).
//
// Library identifiers are either bare names (`SDL2`), mapped to the platform
// file name (`libSDL2.so`, `SDL2.dll`, `libSDL2.dylib`) and searched in the
// configured directories before the system search path, or explicit file
// names / paths which are handed to the linker untouched.

use std::ffi::{CString, c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info, instrument};

use tuxshell_core::EntryAbi;
use tuxshell_core::config::EntryPoint;
use tuxshell_core::error::{Result, ShellError};

use crate::loader::{EntryOutcome, NativeLoader};

type PlainEntry = unsafe extern "C" fn();
type MainEntry = unsafe extern "C" fn(c_int, *mut *mut c_char) -> c_int;

/// Where a library identifier will be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLibrary {
    pub path: PathBuf,
    /// True when the file exists: in one of the configured search paths for a
    /// bare name, at the given location for an explicit one.
    pub found: bool,
    /// The identifier was a file name or path and was not searched for.
    pub explicit: bool,
}

/// Loads libraries with `libloading` and keeps them resident until dropped.
pub struct DylibLoader {
    search_paths: Vec<PathBuf>,
    /// Load order is kept; the engine may rely on it at unload time too.
    loaded: Vec<(String, Library)>,
}

impl DylibLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            loaded: Vec::new(),
        }
    }

    /// Map `library` to the file the linker should open.
    pub fn resolve(&self, library: &str) -> ResolvedLibrary {
        if is_explicit(library) {
            let path = PathBuf::from(library);
            let found = path.is_file();
            return ResolvedLibrary {
                path,
                found,
                explicit: true,
            };
        }

        let file_name = libloading::library_filename(library);
        for dir in &self.search_paths {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                return ResolvedLibrary {
                    path: candidate,
                    found: true,
                    explicit: false,
                };
            }
        }
        ResolvedLibrary {
            path: PathBuf::from(file_name),
            found: false,
            explicit: false,
        }
    }

    /// Identifiers loaded so far, in load order.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(|(name, _)| name.as_str())
    }

    fn library(&self, name: &str) -> Result<&Library> {
        self.loaded
            .iter()
            .find(|(loaded, _)| loaded == name)
            .map(|(_, lib)| lib)
            .ok_or_else(|| ShellError::LibraryNotLoaded(name.to_string()))
    }
}

/// A path separator, a trailing shared-library suffix, or a versioned one
/// (`libc.so.6`) means "use as given".
fn is_explicit(library: &str) -> bool {
    let suffix = std::env::consts::DLL_SUFFIX;
    if library.contains(['/', '\\']) || library.ends_with(suffix) {
        return true;
    }
    library.match_indices(suffix).any(|(at, _)| {
        library[at + suffix.len()..]
            .strip_prefix('.')
            .is_some_and(|version| {
                !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.')
            })
    })
}

/// Open `path` with its symbols made global, so later libraries in the load
/// order can bind against them.
fn open(path: &Path) -> std::result::Result<Library, libloading::Error> {
    #[cfg(unix)]
    {
        use libloading::os::unix::{Library as UnixLibrary, RTLD_GLOBAL, RTLD_NOW};
        // SAFETY: running a library's initialisers is inherent to loading it;
        // the descriptor names libraries built to be loaded this way.
        unsafe { UnixLibrary::open(Some(path), RTLD_NOW | RTLD_GLOBAL) }.map(Library::from)
    }
    #[cfg(not(unix))]
    {
        // SAFETY: as above. Windows has no local/global symbol scopes.
        unsafe { Library::new(path) }
    }
}

impl NativeLoader for DylibLoader {
    #[instrument(skip(self))]
    fn load(&mut self, library: &str) -> Result<()> {
        if self.loaded.iter().any(|(name, _)| name == library) {
            debug!("already loaded");
            return Ok(());
        }

        let resolved = self.resolve(library);
        debug!(path = %resolved.path.display(), found = resolved.found, "opening native library");
        let lib = open(&resolved.path).map_err(|e| ShellError::LibraryLoad {
            library: library.to_string(),
            reason: e.to_string(),
        })?;

        info!(path = %resolved.path.display(), "native library loaded");
        self.loaded.push((library.to_string(), lib));
        Ok(())
    }

    #[instrument(skip(self, entry), fields(library = %entry.shared_object, symbol = %entry.symbol))]
    fn invoke(&mut self, entry: &EntryPoint) -> Result<EntryOutcome> {
        let lib = self.library(&entry.shared_object)?;
        let symbol_err = |e: libloading::Error| ShellError::SymbolResolve {
            library: entry.shared_object.clone(),
            symbol: entry.symbol.clone(),
            reason: e.to_string(),
        };

        match entry.abi {
            EntryAbi::Plain => {
                // SAFETY: the descriptor declares this symbol as `void entry(void)`.
                let f: Symbol<PlainEntry> =
                    unsafe { lib.get(entry.symbol.as_bytes()) }.map_err(symbol_err)?;
                info!("transferring control to native entry");
                // SAFETY: signature as declared above.
                unsafe { f() };
                Ok(EntryOutcome::Returned)
            }
            EntryAbi::Main => {
                let args = entry
                    .args
                    .iter()
                    .map(|a| {
                        CString::new(a.as_str())
                            .map_err(|_| ShellError::InvalidEntryArgument(a.clone()))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let argc = c_int::try_from(args.len())
                    .map_err(|_| ShellError::InvalidEntryArgument(format!("{} arguments", args.len())))?;
                // argv is NULL-terminated like a C main's.
                let mut argv: Vec<*mut c_char> = args
                    .iter()
                    .map(|a| a.as_ptr().cast_mut())
                    .chain(std::iter::once(std::ptr::null_mut()))
                    .collect();

                // SAFETY: the descriptor declares this symbol as
                // `int entry(int argc, char **argv)`.
                let f: Symbol<MainEntry> =
                    unsafe { lib.get(entry.symbol.as_bytes()) }.map_err(symbol_err)?;
                info!(argc, "transferring control to native entry");
                // SAFETY: argv outlives the call and holds argc valid C strings
                // followed by NULL.
                let code = unsafe { f(argc, argv.as_mut_ptr()) };
                info!(code, "native entry returned");
                Ok(EntryOutcome::Exited(code))
            }
        }
    }
}
