// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell configuration and the bootstrap descriptor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ShellError};

/// Calling convention of the engine entry symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryAbi {
    /// `extern "C" fn()`: no arguments, nothing returned.
    #[default]
    Plain,
    /// `extern "C" fn(c_int, *mut *mut c_char) -> c_int`, as exported by
    /// SDL_main style engines.
    Main,
}

/// Which native libraries to load, in which order, and where control goes
/// once they are all resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapDescriptor {
    /// Each library may depend on symbols exported by the ones before it.
    #[serde(default)]
    pub library_load_order: Vec<String>,
    /// Library holding the entry symbol. Defaults to the last library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_shared_object: Option<String>,
    #[serde(default)]
    pub entry_symbol: Option<String>,
    #[serde(default)]
    pub entry_abi: EntryAbi,
    /// argv for a [`EntryAbi::Main`] entry. Ignored for [`EntryAbi::Plain`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_args: Vec<String>,
}

/// A validated entry point, ready to hand to a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub shared_object: String,
    pub symbol: String,
    pub abi: EntryAbi,
    pub args: Vec<String>,
}

impl BootstrapDescriptor {
    pub fn new<I, S>(libraries: I, entry_symbol: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            library_load_order: libraries.into_iter().map(Into::into).collect(),
            entry_shared_object: None,
            entry_symbol: Some(entry_symbol.into()),
            entry_abi: EntryAbi::Plain,
            entry_args: Vec::new(),
        }
    }

    /// The order in which the loader must resolve each library.
    pub fn library_load_order(&self) -> &[String] {
        &self.library_load_order
    }

    /// The library whose load completes native bring-up.
    pub fn entry_shared_object(&self) -> Option<&str> {
        self.entry_shared_object
            .as_deref()
            .or_else(|| self.library_load_order.last().map(String::as_str))
    }

    pub fn entry_symbol(&self) -> Option<&str> {
        self.entry_symbol.as_deref()
    }

    /// Check the descriptor and produce the entry point to invoke.
    ///
    /// Any error returned here is a configuration error: startup must not
    /// proceed with a partial descriptor.
    pub fn validate(&self) -> Result<EntryPoint> {
        if self.library_load_order.is_empty() {
            return Err(ShellError::EmptyLoadOrder);
        }

        for (i, library) in self.library_load_order.iter().enumerate() {
            check_library_id("library identifier", library)?;
            if self.library_load_order[..i].contains(library) {
                return Err(ShellError::DuplicateLibrary(library.clone()));
            }
        }

        let symbol = match self.entry_symbol.as_deref() {
            None => return Err(ShellError::MissingEntrySymbol),
            Some(s) if s.trim().is_empty() => return Err(ShellError::MissingEntrySymbol),
            Some(s) => s,
        };
        check_symbol(symbol)?;

        // The load order is non-empty, so a shared object always exists.
        let shared_object = self.entry_shared_object().unwrap_or_default();
        check_library_id("entry shared object", shared_object)?;
        if !self.library_load_order.iter().any(|l| l == shared_object) {
            return Err(ShellError::EntryNotInLoadOrder(shared_object.to_string()));
        }

        if let Some(arg) = self.entry_args.iter().find(|a| a.contains('\0')) {
            return Err(ShellError::InvalidEntryArgument(arg.clone()));
        }

        debug!(
            libraries = self.library_load_order.len(),
            shared_object,
            symbol,
            "bootstrap descriptor validated"
        );

        Ok(EntryPoint {
            shared_object: shared_object.to_string(),
            symbol: symbol.to_string(),
            abi: self.entry_abi,
            args: self.entry_args.clone(),
        })
    }
}

impl Default for BootstrapDescriptor {
    /// The SuperTux Android shell: SDL first, then the game, entered
    /// through `SDL_main`.
    fn default() -> Self {
        Self {
            library_load_order: vec!["SDL2".into(), "supertux2".into()],
            entry_shared_object: None,
            entry_symbol: Some("SDL_main".into()),
            entry_abi: EntryAbi::Main,
            entry_args: vec!["supertux2".into()],
        }
    }
}

fn check_library_id(field: &'static str, value: &str) -> Result<()> {
    let reason = if value.trim().is_empty() {
        "must not be blank"
    } else if value.trim() != value {
        "must not have surrounding whitespace"
    } else if value.contains('\0') {
        "must not contain NUL bytes"
    } else {
        return Ok(());
    };
    Err(ShellError::InvalidIdentifier {
        field,
        value: value.to_string(),
        reason,
    })
}

fn check_symbol(value: &str) -> Result<()> {
    let mut chars = value.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(());
    }
    Err(ShellError::InvalidIdentifier {
        field: "entry symbol",
        value: value.to_string(),
        reason: "must be a C identifier",
    })
}

/// Persistent shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub bootstrap: BootstrapDescriptor,
    /// Directories searched, in order, for bare library identifiers before
    /// falling back to the system loader's own search path.
    #[serde(default)]
    pub library_search_paths: Vec<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapDescriptor::default(),
            library_search_paths: vec![PathBuf::from("lib")],
            log_filter: None,
        }
    }
}

impl ShellConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ShellConfig = serde_json::from_str(&text)?;
        info!(
            path = %path.display(),
            libraries = config.bootstrap.library_load_order.len(),
            "shell configuration loaded"
        );
        Ok(config)
    }

    /// Read `path` if given, otherwise use the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                debug!("no configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        info!(path = %path.display(), "shell configuration written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_order_is_stable() {
        let desc = BootstrapDescriptor::new(["A", "B", "C"], "run");
        let first = desc.library_load_order().to_vec();
        for _ in 0..10 {
            assert_eq!(desc.library_load_order(), first.as_slice());
        }
        assert_eq!(first, ["A", "B", "C"]);
    }

    #[test]
    fn entry_shared_object_defaults_to_last_library() {
        let desc = BootstrapDescriptor::new(["SDL2", "supertux2"], "SDL_main");
        assert_eq!(desc.entry_shared_object(), Some("supertux2"));

        let entry = desc.validate().expect("valid descriptor");
        assert_eq!(entry.shared_object, "supertux2");
        assert_eq!(entry.symbol, "SDL_main");
        assert_eq!(entry.abi, EntryAbi::Plain);
    }

    #[test]
    fn empty_load_order_rejected() {
        let desc = BootstrapDescriptor::new(Vec::<String>::new(), "main");
        let err = desc.validate().unwrap_err();
        assert!(matches!(err, ShellError::EmptyLoadOrder));
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_entry_symbol_rejected() {
        let mut desc = BootstrapDescriptor::new(["A"], "main");
        desc.entry_symbol = None;
        assert!(matches!(desc.validate(), Err(ShellError::MissingEntrySymbol)));

        desc.entry_symbol = Some("   ".into());
        assert!(matches!(desc.validate(), Err(ShellError::MissingEntrySymbol)));
    }

    #[test]
    fn symbol_must_be_c_identifier() {
        for bad in ["9lives", "SDL-main", "main()", "entry point"] {
            let desc = BootstrapDescriptor::new(["A"], bad);
            let err = desc.validate().unwrap_err();
            assert!(
                matches!(err, ShellError::InvalidIdentifier { field: "entry symbol", .. }),
                "{bad:?} should be rejected, got {err}"
            );
        }
        assert!(BootstrapDescriptor::new(["A"], "_start2").validate().is_ok());
    }

    #[test]
    fn blank_and_duplicate_libraries_rejected() {
        let blank = BootstrapDescriptor::new(["A", " "], "main");
        assert!(matches!(
            blank.validate(),
            Err(ShellError::InvalidIdentifier { .. })
        ));

        let padded = BootstrapDescriptor::new([" A"], "main");
        assert!(matches!(
            padded.validate(),
            Err(ShellError::InvalidIdentifier { .. })
        ));

        let dup = BootstrapDescriptor::new(["A", "B", "A"], "main");
        match dup.validate() {
            Err(ShellError::DuplicateLibrary(name)) => assert_eq!(name, "A"),
            other => panic!("expected DuplicateLibrary, got {other:?}"),
        }
    }

    #[test]
    fn explicit_entry_object_must_be_loaded() {
        let mut desc = BootstrapDescriptor::new(["A", "B"], "main");
        desc.entry_shared_object = Some("C".into());
        match desc.validate() {
            Err(ShellError::EntryNotInLoadOrder(name)) => assert_eq!(name, "C"),
            other => panic!("expected EntryNotInLoadOrder, got {other:?}"),
        }

        desc.entry_shared_object = Some("A".into());
        assert_eq!(desc.validate().expect("valid").shared_object, "A");
    }

    #[test]
    fn nul_in_entry_args_rejected() {
        let mut desc = BootstrapDescriptor::new(["A"], "main");
        desc.entry_abi = EntryAbi::Main;
        desc.entry_args = vec!["ok".into(), "bad\0arg".into()];
        let err = desc.validate().unwrap_err();
        assert!(matches!(err, ShellError::InvalidEntryArgument(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn default_descriptor_is_valid() {
        let entry = BootstrapDescriptor::default().validate().expect("defaults valid");
        assert_eq!(entry.shared_object, "supertux2");
        assert_eq!(entry.symbol, "SDL_main");
        assert_eq!(entry.abi, EntryAbi::Main);
        assert_eq!(entry.args, ["supertux2"]);
    }

    #[test]
    fn config_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tuxshell.json");

        let mut config = ShellConfig::default();
        config.bootstrap = BootstrapDescriptor::new(["engine_base", "engine"], "engine_start");
        config.log_filter = Some("debug".into());
        config.save(&path).expect("save");

        let loaded = ShellConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn config_parses_minimal_json() {
        let json = r#"{
            "bootstrap": {
                "library_load_order": ["SDL2", "supertux2"],
                "entry_symbol": "SDL_main",
                "entry_abi": "main"
            }
        }"#;
        let config: ShellConfig = serde_json::from_str(json).expect("parse");
        assert_eq!(config.bootstrap.entry_abi, EntryAbi::Main);
        assert!(config.library_search_paths.is_empty());
        assert!(config.log_filter.is_none());
        assert_eq!(config.bootstrap.entry_shared_object(), Some("supertux2"));
    }

    #[test]
    fn config_without_entry_symbol_parses_but_fails_validation() {
        let json = r#"{ "bootstrap": { "library_load_order": ["A"] } }"#;
        let config: ShellConfig = serde_json::from_str(json).expect("parse");
        assert!(matches!(
            config.bootstrap.validate(),
            Err(ShellError::MissingEntrySymbol)
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ShellConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
        assert!(!err.is_configuration());
    }
}
