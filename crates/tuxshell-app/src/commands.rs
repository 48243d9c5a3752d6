// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations.

use std::path::Path;
use std::process::ExitCode;

use tracing::info;

use tuxshell_bootstrap::{DylibLoader, Shell};
use tuxshell_bridge::{FixedLocaleSource, capture_locale, platform_locale_source};
use tuxshell_core::error::{Result, ShellError};
use tuxshell_core::{LocaleSnapshot, ShellConfig};
use tuxshell_locale::locale_cell;

/// Generic failure (library missing, engine crashed on entry, ...).
pub const EXIT_FAILURE: u8 = 1;
/// The configuration or descriptor is unusable.
pub const EXIT_CONFIG: u8 = 2;

pub fn exit_code_for(e: &ShellError) -> u8 {
    if e.is_configuration() || matches!(e, ShellError::Serialization(_)) {
        EXIT_CONFIG
    } else {
        EXIT_FAILURE
    }
}

/// Engine exit codes are truncated the way the C runtime truncates them.
fn engine_exit_code(code: i32) -> ExitCode {
    ExitCode::from((code & 0xff) as u8)
}

pub fn run(config: ShellConfig) -> Result<ExitCode> {
    let loader = DylibLoader::new(config.library_search_paths);
    let mut shell = Shell::new(config.bootstrap, loader, platform_locale_source());
    shell.register_accessors()?;
    info!(
        libraries = ?shell.descriptor().library_load_order(),
        entry = shell.descriptor().entry_symbol().unwrap_or_default(),
        "starting native engine"
    );

    let outcome = shell.start()?;
    info!(code = outcome.exit_code(), "engine finished");
    Ok(engine_exit_code(outcome.exit_code()))
}

/// Capture once, the same way `run` does, without loading anything.
pub fn capture(simulate: Option<&str>) -> LocaleSnapshot {
    let (mut writer, _reader) = locale_cell();
    match simulate {
        Some(locale) => capture_locale(&FixedLocaleSource::new(locale), &mut writer),
        None => capture_locale(&*platform_locale_source(), &mut writer),
    }
}

pub fn locale(simulate: Option<&str>) -> Result<ExitCode> {
    let snapshot = capture(simulate);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(ExitCode::SUCCESS)
}

/// Describe what `run` would do, one line per step.
pub fn check_report(config: &ShellConfig) -> Result<Vec<String>> {
    let entry = config.bootstrap.validate()?;
    let loader = DylibLoader::new(config.library_search_paths.clone());

    let mut lines = Vec::new();
    for (i, library) in config.bootstrap.library_load_order().iter().enumerate() {
        let resolved = loader.resolve(library);
        let origin = match (resolved.found, resolved.explicit) {
            (true, _) => "found",
            (false, true) => "not found",
            (false, false) => "system search path",
        };
        lines.push(format!(
            "{}. {library} -> {} ({origin})",
            i + 1,
            resolved.path.display()
        ));
    }
    lines.push(format!(
        "entry: {}::{} ({:?} ABI)",
        entry.shared_object, entry.symbol, entry.abi
    ));
    Ok(lines)
}

pub fn check(config: &ShellConfig) -> Result<ExitCode> {
    for line in check_report(config)? {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn init_config(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        return Err(ShellError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path.display()),
        )));
    }
    ShellConfig::default().save(path)?;
    Ok(ExitCode::SUCCESS)
}
