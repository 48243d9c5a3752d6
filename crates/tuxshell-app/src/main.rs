// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tuxshell — Native bootstrap shell for the SuperTux engine
//
// Entry point. Parses the command line, loads the configuration, initialises
// logging, and hands over to the selected command.

mod commands;
mod exports;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use tuxshell_core::ShellConfig;
use tuxshell_core::error::Result;

#[derive(Parser)]
#[command(name = "tuxshell")]
#[command(about = "Load the SuperTux native engine and report the platform locale to it", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file (defaults to the built-in SuperTux descriptor)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the locale, load the native libraries and run the engine
    Run,

    /// Capture the platform locale and print the snapshot as JSON
    Locale {
        /// Report this locale instead of asking the platform
        #[arg(long)]
        simulate: Option<String>,
    },

    /// Validate the descriptor and show where each library resolves
    Check,

    /// Write the default configuration to a file
    InitConfig {
        /// Destination file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// `RUST_LOG` if set, otherwise `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Load the configuration under a provisional subscriber. The configured
/// filter is only known once the file has been read.
fn load_config<W>(path: Option<&Path>, filter: EnvFilter, writer: W) -> Result<ShellConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let provisional = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(provisional, || ShellConfig::load_or_default(path))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), env_filter("info"), std::io::stderr) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tuxshell: cannot read configuration: {e}");
            return ExitCode::from(commands::EXIT_CONFIG);
        }
    };

    let default_filter = config.log_filter.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tuxshell starting");

    let result = match cli.command {
        Commands::Run => commands::run(config),
        Commands::Locale { simulate } => commands::locale(simulate.as_deref()),
        Commands::Check => commands::check(&config),
        Commands::InitConfig { path, force } => commands::init_config(&path, force),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "tuxshell failed");
            eprintln!("tuxshell: {e}");
            ExitCode::from(commands::exit_code_for(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn config_load_is_logged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tuxshell.json");
        ShellConfig::default().save(&path).expect("save");

        let buf = SharedBuf::default();
        let sink = buf.clone();
        let config = load_config(Some(&path), EnvFilter::new("info"), move || sink.clone())
            .expect("load");
        assert_eq!(config, ShellConfig::default());

        let logged = String::from_utf8(buf.0.lock().expect("buffer lock").clone()).expect("utf8");
        assert!(logged.contains("shell configuration loaded"), "{logged}");
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let err = load_config(Some(&path), EnvFilter::new("off"), std::io::sink).unwrap_err();
        assert!(matches!(err, tuxshell_core::ShellError::Io(_)));
    }
}
