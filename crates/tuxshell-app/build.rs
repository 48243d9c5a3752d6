// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The engine libraries resolve the `tuxshell_*` locale accessors from the
// launcher executable, so its dynamic symbol table must carry them.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // cfg!() here describes the host; the target comes from the environment.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "linux" | "android" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" => {
            println!("cargo:rustc-link-arg-bins=-Wl,--export-dynamic");
        }
        // Mach-O executables export their global symbols by default.
        _ => {}
    }
}
