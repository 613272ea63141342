//! Build script for the playlist export CLI.
//!
//! Places the `.env.example` credentials template next to where
//! `config::load_env` looks for the real `.env`, so a fresh install shows
//! users which variables to fill in.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into
/// `<data_local_dir>/playlist-export/`.
///
/// - Linux: `~/.local/share/playlist-export/.env.example`
/// - macOS: `~/Library/Application Support/playlist-export/.env.example`
/// - Windows: `%LOCALAPPDATA%/playlist-export/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("playlist-export");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
