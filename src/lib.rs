//! Playlist Export CLI Library
//!
//! This library exports the track listing of a TIDAL playlist to a local
//! JSON file. It walks the playlist's paginated item listing, enriches every
//! item with track, artist and album metadata, and checkpoints progress to
//! disk while it goes.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for configuration, API and export failures
//! - `management` - Token lifecycle and export checkpointing
//! - `tidal` - TIDAL catalog API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_export::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> playlist_export::Res<()> {
//!     config::load_env().await?;
//!     cli::export(cli::ExportOptions::default()).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod tidal;
pub mod types;
pub mod utils;

/// Result alias used by the command layer, where any error is reported to
/// the user and ends the run.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Playlist: {}", playlist_name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green checkmark.
///
/// ```
/// success!("Exported {} tracks to {}", count, path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for fatal conditions: missing credentials, a failed token exchange,
/// a failed playlist listing or a failed checkpoint write. Evaluates to `!`,
/// so it can stand in any match arm.
///
/// ```
/// let credentials = match config::credentials() {
///     Ok(c) => c,
///     Err(e) => error!("Missing credentials: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for problems the run recovers from, such as a
/// single track that could not be resolved.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
