//! # CLI Module
//!
//! User-facing command implementations. Commands collect input, drive the
//! catalog and management layers, and render progress; they are the only
//! place that terminates the process on fatal errors.
//!
//! ```text
//! CLI Layer (prompt, progress, summary)
//!     ↓
//! Management Layer (token lifecycle, export checkpoints)
//!     ↓
//! Catalog Layer (TIDAL API)
//! ```
//!
//! ## Commands
//!
//! - [`export`] - Exports one playlist to `<root>/<name>/<name>.json`
//!
//! ## Error Handling
//!
//! Missing credentials, a failed token exchange and any failure while
//! listing the playlist end the run via `error!`. Failures of individual
//! tracks are only reported; the track is kept in the export with a
//! status marker.
//!
//! ## Usage
//!
//! ```bash
//! playlist-export                                   # prompts for the URL
//! playlist-export export --url https://tidal.com/browse/playlist/<id>
//! playlist-export export --country-code DE --output-dir ./out
//! ```

mod export;

pub use export::ExportOptions;
pub use export::export;
