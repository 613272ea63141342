//! # TIDAL Catalog Integration
//!
//! Everything that talks HTTP lives here. The rest of the crate sees plain
//! data types from [`crate::types`] and the error enums in [`crate::error`].
//!
//! ```text
//! CLI Layer (prompt, progress bar)
//!          ↓
//! Catalog Integration Layer
//!     ├── auth      client-credentials token exchange
//!     ├── url       link canonicalization onto the API authority
//!     ├── client    GET with 429 backoff and 404 -> None
//!     ├── playlist  playlist name + paginated item references
//!     └── tracks    per-track enrichment
//!          ↓
//! HTTP Layer (reqwest, JSON:API)
//! ```
//!
//! ## Request Discipline
//!
//! Requests are strictly sequential. Every catalog request is preceded by a
//! fixed courtesy delay ([`client::TidalClient::throttle`]), independent of
//! the backoff applied when the server answers 429.
//!
//! ## Endpoints
//!
//! - `POST {auth}/v1/oauth2/token` - client-credentials grant
//! - `GET /v2/playlists/{id}` - playlist name
//! - `GET /v2/playlists/{id}/relationships/items` - paginated item references
//! - `GET /v2/tracks/{id}?include=artists,albums` - track detail

pub mod auth;
pub mod client;
pub mod playlist;
pub mod tracks;
pub mod url;

pub use client::TidalClient;
