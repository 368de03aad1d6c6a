//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API operations the
//! application needs: replacing and extending a playlist's track list. It is
//! the only place where HTTP requests against the API are issued; higher
//! layers drive it through the [`crate::sync::PlaylistWriter`] trait.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Synchronizer (batching, throttle retry)
//!          ↓
//! Spotify Integration Layer (this module)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `PUT /playlists/{playlist_id}/tracks` - replace the playlist's contents
//!   (issued with an empty URI list to clear it)
//! - `POST /playlists/{playlist_id}/tracks` - append up to 100 track URIs
//!
//! ## Rate Limiting
//!
//! A 429 Too Many Requests response is surfaced as
//! [`crate::sync::WriteError::Throttled`] together with the parsed
//! `Retry-After` header. The module itself never sleeps; the cooldown and
//! retry policy live in the synchronizer so they stay testable against a
//! fake client.
//!
//! ## Authentication
//!
//! Requests are signed with a bearer token obtained from the stored
//! [`crate::management::TokenManager`], which refreshes it transparently
//! shortly before expiry. Acquiring the initial token is not handled here.

pub mod playlist;
