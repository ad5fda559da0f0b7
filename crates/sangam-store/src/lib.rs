//! # sangam-store
//!
//! Device-local persistence for the Sangam client: the last-used search
//! filter set and the saved-search list.  Data is a convenience cache, not
//! authoritative state; the server never sees it.
//!
//! The backing store is a single key/value table in SQLite holding
//! JSON-encoded values under fixed keys, mirroring the browser-storage shape
//! of the web client.  The crate exposes a synchronous [`Database`] handle
//! plus typed helpers; `*_or_default` variants swallow and log failures so
//! callers degrade to defaults instead of surfacing storage errors.

pub mod database;
pub mod migrations;
pub mod preferences;
pub mod saved_searches;
pub mod storage;

mod error;

pub use database::Database;
pub use error::StoreError;
