//! Medialist Web - HTMX UI and JSON API server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered pages for browsing the catalog, a debounced search
//! dropdown driven by HTMX, account registration and sign-in, and a
//! per-user watchlist.

pub mod components;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod sessions;

// Re-export main types
pub use errors::WebError;
pub use server::{AppState, build_router, run_server};
pub use sessions::{ClientSession, SessionRegistry};
