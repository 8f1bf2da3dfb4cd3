//! Full page handlers using component system
//!
//! Pages compose multiple components into complete HTML responses.
//! All pages use the same base layout with HTMX and Tailwind CSS.

pub mod auth;
pub mod home;
pub mod media;
pub mod watchlist;

// Re-export page handlers
pub use auth::{login_page, register_page};
pub use home::home_page;
pub use media::{movie_page, series_page};
pub use watchlist::watchlist_page;
