//! HTTP request handlers organized by functionality

pub mod api;
pub mod forms;
pub mod htmx;

// Re-export handler functions
pub use api::api_search;
pub use forms::{
    LoginForm, WatchlistForm, login_submit, logout, register_submit, watchlist_add,
    watchlist_remove,
};
pub use htmx::{SearchQuery, htmx_search};
