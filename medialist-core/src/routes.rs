//! Client-visible routes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Navigation target inside the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Movie(u64),
    Series(u64),
    Watchlist,
    Login,
    Register,
}

impl Route {
    /// Path for this route, e.g. `/series/42`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Movie(id) => format!("/movie/{id}"),
            Route::Series(id) => format!("/series/{id}"),
            Route::Watchlist => "/watchlist".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
        }
    }

    /// Parses a path produced by [`Route::path`]. Query strings are not part of the contract.
    pub fn from_path(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] => Some(Route::Home),
            ["movie", id] => id.parse().ok().map(Route::Movie),
            ["series", id] => id.parse().ok().map(Route::Series),
            ["watchlist"] => Some(Route::Watchlist),
            ["auth", "login"] => Some(Route::Login),
            ["auth", "register"] => Some(Route::Register),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
