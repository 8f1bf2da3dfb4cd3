//! HTMX + Tailwind web server for Medialist
//!
//! Serves full pages, HTMX fragments for the search dropdown and a small
//! JSON API. All pages use server-side rendering.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use medialist_core::{
    AuthProvider, AuthUser, DocumentStore, InMemoryAuthProvider, InMemoryDocumentStore,
    MedialistConfig, WatchlistService,
};
use medialist_search::{MediaSearchService, Theme};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::components::PageContext;
use crate::handlers::{
    api_search, htmx_search, login_submit, logout, register_submit, watchlist_add,
    watchlist_remove,
};
use crate::pages::{
    home_page, login_page, movie_page, register_page, series_page, watchlist_page,
};
use crate::sessions::{ClientSession, SessionRegistry};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Catalog search
    pub search: MediaSearchService,
    /// Account backend; each browser signs in through its own scope of it
    pub auth: Arc<dyn AuthProvider>,
    /// Signed-in browsers by session cookie
    pub sessions: Arc<SessionRegistry>,
    /// Per-user watchlists
    pub watchlist: WatchlistService,
    /// Runtime configuration
    pub config: Arc<MedialistConfig>,
    /// Colours passed to search components
    pub theme: Theme,
}

impl AppState {
    /// Builds the shared state.
    pub fn new(
        config: MedialistConfig,
        search: MediaSearchService,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        let theme = Theme::from(&config.theme);

        Self {
            search,
            auth,
            sessions: Arc::new(SessionRegistry::new()),
            watchlist: WatchlistService::new(store),
            config: Arc::new(config),
            theme,
        }
    }

    /// State with in-memory auth and storage.
    pub fn in_memory(config: MedialistConfig, search: MediaSearchService) -> Self {
        Self::new(
            config,
            search,
            Arc::new(InMemoryAuthProvider::new()),
            Arc::new(InMemoryDocumentStore::new()),
        )
    }

    /// Session of the requesting browser, if its cookie names an open one.
    pub fn client(&self, headers: &HeaderMap) -> Option<Arc<ClientSession>> {
        self.sessions.lookup(headers)
    }

    /// Session of the requesting browser, or a new one that is not yet
    /// registered. The flag is `true` for a new session.
    ///
    /// Must be called inside a tokio runtime.
    pub fn client_or_open(&self, headers: &HeaderMap) -> (Arc<ClientSession>, bool) {
        match self.client(headers) {
            Some(client) => (client, false),
            None => (Arc::new(ClientSession::open(self.auth.as_ref())), true),
        }
    }

    /// User signed in on the requesting browser, if any.
    pub fn current_user(&self, headers: &HeaderMap) -> Option<AuthUser> {
        self.client(headers)?.current_user()
    }

    /// Data the page chrome needs for the current request.
    pub fn page_context(&self, headers: &HeaderMap) -> PageContext {
        PageContext {
            user: self.current_user(headers),
            theme: self.theme.clone(),
            search_delay_ms: u64::try_from(self.config.search.debounce.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Main pages (HTMX + Tailwind)
        .route("/", get(home_page))
        .route("/movie/{id}", get(movie_page))
        .route("/series/{id}", get(series_page))
        .route("/watchlist", get(watchlist_page).post(watchlist_add))
        .route("/watchlist/remove", post(watchlist_remove))
        .route("/auth/register", get(register_page).post(register_submit))
        .route("/auth/login", get(login_page).post(login_submit))
        .route("/auth/logout", post(logout))
        // HTMX partial update endpoints
        .route("/htmx/search", get(htmx_search))
        // JSON API endpoints
        .route("/api/search", get(api_search))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

/// Runs the web server until it is stopped.
///
/// # Errors
/// - Catalog provider could not be configured
/// - Bind address unavailable
pub async fn run_server(config: MedialistConfig) -> Result<(), Box<dyn std::error::Error>> {
    let search = MediaSearchService::from_config(&config.search)?;
    let address = config.bind_address();
    let state = AppState::in_memory(config, search);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Medialist running on http://{address}");
    axum::serve(listener, app).await?;
    Ok(())
}
