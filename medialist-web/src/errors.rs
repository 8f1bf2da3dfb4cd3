//! Handler errors and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use medialist_core::{AuthError, MedialistError, SessionError, StoreError};
use medialist_search::MediaSearchError;
use thiserror::Error;

use crate::components::layout;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// Requested page does not exist
    #[error("{what} not found")]
    NotFound {
        /// What was looked up
        what: String,
    },

    /// Catalog search failed
    #[error("Search error: {0}")]
    Search(#[from] MediaSearchError),

    /// Auth, session or watchlist failure
    #[error(transparent)]
    Core(#[from] MedialistError),
}

impl From<StoreError> for WebError {
    fn from(error: StoreError) -> Self {
        WebError::Core(error.into())
    }
}

impl From<AuthError> for WebError {
    fn from(error: AuthError) -> Self {
        WebError::Core(error.into())
    }
}

impl From<SessionError> for WebError {
    fn from(error: SessionError) -> Self {
        WebError::Core(error.into())
    }
}

impl WebError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound { .. } | WebError::Search(MediaSearchError::NotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            WebError::Search(MediaSearchError::EmptyQuery) => StatusCode::BAD_REQUEST,
            WebError::Search(_) => StatusCode::BAD_GATEWAY,
            WebError::Core(MedialistError::Store(_)) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Core(e) if e.is_user_error() => StatusCode::BAD_REQUEST,
            WebError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user.
    pub fn user_message(&self) -> String {
        match self {
            WebError::NotFound { .. } | WebError::Search(MediaSearchError::NotFound { .. }) => {
                "We couldn't find that title".to_string()
            }
            WebError::Search(_) => "The catalog is unavailable right now".to_string(),
            WebError::Core(e) => e.user_message(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        let body = layout::error_page(status, &self.user_message());
        (status, Html(body)).into_response()
    }
}
