//! Medialist Core - Session, authentication and watchlist functionality
//!
//! This crate provides the building blocks shared by every Medialist surface:
//! configuration, tracing setup, client-visible routes, the authentication
//! provider seam, the session bridge that republishes the signed-in user,
//! registration form handling and the per-user watchlist.

pub mod auth;
pub mod config;
pub mod registration;
pub mod routes;
pub mod session;
pub mod tracing_setup;
pub mod watchlist;

// Re-export main types for convenient access
pub use auth::{AuthError, AuthProvider, AuthSubscription, AuthUser, InMemoryAuthProvider};
pub use config::MedialistConfig;
pub use registration::{
    Alert, FieldErrors, FormField, RegisterForm, RegistrationFlow, RegistrationOutcome,
};
pub use routes::Route;
pub use session::{SessionAction, SessionBridge, SessionError, SessionHandle, spawn_session_store};
pub use watchlist::{
    DocumentStore, InMemoryDocumentStore, StoreError, WatchlistService, WatchlistView,
};

/// Core errors that can bubble up from any Medialist subsystem.
///
/// High-level error types representing failures in core functionality.
#[derive(Debug, thiserror::Error)]
pub enum MedialistError {
    /// Auth provider refused or failed a request
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Watchlist storage failed
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    /// Session store is gone
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Invalid configuration value
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MedialistError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MedialistError::Auth(e) => match e {
                AuthError::EmailAlreadyInUse | AuthError::WeakPassword { .. } => e.to_string(),
                AuthError::InvalidCredentials => "Wrong email or password".to_string(),
                AuthError::ProviderUnavailable { .. } => {
                    "Authentication service is unavailable".to_string()
                }
            },
            MedialistError::Store(_) => "Could not load your watchlist".to_string(),
            MedialistError::Session(_) => "Session error occurred".to_string(),
            MedialistError::Configuration { .. } => "Configuration error occurred".to_string(),
            MedialistError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            MedialistError::Configuration { .. }
                | MedialistError::Auth(
                    AuthError::EmailAlreadyInUse
                        | AuthError::WeakPassword { .. }
                        | AuthError::InvalidCredentials
                )
        )
    }
}

pub type Result<T> = std::result::Result<T, MedialistError>;
