//! Form submission handlers - registration, sign-in, watchlist edits

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};
use medialist_core::{
    Alert, MedialistError, RegisterForm, RegistrationFlow, RegistrationOutcome, Route,
};
use serde::Deserialize;

use crate::errors::WebError;
use crate::pages::auth::{login_view, register_view};
use crate::pages::watchlist::redirect_to_login;
use crate::server::AppState;
use crate::sessions::{ClientSession, EXPIRED_COOKIE};

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Path to return to after signing in
    #[serde(default)]
    pub next: Option<String>,
}

/// Watchlist add/remove form data.
#[derive(Debug, Deserialize)]
pub struct WatchlistForm {
    /// Title as shown on the watchlist
    pub entry: String,
}

/// Handles the registration form.
///
/// Invalid input and provider rejections re-render the form with the
/// submitted email. Success signs this browser in and redirects to the
/// sign-in page.
pub async fn register_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Response {
    let (client, opened) = state.client_or_open(&headers);
    let mut flow = RegistrationFlow::new();

    match flow.submit(form, client.auth.as_ref()).await {
        RegistrationOutcome::Registered { user, redirect } => {
            client.await_user(Some(&user)).await;
            signed_in_redirect(&state, client, opened, &redirect.path())
        }
        RegistrationOutcome::Invalid(_) | RegistrationOutcome::Rejected(_) => {
            register_view(&state.page_context(&headers), &flow).into_response()
        }
    }
}

/// Handles the sign-in form.
pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let (client, opened) = state.client_or_open(&headers);

    match client.auth.sign_in(form.email.trim(), &form.password).await {
        Ok(user) => {
            tracing::info!(uid = %user.uid, "Signed in");
            client.await_user(Some(&user)).await;
            signed_in_redirect(&state, client, opened, &return_path(form.next.as_deref()))
        }
        Err(e) => {
            let alert = Alert::error(MedialistError::from(e).user_message());
            let ctx = state.page_context(&headers);
            login_view(&ctx, &form.email, Some(&alert), form.next.as_deref()).into_response()
        }
    }
}

/// Signs the requesting browser out and forgets its session.
///
/// # Errors
/// - `WebError::Core` - Auth provider unavailable
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if let Some(client) = state.sessions.remove(&headers) {
        client.auth.sign_out().await?;
        client.await_user(None).await;
    }

    Ok((
        [(header::SET_COOKIE, EXPIRED_COOKIE)],
        Redirect::to(&Route::Home.path()),
    )
        .into_response())
}

/// Adds an entry to the signed-in user's watchlist.
///
/// # Errors
/// - `WebError::Core` - Watchlist store unavailable
pub async fn watchlist_add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<WatchlistForm>,
) -> Result<Redirect, WebError> {
    let Some(user) = state.current_user(&headers) else {
        return Ok(redirect_to_login(Route::Watchlist));
    };

    let entry = form.entry.trim();
    if !entry.is_empty() {
        state.watchlist.add(&user, entry).await?;
    }
    Ok(Redirect::to(&Route::Watchlist.path()))
}

/// Removes an entry from the signed-in user's watchlist.
///
/// # Errors
/// - `WebError::Core` - Watchlist store unavailable
pub async fn watchlist_remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<WatchlistForm>,
) -> Result<Redirect, WebError> {
    let Some(user) = state.current_user(&headers) else {
        return Ok(redirect_to_login(Route::Watchlist));
    };

    state.watchlist.remove(&user, form.entry.trim()).await?;
    Ok(Redirect::to(&Route::Watchlist.path()))
}

/// 303 to `target`. A session opened by this request is kept and handed
/// to the browser.
fn signed_in_redirect(
    state: &AppState,
    client: Arc<ClientSession>,
    opened: bool,
    target: &str,
) -> Response {
    let redirect = Redirect::to(target);
    if !opened {
        return redirect.into_response();
    }

    let cookie = client.cookie();
    state.sessions.insert(client);
    ([(header::SET_COOKIE, cookie)], redirect).into_response()
}

/// Only paths of known routes are followed after sign-in.
fn return_path(next: Option<&str>) -> String {
    next.and_then(Route::from_path)
        .unwrap_or(Route::Home)
        .path()
}
