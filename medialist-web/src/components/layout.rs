//! Layout components - page shell, navigation, cards, buttons

use axum::http::StatusCode;
use axum::response::Html;
use medialist_core::AuthUser;
use medialist_search::Theme;

use super::{escape_html, search};

/// Per-request data every page needs to draw its chrome.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Signed-in user, if any
    pub user: Option<AuthUser>,
    /// Colours for the search dropdown
    pub theme: Theme,
    /// Quiet period before the browser sends a search
    pub search_delay_ms: u64,
}

/// Renders a complete HTML page with the shared head, nav bar and content.
pub fn render_page(title: &str, active_nav: &str, content: &str, ctx: &PageContext) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{title} - Medialist</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <style>
                .htmx-indicator {{ display: none; }}
                .htmx-request .htmx-indicator {{ display: block; }}
                .htmx-request.htmx-indicator {{ display: block; }}
                .htmx-request .hide-while-loading {{ display: none; }}
            </style>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans">
            {nav}

            <main class="max-w-6xl mx-auto px-4 py-8">
                {content}
            </main>
            {script}
        </body>
        </html>"#,
        title = escape_html(title),
        nav = nav_bar(active_nav, ctx),
        script = search::search_script(),
    );

    Html(html)
}

/// Minimal page for error responses.
///
/// Rendered without the nav bar since the request state may be unusable.
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{code} - Medialist</title>
            <meta charset="utf-8">
            <script src="https://cdn.tailwindcss.com"></script>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans flex items-center justify-center">
            <div class="text-center">
                <div class="text-5xl font-bold text-gray-500 mb-4">{code}</div>
                <p class="text-gray-300 mb-6">{message}</p>
                <a href="/" class="text-sky-400 hover:underline">Back to home</a>
            </div>
        </body>
        </html>"#,
        code = status.as_u16(),
        message = escape_html(message),
    )
}

/// Renders the main navigation bar with the search dropdown and account links.
pub fn nav_bar(active_page: &str, ctx: &PageContext) -> String {
    let nav_item = |href: &str, label: &str, page: &str| {
        let active_class = if page == active_page {
            "text-sky-400 bg-sky-400 bg-opacity-10"
        } else {
            "text-gray-300 hover:text-sky-400 hover:bg-gray-700"
        };

        format!(
            r#"<a href="{href}" class="px-3 py-2 rounded-md text-sm font-medium transition-colors {active_class}">{label}</a>"#
        )
    };

    let account = match &ctx.user {
        Some(user) => format!(
            r#"<span class="text-sm text-gray-400">{email}</span>
            <form method="post" action="/auth/logout">
                {button}
            </form>"#,
            email = escape_html(&user.email),
            button = button("Sign out", "ghost", Some(r#"type="submit""#)),
        ),
        None => format!(
            "{}{}",
            nav_item("/auth/login", "Sign in", "login"),
            nav_item("/auth/register", "Register", "register")
        ),
    };

    format!(
        r#"<nav class="bg-gray-800 border-b border-gray-700 sticky top-0 z-50">
            <div class="max-w-6xl mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-8">
                        <a href="/" class="text-2xl font-bold text-sky-400">Medialist</a>
                        <div class="hidden md:flex space-x-4">
                            {home}
                            {watchlist}
                        </div>
                    </div>
                    <div class="flex items-center space-x-4">
                        {search}
                        {account}
                    </div>
                </div>
            </div>
        </nav>"#,
        home = nav_item("/", "Home", "home"),
        watchlist = nav_item("/watchlist", "Watchlist", "watchlist"),
        search = search::search_box(&ctx.theme, ctx.search_delay_ms),
    )
}

/// Renders a page header with title and optional subtitle.
pub fn page_header(title: &str, subtitle: Option<&str>) -> String {
    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="text-gray-400 mt-2">{}</p>"#, escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<div class="mb-8">
            <h1 class="text-3xl font-bold text-white">{}</h1>
            {subtitle_html}
        </div>"#,
        escape_html(title)
    )
}

/// Renders a card container with an optional title.
pub fn card(title: Option<&str>, content: &str) -> String {
    let header_html = title
        .map(|t| {
            format!(
                r#"<h3 class="text-lg font-semibold text-white mb-6">{}</h3>"#,
                escape_html(t)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="bg-gray-800 border border-gray-700 rounded-lg p-6 mb-6">
            {header_html}
            {content}
        </div>"#
    )
}

/// Renders a button with Tailwind styling.
///
/// Variants: primary, secondary, danger, ghost.
pub fn button(text: &str, variant: &str, attributes: Option<&str>) -> String {
    let base_classes = "px-4 py-2 rounded-lg font-medium transition-colors focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-gray-900";

    let variant_classes = match variant {
        "primary" => "bg-sky-500 hover:bg-sky-600 text-white focus:ring-sky-500",
        "secondary" => "bg-gray-700 hover:bg-gray-600 text-white focus:ring-gray-500",
        "danger" => "bg-red-600 hover:bg-red-700 text-white focus:ring-red-500",
        "ghost" => "text-gray-300 hover:text-white hover:bg-gray-700 focus:ring-gray-500",
        _ => "bg-gray-600 hover:bg-gray-700 text-white focus:ring-gray-500",
    };

    let attrs = attributes.unwrap_or("");

    format!(r#"<button class="{base_classes} {variant_classes}" {attrs}>{text}</button>"#)
}
