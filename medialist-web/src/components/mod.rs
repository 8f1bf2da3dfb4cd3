//! Reusable HTML components for HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments that can be used
//! in full pages or as HTMX partial updates. All styling uses Tailwind CSS.

pub mod forms;
pub mod layout;
pub mod media;
pub mod search;

// Re-export main component functions
pub use forms::{alert_banner, field, login_form, register_form};
pub use layout::{PageContext, card, nav_bar, page_header, render_page};
pub use media::{format_release_date, media_detail, watchlist_entries};
pub use search::{result_panel, search_box};

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
