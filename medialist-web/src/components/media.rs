//! Media components - detail view and watchlist entries

use chrono::NaiveDate;
use medialist_core::WatchlistView;
use medialist_search::SearchResult;

use super::escape_html;
use super::layout::button;

/// Formats a catalog date (`YYYY-MM-DD`) for display, e.g. `March 30, 1999`.
///
/// Unparseable dates are shown as given.
pub fn format_release_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Renders the detail view for one catalog entry.
pub fn media_detail(result: &SearchResult, image_base_url: &str, signed_in: bool) -> String {
    let poster = result
        .poster_url(image_base_url)
        .map(|url| {
            format!(
                r#"<img src="{}" alt="" class="w-64 rounded-lg shadow-lg" />"#,
                escape_html(&url)
            )
        })
        .unwrap_or_else(|| {
            r#"<div class="w-64 h-96 rounded-lg bg-gray-800 flex items-center justify-center text-gray-500">No poster</div>"#
                .to_string()
        });

    let date = result
        .display_date()
        .map(|d| {
            format!(
                r#"<p class="text-gray-400">{}</p>"#,
                escape_html(&format_release_date(d))
            )
        })
        .unwrap_or_default();

    let action = if signed_in {
        format!(
            r#"<form method="post" action="/watchlist">
                <input type="hidden" name="entry" value="{}" />
                {}
            </form>"#,
            escape_html(&result.title),
            button("Add to watchlist", "primary", Some(r#"type="submit""#))
        )
    } else {
        r#"<a href="/auth/login" class="text-sky-400 hover:underline">Sign in to add this to your watchlist</a>"#
            .to_string()
    };

    format!(
        r#"<div class="flex flex-col md:flex-row gap-8">
            {poster}
            <div class="space-y-4">
                <span class="px-2 py-1 rounded bg-gray-700 text-sm text-gray-200">{kind}</span>
                <h1 class="text-4xl font-bold text-white">{title}</h1>
                {date}
                <p class="text-lg text-yellow-400">IMDb Score: {score}</p>
                {action}
            </div>
        </div>"#,
        kind = result.media_type.label(),
        title = escape_html(&result.title),
        score = result.vote_average,
    )
}

/// Renders the watchlist, or the empty notice.
pub fn watchlist_entries(view: &WatchlistView) -> String {
    match view {
        WatchlistView::Empty => {
            r#"<p class="text-gray-400 text-center py-12">No movies added</p>"#.to_string()
        }
        WatchlistView::Items(entries) => {
            let items: String = entries
                .iter()
                .map(|entry| {
                    let entry = escape_html(entry);
                    format!(
                        r#"<li class="flex items-center justify-between py-3">
                            <span class="text-white">{entry}</span>
                            <form method="post" action="/watchlist/remove">
                                <input type="hidden" name="entry" value="{entry}" />
                                {}
                            </form>
                        </li>"#,
                        button("Remove", "ghost", Some(r#"type="submit""#))
                    )
                })
                .collect();
            format!(r#"<ul class="divide-y divide-gray-700">{items}</ul>"#)
        }
    }
}
