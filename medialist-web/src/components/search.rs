//! Search dropdown - collapsible input and the result panel fragment

use medialist_search::presentation::NO_ITEMS_MESSAGE;
use medialist_search::{ResultPanel, ResultRow, Theme};

use super::escape_html;

/// Renders the collapsible search input shown in the nav bar.
///
/// The input issues `GET /htmx/search` after `delay_ms` of inactivity and
/// replaces any request still in flight, so only the latest text lands in
/// the panel.
pub fn search_box(theme: &Theme, delay_ms: u64) -> String {
    format!(
        r##"<style>
            #search-results a.result-row:hover {{ background: {hover}; }}
        </style>
        <div id="search-box" class="relative flex items-center" data-state="collapsed">
            <button type="button" id="search-toggle" aria-label="Search" class="p-2" style="color: {icon}">
                <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 21l-4.35-4.35M11 18a7 7 0 100-14 7 7 0 000 14z"/>
                </svg>
            </button>
            <input id="search-input" type="search" name="query" autocomplete="off"
                   placeholder="Search movies and series"
                   class="hidden w-64 px-4 py-2 rounded-lg text-white placeholder-gray-300 focus:outline-none"
                   style="background: {input}"
                   hx-get="/htmx/search"
                   hx-trigger="input changed delay:{delay_ms}ms, search"
                   hx-target="#search-results"
                   hx-sync="this:replace"
                   hx-indicator="#search-loading" />
            <div id="search-loading" class="htmx-indicator absolute right-3 top-2 text-xs text-gray-300">Searching...</div>
            <div id="search-results" class="absolute right-0 top-12 w-96 rounded-lg shadow-xl overflow-hidden"
                 style="background: {panel}"></div>
        </div>"##,
        hover = theme.hover_background,
        icon = theme.icon_color,
        input = theme.input_background,
        panel = theme.panel_background,
    )
}

/// Client-side expand and collapse behaviour for [`search_box`].
pub fn search_script() -> &'static str {
    r#"<script>
        (function () {
            const box = document.getElementById('search-box');
            if (!box) return;
            const input = document.getElementById('search-input');
            const results = document.getElementById('search-results');
            const expand = () => {
                box.dataset.state = 'expanded';
                input.classList.remove('hidden');
            };
            const collapse = () => {
                box.dataset.state = 'collapsed';
                input.classList.add('hidden');
                input.value = '';
                results.innerHTML = '';
            };
            box.addEventListener('pointerenter', expand);
            document.getElementById('search-toggle').addEventListener('click', () => {
                expand();
                input.focus();
            });
            document.addEventListener('click', (event) => {
                if (!box.contains(event.target)) collapse();
            });
            results.addEventListener('click', (event) => {
                if (event.target.closest('a.result-row')) {
                    input.value = '';
                }
            });
        })();
    </script>"#
}

/// Renders the panel fragment swapped into `#search-results`.
pub fn result_panel(panel: &ResultPanel, query: &str) -> String {
    match panel {
        ResultPanel::Hidden => String::new(),
        ResultPanel::Unavailable { message } => format!(
            r##"<div class="p-4 flex items-center justify-between text-sm text-gray-300">
                <span>{message}</span>
                <button type="button" class="text-sky-400 hover:underline"
                        hx-get="/htmx/search?query={query}" hx-target="#search-results">Retry</button>
            </div>"##,
            message = escape_html(message),
            query = urlencoding::encode(query.trim()),
        ),
        ResultPanel::NoItems => format!(
            r#"<div class="p-4 text-sm text-gray-400">{NO_ITEMS_MESSAGE}</div>"#
        ),
        ResultPanel::Rows { rows } => {
            let items: String = rows.iter().map(result_row).collect();
            format!(r#"<div class="max-h-96 overflow-y-auto divide-y divide-gray-700">{items}</div>"#)
        }
    }
}

/// Renders one clickable result row.
pub fn result_row(row: &ResultRow) -> String {
    let date = row
        .date
        .as_deref()
        .map(|d| format!(r#"<span>{}</span>"#, escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<a href="{href}" class="result-row flex items-center p-3 space-x-3 transition-colors" data-id="{id}">
            <img src="{poster}" alt="" class="w-12 h-16 object-cover rounded" loading="lazy" />
            <div class="min-w-0">
                <div class="font-medium text-white truncate">{title}</div>
                <div class="text-xs text-gray-400 space-x-2">
                    <span>{score}</span>
                    {date}
                    <span class="px-1.5 py-0.5 rounded bg-gray-700 text-gray-200">{kind}</span>
                </div>
            </div>
        </a>"#,
        href = row.href,
        id = row.id,
        poster = escape_html(&row.poster_url),
        title = escape_html(&row.title),
        score = escape_html(&row.score_label),
        kind = row.kind_label,
    )
}
