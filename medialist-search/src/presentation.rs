//! Turns search results into what the dropdown panel shows.

use medialist_core::Route;
use medialist_core::config::ThemeConfig;
use serde::Serialize;

use crate::errors::MediaSearchError;
use crate::types::SearchResult;

/// Notice shown when the last search failed.
pub const UNAVAILABLE_MESSAGE: &str = "Search is unavailable right now";

/// Notice shown when a search returned nothing renderable.
pub const NO_ITEMS_MESSAGE: &str = "No items found";

/// Content of the result panel under the search input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultPanel {
    /// Query is empty; no panel at all.
    Hidden,
    /// The last search failed; offer a retry.
    Unavailable {
        /// Notice text
        message: String,
    },
    /// Search finished without any renderable row.
    NoItems,
    /// Rows in the order the catalog returned them.
    Rows {
        /// Renderable rows
        rows: Vec<ResultRow>,
    },
}

impl ResultPanel {
    /// Rows shown, empty unless the panel is [`ResultPanel::Rows`].
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ResultPanel::Rows { rows } => rows,
            _ => &[],
        }
    }

    /// Whether anything is rendered under the input.
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultPanel::Hidden)
    }
}

/// One clickable row in the result panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Catalog identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Absolute poster URL at original size
    pub poster_url: String,
    /// Formatted score, e.g. `IMDb Score: 7.5`
    pub score_label: String,
    /// Release or first air date
    pub date: Option<String>,
    /// `Movie` or `Series`
    pub kind_label: &'static str,
    /// Detail page opened on click
    pub target: Route,
    /// Path of `target`
    pub href: String,
}

impl ResultRow {
    /// Builds a row, or `None` when the result has no poster.
    pub fn from_result(result: &SearchResult, image_base_url: &str) -> Option<Self> {
        let poster_url = result.poster_url(image_base_url)?;
        let target = route_for(result);

        Some(Self {
            id: result.id,
            title: result.title.clone(),
            poster_url,
            score_label: format!("IMDb Score: {}", result.vote_average),
            date: result.display_date().map(str::to_string),
            kind_label: result.media_type.label(),
            target,
            href: target.path(),
        })
    }
}

/// Detail page for a result: series open `/series/{id}`, everything else
/// opens `/movie/{id}`.
pub fn route_for(result: &SearchResult) -> Route {
    result.route()
}

/// Decides what the panel shows for `query`.
///
/// Results without a poster are dropped. A recorded failure takes
/// precedence over an empty result list.
pub fn present(
    query: &str,
    results: &[SearchResult],
    last_error: Option<&MediaSearchError>,
    image_base_url: &str,
) -> ResultPanel {
    if query.trim().is_empty() {
        return ResultPanel::Hidden;
    }

    if last_error.is_some() {
        return ResultPanel::Unavailable {
            message: UNAVAILABLE_MESSAGE.to_string(),
        };
    }

    let rows: Vec<ResultRow> = results
        .iter()
        .filter_map(|result| ResultRow::from_result(result, image_base_url))
        .collect();

    if rows.is_empty() {
        ResultPanel::NoItems
    } else {
        ResultPanel::Rows { rows }
    }
}

/// Colours used when rendering the search input and panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Panel background
    pub panel_background: String,
    /// Hovered row background
    pub hover_background: String,
    /// Expanded input background
    pub input_background: String,
    /// Search icon colour
    pub icon_color: String,
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Self {
            panel_background: config.panel_background.clone(),
            hover_background: config.hover_background.clone(),
            input_background: config.input_background.clone(),
            icon_color: config.icon_color.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&ThemeConfig::default())
    }
}
