//! Search input state machine.

use medialist_core::Route;

use crate::errors::MediaSearchError;
use crate::presentation::{ResultPanel, present};
use crate::types::SearchResult;

/// Visible state of the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Only the search icon is shown.
    Collapsed,
    /// Input is open with no results.
    ExpandedEmpty,
    /// A search for the current text is pending.
    ExpandedLoading,
    /// Results for the current text are shown.
    ExpandedResults,
}

impl ControllerState {
    /// Whether the input is open.
    pub fn is_expanded(self) -> bool {
        self != ControllerState::Collapsed
    }
}

/// Identifies one issued search. Only the ticket with the latest `seq`
/// whose query still matches the input may change the displayed results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Monotonic sequence number
    pub seq: u64,
    /// Trimmed query text
    pub query: String,
}

/// Whether a search response changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Response belonged to the latest ticket and was applied.
    Current,
    /// Response was superseded and dropped.
    Stale,
}

/// Point-in-time view of the controller, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    /// Current state
    pub state: ControllerState,
    /// Text in the input
    pub text: String,
    /// Results with a poster, in catalog order
    pub results: Vec<SearchResult>,
    /// Message of the last failed search, if it failed
    pub last_error: Option<String>,
    /// What the panel under the input shows
    pub panel: ResultPanel,
}

/// Search-as-you-type state machine.
///
/// Does no I/O. Callers run the search described by each returned
/// [`SearchTicket`] and feed the outcome back through
/// [`SearchController::apply_response`], in any order.
#[derive(Debug, Clone)]
pub struct SearchController {
    state: ControllerState,
    text: String,
    results: Vec<SearchResult>,
    last_error: Option<MediaSearchError>,
    latest_seq: u64,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    /// Creates a collapsed controller.
    pub fn new() -> Self {
        Self {
            state: ControllerState::Collapsed,
            text: String::new(),
            results: Vec::new(),
            last_error: None,
            latest_seq: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Raw input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Results currently displayed, poster-less entries already removed.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Failure of the last applied search.
    pub fn last_error(&self) -> Option<&MediaSearchError> {
        self.last_error.as_ref()
    }

    /// Opens the input (icon clicked or focused).
    pub fn activate(&mut self) {
        if self.state == ControllerState::Collapsed {
            self.state = ControllerState::ExpandedEmpty;
        }
    }

    /// Opens the input when the pointer moves over it.
    pub fn pointer_enter(&mut self) {
        self.activate();
    }

    /// Records new input text.
    ///
    /// Returns a ticket when a search should be issued. Ignored while
    /// collapsed since the input is not visible then.
    pub fn text_changed(&mut self, text: &str) -> Option<SearchTicket> {
        if self.state == ControllerState::Collapsed {
            return None;
        }

        self.text = text.to_string();
        self.last_error = None;

        if self.query().is_empty() {
            self.invalidate();
            self.results.clear();
            self.state = ControllerState::ExpandedEmpty;
            return None;
        }

        Some(self.issue_ticket())
    }

    /// Applies the outcome of the search described by `ticket`.
    pub fn apply_response(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<SearchResult>, MediaSearchError>,
    ) -> Applied {
        if ticket.seq != self.latest_seq
            || ticket.query != self.query()
            || self.state != ControllerState::ExpandedLoading
        {
            tracing::trace!(
                seq = ticket.seq,
                latest = self.latest_seq,
                query = %ticket.query,
                "Dropping stale search response"
            );
            return Applied::Stale;
        }

        match outcome {
            Ok(results) => {
                self.results = results.into_iter().filter(|r| r.has_poster()).collect();
                self.last_error = None;
                self.state = ControllerState::ExpandedResults;
            }
            Err(e) => {
                tracing::warn!(query = %ticket.query, error = %e, "Search failed");
                self.results.clear();
                self.last_error = Some(e);
                self.state = ControllerState::ExpandedEmpty;
            }
        }

        Applied::Current
    }

    /// Collapses the input and forgets text and results.
    pub fn click_away(&mut self) {
        self.invalidate();
        self.text.clear();
        self.results.clear();
        self.last_error = None;
        self.state = ControllerState::Collapsed;
    }

    /// Picks a displayed result. Returns its detail route and clears the input.
    pub fn select(&mut self, id: u64) -> Option<Route> {
        let route = self.results.iter().find(|r| r.id == id)?.route();

        self.invalidate();
        self.text.clear();
        self.results.clear();
        self.last_error = None;
        self.state = ControllerState::ExpandedEmpty;

        Some(route)
    }

    /// Re-issues the search for the current text after a failure.
    pub fn retry(&mut self) -> Option<SearchTicket> {
        if self.last_error.is_none() || self.query().is_empty() {
            return None;
        }
        self.last_error = None;
        Some(self.issue_ticket())
    }

    /// Renders the current state into a snapshot.
    pub fn snapshot(&self, image_base_url: &str) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state,
            text: self.text.clone(),
            results: self.results.clone(),
            last_error: self.last_error.as_ref().map(ToString::to_string),
            panel: present(
                &self.text,
                &self.results,
                self.last_error.as_ref(),
                image_base_url,
            ),
        }
    }

    fn query(&self) -> &str {
        self.text.trim()
    }

    fn issue_ticket(&mut self) -> SearchTicket {
        self.latest_seq += 1;
        self.state = ControllerState::ExpandedLoading;
        SearchTicket {
            seq: self.latest_seq,
            query: self.query().to_string(),
        }
    }

    /// Makes every outstanding ticket stale.
    fn invalidate(&mut self) {
        self.latest_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    fn hit(id: u64, title: &str) -> SearchResult {
        SearchResult {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            vote_average: 6.5,
            release_date: Some("2001-01-01".to_string()),
            first_air_date: None,
            media_type: MediaType::Movie,
        }
    }

    fn expanded() -> SearchController {
        let mut controller = SearchController::new();
        controller.activate();
        controller
    }

    #[test]
    fn test_activation() {
        let mut controller = SearchController::new();
        assert_eq!(controller.state(), ControllerState::Collapsed);

        controller.pointer_enter();
        assert_eq!(controller.state(), ControllerState::ExpandedEmpty);
        assert!(controller.state().is_expanded());
    }

    #[test]
    fn test_text_ignored_while_collapsed() {
        let mut controller = SearchController::new();
        assert_eq!(controller.text_changed("dune"), None);
        assert_eq!(controller.text(), "");
        assert_eq!(controller.state(), ControllerState::Collapsed);
    }

    #[test]
    fn test_out_of_order_responses_keep_latest() {
        let mut controller = expanded();
        let a = controller.text_changed("a").unwrap();
        let ab = controller.text_changed("ab").unwrap();
        let abc = controller.text_changed("abc").unwrap();
        assert_eq!(controller.state(), ControllerState::ExpandedLoading);

        assert_eq!(
            controller.apply_response(&abc, Ok(vec![hit(3, "abc")])),
            Applied::Current
        );
        assert_eq!(
            controller.apply_response(&a, Ok(vec![hit(1, "a")])),
            Applied::Stale
        );
        assert_eq!(
            controller.apply_response(&ab, Ok(vec![hit(2, "ab")])),
            Applied::Stale
        );

        assert_eq!(controller.state(), ControllerState::ExpandedResults);
        let ids: Vec<u64> = controller.results().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_posterless_results_are_dropped() {
        let mut controller = expanded();
        let ticket = controller.text_changed("x").unwrap();
        let mut bare = hit(2, "bare");
        bare.poster_path = None;

        controller.apply_response(&ticket, Ok(vec![hit(1, "kept"), bare]));
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.results()[0].id, 1);
    }

    #[test]
    fn test_clearing_text_empties_results() {
        let mut controller = expanded();
        let ticket = controller.text_changed("x").unwrap();
        controller.apply_response(&ticket, Ok(vec![hit(1, "x")]));

        assert_eq!(controller.text_changed("   "), None);
        assert_eq!(controller.state(), ControllerState::ExpandedEmpty);
        assert!(controller.results().is_empty());
        assert_eq!(
            controller.snapshot("http://img").panel,
            ResultPanel::Hidden
        );
    }

    #[test]
    fn test_response_after_clear_is_stale() {
        let mut controller = expanded();
        let ticket = controller.text_changed("x").unwrap();
        controller.text_changed("");

        assert_eq!(
            controller.apply_response(&ticket, Ok(vec![hit(1, "x")])),
            Applied::Stale
        );
        assert!(controller.results().is_empty());
    }

    #[test]
    fn test_click_away_resets_from_any_state() {
        let mut controller = expanded();
        let ticket = controller.text_changed("dune").unwrap();
        controller.apply_response(&ticket, Ok(vec![hit(1, "Dune")]));

        controller.click_away();
        assert_eq!(controller.state(), ControllerState::Collapsed);
        assert_eq!(controller.text(), "");
        assert!(controller.results().is_empty());
        assert_eq!(
            controller.apply_response(&ticket, Ok(vec![hit(1, "Dune")])),
            Applied::Stale
        );
    }

    #[test]
    fn test_failure_records_error_and_retry() {
        let mut controller = expanded();
        let ticket = controller.text_changed("dune").unwrap();
        controller.apply_response(
            &ticket,
            Err(MediaSearchError::NetworkError {
                reason: "offline".to_string(),
            }),
        );

        assert_eq!(controller.state(), ControllerState::ExpandedEmpty);
        assert!(controller.results().is_empty());
        assert!(matches!(
            controller.snapshot("http://img").panel,
            ResultPanel::Unavailable { .. }
        ));

        let retry = controller.retry().unwrap();
        assert!(retry.seq > ticket.seq);
        assert_eq!(retry.query, "dune");
        assert_eq!(controller.state(), ControllerState::ExpandedLoading);
        assert_eq!(controller.retry(), None);
    }

    #[test]
    fn test_select_returns_route_and_clears_text() {
        let mut controller = expanded();
        let ticket = controller.text_changed("breaking").unwrap();
        let mut series = hit(1396, "Breaking Bad");
        series.media_type = MediaType::Series;
        controller.apply_response(&ticket, Ok(vec![series]));

        assert_eq!(controller.select(99), None);
        assert_eq!(controller.select(1396), Some(Route::Series(1396)));
        assert_eq!(controller.text(), "");
        assert_eq!(controller.state(), ControllerState::ExpandedEmpty);
    }

    #[test]
    fn test_ticket_query_is_trimmed() {
        let mut controller = expanded();
        let ticket = controller.text_changed("  dune  ").unwrap();
        assert_eq!(ticket.query, "dune");
        assert_eq!(controller.text(), "  dune  ");
        assert_eq!(
            controller.apply_response(&ticket, Ok(Vec::new())),
            Applied::Current
        );
        assert_eq!(controller.snapshot("http://img").panel, ResultPanel::NoItems);
    }
}
