//! Command definitions for the search controller actor.

use medialist_core::Route;
use tokio::sync::oneshot;

use super::core::{ControllerSnapshot, SearchTicket};
use crate::errors::MediaSearchError;
use crate::types::SearchResult;

/// Commands that can be sent to the search controller actor.
///
/// Each user interaction carries a responder so callers observe the state
/// only after the actor has applied it.
#[derive(Debug)]
pub(crate) enum SearchControllerCommand {
    /// Pointer moved over the search icon.
    PointerEnter { responder: oneshot::Sender<()> },
    /// Search icon clicked or input focused.
    Activate { responder: oneshot::Sender<()> },
    /// Input text changed.
    TextChanged {
        text: String,
        responder: oneshot::Sender<Option<SearchTicket>>,
    },
    /// Click outside the input.
    ClickAway { responder: oneshot::Sender<()> },
    /// Result row chosen.
    Select {
        id: u64,
        responder: oneshot::Sender<Option<Route>>,
    },
    /// Retry after a failed search.
    Retry {
        responder: oneshot::Sender<Option<SearchTicket>>,
    },
    /// Current state for rendering.
    Snapshot {
        responder: oneshot::Sender<ControllerSnapshot>,
    },
}

/// Internal notification sent by a search task when it finishes.
#[derive(Debug)]
pub(crate) struct SearchCompleted {
    pub ticket: SearchTicket,
    pub outcome: Result<Vec<SearchResult>, MediaSearchError>,
}
