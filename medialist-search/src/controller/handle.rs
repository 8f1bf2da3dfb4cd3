//! Handle for communicating with the search controller actor.

use medialist_core::Route;
use tokio::sync::{mpsc, oneshot};

use super::commands::SearchControllerCommand;
use super::core::{ControllerSnapshot, SearchTicket};
use crate::errors::MediaSearchError;

/// Handle for communicating with the search controller actor.
///
/// Cloneable; every clone drives the same controller. The actor stops when
/// the last handle is dropped.
#[derive(Debug, Clone)]
pub struct SearchControllerHandle {
    sender: mpsc::Sender<SearchControllerCommand>,
}

impl SearchControllerHandle {
    /// Creates a new handle with the given command sender.
    pub(crate) fn new(sender: mpsc::Sender<SearchControllerCommand>) -> Self {
        Self { sender }
    }

    /// Opens the input on hover.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn pointer_enter(&self) -> Result<(), MediaSearchError> {
        self.request(|responder| SearchControllerCommand::PointerEnter { responder })
            .await
    }

    /// Opens the input on click or focus.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn activate(&self) -> Result<(), MediaSearchError> {
        self.request(|responder| SearchControllerCommand::Activate { responder })
            .await
    }

    /// Reports new input text. Returns the ticket of the search that will be
    /// issued once the debounce elapses, if any.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn text_changed(
        &self,
        text: &str,
    ) -> Result<Option<SearchTicket>, MediaSearchError> {
        let text = text.to_string();
        self.request(|responder| SearchControllerCommand::TextChanged { text, responder })
            .await
    }

    /// Collapses the input and clears it.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn click_away(&self) -> Result<(), MediaSearchError> {
        self.request(|responder| SearchControllerCommand::ClickAway { responder })
            .await
    }

    /// Selects a displayed result and returns where to navigate.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn select(&self, id: u64) -> Result<Option<Route>, MediaSearchError> {
        self.request(|responder| SearchControllerCommand::Select { id, responder })
            .await
    }

    /// Retries the last failed search immediately.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn retry(&self) -> Result<Option<SearchTicket>, MediaSearchError> {
        self.request(|responder| SearchControllerCommand::Retry { responder })
            .await
    }

    /// Returns the current state, ready to render.
    ///
    /// # Errors
    /// - `MediaSearchError::ControllerShutdown` - Actor is no longer running
    pub async fn snapshot(&self) -> Result<ControllerSnapshot, MediaSearchError> {
        self.request(|responder| SearchControllerCommand::Snapshot { responder })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SearchControllerCommand,
    ) -> Result<T, MediaSearchError> {
        let (responder, rx) = oneshot::channel();

        self.sender
            .send(command(responder))
            .await
            .map_err(|_| MediaSearchError::ControllerShutdown)?;

        rx.await.map_err(|_| MediaSearchError::ControllerShutdown)
    }
}
