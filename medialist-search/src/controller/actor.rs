//! Actor implementation for the search controller.

use std::time::Duration;

use medialist_core::config::SearchConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::commands::{SearchCompleted, SearchControllerCommand};
use super::core::{SearchController, SearchTicket};
use super::handle::SearchControllerHandle;
use crate::service::MediaSearchService;

/// Spawns the search controller actor and returns its handle.
///
/// Keystrokes are debounced by `config.debounce`. A newer keystroke aborts
/// the search still waiting or running for an older one, and completions
/// are filtered through [`SearchController::apply_response`] so a result
/// that slips past the abort is still dropped.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use medialist_core::config::SearchConfig;
/// use medialist_search::{MediaSearchService, spawn_search_controller};
///
/// let handle = spawn_search_controller(MediaSearchService::new_demo(), SearchConfig::default());
/// handle.activate().await.unwrap();
/// handle.text_changed("matrix").await.unwrap();
/// # }
/// ```
pub fn spawn_search_controller(
    service: MediaSearchService,
    config: SearchConfig,
) -> SearchControllerHandle {
    let (sender, receiver) = mpsc::channel(100);
    let (completion_sender, completion_receiver) = mpsc::unbounded_channel();

    let actor = ControllerActor {
        controller: SearchController::new(),
        service,
        debounce: config.debounce,
        image_base_url: config.image_base_url,
        in_flight: None,
        completion_sender,
    };

    tokio::spawn(async move {
        run_actor_loop(actor, receiver, completion_receiver).await;
    });

    SearchControllerHandle::new(sender)
}

struct ControllerActor {
    controller: SearchController,
    service: MediaSearchService,
    debounce: Duration,
    image_base_url: String,
    in_flight: Option<JoinHandle<()>>,
    completion_sender: mpsc::UnboundedSender<SearchCompleted>,
}

/// Processes commands and search completions one at a time until every
/// handle has been dropped.
async fn run_actor_loop(
    mut actor: ControllerActor,
    mut receiver: mpsc::Receiver<SearchControllerCommand>,
    mut completions: mpsc::UnboundedReceiver<SearchCompleted>,
) {
    tracing::debug!("Search controller actor started");

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(command) => actor.handle_command(command),
                None => break,
            },
            Some(completed) = completions.recv() => {
                actor.controller.apply_response(&completed.ticket, completed.outcome);
            }
        }
    }

    actor.cancel_in_flight();
    tracing::debug!("Search controller actor stopped");
}

impl ControllerActor {
    fn handle_command(&mut self, command: SearchControllerCommand) {
        match command {
            SearchControllerCommand::PointerEnter { responder } => {
                self.controller.pointer_enter();
                let _ = responder.send(());
            }
            SearchControllerCommand::Activate { responder } => {
                self.controller.activate();
                let _ = responder.send(());
            }
            SearchControllerCommand::TextChanged { text, responder } => {
                let ticket = self.controller.text_changed(&text);
                match &ticket {
                    Some(ticket) => self.start_search(ticket.clone()),
                    None => self.cancel_in_flight(),
                }
                let _ = responder.send(ticket);
            }
            SearchControllerCommand::ClickAway { responder } => {
                self.cancel_in_flight();
                self.controller.click_away();
                let _ = responder.send(());
            }
            SearchControllerCommand::Select { id, responder } => {
                let route = self.controller.select(id);
                if route.is_some() {
                    self.cancel_in_flight();
                }
                let _ = responder.send(route);
            }
            SearchControllerCommand::Retry { responder } => {
                let ticket = self.controller.retry();
                if let Some(ticket) = &ticket {
                    self.start_search_now(ticket.clone());
                }
                let _ = responder.send(ticket);
            }
            SearchControllerCommand::Snapshot { responder } => {
                let _ = responder.send(self.controller.snapshot(&self.image_base_url));
            }
        }
    }

    fn start_search(&mut self, ticket: SearchTicket) {
        self.spawn_search(ticket, self.debounce);
    }

    /// Retries skip the debounce; the user asked explicitly.
    fn start_search_now(&mut self, ticket: SearchTicket) {
        self.spawn_search(ticket, Duration::ZERO);
    }

    fn spawn_search(&mut self, ticket: SearchTicket, delay: Duration) {
        self.cancel_in_flight();

        let service = self.service.clone();
        let completions = self.completion_sender.clone();
        self.in_flight = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            tracing::debug!(seq = ticket.seq, query = %ticket.query, "Issuing search");
            let outcome = service.search(&ticket.query).await;
            let _ = completions.send(SearchCompleted { ticket, outcome });
        }));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
