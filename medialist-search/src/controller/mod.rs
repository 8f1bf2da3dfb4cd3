//! Search-as-you-type controller
//!
//! A pure state machine ([`SearchController`]) wrapped in an actor
//! ([`SearchControllerHandle`]) that debounces keystrokes, runs searches
//! and applies only the response for the latest text.

pub mod actor;
mod commands;
pub mod core;
pub mod handle;

pub use actor::spawn_search_controller;
pub use self::core::{Applied, ControllerSnapshot, ControllerState, SearchController, SearchTicket};
pub use handle::SearchControllerHandle;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use medialist_core::Route;
    use medialist_core::config::SearchConfig;

    use super::*;
    use crate::errors::MediaSearchError;
    use crate::presentation::ResultPanel;
    use crate::providers::MockProvider;
    use crate::service::MediaSearchService;

    fn spawn(provider: &Arc<MockProvider>, debounce: Duration) -> SearchControllerHandle {
        let config = SearchConfig {
            debounce,
            ..SearchConfig::default()
        };
        spawn_search_controller(MediaSearchService::new(provider.clone()), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_sends_only_last_text() {
        let provider = Arc::new(MockProvider::new());
        provider.respond(
            "abc",
            vec![MockProvider::movie(3, "abc")],
            Duration::ZERO,
        );
        let handle = spawn(&provider, Duration::from_millis(300));

        handle.activate().await.unwrap();
        for text in ["a", "ab", "abc"] {
            handle.text_changed(text).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(
            handle.snapshot().await.unwrap().state,
            ControllerState::ExpandedLoading
        );

        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(provider.calls(), vec!["abc".to_string()]);
        assert_eq!(snapshot.state, ControllerState::ExpandedResults);
        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(snapshot.panel.rows()[0].title, "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_older_search_never_wins() {
        let provider = Arc::new(MockProvider::new());
        provider.respond(
            "a",
            vec![MockProvider::movie(1, "a")],
            Duration::from_millis(500),
        );
        provider.respond(
            "ab",
            vec![MockProvider::series(2, "ab")],
            Duration::from_millis(10),
        );
        let handle = spawn(&provider, Duration::ZERO);

        handle.activate().await.unwrap();
        handle.text_changed("a").await.unwrap();
        handle.text_changed("ab").await.unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;

        let snapshot = handle.snapshot().await.unwrap();
        let ids: Vec<u64> = snapshot.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(snapshot.text, "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_retry() {
        let provider = Arc::new(MockProvider::new());
        provider.fail(
            "dune",
            MediaSearchError::NetworkError {
                reason: "offline".to_string(),
            },
            Duration::ZERO,
        );
        let handle = spawn(&provider, Duration::ZERO);

        handle.activate().await.unwrap();
        handle.text_changed("dune").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let failed = handle.snapshot().await.unwrap();
        assert_eq!(failed.state, ControllerState::ExpandedEmpty);
        assert!(failed.results.is_empty());
        assert!(failed.last_error.is_some());
        assert!(matches!(failed.panel, ResultPanel::Unavailable { .. }));

        provider.respond(
            "dune",
            vec![MockProvider::movie(438631, "Dune")],
            Duration::ZERO,
        );
        assert!(handle.retry().await.unwrap().is_some());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let recovered = handle.snapshot().await.unwrap();
        assert_eq!(recovered.state, ControllerState::ExpandedResults);
        assert_eq!(recovered.last_error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_away_cancels_pending_search() {
        let provider = Arc::new(MockProvider::new());
        provider.respond(
            "dune",
            vec![MockProvider::movie(1, "Dune")],
            Duration::from_millis(100),
        );
        let handle = spawn(&provider, Duration::ZERO);

        handle.pointer_enter().await.unwrap();
        handle.text_changed("dune").await.unwrap();
        handle.click_away().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.state, ControllerState::Collapsed);
        assert_eq!(snapshot.text, "");
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.panel, ResultPanel::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_navigates_and_clears() {
        let provider = Arc::new(MockProvider::new());
        provider.respond(
            "office",
            vec![MockProvider::series(2316, "The Office")],
            Duration::ZERO,
        );
        let handle = spawn(&provider, Duration::ZERO);

        handle.activate().await.unwrap();
        handle.text_changed("office").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            handle.select(2316).await.unwrap(),
            Some(Route::Series(2316))
        );
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.text, "");
        assert_eq!(snapshot.state, ControllerState::ExpandedEmpty);
    }
}
