//! Navigation between the feature menu and feature sessions.

use std::collections::HashMap;
use std::sync::Arc;

use adapters::{AdapterFactory, HostContext};
use proto::{Feature, NavigationState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::session::{ConversationSession, SessionView};
use crate::update::{Update, UpdateSender};

/// What happens to a session when the user returns to the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the session; re-entering the feature shows its history.
    #[default]
    KeepAlive,
    /// Drop the session; re-entering starts a fresh conversation.
    DiscardOnExit,
}

/// Snapshot of navigation plus the active session.
#[derive(Debug, Clone)]
pub struct NavigatorView {
    /// Current navigation state.
    pub state: NavigationState,
    /// Active session, when a feature is selected.
    pub session: Option<SessionView>,
}

/// State machine choosing which feature session is presented.
///
/// Starts in [`NavigationState::Menu`]. Only `select_feature` (from the
/// menu) and `go_back` (from a feature) change state; every other call is
/// a no-op.
pub struct Navigator {
    state: NavigationState,
    sessions: HashMap<Feature, ConversationSession>,
    retention: RetentionPolicy,
    factory: Arc<dyn AdapterFactory>,
    host: Arc<dyn HostContext>,
    updates: Option<UpdateSender>,
}

impl Navigator {
    /// Creates a navigator in the menu state with no sessions.
    pub fn new(factory: Arc<dyn AdapterFactory>, host: Arc<dyn HostContext>) -> Self {
        Self {
            state: NavigationState::Menu,
            sessions: HashMap::new(),
            retention: RetentionPolicy::default(),
            factory,
            host,
            updates: None,
        }
    }

    /// Sets the session retention policy.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Publishes navigation and session updates to `updates`.
    pub fn with_updates(mut self, updates: UpdateSender) -> Self {
        self.updates = Some(updates);
        self
    }

    /// Current navigation state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Retention policy in effect.
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Enters `feature` from the menu, creating its session on first use.
    ///
    /// Returns `None` (and changes nothing) when a feature is already active.
    pub fn select_feature(&mut self, feature: Feature) -> Option<ConversationSession> {
        if self.state != NavigationState::Menu {
            debug!(current = ?self.state, requested = %feature, "select_feature ignored");
            return None;
        }

        let session = self
            .sessions
            .entry(feature)
            .or_insert_with(|| {
                let adapter = self.factory.create(feature);
                let session = ConversationSession::new(adapter, Arc::clone(&self.host));
                info!(feature = %feature, session = %session.id(), "Session created");
                match &self.updates {
                    Some(tx) => session.with_updates(tx.clone()),
                    None => session,
                }
            })
            .clone();

        self.transition(NavigationState::Active(feature));
        Some(session)
    }

    /// Returns to the menu. Returns `false` (and changes nothing) in the menu.
    ///
    /// An in-flight exchange of the session being left is not cancelled.
    pub fn go_back(&mut self) -> bool {
        let NavigationState::Active(feature) = self.state else {
            debug!("go_back ignored in menu");
            return false;
        };

        if self.retention == RetentionPolicy::DiscardOnExit
            && let Some(session) = self.sessions.remove(&feature)
        {
            info!(feature = %feature, session = %session.id(), "Session discarded");
        }

        self.transition(NavigationState::Menu);
        true
    }

    /// Session of the active feature.
    pub fn active_session(&self) -> Option<&ConversationSession> {
        self.state.feature().and_then(|f| self.sessions.get(&f))
    }

    /// Stored session for `feature`, active or not.
    pub fn session(&self, feature: Feature) -> Option<&ConversationSession> {
        self.sessions.get(&feature)
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> NavigatorView {
        NavigatorView {
            state: self.state,
            session: self.active_session().map(ConversationSession::view),
        }
    }

    fn transition(&mut self, next: NavigationState) {
        debug!(from = ?self.state, to = ?next, "Navigation");
        self.state = next;
        if let Some(tx) = &self.updates {
            let _ = tx.send(Update::Navigation(next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedAdapter, ScriptedFactory, host};
    use crate::update;

    fn navigator() -> Navigator {
        Navigator::new(Arc::new(ScriptedFactory), host())
    }

    #[test]
    fn starts_in_menu() {
        let nav = navigator();
        assert_eq!(nav.state(), NavigationState::Menu);
        assert!(nav.active_session().is_none());
        assert!(nav.view().session.is_none());
    }

    #[test]
    fn go_back_in_menu_is_a_no_op() {
        let mut nav = navigator();
        assert!(!nav.go_back());
        assert_eq!(nav.state(), NavigationState::Menu);
    }

    #[test]
    fn select_while_active_is_a_no_op() {
        let mut nav = navigator();
        assert!(nav.select_feature(Feature::ImageGen).is_some());
        assert!(nav.select_feature(Feature::WebpageChat).is_none());
        assert_eq!(nav.state(), NavigationState::Active(Feature::ImageGen));
        assert!(nav.session(Feature::WebpageChat).is_none());
    }

    #[tokio::test]
    async fn keep_alive_preserves_history() {
        let mut nav = navigator();
        let session = nav.select_feature(Feature::GenericChatbot).expect("session");
        session.set_draft("hello");
        session.send().await;
        let id = session.id().clone();

        assert!(nav.go_back());
        assert_eq!(nav.state(), NavigationState::Menu);

        let again = nav.select_feature(Feature::GenericChatbot).expect("session");
        assert_eq!(again.id(), &id);
        assert_eq!(again.messages().len(), 2);
    }

    #[tokio::test]
    async fn discard_on_exit_starts_fresh() {
        let mut nav = navigator().with_retention(RetentionPolicy::DiscardOnExit);
        let session = nav.select_feature(Feature::GenericChatbot).expect("session");
        session.set_draft("hello");
        session.send().await;
        let id = session.id().clone();
        nav.go_back();

        assert!(nav.session(Feature::GenericChatbot).is_none());
        let fresh = nav.select_feature(Feature::GenericChatbot).expect("session");
        assert_ne!(fresh.id(), &id);
        assert!(fresh.messages().is_empty());
    }

    #[tokio::test]
    async fn in_flight_reply_lands_in_the_session_left_behind() {
        let adapter = ScriptedAdapter::new(Feature::ImageGen).gated();
        let gate = adapter.gate();
        let adapter = Arc::new(adapter);

        struct OneAdapter(Arc<ScriptedAdapter>);
        impl AdapterFactory for OneAdapter {
            fn create(&self, _feature: Feature) -> Arc<dyn adapters::FeatureAdapter> {
                self.0.clone()
            }
        }

        let mut nav = Navigator::new(Arc::new(OneAdapter(adapter)), host());
        let session = nav.select_feature(Feature::ImageGen).expect("session");
        session.set_draft("a fox");
        let task = tokio::spawn({
            let session = session.clone();
            async move { session.send().await }
        });
        gate.entered.notified().await;

        assert!(nav.go_back());
        gate.release.notify_one();
        task.await.expect("join");

        let kept = nav.session(Feature::ImageGen).expect("kept alive");
        assert_eq!(kept.messages().len(), 2);
        assert!(!kept.is_busy());
    }

    #[test]
    fn transitions_publish_navigation_updates() {
        let (tx, mut rx) = update::channel();
        let mut nav = navigator().with_updates(tx);
        nav.select_feature(Feature::DataAnalysis);
        nav.go_back();
        nav.go_back();

        assert_eq!(
            rx.try_recv().expect("select"),
            Update::Navigation(NavigationState::Active(Feature::DataAnalysis))
        );
        assert_eq!(
            rx.try_recv().expect("back"),
            Update::Navigation(NavigationState::Menu)
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn view_reports_active_session() {
        let mut nav = navigator();
        nav.select_feature(Feature::DocumentChat);
        let view = nav.view();
        let session = view.session.expect("active session view");
        assert_eq!(session.feature, Feature::DocumentChat);
        assert!(session.accepts_resource);
        assert!(!session.accepts_questions);
    }
}
