//! Session registry
//!
//! Every session owns its own [`ConversationStore`]; nothing is shared
//! between sessions. Access goes through one lock, so a store only ever sees
//! one operation at a time.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::SessionSettings;
use crate::conversation::{
    demo_nodes, reconstruct_history, ConversationStore, GraphElements, Message, NodeId, TreeError,
};

use super::events::{dispatch, SessionView, UiEvent};
use super::Responder;

/// Errors from session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session limit of {0} reached")]
    LimitReached(usize),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub struct SessionManager {
    sessions: RwLock<HashMap<String, ConversationStore>>,
    responder: Arc<dyn Responder>,
    settings: SessionSettings,
}

impl SessionManager {
    pub fn new(responder: Arc<dyn Responder>, settings: SessionSettings) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            responder,
            settings,
        }
    }

    /// Open a new session, seeded with the demo tree when configured.
    ///
    /// Fails once `max_sessions` sessions are open.
    pub async fn create(&self) -> Result<(String, SessionView), SessionError> {
        let store = if self.settings.seed_demo {
            ConversationStore::from_nodes(demo_nodes())?
        } else {
            ConversationStore::new()
        };
        let view = SessionView::of(&store, self.settings.label_max_chars)?;

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.settings.max_sessions {
            tracing::warn!(
                open = sessions.len(),
                max = self.settings.max_sessions,
                "session limit reached, refusing new session"
            );
            return Err(SessionError::LimitReached(self.settings.max_sessions));
        }

        let id = uuid::Uuid::new_v4().to_string();
        tracing::info!(session = %id, nodes = store.len(), "opened session");
        sessions.insert(id.clone(), store);

        Ok((id, view))
    }

    /// End a session and drop its tree
    pub async fn close(&self, session_id: &str) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(session_id) {
            Some(store) => {
                tracing::info!(session = %session_id, nodes = store.len(), "closed session");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.to_string())),
        }
    }

    pub async fn view(&self, session_id: &str) -> Result<SessionView, SessionError> {
        let sessions = self.sessions.read().await;
        let store = lookup(&sessions, session_id)?;
        Ok(SessionView::of(store, self.settings.label_max_chars)?)
    }

    pub async fn apply(&self, session_id: &str, event: UiEvent) -> Result<SessionView, SessionError> {
        let mut sessions = self.sessions.write().await;
        let store = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        Ok(dispatch(
            store,
            event,
            self.responder.as_ref(),
            self.settings.label_max_chars,
        )?)
    }

    pub async fn send_message(&self, session_id: &str, text: String) -> Result<SessionView, SessionError> {
        self.apply(session_id, UiEvent::MessageSent { text }).await
    }

    pub async fn select(&self, session_id: &str, node_id: NodeId) -> Result<SessionView, SessionError> {
        self.apply(session_id, UiEvent::NodeClicked { id: node_id }).await
    }

    /// History leading to `node_id`, or to the current tip when `None`
    pub async fn history(
        &self,
        session_id: &str,
        node_id: Option<NodeId>,
    ) -> Result<Vec<Message>, SessionError> {
        let sessions = self.sessions.read().await;
        let store = lookup(&sessions, session_id)?;
        let start = node_id.as_ref().or(store.current_tip());
        Ok(reconstruct_history(start, store.nodes())?)
    }

    pub async fn graph(&self, session_id: &str) -> Result<GraphElements, SessionError> {
        let sessions = self.sessions.read().await;
        let store = lookup(&sessions, session_id)?;
        Ok(store.graph(self.settings.label_max_chars))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn lookup<'a>(
    sessions: &'a HashMap<String, ConversationStore>,
    session_id: &str,
) -> Result<&'a ConversationStore, SessionError> {
    sessions
        .get(session_id)
        .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
}
