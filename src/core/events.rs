//! UI events and the view they produce

use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationStore, GraphElements, Message, NodeId, TreeError};

use super::Responder;

/// Everything the UI can ask of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The user sent a message from the input box
    MessageSent { text: String },

    /// The user clicked a node in the graph view
    NodeClicked { id: NodeId },
}

/// What the UI re-renders after each event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub current_tip: Option<NodeId>,
    pub history: Vec<Message>,
    pub graph: GraphElements,
}

impl SessionView {
    pub fn of(store: &ConversationStore, label_max_chars: Option<usize>) -> Result<Self, TreeError> {
        Ok(Self {
            current_tip: store.current_tip().cloned(),
            history: store.history()?,
            graph: store.graph(label_max_chars),
        })
    }
}

/// Apply `event` to `store` and return the refreshed view
pub fn dispatch(
    store: &mut ConversationStore,
    event: UiEvent,
    responder: &dyn Responder,
    label_max_chars: Option<usize>,
) -> Result<SessionView, TreeError> {
    match event {
        UiEvent::MessageSent { text } => {
            if store.append_message(&text, responder).is_none() {
                tracing::debug!("ignored empty message");
            }
            SessionView::of(store, label_max_chars)
        }
        UiEvent::NodeClicked { id } => {
            let history = store.select_node(&id)?;
            Ok(SessionView {
                current_tip: Some(id),
                history,
                graph: store.graph(label_max_chars),
            })
        }
    }
}
