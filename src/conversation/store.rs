//! Per-session conversation store

use std::collections::HashSet;

use chrono::Utc;

use crate::core::Responder;

use super::{
    project_graph, reconstruct_history, ConversationNode, GraphElements, Message, NodeId,
    TreeError, Turn,
};

/// All nodes of one session plus the tip of the active branch.
///
/// Nodes are append-only and kept in insertion order. Every node enters
/// through [`ConversationStore::insert_node`] or
/// [`ConversationStore::append_message`], which both refuse duplicate ids
/// and parents that are not already stored, so the parent links always form
/// a forest.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    nodes: Vec<ConversationNode>,
    current_tip: Option<NodeId>,
    ids: HashSet<NodeId>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing nodes, validating each in order. The tip
    /// starts unset.
    pub fn from_nodes(nodes: impl IntoIterator<Item = ConversationNode>) -> Result<Self, TreeError> {
        let mut store = Self::new();
        for node in nodes {
            store.insert_node(node)?;
        }
        Ok(store)
    }

    pub fn nodes(&self) -> &[ConversationNode] {
        &self.nodes
    }

    pub fn current_tip(&self) -> Option<&NodeId> {
        self.current_tip.as_ref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&ConversationNode> {
        if !self.contains(id) {
            return None;
        }
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Add an already-built node without moving the tip
    pub fn insert_node(&mut self, node: ConversationNode) -> Result<(), TreeError> {
        if self.ids.contains(&node.id) {
            return Err(TreeError::DuplicateNode(node.id));
        }
        if let Some(parent) = &node.parent_id {
            if !self.ids.contains(parent) {
                return Err(TreeError::UnknownParent {
                    node: node.id.clone(),
                    parent: parent.clone(),
                });
            }
        }

        self.ids.insert(node.id.clone());
        self.nodes.push(node);
        Ok(())
    }

    /// Record a user message as a child of the current tip and make it the
    /// new tip.
    ///
    /// Whitespace-only input is ignored and returns `None`.
    pub fn append_message(&mut self, user_text: &str, responder: &dyn Responder) -> Option<NodeId> {
        let text = user_text.trim();
        if text.is_empty() {
            return None;
        }

        let now = Utc::now();
        let reply = responder.respond(text);

        let mut id = NodeId::generate();
        while self.ids.contains(&id) {
            id = NodeId::generate();
        }

        let node = ConversationNode {
            id: id.clone(),
            parent_id: self.current_tip.clone(),
            user: Turn::new(text, now),
            assistant: Turn::new(reply, now),
        };

        tracing::debug!(node = %id, parent = ?node.parent_id, "appended conversation node");

        self.ids.insert(id.clone());
        self.nodes.push(node);
        self.current_tip = Some(id.clone());
        Some(id)
    }

    /// Move the tip to `id` and return the history leading to it.
    ///
    /// Unknown ids are rejected and leave the tip where it was.
    pub fn select_node(&mut self, id: &NodeId) -> Result<Vec<Message>, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id.clone()));
        }

        let history = reconstruct_history(Some(id), &self.nodes)?;
        tracing::debug!(node = %id, turns = history.len() / 2, "selected conversation node");
        self.current_tip = Some(id.clone());
        Ok(history)
    }

    /// History of the active branch
    pub fn history(&self) -> Result<Vec<Message>, TreeError> {
        reconstruct_history(self.current_tip.as_ref(), &self.nodes)
    }

    pub fn graph(&self, label_max_chars: Option<usize>) -> GraphElements {
        project_graph(&self.nodes, label_max_chars)
    }
}
