//! Conversation tree types and operations
//!
//! A conversation is a forest of [`ConversationNode`]s. Each node holds one
//! user/assistant turn pair and points at the turn it follows. Picking any
//! node as the tip rewinds the conversation to that point; the next message
//! branches off it.

mod demo;
mod graph;
mod history;
mod store;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use demo::demo_nodes;
pub use graph::{project_graph, GraphElements};
pub use history::{reconstruct_history, render_transcript};
pub use store::ConversationStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Opaque, globally unique node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One side of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }
}

/// A single user/assistant exchange in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationNode {
    pub id: NodeId,

    /// The node this turn follows; `None` for a root
    #[serde(default)]
    pub parent_id: Option<NodeId>,

    pub user: Turn,
    pub assistant: Turn,
}

impl ConversationNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Errors raised by tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("Parent {parent} of node {node} is not in the tree")]
    UnknownParent { node: NodeId, parent: NodeId },

    #[error("Cycle detected walking up from {start} after {steps} steps")]
    CycleDetected { start: NodeId, steps: usize },
}
