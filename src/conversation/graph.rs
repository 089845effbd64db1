//! Project the conversation tree into graph elements for the link view
//!
//! The element shape (`{"data": {...}}` wrappers, `source`/`target` edge
//! endpoints) is what Cytoscape-style graph widgets consume directly.

use serde::{Deserialize, Serialize};

use super::{ConversationNode, NodeId};

/// Label shared by every conversation node in the graph
pub const NODE_LABEL: &str = "__node__";

/// Label of a child-to-parent edge
pub const FOLLOWS: &str = "FOLLOWS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphElements {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub data: GraphNodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNodeData {
    pub id: NodeId,
    pub label: String,
    /// Display lines: the user turn then the assistant turn
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub data: GraphEdgeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdgeData {
    pub id: String,
    pub label: String,
    /// The child node
    pub source: NodeId,
    /// The parent node
    pub target: NodeId,
}

/// Build one graph node per conversation node and one `FOLLOWS` edge per
/// non-root node, pointing from child to parent.
///
/// `label_max_chars` caps the turn text on each display line, not counting
/// the `User: ` / `Assistant: ` prefix; `None` keeps the full text.
/// Edge ids are derived from their endpoints, so projecting the same nodes
/// twice gives equal elements.
pub fn project_graph(nodes: &[ConversationNode], label_max_chars: Option<usize>) -> GraphElements {
    let mut elements = GraphElements {
        nodes: Vec::with_capacity(nodes.len()),
        edges: Vec::new(),
    };

    for node in nodes {
        elements.nodes.push(GraphNode {
            data: GraphNodeData {
                id: node.id.clone(),
                label: NODE_LABEL.to_string(),
                content: vec![
                    format!("User: {}", truncate(&node.user.text, label_max_chars)),
                    format!("Assistant: {}", truncate(&node.assistant.text, label_max_chars)),
                ],
            },
        });

        if let Some(parent) = &node.parent_id {
            elements.edges.push(GraphEdge {
                data: GraphEdgeData {
                    id: format!("{}->{}", node.id, parent),
                    label: FOLLOWS.to_string(),
                    source: node.id.clone(),
                    target: parent.clone(),
                },
            });
        }
    }

    elements
}

fn truncate(text: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) if text.chars().count() > max => {
            let mut cut: String = text.chars().take(max).collect();
            cut.push('…');
            cut
        }
        _ => text.to_string(),
    }
}
