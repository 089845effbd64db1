//! Rebuild the linear chat history leading to a node

use std::collections::HashMap;

use super::{ConversationNode, Message, NodeId, Role, TreeError};

/// Walk from `node_id` up to its root and return the turns oldest first.
///
/// An unknown (or absent) start id yields an empty history. A parent link
/// pointing outside `nodes` ends the walk with what has been collected. The
/// walk never takes more than `nodes.len()` steps; needing more means the
/// parent links loop, which is reported as [`TreeError::CycleDetected`].
pub fn reconstruct_history(
    node_id: Option<&NodeId>,
    nodes: &[ConversationNode],
) -> Result<Vec<Message>, TreeError> {
    let Some(start) = node_id else {
        return Ok(Vec::new());
    };

    // First occurrence wins when an id repeats
    let mut index: HashMap<&NodeId, &ConversationNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        index.entry(&node.id).or_insert(node);
    }

    let mut path = Vec::new();
    let mut current = index.get(start).copied();
    let mut steps = 0;

    while let Some(node) = current {
        steps += 1;
        if steps > nodes.len() {
            tracing::warn!(start = %start, steps, "parent links form a cycle");
            return Err(TreeError::CycleDetected {
                start: start.clone(),
                steps,
            });
        }

        path.push(node);
        current = node
            .parent_id
            .as_ref()
            .and_then(|parent| index.get(parent).copied());
    }

    // Collected leaf to root
    let history = path
        .into_iter()
        .rev()
        .flat_map(|node| {
            [
                Message {
                    role: Role::User,
                    content: node.user.text.clone(),
                },
                Message {
                    role: Role::Assistant,
                    content: node.assistant.text.clone(),
                },
            ]
        })
        .collect();

    Ok(history)
}

/// Render a history as Markdown chat lines
pub fn render_transcript(history: &[Message]) -> String {
    history
        .iter()
        .map(|message| match message.role {
            Role::User => format!("**You:** {}", message.content),
            Role::Assistant => format!("**Assistant:** {}", message.content),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
