//! Fixed demo tree a session can be seeded with
//!
//! Three branches hang off the greeting: recursion, common data structures,
//! and arrays versus linked lists.

use chrono::{DateTime, NaiveDate, Utc};

use super::{ConversationNode, NodeId, Turn};

/// The demo nodes in insertion order. Every parent precedes its children.
pub fn demo_nodes() -> Vec<ConversationNode> {
    vec![
        seed(
            "b1e77c5b-d582-4b78-bc2b-f82c54e1b10c",
            None,
            (0, 0, "Hello, how are you?"),
            (0, 5, "I'm good, thank you! How can I assist you today?"),
        ),
        seed(
            "a3f1b6cf-561e-466d-b29f-876b64b1cfc2",
            Some("b1e77c5b-d582-4b78-bc2b-f82c54e1b10c"),
            (1, 0, "Can you explain recursion?"),
            (1, 10, "Sure! Recursion is a function calling itself to solve smaller instances of the same problem."),
        ),
        seed(
            "12beac94-4e1d-497d-9a14-21fa4a3e5744",
            Some("a3f1b6cf-561e-466d-b29f-876b64b1cfc2"),
            (2, 0, "Can you give an example?"),
            (2, 10, "An example is calculating the factorial of a number using recursion."),
        ),
        seed(
            "4ab69f6c-4b8f-4b0e-97c2-291d36c6809d",
            Some("a3f1b6cf-561e-466d-b29f-876b64b1cfc2"),
            (3, 0, "What are the advantages of recursion?"),
            (3, 10, "Recursion simplifies code for problems like tree traversal and can break down complex problems into simpler ones."),
        ),
        seed(
            "15bc03c9-9572-462f-81c5-6359603fc244",
            Some("12beac94-4e1d-497d-9a14-21fa4a3e5744"),
            (4, 0, "How does recursion differ from iteration?"),
            (4, 10, "Recursion uses function calls and stack memory, while iteration uses loops and a constant memory space."),
        ),
        seed(
            "c59e76d5-56d4-490b-80b3-68c7a2fa8f35",
            Some("b1e77c5b-d582-4b78-bc2b-f82c54e1b10c"),
            (5, 0, "What are some common data structures?"),
            (5, 10, "Some common data structures include arrays, linked lists, stacks, queues, trees, and graphs."),
        ),
        seed(
            "cb0e3e8e-6a13-4d2d-986b-399fdf04a7c0",
            Some("c59e76d5-56d4-490b-80b3-68c7a2fa8f35"),
            (6, 0, "Can you explain stacks and their operations?"),
            (6, 10, "A stack is a LIFO structure with operations like push, pop, and peek. It's useful for undo functionality and backtracking."),
        ),
        seed(
            "8e89cf0d-74f6-4d32-b5cb-9a2c2df70b73",
            Some("cb0e3e8e-6a13-4d2d-986b-399fdf04a7c0"),
            (7, 0, "Can you provide an example of stack usage?"),
            (7, 10, "An example is evaluating mathematical expressions using a stack to handle operators and operands."),
        ),
        seed(
            "c37d6581-27ea-4f57-b536-3b48663e5188",
            Some("b1e77c5b-d582-4b78-bc2b-f82c54e1b10c"),
            (8, 0, "What is the difference between an array and a linked list?"),
            (8, 10, "Arrays have fixed size and contiguous memory, while linked lists use dynamic size and scattered memory with pointers."),
        ),
        seed(
            "f45c370e-49db-4f94-bc35-622b2717f4cf",
            Some("c37d6581-27ea-4f57-b536-3b48663e5188"),
            (9, 0, "When should I use linked lists over arrays?"),
            (9, 10, "Use linked lists when frequent insertions and deletions are needed, especially in the middle of the structure."),
        ),
        seed(
            "289bf2b8-f0c4-4095-bb6d-6dd8f35a54e8",
            Some("c59e76d5-56d4-490b-80b3-68c7a2fa8f35"),
            (10, 0, "Can you explain tree traversal methods?"),
            (10, 10, "Tree traversal methods include in-order, pre-order, post-order, and level-order traversal."),
        ),
        seed(
            "20c3a183-7b49-4c80-8162-7d672bd5e432",
            Some("289bf2b8-f0c4-4095-bb6d-6dd8f35a54e8"),
            (11, 0, "What is the difference between pre-order and in-order traversal?"),
            (11, 10, "Pre-order visits the root first, then left and right subtrees. In-order visits the left subtree, root, then right subtree."),
        ),
        seed(
            "d4c89f84-10eb-4d73-9c20-b1f257ee56de",
            Some("12beac94-4e1d-497d-9a14-21fa4a3e5744"),
            (12, 0, "How is recursion used in solving tree problems?"),
            (12, 10, "Recursion is used to traverse and solve problems in trees by breaking down tasks into smaller subtrees."),
        ),
        seed(
            "c612cbb8-4897-4749-befc-d21c6393b9ef",
            Some("15bc03c9-9572-462f-81c5-6359603fc244"),
            (13, 0, "Are there any drawbacks to recursion?"),
            (13, 10, "Drawbacks include high memory usage due to stack calls and potential stack overflow if not properly managed."),
        ),
    ]
}

fn seed(
    id: &str,
    parent: Option<&str>,
    user: (u32, u32, &str),
    assistant: (u32, u32, &str),
) -> ConversationNode {
    ConversationNode {
        id: NodeId::from(id),
        parent_id: parent.map(NodeId::from),
        user: Turn::new(user.2, at(user.0, user.1)),
        assistant: Turn::new(assistant.2, at(assistant.0, assistant.1)),
    }
}

/// 2024-12-14 10:mm:ss UTC
fn at(minute: u32, second: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 12, 14)
        .and_then(|date| date.and_hms_opt(10, minute, second))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
