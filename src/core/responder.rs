//! Assistant reply generation
//!
//! The tree only needs a function from user text to assistant text. A real
//! deployment plugs a model-backed implementation in here; the built-in
//! [`EchoResponder`] answers deterministically.

/// Produces the assistant side of a turn
pub trait Responder: Send + Sync {
    fn respond(&self, user_text: &str) -> String;
}

/// Fixed placeholder reply: `"<prefix><user text>"`
#[derive(Debug, Clone)]
pub struct EchoResponder {
    prefix: String,
}

pub const DEFAULT_PREFIX: &str = "Response to: ";

impl EchoResponder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EchoResponder {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Responder for EchoResponder {
    fn respond(&self, user_text: &str) -> String {
        format!("{}{}", self.prefix, user_text)
    }
}

impl<F> Responder for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn respond(&self, user_text: &str) -> String {
        self(user_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_reply() {
        assert_eq!(EchoResponder::default().respond("hi"), "Response to: hi");
        assert_eq!(EchoResponder::new("> ").respond("hi"), "> hi");
    }

    #[test]
    fn test_closure_responder() {
        let shout = |text: &str| text.to_uppercase();
        let responder: &dyn Responder = &shout;
        assert_eq!(responder.respond("hey"), "HEY");
    }
}
