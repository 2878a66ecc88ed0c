//! Conversation orchestration: per-feature sessions and navigation.

pub mod navigator;
pub mod session;
#[cfg(test)]
mod test_support;
pub mod update;

/// Navigation state machine and session store.
pub use navigator::{Navigator, NavigatorView, RetentionPolicy};
/// Per-feature conversation session.
pub use session::{ConversationSession, SelectOutcome, SendOutcome, SessionView};
/// Renderer notifications.
pub use update::{Update, UpdateReceiver, UpdateSender};
