//! Change notifications for the renderer.

use proto::{Feature, NavigationState};
use tokio::sync::mpsc;

/// Something the renderer should redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The navigation state changed.
    Navigation(NavigationState),
    /// A session's log, draft, or busy flag changed.
    Session(Feature),
}

/// Sending half handed to the navigator and its sessions.
pub type UpdateSender = mpsc::UnboundedSender<Update>;

/// Receiving half owned by the renderer.
pub type UpdateReceiver = mpsc::UnboundedReceiver<Update>;

/// Creates a connected update channel.
pub fn channel() -> (UpdateSender, UpdateReceiver) {
    mpsc::unbounded_channel()
}
