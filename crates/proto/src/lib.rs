//! Shared conversation types for adapters, sessions, and front ends.
//!
//! This crate defines the normalized message model, the feature and
//! navigation enums, and strongly-typed error enums shared across the
//! workspace.

pub mod error;
pub mod feature;
pub mod message;

/// Re-export of all error types.
pub use error::*;
/// Re-export of feature and navigation types.
pub use feature::{Feature, NavigationState};
/// Re-export of message model types.
pub use message::{Content, Message, MessageLog, Origin, SessionId};
