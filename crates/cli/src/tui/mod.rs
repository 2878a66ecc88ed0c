//! Full-screen ratatui terminal UI: feature menu and chat screens.

pub mod app;
pub mod chat;
pub mod event;
pub mod home;
pub mod theme;

pub use event::run_tui;
