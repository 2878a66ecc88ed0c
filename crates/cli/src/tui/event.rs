//! Async event loop for the TUI: crossterm input, session updates, and a spinner timer.

use adapters::FileHandle;
use conversation::{Navigator, UpdateReceiver};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use super::app::{Action, TuiApp};

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the full-screen TUI until the user quits.
pub async fn run_tui(navigator: Navigator, mut updates: UpdateReceiver) -> anyhow::Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard; // Drop restores terminal

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    debug!(retention = ?navigator.retention(), "TUI started");
    let mut app = TuiApp::new(navigator);

    let mut crossterm_stream = EventStream::new();

    // Spinner tick interval (100ms)
    let mut spinner_interval = tokio::time::interval(std::time::Duration::from_millis(100));
    spinner_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            // Branch 1: crossterm terminal events
            maybe_event = crossterm_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = app.handle_key(key) {
                            dispatch(&mut app, action).await;
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Terminal will redraw on next loop iteration
                    }
                    Some(Err(_)) | None => {
                        break; // stream ended or error
                    }
                    _ => {}
                }
            }

            // Branch 2: navigator and session change notifications
            Some(update) = updates.recv() => {
                app.apply_update(update);
            }

            _ = spinner_interval.tick(), if app.is_busy() => {
                app.spinner_tick = app.spinner_tick.wrapping_add(1);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // TerminalGuard::drop handles cleanup
    Ok(())
}

/// Starts the async half of a key action. Exchanges run on their own task so
/// the screen keeps redrawing and the user may navigate away mid-flight.
async fn dispatch(app: &mut TuiApp, action: Action) {
    match action {
        Action::Send(session) => {
            debug!(session = %session.id(), "Send task spawned");
            tokio::spawn(async move {
                let outcome = session.send().await;
                debug!(session = %session.id(), ?outcome, "Send finished");
            });
        }
        Action::SelectFile { session, path } => match FileHandle::from_path(&path).await {
            Ok(file) => {
                debug!(session = %session.id(), file = %file.name, "File task spawned");
                tokio::spawn(async move {
                    let outcome = session.select_resource(file).await;
                    debug!(session = %session.id(), ?outcome, "File selection finished");
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read file");
                app.notice = Some(format!("Could not read file ({e})"));
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_guard_drop_path_is_safe() {
        let guard = TerminalGuard;
        drop(guard);
    }
}
