//! Per-feature conversation state.

use std::sync::Arc;

use adapters::{FeatureAdapter, FileHandle, HostContext, Requirement, Turn};
use parking_lot::Mutex;
use proto::{AdapterError, Content, Feature, Message, MessageLog, Origin, SessionId};
use tracing::{debug, info, warn};

use crate::update::{Update, UpdateSender};

/// Result of [`ConversationSession::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A request was made and its single bot reply appended.
    Completed,
    /// Empty or whitespace-only draft; nothing changed.
    Ignored,
    /// The required upload has not succeeded yet; nothing changed.
    NotReady,
    /// Another exchange is in flight; nothing changed.
    Busy,
    /// Required resource missing; a validation reply was appended.
    Invalid,
}

/// Result of [`ConversationSession::select_resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// File stored for the next send.
    Selected,
    /// File uploaded; questions are now accepted.
    Uploaded,
    /// Upload failed; a failure reply was appended.
    UploadFailed,
    /// Upload already succeeded; the selection was dropped.
    Ignored,
    /// Another exchange is in flight; nothing changed.
    Busy,
    /// This feature does not take files.
    Unsupported,
}

#[derive(Debug, Default)]
struct SessionState {
    log: MessageLog,
    draft: String,
    busy: bool,
    uploaded: bool,
    resource: Option<FileHandle>,
}

/// Snapshot of a session for rendering.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Session identifier.
    pub id: SessionId,
    /// Feature this session talks to.
    pub feature: Feature,
    /// Conversation log, oldest first.
    pub messages: Vec<Message>,
    /// Current input buffer.
    pub draft: String,
    /// An exchange is in flight.
    pub busy: bool,
    /// Upload gate (meaningful for upload-first features).
    pub uploaded: bool,
    /// Name of the selected file, if any.
    pub resource: Option<String>,
    /// The feature accepts `select_resource`.
    pub accepts_resource: bool,
    /// The question input may be offered to the user.
    pub accepts_questions: bool,
}

/// Conversation with one feature backend.
///
/// Cloning yields another handle to the same session, so an exchange
/// spawned on a task keeps appending to this log after the user has
/// navigated elsewhere.
#[derive(Clone)]
pub struct ConversationSession {
    id: SessionId,
    adapter: Arc<dyn FeatureAdapter>,
    host: Arc<dyn HostContext>,
    state: Arc<Mutex<SessionState>>,
    updates: Option<UpdateSender>,
}

impl ConversationSession {
    /// Creates an empty session owning `adapter`.
    pub fn new(adapter: Arc<dyn FeatureAdapter>, host: Arc<dyn HostContext>) -> Self {
        Self {
            id: SessionId::new(),
            adapter,
            host,
            state: Arc::new(Mutex::new(SessionState::default())),
            updates: None,
        }
    }

    /// Publishes [`Update::Session`] on every state change.
    pub fn with_updates(mut self, updates: UpdateSender) -> Self {
        self.updates = Some(updates);
        self
    }

    /// Session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Feature served by the owned adapter.
    pub fn feature(&self) -> Feature {
        self.adapter.feature()
    }

    /// Whether an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    /// Whether the upload gate is open.
    pub fn is_uploaded(&self) -> bool {
        self.state.lock().uploaded
    }

    /// Current input buffer.
    pub fn draft(&self) -> String {
        self.state.lock().draft.clone()
    }

    /// Copy of the conversation log.
    pub fn messages(&self) -> Vec<Message> {
        self.state.lock().log.as_slice().to_vec()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView {
        let requirement = self.adapter.requirement();
        let state = self.state.lock();
        SessionView {
            id: self.id.clone(),
            feature: self.adapter.feature(),
            messages: state.log.as_slice().to_vec(),
            draft: state.draft.clone(),
            busy: state.busy,
            uploaded: state.uploaded,
            resource: state.resource.as_ref().map(|f| f.name.clone()),
            accepts_resource: requirement.takes_resource(),
            accepts_questions: requirement != Requirement::UploadFirst || state.uploaded,
        }
    }

    /// Replaces the input buffer.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.lock().draft = text.into();
        self.notify();
    }

    /// Selects a file for features that take one.
    ///
    /// Upload-first features upload immediately and open the question gate
    /// on success; attachment features store the file and note the
    /// selection in the log.
    pub async fn select_resource(&self, file: FileHandle) -> SelectOutcome {
        match self.adapter.requirement() {
            Requirement::None => SelectOutcome::Unsupported,
            Requirement::Attachment => {
                {
                    let mut state = self.state.lock();
                    if state.busy {
                        debug!(session = %self.id, "Selection rejected while busy");
                        return SelectOutcome::Busy;
                    }
                    let notice = self.adapter.selection_notice(&file);
                    state.log.push(Message::user(self.id.clone(), notice));
                    state.draft = file.name.clone();
                    state.resource = Some(file);
                }
                self.notify();
                SelectOutcome::Selected
            }
            Requirement::UploadFirst => self.upload(file).await,
        }
    }

    async fn upload(&self, file: FileHandle) -> SelectOutcome {
        {
            let mut state = self.state.lock();
            if state.busy {
                return SelectOutcome::Busy;
            }
            if state.uploaded {
                debug!(session = %self.id, "Upload already done, ignoring selection");
                return SelectOutcome::Ignored;
            }
            state.busy = true;
            state.resource = Some(file.clone());
        }
        self.notify();

        let outcome = self.adapter.upload(&file).await;
        if let Err(e) = &outcome {
            warn!(session = %self.id, feature = %self.feature(), error = %e, "Upload failed");
        }

        {
            let mut state = self.state.lock();
            state.uploaded = outcome.is_ok();
            let notice = self.adapter.upload_notice(&outcome);
            state.log.push(Message::bot(self.id.clone(), notice));
            state.busy = false;
        }
        self.notify();

        if outcome.is_ok() {
            SelectOutcome::Uploaded
        } else {
            SelectOutcome::UploadFailed
        }
    }

    /// Sends the draft (or the selected file) to the backend.
    ///
    /// On completion exactly one bot message is appended, whether the
    /// exchange succeeded or failed, and the busy flag is cleared.
    pub async fn send(&self) -> SendOutcome {
        let requirement = self.adapter.requirement();
        let (prompt, resource) = {
            let mut state = self.state.lock();
            if state.busy {
                debug!(session = %self.id, "Send rejected while busy");
                return SendOutcome::Busy;
            }
            if requirement == Requirement::Attachment {
                let Some(file) = state.resource.clone() else {
                    let err = AdapterError::Validation("no file selected".to_string());
                    let text = self.adapter.failure_text(&err);
                    state.log.push(Message::bot(self.id.clone(), text));
                    state.draft.clear();
                    drop(state);
                    self.notify();
                    return SendOutcome::Invalid;
                };
                state.busy = true;
                (state.draft.clone(), Some(file))
            } else {
                if state.draft.trim().is_empty() {
                    return SendOutcome::Ignored;
                }
                if requirement == Requirement::UploadFirst && !state.uploaded {
                    debug!(session = %self.id, "Send before upload, ignoring");
                    return SendOutcome::NotReady;
                }
                let prompt = std::mem::take(&mut state.draft);
                state.log.push(Message::user(self.id.clone(), prompt.clone()));
                state.busy = true;
                (prompt, None)
            }
        };
        self.notify();

        info!(session = %self.id, feature = %self.feature(), "Exchange started");
        let result = self
            .adapter
            .exchange(Turn {
                prompt: &prompt,
                resource: resource.as_ref(),
                host: self.host.as_ref(),
            })
            .await;

        let content = match result {
            Ok(content) => content,
            Err(e) => {
                warn!(session = %self.id, feature = %self.feature(), error = %e, "Exchange failed");
                Some(Content::Text(self.adapter.failure_text(&e)))
            }
        };

        {
            let mut state = self.state.lock();
            state
                .log
                .push(Message::new(self.id.clone(), Origin::Bot, content));
            state.busy = false;
            if requirement == Requirement::Attachment {
                state.draft.clear();
            }
        }
        self.notify();
        debug!(session = %self.id, "Exchange finished");
        SendOutcome::Completed
    }

    fn notify(&self) {
        if let Some(tx) = &self.updates {
            // Receiver gone means the renderer has shut down.
            let _ = tx.send(Update::Session(self.adapter.feature()));
        }
    }
}
