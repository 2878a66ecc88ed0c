//! One-shot `ask` command: a single exchange without the TUI.

use adapters::FileHandle;
use anyhow::bail;
use conversation::{Navigator, SelectOutcome, SendOutcome};
use proto::{Content, Feature, Message, Origin};
use tracing::debug;

/// Runs one exchange against `feature` and returns the bot messages it produced.
///
/// A file is selected first when given (upload for document chat, attachment
/// for data analysis). The message is then sent, except for document chat
/// invoked with only a file, which stops after the upload.
pub(crate) async fn ask(
    navigator: &mut Navigator,
    feature: Feature,
    file: Option<FileHandle>,
    message: Option<String>,
) -> anyhow::Result<Vec<Message>> {
    let Some(session) = navigator.select_feature(feature) else {
        bail!("another feature is already active");
    };
    let start = session.messages().len();

    if let Some(file) = file {
        match session.select_resource(file).await {
            SelectOutcome::Unsupported => bail!("{} does not take files", feature.title()),
            SelectOutcome::UploadFailed => return Ok(bot_messages(&session.messages()[start..])),
            outcome => debug!(?outcome, "File selected"),
        }
    }

    let wants_send = message.is_some() || feature == Feature::DataAnalysis;
    if let Some(message) = message {
        session.set_draft(message);
    }
    if wants_send {
        match session.send().await {
            SendOutcome::Completed | SendOutcome::Invalid => {}
            SendOutcome::NotReady => bail!("upload a document with --file before asking"),
            SendOutcome::Ignored => bail!("message is empty"),
            SendOutcome::Busy => bail!("session is busy"),
        }
    } else if session.messages().len() == start {
        bail!("nothing to send: pass a message or --file");
    }

    Ok(bot_messages(&session.messages()[start..]))
}

fn bot_messages(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .filter(|m| m.origin == Origin::Bot)
        .cloned()
        .collect()
}

/// One-line rendering of a bot message for stdout.
pub(crate) fn format_reply(message: &Message) -> String {
    match &message.content {
        Some(Content::Text(text)) => text.clone(),
        Some(Content::Image(url)) => format!("[image] {url}"),
        None => "(empty response)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::{
        AdapterFactory, FeatureAdapter, HostContext, Requirement, StaticHost, Turn,
    };
    use async_trait::async_trait;
    use proto::{AdapterError, SessionId};
    use std::sync::Arc;

    /// Echoes prompts back; uploads fail for files named `broken*`.
    struct EchoAdapter(Feature);

    #[async_trait]
    impl FeatureAdapter for EchoAdapter {
        fn feature(&self) -> Feature {
            self.0
        }

        fn endpoint(&self) -> &str {
            "echo://"
        }

        fn requirement(&self) -> Requirement {
            match self.0 {
                Feature::DocumentChat => Requirement::UploadFirst,
                Feature::DataAnalysis => Requirement::Attachment,
                _ => Requirement::None,
            }
        }

        async fn upload(&self, file: &FileHandle) -> Result<(), AdapterError> {
            if file.name.starts_with("broken") {
                Err(AdapterError::HttpStatus(500))
            } else {
                Ok(())
            }
        }

        async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
            match (self.0, turn.resource) {
                (Feature::ImageGen, _) => {
                    let url = format!("https://img/{}", turn.prompt);
                    Ok(Content::image(Some(url)))
                }
                (_, Some(file)) => Ok(Content::text(Some(format!("rows in {}", file.name)))),
                _ => Ok(Content::text(Some(format!("echo: {}", turn.prompt)))),
            }
        }

        fn failure_text(&self, _err: &AdapterError) -> String {
            "failed".to_string()
        }
    }

    struct EchoFactory;

    impl AdapterFactory for EchoFactory {
        fn create(&self, feature: Feature) -> Arc<dyn FeatureAdapter> {
            Arc::new(EchoAdapter(feature))
        }
    }

    fn navigator() -> Navigator {
        let host: Arc<dyn HostContext> = Arc::new(StaticHost::new(None));
        Navigator::new(Arc::new(EchoFactory), host)
    }

    fn file(name: &str) -> FileHandle {
        FileHandle::new(name, b"a,b\n1,2\n".to_vec())
    }

    #[tokio::test]
    async fn chatbot_message_yields_one_reply() {
        let mut nav = navigator();
        let replies = ask(&mut nav, Feature::GenericChatbot, None, Some("hi".to_string()))
            .await
            .expect("ask");
        assert_eq!(replies.len(), 1);
        assert_eq!(format_reply(&replies[0]), "echo: hi");
    }

    #[tokio::test]
    async fn document_upload_then_question() {
        let mut nav = navigator();
        let replies = ask(
            &mut nav,
            Feature::DocumentChat,
            Some(file("notes.txt")),
            Some("summary?".to_string()),
        )
        .await
        .expect("ask");
        let texts: Vec<_> = replies.iter().map(format_reply).collect();
        assert_eq!(texts, ["Document uploaded.", "echo: summary?"]);
    }

    #[tokio::test]
    async fn failed_upload_stops_before_question() {
        let mut nav = navigator();
        let replies = ask(
            &mut nav,
            Feature::DocumentChat,
            Some(file("broken.pdf")),
            Some("summary?".to_string()),
        )
        .await
        .expect("ask");
        assert_eq!(replies.len(), 1);
        assert_eq!(format_reply(&replies[0]), "Upload failed.");
    }

    #[tokio::test]
    async fn document_question_without_upload_is_an_error() {
        let mut nav = navigator();
        let err = ask(&mut nav, Feature::DocumentChat, None, Some("q".to_string()))
            .await
            .expect_err("not ready");
        assert!(err.to_string().contains("--file"));
    }

    #[tokio::test]
    async fn data_analysis_sends_the_file_without_a_message() {
        let mut nav = navigator();
        let replies = ask(&mut nav, Feature::DataAnalysis, Some(file("sales.csv")), None)
            .await
            .expect("ask");
        assert_eq!(replies.len(), 1);
        assert_eq!(format_reply(&replies[0]), "rows in sales.csv");
    }

    #[tokio::test]
    async fn data_analysis_without_file_reports_validation_text() {
        let mut nav = navigator();
        let replies = ask(&mut nav, Feature::DataAnalysis, None, None)
            .await
            .expect("ask");
        assert_eq!(replies.len(), 1);
        assert_eq!(format_reply(&replies[0]), "failed");
    }

    #[tokio::test]
    async fn file_for_text_feature_is_rejected() {
        let mut nav = navigator();
        let err = ask(&mut nav, Feature::WebpageChat, Some(file("x.csv")), None)
            .await
            .expect_err("unsupported");
        assert!(err.to_string().contains("Chat with Webpage"));
    }

    #[tokio::test]
    async fn chatbot_without_message_is_an_error() {
        let mut nav = navigator();
        assert!(ask(&mut nav, Feature::GenericChatbot, None, None).await.is_err());
    }

    #[test]
    fn format_reply_covers_every_content_kind() {
        let id = SessionId::new();
        let image = Message::new(
            id.clone(),
            Origin::Bot,
            Some(Content::Image("https://img/fox.png".to_string())),
        );
        let empty = Message::new(id, Origin::Bot, None);
        assert_eq!(format_reply(&image), "[image] https://img/fox.png");
        assert_eq!(format_reply(&empty), "(empty response)");
    }
}
