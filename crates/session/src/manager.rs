//! The session manager orchestrator.

use crate::{Notifier, NullNotifier, Severity, SessionError, TitlePolicy};
use compact_str::CompactString;
use futures_util::{StreamExt, pin_mut};
use llm::{CompletionClient, Config};
use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};
use store::{
    Author, ChatIndexEntry, ChatIndexPatch, ChatIndexStore, Message, MessagePatch, MessageStatus,
    MessageStore,
};
use tokio_util::sync::CancellationToken;

const NOTICE_CONFIG_REQUIRED: &str =
    "Set the API base URL, key, and model before sending messages.";
const NOTICE_AUTH_FAILED: &str = "Authentication error. Please check your API key.";
const NOTICE_PROVIDER_FAILED: &str = "Error connecting to the AI provider. Please try again.";

/// Owns conversation message sequences and the chat index, and runs the
/// send-message → stream-reply → reconcile operation.
///
/// Conversation identities are supplied by the caller; the manager never
/// invents them. Sends for different conversations proceed concurrently;
/// a second send for a conversation that is already streaming is
/// rejected with [`SessionError::Busy`].
pub struct SessionManager<C> {
    client: C,
    config: Mutex<Config>,
    messages: Arc<dyn MessageStore>,
    index: Arc<dyn ChatIndexStore>,
    notifier: Arc<dyn Notifier>,
    titles: TitlePolicy,
    active: Mutex<BTreeSet<CompactString>>,
}

impl<C: CompletionClient> SessionManager<C> {
    /// Create a new session manager over injected stores.
    pub fn new(
        client: C,
        config: Config,
        messages: Arc<dyn MessageStore>,
        index: Arc<dyn ChatIndexStore>,
    ) -> Self {
        Self {
            client,
            config: Mutex::new(config),
            messages,
            index,
            notifier: Arc::new(NullNotifier),
            titles: TitlePolicy::default(),
            active: Mutex::new(BTreeSet::new()),
        }
    }

    /// Attach a notifier for configuration and failure notices.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Override the title policy.
    pub fn with_title_policy(mut self, titles: TitlePolicy) -> Self {
        self.titles = titles;
        self
    }

    /// Replace the endpoint configuration.
    pub fn set_config(&self, config: Config) {
        *self.config.lock().unwrap() = config;
    }

    /// The current endpoint configuration.
    pub fn config(&self) -> Config {
        self.config.lock().unwrap().clone()
    }

    /// Whether a send is currently active for this conversation.
    pub fn is_streaming(&self, conversation_id: &str) -> bool {
        self.active.lock().unwrap().contains(conversation_id)
    }

    /// All messages of a conversation in conversation order.
    pub fn history(&self, conversation_id: &str) -> Vec<Message> {
        self.messages.list(conversation_id)
    }

    /// Chat-index entries for listing, most recent activity first.
    pub fn conversations(&self) -> Vec<ChatIndexEntry> {
        self.index.entries()
    }

    /// Send user text to a conversation and stream the assistant reply.
    ///
    /// On success the finalized assistant message is returned and the
    /// chat index reflects its timestamp. On failure the placeholder is
    /// removed, the failure is classified, and a notification goes out
    /// through the notifier; cancellation removes the placeholder
    /// silently.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Message, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::InvalidInput);
        }

        let _guard = self.activate(conversation_id)?;

        let first_message = self.messages.list(conversation_id).is_empty();
        let user = Message::user(conversation_id, text);
        let sent_at = user.created_at;
        self.messages.append(user);
        self.sync_index(conversation_id, text, first_message, sent_at);

        let config = self.config();
        if !config.is_configured() {
            tracing::debug!("send rejected for {conversation_id}: endpoint not configured");
            self.notifier.notify(NOTICE_CONFIG_REQUIRED, Severity::Warning);
            return Err(SessionError::ConfigurationRequired);
        }

        // Wire history: every settled message, which includes the user
        // message just appended and excludes the placeholder below.
        let history: Vec<llm::Message> = self
            .messages
            .list(conversation_id)
            .iter()
            .filter(|m| m.is_settled())
            .map(|m| match m.author {
                Author::User => llm::Message::user(m.content.clone()),
                Author::Assistant => llm::Message::assistant(m.content.clone()),
            })
            .collect();

        let placeholder = Message::placeholder(conversation_id);
        let reply_id = placeholder.id.clone();
        let reply_at = placeholder.created_at;
        self.messages.append(placeholder);

        tracing::debug!(
            "streaming reply for {conversation_id} over {} messages",
            history.len()
        );
        let stream = self.client.stream(&config, &history);
        pin_mut!(stream);

        let mut content = String::new();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("send cancelled for {conversation_id}");
                    self.messages.remove(conversation_id, &reply_id);
                    return Err(SessionError::Cancelled);
                }
                next = stream.next() => match next {
                    Some(Ok(chunk)) => {
                        if let Some(fragment) = chunk.content() {
                            content.push_str(fragment);
                            self.messages.update(
                                conversation_id,
                                &reply_id,
                                MessagePatch::default()
                                    .content(content.clone())
                                    .status(MessageStatus::Streaming),
                            );
                        }
                        if chunk.reason().is_some() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        self.messages.remove(conversation_id, &reply_id);
                        let err = SessionError::from(e);
                        tracing::warn!("stream failed for {conversation_id}: {err}");
                        self.notifier.notify(failure_notice(&err), Severity::Error);
                        return Err(err);
                    }
                    None => break,
                }
            }
        }

        self.messages.update(
            conversation_id,
            &reply_id,
            MessagePatch::default()
                .content(content.clone())
                .status(MessageStatus::Final),
        );
        self.index.patch(
            conversation_id,
            ChatIndexPatch::default().last_activity_at(reply_at),
        );

        Ok(Message {
            id: reply_id,
            conversation_id: CompactString::new(conversation_id),
            author: Author::Assistant,
            content,
            created_at: reply_at,
            status: MessageStatus::Final,
        })
    }

    /// Create or refresh the chat-index entry for an incoming user message.
    ///
    /// A missing entry (or the conversation's first message overall) gets
    /// a title synthesized from the incoming text. An entry whose title
    /// is still a generic placeholder is re-titled from the conversation's
    /// first user message; established titles are left alone.
    fn sync_index(&self, conversation_id: &str, text: &str, first_message: bool, at: u64) {
        match self.index.get(conversation_id) {
            None => self.index.upsert(ChatIndexEntry::new(
                conversation_id,
                self.titles.synthesize(text),
                at,
            )),
            Some(_) if first_message => self.index.patch(
                conversation_id,
                ChatIndexPatch::default()
                    .title(self.titles.synthesize(text))
                    .last_activity_at(at),
            ),
            Some(entry) if self.titles.is_placeholder(&entry.title) => {
                let first_user = self
                    .messages
                    .list(conversation_id)
                    .into_iter()
                    .find(|m| m.author == Author::User)
                    .map(|m| m.content)
                    .unwrap_or_default();
                let title = self.titles.synthesize(&first_user);
                let patch = if title == entry.title {
                    ChatIndexPatch::default().last_activity_at(at)
                } else {
                    ChatIndexPatch::default().title(title).last_activity_at(at)
                };
                self.index.patch(conversation_id, patch);
            }
            Some(_) => self.index.patch(
                conversation_id,
                ChatIndexPatch::default().last_activity_at(at),
            ),
        }
    }

    /// Mark a conversation active, rejecting overlapping sends.
    fn activate(&self, conversation_id: &str) -> Result<ActiveGuard<'_>, SessionError> {
        let mut active = self.active.lock().unwrap();
        if !active.insert(CompactString::new(conversation_id)) {
            return Err(SessionError::Busy);
        }
        Ok(ActiveGuard {
            active: &self.active,
            id: CompactString::new(conversation_id),
        })
    }
}

/// Clears the active mark when a send finishes, however it finishes.
struct ActiveGuard<'a> {
    active: &'a Mutex<BTreeSet<CompactString>>,
    id: CompactString,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.active.lock().unwrap().remove(&self.id);
    }
}

fn failure_notice(err: &SessionError) -> &'static str {
    match err {
        SessionError::Authentication => NOTICE_AUTH_FAILED,
        _ => NOTICE_PROVIDER_FAILED,
    }
}
