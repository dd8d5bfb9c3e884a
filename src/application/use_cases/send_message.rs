use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::sync::mpsc;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::{
    ProviderError, RemoteMessage, Run, RunStatus, RunStreamEvent,
};
use crate::application::services::apply_footnotes;
use crate::domain::entities::{Message, Thread};
use crate::domain::repositories::{MessageRepository, RepositoryError, ThreadRepository};
use crate::domain::value_objects::MessageRole;

/// Pacing for the poll-to-completion path: one status check per interval,
/// bounded by a wall-clock ceiling.
#[derive(Debug, Clone)]
pub struct RunPollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for RunPollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
pub enum SendMessageError {
    ValidationError(String),
    ThreadNotFound(String),
    /// The user message was mirrored locally but could not be forwarded to
    /// the remote thread. The local save is not rolled back; the caller
    /// sees the inconsistency instead of a silent divergence.
    ForwardFailed(String),
    ProviderError(String),
    RunFailed(RunStatus),
    Timeout,
    /// The run completed but no assistant message came back for it.
    NoResponse,
    RepositoryError(String),
}

impl std::fmt::Display for SendMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendMessageError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SendMessageError::ThreadNotFound(id) => write!(f, "Thread not found: {}", id),
            SendMessageError::ForwardFailed(msg) => {
                write!(f, "Message saved locally but not forwarded: {}", msg)
            }
            SendMessageError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            SendMessageError::RunFailed(status) => write!(f, "Run ended as {}", status),
            SendMessageError::Timeout => write!(f, "Run did not complete within the timeout"),
            SendMessageError::NoResponse => write!(f, "No assistant response was produced"),
            SendMessageError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SendMessageError {}

impl From<RepositoryError> for SendMessageError {
    fn from(error: RepositoryError) -> Self {
        SendMessageError::RepositoryError(error.to_string())
    }
}

impl From<ProviderError> for SendMessageError {
    fn from(error: ProviderError) -> Self {
        SendMessageError::ProviderError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub thread_id: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    /// The assistant's reply with citation annotations already rewritten as
    /// footnote markers; this is exactly what was persisted.
    pub reply: String,
}

/// One event of a streamed chat turn, as surfaced to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatStreamEvent {
    Delta(String),
    Completed(String),
    Error(String),
}

/// Executes one chat turn: mirror and forward the user message, run the
/// assistant (polled or streamed), footnote the reply, persist it.
pub struct SendMessageUseCase {
    provider: Arc<dyn AssistantProvider>,
    thread_repository: Arc<dyn ThreadRepository>,
    message_repository: Arc<dyn MessageRepository>,
    poll_config: RunPollConfig,
}

impl SendMessageUseCase {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        thread_repository: Arc<dyn ThreadRepository>,
        message_repository: Arc<dyn MessageRepository>,
        poll_config: RunPollConfig,
    ) -> Self {
        Self {
            provider,
            thread_repository,
            message_repository,
            poll_config,
        }
    }

    /// Blocking turn: submit a run and poll it to a terminal state.
    pub async fn execute(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, SendMessageError> {
        let thread = self.prepare_turn(&request).await?;

        let run = self
            .provider
            .create_run(thread.remote_id(), thread.assistant_remote_id())
            .await?;
        let run = self.poll_to_completion(&thread, run).await?;

        let reply = self.finalize_reply(&thread, Some(&run.id)).await?;
        Ok(SendMessageResponse { reply })
    }

    /// Streaming turn: yields deltas as they arrive, then a completed event
    /// carrying the footnoted, persisted reply.
    pub async fn execute_streaming(
        &self,
        request: SendMessageRequest,
    ) -> Result<BoxStream<'static, ChatStreamEvent>, SendMessageError> {
        let thread = self.prepare_turn(&request).await?;

        let mut events = self
            .provider
            .stream_run(thread.remote_id(), thread.assistant_remote_id())
            .await?;

        let (tx, rx) = mpsc::channel::<ChatStreamEvent>(32);
        let provider = self.provider.clone();
        let thread_repository = self.thread_repository.clone();
        let message_repository = self.message_repository.clone();

        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                match event {
                    RunStreamEvent::TextDelta(delta) => {
                        if tx.send(ChatStreamEvent::Delta(delta)).await.is_err() {
                            // Consumer went away; nothing is persisted for
                            // an abandoned turn.
                            return;
                        }
                    }
                    RunStreamEvent::Error(message) => {
                        tracing::error!("Run stream failed: {}", message);
                        let _ = tx.send(ChatStreamEvent::Error(message)).await;
                        return;
                    }
                    RunStreamEvent::Done => break,
                }
            }

            let finalized = finalize_reply_inner(
                provider.as_ref(),
                thread_repository.as_ref(),
                message_repository.as_ref(),
                &thread,
                None,
            )
            .await;
            let closing = match finalized {
                Ok(reply) => ChatStreamEvent::Completed(reply),
                Err(e) => {
                    tracing::error!("Failed to finalize streamed turn: {}", e);
                    ChatStreamEvent::Error(e.to_string())
                }
            };
            let _ = tx.send(closing).await;
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });
        Ok(stream.boxed())
    }

    /// Mirrors the user message locally, then forwards it to the remote
    /// thread. Two separate calls; a forward failure is surfaced while the
    /// local save stays.
    async fn prepare_turn(&self, request: &SendMessageRequest) -> Result<Thread, SendMessageError> {
        if request.content.trim().is_empty() {
            return Err(SendMessageError::ValidationError(
                "Message content cannot be empty".to_string(),
            ));
        }

        let thread = self
            .thread_repository
            .find_by_remote_id(&request.thread_id)
            .await?
            .ok_or_else(|| SendMessageError::ThreadNotFound(request.thread_id.clone()))?;

        let message = Message::new(thread.id(), MessageRole::User, request.content.clone());
        self.message_repository.save(&message).await?;
        self.thread_repository.touch(thread.id(), Utc::now()).await?;

        if let Err(e) = self
            .provider
            .create_message(thread.remote_id(), MessageRole::User.as_str(), &request.content)
            .await
        {
            tracing::error!(
                "Failed to forward message to thread {}: {}",
                thread.remote_id(),
                e
            );
            return Err(SendMessageError::ForwardFailed(e.to_string()));
        }

        Ok(thread)
    }

    async fn poll_to_completion(
        &self,
        thread: &Thread,
        mut run: Run,
    ) -> Result<Run, SendMessageError> {
        let started = tokio::time::Instant::now();

        while !run.status.is_terminal() {
            if started.elapsed() >= self.poll_config.timeout {
                tracing::error!(
                    "Run {} on thread {} exceeded the {}s timeout",
                    run.id,
                    thread.remote_id(),
                    self.poll_config.timeout.as_secs()
                );
                return Err(SendMessageError::Timeout);
            }
            tokio::time::sleep(self.poll_config.interval).await;
            run = self
                .provider
                .retrieve_run(thread.remote_id(), &run.id)
                .await?;
        }

        if run.status != RunStatus::Completed {
            tracing::error!("Run {} ended as {}", run.id, run.status);
            return Err(SendMessageError::RunFailed(run.status));
        }
        Ok(run)
    }

    async fn finalize_reply(
        &self,
        thread: &Thread,
        run_id: Option<&str>,
    ) -> Result<String, SendMessageError> {
        finalize_reply_inner(
            self.provider.as_ref(),
            self.thread_repository.as_ref(),
            self.message_repository.as_ref(),
            thread,
            run_id,
        )
        .await
    }
}

/// Fetches the newest assistant message, rewrites its annotations into
/// footnotes, and persists it. Free function so the streaming task can use
/// it without holding the use case.
async fn finalize_reply_inner(
    provider: &dyn AssistantProvider,
    thread_repository: &dyn ThreadRepository,
    message_repository: &dyn MessageRepository,
    thread: &Thread,
    run_id: Option<&str>,
) -> Result<String, SendMessageError> {
    let messages = provider.list_messages(thread.remote_id()).await?;
    let reply = select_reply(&messages, run_id).ok_or(SendMessageError::NoResponse)?;

    let footnoted = apply_footnotes(&reply.text, &reply.annotations);

    let message = Message::new(thread.id(), MessageRole::Assistant, footnoted.clone());
    message_repository.save(&message).await?;
    thread_repository.touch(thread.id(), Utc::now()).await?;

    Ok(footnoted)
}

/// Newest assistant message, preferring one produced by the given run.
fn select_reply<'a>(
    messages: &'a [RemoteMessage],
    run_id: Option<&str>,
) -> Option<&'a RemoteMessage> {
    if let Some(run_id) = run_id {
        if let Some(for_run) = messages
            .iter()
            .find(|m| m.role == "assistant" && m.run_id.as_deref() == Some(run_id))
        {
            return Some(for_run);
        }
    }
    messages.iter().find(|m| m.role == "assistant")
}
