use std::collections::VecDeque;
use std::env;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::{
    MessageAnnotation, ProviderError, RemoteMessage, Run, RunEventStream, RunStatus,
    RunStreamEvent,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const LIST_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl OpenAiClientConfig {
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ProviderError::ApiError("OPENAI_API_KEY not set".to_string())
        })?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|e| ProviderError::ApiError(format!("Invalid OPENAI_BASE_URL: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: 30,
            max_retries: 3,
            backoff_factor: 1.5,
        })
    }
}

// --- Wire shapes -----------------------------------------------------------

#[derive(Deserialize)]
struct ObjectId {
    id: String,
}

#[derive(Deserialize)]
struct DeletionAck {
    deleted: bool,
}

#[derive(Deserialize)]
struct ListPage<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Deserialize)]
struct RunObject {
    id: String,
    status: String,
}

#[derive(Deserialize)]
struct MessageObject {
    id: String,
    role: String,
    #[serde(default)]
    content: Vec<ContentPart>,
    #[serde(default)]
    run_id: Option<String>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    text: Option<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    value: String,
    #[serde(default)]
    annotations: Vec<AnnotationObject>,
}

#[derive(Deserialize)]
struct AnnotationObject {
    text: String,
}

#[derive(Deserialize)]
struct MessageDeltaEvent {
    delta: MessageDeltaBody,
}

#[derive(Deserialize)]
struct MessageDeltaBody {
    #[serde(default)]
    content: Vec<DeltaContentPart>,
}

#[derive(Deserialize)]
struct DeltaContentPart {
    text: Option<DeltaText>,
}

#[derive(Deserialize)]
struct DeltaText {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct RunErrorEvent {
    #[serde(default)]
    last_error: Option<RunLastError>,
}

#[derive(Deserialize)]
struct RunLastError {
    message: String,
}

// --- Client ----------------------------------------------------------------

/// `AssistantProvider` backed by an OpenAI-compatible Assistants v2 API.
pub struct OpenAiAssistantClient {
    client: reqwest::Client,
    config: OpenAiClientConfig,
}

impl OpenAiAssistantClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ProviderError::ApiError(format!("Invalid API key: {}", e)))?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        headers.insert("OpenAI-Beta", HeaderValue::from_static("assistants=v2"));

        // No client-wide timeout: streamed runs stay open far longer than a
        // plain call. Unary requests set their own deadline instead.
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(OpenAiClientConfig::from_env()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ProviderError> {
        if !response.status().is_success() {
            return Err(classify_status(
                response.status().as_u16(),
                path,
                response.text().await.unwrap_or_default(),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Malformed response: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let result = self.execute_get::<T>(path).await;
            match result {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let retryable = matches!(
                        e,
                        ProviderError::NetworkError(_) | ProviderError::Unavailable
                    );
                    if !retryable || attempts > self.config.max_retries {
                        return Err(e);
                    }
                    let backoff = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    tracing::debug!("Retrying GET {} after {:?}", path, backoff);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    async fn execute_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .timeout(self.request_timeout())
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        Self::decode(response, path).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .timeout(self.request_timeout())
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        Self::decode(response, path).await
    }

    async fn delete_ack(&self, path: &str) -> Result<bool, ProviderError> {
        let response = self
            .client
            .delete(self.endpoint(path))
            .timeout(self.request_timeout())
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        let ack: DeletionAck = Self::decode(response, path).await?;
        Ok(ack.deleted)
    }
}

#[async_trait]
impl AssistantProvider for OpenAiAssistantClient {
    async fn upload_file(&self, file_name: &str, data: Vec<u8>) -> Result<String, ProviderError> {
        let part = multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("/files"))
            .timeout(self.request_timeout())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        let object: ObjectId = Self::decode(response, "/files").await?;
        Ok(object.id)
    }

    async fn delete_file(&self, file_id: &str) -> Result<bool, ProviderError> {
        self.delete_ack(&format!("/files/{}", file_id)).await
    }

    async fn create_vector_store(&self, name: &str) -> Result<String, ProviderError> {
        let object: ObjectId = self
            .post_json("/vector_stores", &json!({ "name": name }))
            .await?;
        Ok(object.id)
    }

    async fn list_vector_store_files(
        &self,
        vector_store_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut file_ids = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let path = match &after {
                Some(cursor) => format!(
                    "/vector_stores/{}/files?limit={}&after={}",
                    vector_store_id, LIST_PAGE_SIZE, cursor
                ),
                None => format!(
                    "/vector_stores/{}/files?limit={}",
                    vector_store_id, LIST_PAGE_SIZE
                ),
            };
            let page: ListPage<ObjectId> = self.get_json(&path).await?;
            after = page.data.last().map(|o| o.id.clone());
            file_ids.extend(page.data.into_iter().map(|o| o.id));
            if !page.has_more || after.is_none() {
                break;
            }
        }

        Ok(file_ids)
    }

    async fn attach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError> {
        let _: ObjectId = self
            .post_json(
                &format!("/vector_stores/{}/files", vector_store_id),
                &json!({ "file_id": file_id }),
            )
            .await?;
        Ok(())
    }

    async fn detach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError> {
        let path = format!("/vector_stores/{}/files/{}", vector_store_id, file_id);
        self.delete_ack(&path).await.map(|_| ())
    }

    async fn delete_vector_store(&self, vector_store_id: &str) -> Result<bool, ProviderError> {
        self.delete_ack(&format!("/vector_stores/{}", vector_store_id))
            .await
    }

    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        vector_store_id: &str,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "name": name,
            "instructions": instructions,
            "model": model,
            "tools": [
                { "type": "code_interpreter" },
                { "type": "file_search" }
            ],
            "tool_resources": {
                "file_search": { "vector_store_ids": [vector_store_id] }
            }
        });
        let object: ObjectId = self.post_json("/assistants", &body).await?;
        Ok(object.id)
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<bool, ProviderError> {
        self.delete_ack(&format!("/assistants/{}", assistant_id))
            .await
    }

    async fn create_thread(&self) -> Result<String, ProviderError> {
        let object: ObjectId = self.post_json("/threads", &json!({})).await?;
        Ok(object.id)
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<bool, ProviderError> {
        self.delete_ack(&format!("/threads/{}", thread_id)).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<String, ProviderError> {
        let object: ObjectId = self
            .post_json(
                &format!("/threads/{}/messages", thread_id),
                &json!({ "role": role, "content": content }),
            )
            .await?;
        Ok(object.id)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<RemoteMessage>, ProviderError> {
        let page: ListPage<MessageObject> = self
            .get_json(&format!("/threads/{}/messages", thread_id))
            .await?;
        Ok(page.data.into_iter().map(remote_message_from).collect())
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<Run, ProviderError> {
        let run: RunObject = self
            .post_json(
                &format!("/threads/{}/runs", thread_id),
                &json!({ "assistant_id": assistant_id }),
            )
            .await?;
        Ok(Run {
            status: parse_run_status(&run.status),
            id: run.id,
        })
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ProviderError> {
        let run: RunObject = self
            .get_json(&format!("/threads/{}/runs/{}", thread_id, run_id))
            .await?;
        Ok(Run {
            status: parse_run_status(&run.status),
            id: run.id,
        })
    }

    async fn stream_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunEventStream, ProviderError> {
        let path = format!("/threads/{}/runs", thread_id);
        let response = self
            .client
            .post(self.endpoint(&path))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&json!({ "assistant_id": assistant_id, "stream": true }))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(classify_status(
                response.status().as_u16(),
                &path,
                response.text().await.unwrap_or_default(),
            ));
        }

        struct StreamState {
            bytes: futures::stream::BoxStream<'static, reqwest::Result<Vec<u8>>>,
            parser: SseParser,
            buffer: String,
            pending: VecDeque<RunStreamEvent>,
            finished: bool,
        }

        let state = StreamState {
            bytes: response
                .bytes_stream()
                .map(|chunk| chunk.map(|b| b.to_vec()))
                .boxed(),
            parser: SseParser::new(),
            buffer: String::new(),
            pending: VecDeque::new(),
            finished: false,
        };

        let events = stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.pending.pop_front() {
                    return Some((event, state));
                }
                if state.finished {
                    return None;
                }

                match state.bytes.next().await {
                    Some(Ok(chunk)) => {
                        state.buffer.push_str(&String::from_utf8_lossy(&chunk));
                        while let Some(pos) = state.buffer.find('\n') {
                            let line =
                                state.buffer[..pos].trim_end_matches('\r').to_string();
                            state.buffer.drain(..=pos);
                            if let Some(event) = state.parser.push_line(&line) {
                                if !matches!(event, RunStreamEvent::TextDelta(_)) {
                                    state.finished = true;
                                }
                                state.pending.push_back(event);
                            }
                        }
                    }
                    Some(Err(e)) => {
                        state.finished = true;
                        state
                            .pending
                            .push_back(RunStreamEvent::Error(e.to_string()));
                    }
                    None => {
                        // Provider closed the stream without a terminal
                        // frame; treat it as a normal end.
                        state.finished = true;
                        state.pending.push_back(RunStreamEvent::Done);
                    }
                }
            }
        });

        Ok(events.boxed())
    }
}

fn remote_message_from(message: MessageObject) -> RemoteMessage {
    let mut text = String::new();
    let mut annotations = Vec::new();
    for part in message.content {
        if part.kind != "text" {
            continue;
        }
        if let Some(body) = part.text {
            text.push_str(&body.value);
            annotations.extend(body.annotations.into_iter().map(|a| MessageAnnotation {
                source_text: a.text,
            }));
        }
    }
    RemoteMessage {
        id: message.id,
        role: message.role,
        text,
        annotations,
        run_id: message.run_id,
    }
}

fn parse_run_status(status: &str) -> RunStatus {
    match RunStatus::from_str(status) {
        Ok(parsed) => parsed,
        // Tool-approval and truncation states the chat flow never requests;
        // fold them into the nearest lifecycle state.
        Err(_) => match status {
            "requires_action" | "cancelling" => RunStatus::InProgress,
            "incomplete" => RunStatus::Failed,
            _ => RunStatus::Failed,
        },
    }
}

fn classify_status(status: u16, path: &str, body: String) -> ProviderError {
    match status {
        404 => ProviderError::NotFound(path.to_string()),
        429 => ProviderError::RateLimited,
        502 | 503 | 504 => ProviderError::Unavailable,
        _ => ProviderError::ApiError(format!("{} on {}: {}", status, path, body)),
    }
}

/// Line-level SSE decoder for run streams. One `event:`/`data:` pair per
/// frame, with `[DONE]` as the end-of-stream sentinel.
struct SseParser {
    event: Option<String>,
}

impl SseParser {
    fn new() -> Self {
        Self { event: None }
    }

    fn push_line(&mut self, line: &str) -> Option<RunStreamEvent> {
        if line.is_empty() {
            self.event = None;
            return None;
        }
        if let Some(name) = line.strip_prefix("event:") {
            self.event = Some(name.trim().to_string());
            return None;
        }
        if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();
            if data == "[DONE]" {
                return Some(RunStreamEvent::Done);
            }
            let event = self.event.as_deref().unwrap_or("").to_string();
            return map_stream_frame(&event, data);
        }
        None
    }
}

fn map_stream_frame(event: &str, data: &str) -> Option<RunStreamEvent> {
    match event {
        "thread.message.delta" => {
            let delta: MessageDeltaEvent = serde_json::from_str(data).ok()?;
            let text: String = delta
                .delta
                .content
                .into_iter()
                .filter_map(|part| part.text.map(|t| t.value))
                .collect();
            if text.is_empty() {
                None
            } else {
                Some(RunStreamEvent::TextDelta(text))
            }
        }
        "thread.run.completed" => Some(RunStreamEvent::Done),
        "thread.run.failed" | "thread.run.cancelled" | "thread.run.expired" => {
            let reason = serde_json::from_str::<RunErrorEvent>(data)
                .ok()
                .and_then(|run| run.last_error.map(|e| e.message))
                .unwrap_or_else(|| event.to_string());
            Some(RunStreamEvent::Error(reason))
        }
        "error" => Some(RunStreamEvent::Error(data.to_string())),
        _ => None,
    }
}
