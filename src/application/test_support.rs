//! In-memory fakes for the mirror store and the remote provider, shared by
//! the use case tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use uuid::Uuid;

use crate::application::ports::AssistantProvider;
use crate::application::ports::assistant_provider::{
    MessageAnnotation, ProviderError, RemoteMessage, Run, RunEventStream, RunStatus,
    RunStreamEvent,
};
use crate::domain::entities::{Assistant, File, Message, Thread, User, VectorStore};
use crate::domain::repositories::{
    AssistantRepository, FileRepository, MessageRepository, RepositoryError, ThreadRepository,
    UserRepository, VectorStoreRepository,
};

// ---------------------------------------------------------------------------
// In-memory mirror store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username() == user.username()) {
            return Err(RepositoryError::Conflict(format!(
                "username {} already exists",
                user.username()
            )));
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryFileRepository {
    rows: Mutex<Vec<File>>,
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn save(&self, file: &File) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn find_by_remote_id(&self, remote_id: &str) -> Result<Option<File>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.remote_id() == remote_id)
            .cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<File>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| f.id() != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryVectorStoreRepository {
    rows: Mutex<Vec<VectorStore>>,
}

#[async_trait]
impl VectorStoreRepository for InMemoryVectorStoreRepository {
    async fn save(&self, vector_store: &VectorStore) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(vector_store.clone());
        Ok(())
    }

    async fn find_by_remote_id(
        &self,
        remote_id: &str,
    ) -> Result<Option<VectorStore>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.remote_id() == remote_id)
            .cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<VectorStore>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id() != id);
        Ok(rows.len() < before)
    }

    async fn touch(&self, id: Uuid, updated_at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(store) = rows.iter_mut().find(|s| s.id() == id) else {
            return Err(RepositoryError::NotFound(format!("vector store {}", id)));
        };
        *store = VectorStore::from_parts(
            store.id(),
            store.remote_id().to_string(),
            store.name().to_string(),
            store.user_id(),
            store.created_at(),
            updated_at,
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAssistantRepository {
    rows: Mutex<Vec<Assistant>>,
}

#[async_trait]
impl AssistantRepository for InMemoryAssistantRepository {
    async fn save(&self, assistant: &Assistant) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(assistant.clone());
        Ok(())
    }

    async fn find_by_remote_id(
        &self,
        remote_id: &str,
    ) -> Result<Option<Assistant>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.remote_id() == remote_id)
            .cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<Assistant>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_vector_store(
        &self,
        user_id: Uuid,
        vector_store_id: Uuid,
    ) -> Result<Vec<Assistant>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id() == user_id && a.vector_store_id() == vector_store_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id() != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryThreadRepository {
    rows: Mutex<Vec<Thread>>,
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn save(&self, thread: &Thread) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(thread.clone());
        Ok(())
    }

    async fn find_by_remote_id(&self, remote_id: &str) -> Result<Option<Thread>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.remote_id() == remote_id)
            .cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<Thread>, RepositoryError> {
        let mut threads: Vec<Thread> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id() == user_id)
            .cloned()
            .collect();
        threads.sort_by_key(|t| std::cmp::Reverse(t.updated_at()));
        Ok(threads)
    }

    async fn find_by_vector_store(
        &self,
        vector_store_id: Uuid,
    ) -> Result<Vec<Thread>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.vector_store_id() == Some(vector_store_id))
            .cloned()
            .collect())
    }

    async fn find_by_assistant(
        &self,
        user_id: Uuid,
        assistant_remote_id: &str,
    ) -> Result<Vec<Thread>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id() == user_id && t.assistant_remote_id() == assistant_remote_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id() != id);
        Ok(rows.len() < before)
    }

    async fn touch(&self, id: Uuid, updated_at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(thread) = rows.iter_mut().find(|t| t.id() == id) else {
            return Err(RepositoryError::NotFound(format!("thread {}", id)));
        };
        *thread = Thread::from_parts(
            thread.id(),
            thread.remote_id().to_string(),
            thread.vector_store_id(),
            thread.assistant_remote_id().to_string(),
            thread.title().to_string(),
            thread.user_id(),
            thread.created_at(),
            updated_at,
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    rows: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_thread(&self, thread_id: Uuid) -> Result<Vec<Message>, RepositoryError> {
        let mut messages: Vec<Message> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.thread_id() == thread_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at());
        Ok(messages)
    }

    async fn delete_by_thread(&self, thread_id: Uuid) -> Result<usize, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.thread_id() != thread_id);
        Ok(before - rows.len())
    }
}

/// The whole local mirror as one bundle of in-memory repositories.
#[derive(Default)]
pub struct InMemoryMirror {
    users: Arc<InMemoryUserRepository>,
    files: Arc<InMemoryFileRepository>,
    vector_stores: Arc<InMemoryVectorStoreRepository>,
    assistants: Arc<InMemoryAssistantRepository>,
    threads: Arc<InMemoryThreadRepository>,
    messages: Arc<InMemoryMessageRepository>,
}

impl InMemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn files(&self) -> Arc<dyn FileRepository> {
        self.files.clone()
    }

    pub fn vector_stores(&self) -> Arc<dyn VectorStoreRepository> {
        self.vector_stores.clone()
    }

    pub fn assistants(&self) -> Arc<dyn AssistantRepository> {
        self.assistants.clone()
    }

    pub fn threads(&self) -> Arc<dyn ThreadRepository> {
        self.threads.clone()
    }

    pub fn messages(&self) -> Arc<dyn MessageRepository> {
        self.messages.clone()
    }
}

// ---------------------------------------------------------------------------
// Scriptable fake provider
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum RunMode {
    Complete,
    Fail,
    Stall,
}

struct RemoteState {
    files: BTreeSet<String>,
    uploads: usize,
    vector_stores: BTreeMap<String, BTreeSet<String>>,
    assistants: BTreeMap<String, String>,
    threads: BTreeSet<String>,
    replies: BTreeMap<String, (String, Vec<MessageAnnotation>)>,
    last_run: BTreeMap<String, String>,
    next_id: u64,
    run_mode: RunMode,
    stream_script: Option<Vec<RunStreamEvent>>,
    fail_next_attach: Option<String>,
    fail_attach_for: BTreeMap<String, String>,
    fail_detach_for: BTreeMap<(String, String), String>,
    fail_next_create_thread: Option<String>,
    fail_next_create_message: Option<String>,
    empty_assistant_id: bool,
    refuse_file_delete: BTreeSet<String>,
    refuse_vector_store_delete: BTreeSet<String>,
    refuse_assistant_delete: BTreeSet<String>,
    refuse_thread_delete: BTreeSet<String>,
}

/// A deterministic stand-in for the hosted provider: real state for files,
/// stores, assistants, and threads, plus switches for the failure modes the
/// lifecycle logic must survive.
pub struct FakeProvider {
    state: Mutex<RemoteState>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RemoteState {
                files: BTreeSet::new(),
                uploads: 0,
                vector_stores: BTreeMap::new(),
                assistants: BTreeMap::new(),
                threads: BTreeSet::new(),
                replies: BTreeMap::new(),
                last_run: BTreeMap::new(),
                next_id: 1,
                run_mode: RunMode::Complete,
                stream_script: None,
                fail_next_attach: None,
                fail_attach_for: BTreeMap::new(),
                fail_detach_for: BTreeMap::new(),
                fail_next_create_thread: None,
                fail_next_create_message: None,
                empty_assistant_id: false,
                refuse_file_delete: BTreeSet::new(),
                refuse_vector_store_delete: BTreeSet::new(),
                refuse_assistant_delete: BTreeSet::new(),
                refuse_thread_delete: BTreeSet::new(),
            }),
        }
    }

    fn next_id(state: &mut RemoteState, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, state.next_id);
        state.next_id += 1;
        id
    }

    // Seeding -------------------------------------------------------------

    pub fn register_file(&self, remote_id: &str) {
        self.state.lock().unwrap().files.insert(remote_id.to_string());
    }

    pub fn seed_vector_store(&self, _name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "vs");
        state.vector_stores.insert(id.clone(), BTreeSet::new());
        id
    }

    pub fn seed_assistant(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "asst");
        state.assistants.insert(id.clone(), name.to_string());
        id
    }

    pub fn seed_thread(&self) -> String {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "thread");
        state.threads.insert(id.clone());
        id
    }

    pub fn attach_directly(&self, vector_store_id: &str, file_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(members) = state.vector_stores.get_mut(vector_store_id) {
            members.insert(file_id.to_string());
        }
    }

    pub fn detach_directly(&self, vector_store_id: &str, file_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(members) = state.vector_stores.get_mut(vector_store_id) {
            members.remove(file_id);
        }
    }

    pub fn forget_thread(&self, thread_id: &str) {
        self.state.lock().unwrap().threads.remove(thread_id);
    }

    pub fn script_reply(&self, thread_id: &str, text: &str, annotations: &[MessageAnnotation]) {
        self.state
            .lock()
            .unwrap()
            .replies
            .insert(thread_id.to_string(), (text.to_string(), annotations.to_vec()));
    }

    pub fn script_stream(&self, events: &[RunStreamEvent]) {
        self.state.lock().unwrap().stream_script = Some(events.to_vec());
    }

    // Failure switches -----------------------------------------------------

    pub fn fail_next_attach(&self, reason: &str) {
        self.state.lock().unwrap().fail_next_attach = Some(reason.to_string());
    }

    pub fn fail_attach_for(&self, file_id: &str, reason: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_attach_for
            .insert(file_id.to_string(), reason.to_string());
    }

    pub fn fail_detach_for(&self, vector_store_id: &str, file_id: &str, reason: &str) {
        self.state.lock().unwrap().fail_detach_for.insert(
            (vector_store_id.to_string(), file_id.to_string()),
            reason.to_string(),
        );
    }

    pub fn fail_next_create_thread(&self, reason: &str) {
        self.state.lock().unwrap().fail_next_create_thread = Some(reason.to_string());
    }

    pub fn fail_next_create_message(&self, reason: &str) {
        self.state.lock().unwrap().fail_next_create_message = Some(reason.to_string());
    }

    pub fn return_empty_assistant_id(&self) {
        self.state.lock().unwrap().empty_assistant_id = true;
    }

    pub fn refuse_file_deletion(&self, file_id: &str) {
        self.state
            .lock()
            .unwrap()
            .refuse_file_delete
            .insert(file_id.to_string());
    }

    pub fn refuse_vector_store_deletion(&self, vector_store_id: &str) {
        self.state
            .lock()
            .unwrap()
            .refuse_vector_store_delete
            .insert(vector_store_id.to_string());
    }

    pub fn refuse_assistant_deletion(&self, assistant_id: &str) {
        self.state
            .lock()
            .unwrap()
            .refuse_assistant_delete
            .insert(assistant_id.to_string());
    }

    pub fn refuse_thread_deletion(&self, thread_id: &str) {
        self.state
            .lock()
            .unwrap()
            .refuse_thread_delete
            .insert(thread_id.to_string());
    }

    pub fn fail_runs(&self) {
        self.state.lock().unwrap().run_mode = RunMode::Fail;
    }

    pub fn stall_runs(&self) {
        self.state.lock().unwrap().run_mode = RunMode::Stall;
    }

    // Inspection -----------------------------------------------------------

    pub fn file_exists(&self, file_id: &str) -> bool {
        self.state.lock().unwrap().files.contains(file_id)
    }

    pub fn uploaded_file_count(&self) -> usize {
        self.state.lock().unwrap().uploads
    }

    pub fn vector_store_exists(&self, vector_store_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .vector_stores
            .contains_key(vector_store_id)
    }

    pub fn vector_store_count(&self) -> usize {
        self.state.lock().unwrap().vector_stores.len()
    }

    pub fn vector_store_members(&self, vector_store_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .vector_stores
            .get(vector_store_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn assistant_exists(&self, assistant_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .assistants
            .contains_key(assistant_id)
    }

    pub fn assistant_count(&self) -> usize {
        self.state.lock().unwrap().assistants.len()
    }

    pub fn assistant_name(&self, assistant_id: &str) -> Option<String> {
        self.state.lock().unwrap().assistants.get(assistant_id).cloned()
    }

    pub fn thread_exists(&self, thread_id: &str) -> bool {
        self.state.lock().unwrap().threads.contains(thread_id)
    }

    pub fn thread_count(&self) -> usize {
        self.state.lock().unwrap().threads.len()
    }
}

#[async_trait]
impl AssistantProvider for FakeProvider {
    async fn upload_file(&self, _file_name: &str, _data: Vec<u8>) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "file");
        state.files.insert(id.clone());
        state.uploads += 1;
        Ok(id)
    }

    async fn delete_file(&self, file_id: &str) -> Result<bool, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_file_delete.contains(file_id) {
            return Ok(false);
        }
        if !state.files.remove(file_id) {
            return Err(ProviderError::NotFound(format!("file {}", file_id)));
        }
        Ok(true)
    }

    async fn create_vector_store(&self, _name: &str) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "vs");
        state.vector_stores.insert(id.clone(), BTreeSet::new());
        Ok(id)
    }

    async fn list_vector_store_files(
        &self,
        vector_store_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let state = self.state.lock().unwrap();
        state
            .vector_stores
            .get(vector_store_id)
            .map(|members| members.iter().cloned().collect())
            .ok_or_else(|| ProviderError::NotFound(format!("vector store {}", vector_store_id)))
    }

    async fn attach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.fail_next_attach.take() {
            return Err(ProviderError::ApiError(reason));
        }
        if let Some(reason) = state.fail_attach_for.get(file_id).cloned() {
            return Err(ProviderError::ApiError(reason));
        }
        let members = state
            .vector_stores
            .get_mut(vector_store_id)
            .ok_or_else(|| ProviderError::NotFound(format!("vector store {}", vector_store_id)))?;
        members.insert(file_id.to_string());
        Ok(())
    }

    async fn detach_file(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.lock().unwrap();
        let key = (vector_store_id.to_string(), file_id.to_string());
        if let Some(reason) = state.fail_detach_for.get(&key).cloned() {
            return Err(ProviderError::ApiError(reason));
        }
        let members = state
            .vector_stores
            .get_mut(vector_store_id)
            .ok_or_else(|| ProviderError::NotFound(format!("vector store {}", vector_store_id)))?;
        members.remove(file_id);
        Ok(())
    }

    async fn delete_vector_store(&self, vector_store_id: &str) -> Result<bool, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_vector_store_delete.contains(vector_store_id) {
            return Ok(false);
        }
        if state.vector_stores.remove(vector_store_id).is_none() {
            return Err(ProviderError::NotFound(format!(
                "vector store {}",
                vector_store_id
            )));
        }
        Ok(true)
    }

    async fn create_assistant(
        &self,
        name: &str,
        _instructions: &str,
        _model: &str,
        _vector_store_id: &str,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.empty_assistant_id {
            return Ok(String::new());
        }
        let id = Self::next_id(&mut state, "asst");
        state.assistants.insert(id.clone(), name.to_string());
        Ok(id)
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<bool, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_assistant_delete.contains(assistant_id) {
            return Ok(false);
        }
        if state.assistants.remove(assistant_id).is_none() {
            return Err(ProviderError::NotFound(format!(
                "assistant {}",
                assistant_id
            )));
        }
        Ok(true)
    }

    async fn create_thread(&self) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.fail_next_create_thread.take() {
            return Err(ProviderError::NetworkError(reason));
        }
        let id = Self::next_id(&mut state, "thread");
        state.threads.insert(id.clone());
        Ok(id)
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<bool, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_thread_delete.contains(thread_id) {
            return Ok(false);
        }
        if !state.threads.remove(thread_id) {
            return Err(ProviderError::NotFound(format!("thread {}", thread_id)));
        }
        Ok(true)
    }

    async fn create_message(
        &self,
        thread_id: &str,
        _role: &str,
        _content: &str,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.fail_next_create_message.take() {
            return Err(ProviderError::ApiError(reason));
        }
        if !state.threads.contains(thread_id) {
            return Err(ProviderError::NotFound(format!("thread {}", thread_id)));
        }
        let id = Self::next_id(&mut state, "msg");
        Ok(id)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<RemoteMessage>, ProviderError> {
        let state = self.state.lock().unwrap();
        let Some((text, annotations)) = state.replies.get(thread_id) else {
            return Ok(Vec::new());
        };
        Ok(vec![RemoteMessage {
            id: "msg-reply".to_string(),
            role: "assistant".to_string(),
            text: text.clone(),
            annotations: annotations.clone(),
            run_id: state.last_run.get(thread_id).cloned(),
        }])
    }

    async fn create_run(
        &self,
        thread_id: &str,
        _assistant_id: &str,
    ) -> Result<Run, ProviderError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "run");
        state.last_run.insert(thread_id.to_string(), id.clone());
        Ok(Run {
            id,
            status: RunStatus::Queued,
        })
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<Run, ProviderError> {
        let state = self.state.lock().unwrap();
        let status = match state.run_mode {
            RunMode::Complete => RunStatus::Completed,
            RunMode::Fail => RunStatus::Failed,
            RunMode::Stall => RunStatus::InProgress,
        };
        Ok(Run {
            id: run_id.to_string(),
            status,
        })
    }

    async fn stream_run(
        &self,
        thread_id: &str,
        _assistant_id: &str,
    ) -> Result<RunEventStream, ProviderError> {
        let state = self.state.lock().unwrap();
        let events = match &state.stream_script {
            Some(events) => events.clone(),
            None => match state.replies.get(thread_id) {
                Some((text, _)) => vec![
                    RunStreamEvent::TextDelta(text.clone()),
                    RunStreamEvent::Done,
                ],
                None => vec![RunStreamEvent::Done],
            },
        };
        Ok(futures::stream::iter(events).boxed())
    }
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_file(
    provider: &Arc<FakeProvider>,
    mirror: &InMemoryMirror,
    user_id: Uuid,
    remote_id: &str,
    file_name: &str,
) -> File {
    provider.register_file(remote_id);
    let file = File::new(remote_id.to_string(), file_name.to_string(), user_id);
    mirror.files().save(&file).await.unwrap();
    file
}

pub async fn seed_vector_store(
    provider: &Arc<FakeProvider>,
    mirror: &InMemoryMirror,
    user_id: Uuid,
    name: &str,
) -> String {
    let remote_id = provider.seed_vector_store(name);
    let store = VectorStore::new(remote_id.clone(), name.to_string(), user_id);
    mirror.vector_stores().save(&store).await.unwrap();
    remote_id
}

pub async fn seed_vector_store_with_files(
    provider: &Arc<FakeProvider>,
    mirror: &InMemoryMirror,
    user_id: Uuid,
    name: &str,
    file_ids: &[&str],
) -> String {
    let remote_id = seed_vector_store(provider, mirror, user_id, name).await;
    for file_id in file_ids {
        provider.attach_directly(&remote_id, file_id);
    }
    remote_id
}

pub async fn seed_assistant(
    provider: &Arc<FakeProvider>,
    mirror: &InMemoryMirror,
    user_id: Uuid,
    vector_store_remote_id: &str,
    name: &str,
) -> String {
    let remote_id = provider.seed_assistant(name);
    let store = mirror
        .vector_stores()
        .find_by_remote_id(vector_store_remote_id)
        .await
        .unwrap()
        .expect("vector store must be seeded first");
    let assistant = Assistant::new(
        remote_id.clone(),
        Some(name.to_string()),
        store.id(),
        user_id,
    );
    mirror.assistants().save(&assistant).await.unwrap();
    remote_id
}

pub async fn seed_thread(
    provider: &Arc<FakeProvider>,
    mirror: &InMemoryMirror,
    user_id: Uuid,
    vector_store_id: Option<Uuid>,
    assistant_remote_id: &str,
) -> Thread {
    let remote_id = provider.seed_thread();
    let thread = Thread::new(
        remote_id,
        vector_store_id,
        assistant_remote_id.to_string(),
        "Study session".to_string(),
        user_id,
    );
    mirror.threads().save(&thread).await.unwrap();
    thread
}
