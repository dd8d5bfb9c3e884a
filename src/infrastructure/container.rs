use std::sync::Arc;

use crate::{
    application::{
        ports::AssistantProvider,
        use_cases::{
            CreateAssistantUseCase, CreateThreadUseCase, CreateVectorStoreUseCase,
            DeleteAssistantUseCase, DeleteFileUseCase, DeleteThreadUseCase,
            DeleteVectorStoreUseCase, GetThreadMessagesUseCase, ListUserResourcesUseCase,
            RegisterUserUseCase, SendMessageUseCase, UploadFileUseCase,
            create_assistant::DEFAULT_INSTRUCTIONS, send_message::RunPollConfig,
        },
    },
    domain::repositories::{
        AssistantRepository, FileRepository, MessageRepository, ThreadRepository, UserRepository,
        VectorStoreRepository,
    },
    infrastructure::{
        database::{
            create_connection_pool, get_database_connection,
            repositories::{
                PostgresAssistantRepository, PostgresFileRepository, PostgresMessageRepository,
                PostgresThreadRepository, PostgresUserRepository, PostgresVectorStoreRepository,
            },
            run_migrations,
        },
        external_services::OpenAiAssistantClient,
    },
    presentation::http::handlers::{
        AssistantHandler, ChatHandler, FileHandler, ThreadHandler, UserHandler,
        VectorStoreHandler,
    },
};

pub struct AppContainer {
    // Repositories
    pub user_repository: Arc<dyn UserRepository>,
    pub file_repository: Arc<dyn FileRepository>,
    pub vector_store_repository: Arc<dyn VectorStoreRepository>,
    pub assistant_repository: Arc<dyn AssistantRepository>,
    pub thread_repository: Arc<dyn ThreadRepository>,
    pub message_repository: Arc<dyn MessageRepository>,

    // Remote provider
    pub provider: Arc<dyn AssistantProvider>,

    // Use cases
    pub register_user_use_case: Arc<RegisterUserUseCase>,
    pub upload_file_use_case: Arc<UploadFileUseCase>,
    pub create_vector_store_use_case: Arc<CreateVectorStoreUseCase>,
    pub create_assistant_use_case: Arc<CreateAssistantUseCase>,
    pub create_thread_use_case: Arc<CreateThreadUseCase>,
    pub delete_file_use_case: Arc<DeleteFileUseCase>,
    pub delete_vector_store_use_case: Arc<DeleteVectorStoreUseCase>,
    pub delete_assistant_use_case: Arc<DeleteAssistantUseCase>,
    pub delete_thread_use_case: Arc<DeleteThreadUseCase>,
    pub send_message_use_case: Arc<SendMessageUseCase>,
    pub get_thread_messages_use_case: Arc<GetThreadMessagesUseCase>,
    pub list_user_resources_use_case: Arc<ListUserResourcesUseCase>,

    // HTTP handlers
    pub user_handler: Arc<UserHandler>,
    pub file_handler: Arc<FileHandler>,
    pub vector_store_handler: Arc<VectorStoreHandler>,
    pub assistant_handler: Arc<AssistantHandler>,
    pub thread_handler: Arc<ThreadHandler>,
    pub chat_handler: Arc<ChatHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        let mut conn = get_database_connection()
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(db_pool.clone()));
        let file_repository: Arc<dyn FileRepository> =
            Arc::new(PostgresFileRepository::new(db_pool.clone()));
        let vector_store_repository: Arc<dyn VectorStoreRepository> =
            Arc::new(PostgresVectorStoreRepository::new(db_pool.clone()));
        let assistant_repository: Arc<dyn AssistantRepository> =
            Arc::new(PostgresAssistantRepository::new(db_pool.clone()));
        let thread_repository: Arc<dyn ThreadRepository> =
            Arc::new(PostgresThreadRepository::new(db_pool.clone()));
        let message_repository: Arc<dyn MessageRepository> =
            Arc::new(PostgresMessageRepository::new(db_pool));

        let provider: Arc<dyn AssistantProvider> = Arc::new(OpenAiAssistantClient::from_env()?);

        let model = std::env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let instructions = std::env::var("ASSISTANT_INSTRUCTIONS")
            .unwrap_or_else(|_| DEFAULT_INSTRUCTIONS.to_string());

        let register_user_use_case =
            Arc::new(RegisterUserUseCase::new(user_repository.clone()));
        let upload_file_use_case = Arc::new(UploadFileUseCase::new(
            provider.clone(),
            file_repository.clone(),
        ));
        let create_vector_store_use_case = Arc::new(CreateVectorStoreUseCase::new(
            provider.clone(),
            file_repository.clone(),
            vector_store_repository.clone(),
        ));
        let create_assistant_use_case = Arc::new(CreateAssistantUseCase::new(
            provider.clone(),
            assistant_repository.clone(),
            vector_store_repository.clone(),
            instructions,
            model,
        ));
        let create_thread_use_case = Arc::new(CreateThreadUseCase::new(
            provider.clone(),
            thread_repository.clone(),
            vector_store_repository.clone(),
        ));

        let delete_thread_use_case = Arc::new(DeleteThreadUseCase::new(
            provider.clone(),
            thread_repository.clone(),
            message_repository.clone(),
        ));
        let delete_assistant_use_case = Arc::new(DeleteAssistantUseCase::new(
            provider.clone(),
            assistant_repository.clone(),
            thread_repository.clone(),
            delete_thread_use_case.clone(),
        ));
        let delete_vector_store_use_case = Arc::new(DeleteVectorStoreUseCase::new(
            provider.clone(),
            vector_store_repository.clone(),
            assistant_repository.clone(),
            thread_repository.clone(),
            delete_assistant_use_case.clone(),
            delete_thread_use_case.clone(),
        ));
        let delete_file_use_case = Arc::new(DeleteFileUseCase::new(
            provider.clone(),
            file_repository.clone(),
            vector_store_repository.clone(),
            delete_vector_store_use_case.clone(),
        ));

        let send_message_use_case = Arc::new(SendMessageUseCase::new(
            provider.clone(),
            thread_repository.clone(),
            message_repository.clone(),
            RunPollConfig::default(),
        ));
        let get_thread_messages_use_case = Arc::new(GetThreadMessagesUseCase::new(
            thread_repository.clone(),
            message_repository.clone(),
        ));
        let list_user_resources_use_case = Arc::new(ListUserResourcesUseCase::new(
            file_repository.clone(),
            vector_store_repository.clone(),
            assistant_repository.clone(),
            thread_repository.clone(),
        ));

        let user_handler = Arc::new(UserHandler::new(register_user_use_case.clone()));
        let file_handler = Arc::new(FileHandler::new(
            upload_file_use_case.clone(),
            delete_file_use_case.clone(),
            list_user_resources_use_case.clone(),
        ));
        let vector_store_handler = Arc::new(VectorStoreHandler::new(
            create_vector_store_use_case.clone(),
            delete_vector_store_use_case.clone(),
            list_user_resources_use_case.clone(),
        ));
        let assistant_handler = Arc::new(AssistantHandler::new(
            create_assistant_use_case.clone(),
            delete_assistant_use_case.clone(),
            list_user_resources_use_case.clone(),
        ));
        let thread_handler = Arc::new(ThreadHandler::new(
            create_thread_use_case.clone(),
            delete_thread_use_case.clone(),
            get_thread_messages_use_case.clone(),
            list_user_resources_use_case.clone(),
        ));
        let chat_handler = Arc::new(ChatHandler::new(send_message_use_case.clone()));

        Ok(Self {
            user_repository,
            file_repository,
            vector_store_repository,
            assistant_repository,
            thread_repository,
            message_repository,
            provider,
            register_user_use_case,
            upload_file_use_case,
            create_vector_store_use_case,
            create_assistant_use_case,
            create_thread_use_case,
            delete_file_use_case,
            delete_vector_store_use_case,
            delete_assistant_use_case,
            delete_thread_use_case,
            send_message_use_case,
            get_thread_messages_use_case,
            list_user_resources_use_case,
            user_handler,
            file_handler,
            vector_store_handler,
            assistant_handler,
            thread_handler,
            chat_handler,
        })
    }
}
