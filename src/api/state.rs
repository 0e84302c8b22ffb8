use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ChatService;
use crate::infrastructure::AppConfig;

/// Shared handles for the HTTP handlers. Queries take the chat service lock
/// for reading; a reset takes it for writing.
#[derive(Clone)]
pub struct AppState {
    pub chatbot: Arc<RwLock<ChatService>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(chatbot: ChatService, config: AppConfig) -> Self {
        Self {
            chatbot: Arc::new(RwLock::new(chatbot)),
            config: Arc::new(config),
        }
    }
}
