//! Server state shared by all handlers.

use std::{sync::Arc, time::Duration};

use crate::{
    config::AppConfig,
    domain::{ChatbotPolicy, SessionRepository, WeatherProvider},
    infrastructure::repository::InMemorySessionRepository,
    usecase::{
        CheckUsernameUseCase, JoinRoomUseCase, LeaveRoomUseCase, RouterSettings,
        SendMessageUseCase,
    },
};

/// Connect timeout of the proxy's upstream requests
const PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn SessionRepository>,
    /// External weather collaborator
    pub weather: Arc<dyn WeatherProvider>,
    /// Chatbot reply policy
    pub chatbot: Arc<dyn ChatbotPolicy>,
    /// Command router settings
    pub settings: Arc<RouterSettings>,
    /// HTTP client used by the video proxy
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build the state with an in-memory registry and the configured chatbot.
    pub fn new(
        config: &AppConfig,
        weather: Arc<dyn WeatherProvider>,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(PROXY_CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            repository: Arc::new(InMemorySessionRepository::new()),
            weather,
            chatbot: Arc::new(config.chatbot()),
            settings: Arc::new(RouterSettings::from(config)),
            http_client,
        })
    }

    pub fn join_room(&self) -> JoinRoomUseCase {
        JoinRoomUseCase::new(self.repository.clone())
    }

    pub fn leave_room(&self) -> LeaveRoomUseCase {
        LeaveRoomUseCase::new(self.repository.clone())
    }

    pub fn check_username(&self) -> CheckUsernameUseCase {
        CheckUsernameUseCase::new(self.repository.clone())
    }

    pub fn send_message(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.repository.clone(),
            self.weather.clone(),
            self.chatbot.clone(),
            self.settings.clone(),
        )
    }
}
