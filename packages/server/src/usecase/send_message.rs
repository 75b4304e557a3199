//! UseCase: メッセージ送信処理（コマンドルーター）
//!
//! 受信したテキストをコマンド表で分類し、ちょうど一つの処理に振り分ける。
//! 分類は常に加工前のテキストに対して行い、メンション強調は
//! そのまま表示されるテキスト（通常メッセージ本文とチャットボットへの質問）にだけ適用する。
//!
//! 天気の問い合わせとチャットボットの待ち時間はロックを持たずに await するため、
//! 他の接続の処理を止めない。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 各コマンドの配信先（ルーム全体 / 送信者のみ）と内容
//!
//! ### どのような状況を想定しているか
//! - 正常系：通常メッセージ、天気、映画、チャットボット、キーワード
//! - 異常系：引数なし、都市が見つからない、上流エラー、未参加の接続
//! - エッジケース：天気の問い合わせ中に別の接続が送信する

use std::{sync::Arc, time::Duration};

use crate::{
    config::AppConfig,
    domain::{
        ChatbotPolicy, Command, CommandTable, ConnectionId, DisplayName, MessageContent,
        RoomEvent, SessionRepository, Timestamp, ValueObjectError, WeatherError, WeatherProvider,
        command::{normalize_url, resolve_url},
        mention::highlight_mentions,
    },
};

use super::error::SendMessageError;

/// ルーターの設定値
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub table: CommandTable,
    pub weather_prefix: String,
    pub movie_prefix: String,
    /// システムメッセージの送信者名
    pub system_name: String,
    pub resolver_template: String,
    pub proxy_type: String,
    pub chatbot_name: String,
    pub thinking_delay: Duration,
    /// `None` ならメンション強調を行わない
    pub mention_template: Option<String>,
}

impl From<&AppConfig> for RouterSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            table: config.command_table(),
            weather_prefix: config.weather.prefix.clone(),
            movie_prefix: config.movie.prefix.clone(),
            system_name: config.system_name.clone(),
            resolver_template: config.movie.resolver_template.clone(),
            proxy_type: config.movie.proxy_type.clone(),
            chatbot_name: config.chatbot.name.clone(),
            thinking_delay: Duration::from_millis(config.chatbot.thinking_delay_ms),
            mention_template: config
                .mention
                .enabled
                .then(|| config.mention.template.clone()),
        }
    }
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    weather: Arc<dyn WeatherProvider>,
    chatbot: Arc<dyn ChatbotPolicy>,
    settings: Arc<RouterSettings>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        weather: Arc<dyn WeatherProvider>,
        chatbot: Arc<dyn ChatbotPolicy>,
        settings: Arc<RouterSettings>,
    ) -> Self {
        Self {
            repository,
            weather,
            chatbot,
            settings,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 送信者名はクライアントの申告ではなく、接続が参加した名前を使う。
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - 分類結果（処理済み）
    /// * `Err(SendMessageError)` - 未参加の接続、または不正な本文（何も配信しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_text: String,
    ) -> Result<Command, SendMessageError> {
        let sender = self
            .repository
            .display_name_of(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?;
        let content = match MessageContent::try_from(raw_text) {
            Ok(content) => content,
            Err(e) => {
                // 長すぎる本文は送信者にだけ知らせる（空白のみは黙って捨てる）
                if let ValueObjectError::MessageContentTooLong { max, .. } = &e {
                    self.repository
                        .unicast(
                            connection_id,
                            RoomEvent::text(
                                &self.settings.system_name,
                                format!("消息过长，最多 {max} 个字符"),
                            ),
                        )
                        .await;
                }
                return Err(e.into());
            }
        };

        let command = self.settings.table.classify(content.as_str());
        tracing::debug!("'{}' sent a {} message", sender, command.name());

        match &command {
            Command::Plain => self.dispatch_plain(&sender, content.as_str()).await,
            Command::Weather { city } => self.dispatch_weather(city).await,
            Command::Movie { url } => self.dispatch_movie(connection_id, &sender, url).await,
            Command::Chatbot { query } => self.dispatch_chatbot(&sender, query).await,
            Command::Keyword { reply } => {
                self.broadcast_system(reply.clone()).await;
            }
        }

        Ok(command)
    }

    async fn dispatch_plain(&self, sender: &DisplayName, text: &str) {
        let message = self.render(text).await;
        self.repository
            .broadcast(RoomEvent::text(sender.as_str(), message))
            .await;
    }

    async fn dispatch_weather(&self, city: &str) {
        if city.is_empty() {
            self.broadcast_system(format!(
                "请输入要查询的城市，例如：{} 北京",
                self.settings.weather_prefix
            ))
            .await;
            return;
        }

        // ロックを持たずに外部呼び出しを待つ
        match self.weather.lookup(city).await {
            Ok(report) => {
                tracing::info!("Weather lookup for '{}' succeeded", city);
                self.repository
                    .broadcast(RoomEvent::NewMessage {
                        username: self.settings.system_name.clone(),
                        message: report.summary(),
                        time: Timestamp::now(),
                        weather: Some(report),
                    })
                    .await;
            }
            Err(WeatherError::CityNotFound(_)) => {
                tracing::info!("Weather lookup found no city '{}'", city);
                self.broadcast_system(format!("未找到城市「{city}」的天气信息"))
                    .await;
            }
            Err(WeatherError::Upstream(reason)) => {
                tracing::warn!("Weather lookup for '{}' failed: {}", city, reason);
                self.broadcast_system(format!("天气查询失败：{reason}")).await;
            }
        }
    }

    async fn dispatch_movie(&self, connection_id: &ConnectionId, sender: &DisplayName, url: &str) {
        if url.is_empty() {
            self.repository
                .unicast(
                    connection_id,
                    RoomEvent::text(
                        &self.settings.system_name,
                        format!("请在 {} 后输入视频链接", self.settings.movie_prefix),
                    ),
                )
                .await;
            return;
        }

        let original_url = normalize_url(url);
        let parsed_url = resolve_url(&self.settings.resolver_template, &original_url);
        self.repository
            .broadcast(RoomEvent::MovieRequest {
                username: sender.as_str().to_string(),
                original_url,
                parsed_url,
                has_proxy: !self.settings.resolver_template.is_empty(),
                proxy_type: self.settings.proxy_type.clone(),
            })
            .await;
    }

    async fn dispatch_chatbot(&self, sender: &DisplayName, query: &str) {
        let echo = self.render(query).await;
        self.repository
            .broadcast(RoomEvent::AiRequest {
                username: sender.as_str().to_string(),
                query: echo,
            })
            .await;

        if !self.settings.thinking_delay.is_zero() {
            tokio::time::sleep(self.settings.thinking_delay).await;
        }

        let reply = self.chatbot.reply(query);
        self.repository
            .broadcast(RoomEvent::AiResponse {
                username: self.settings.chatbot_name.clone(),
                message: reply,
                time: Timestamp::now(),
            })
            .await;
    }

    async fn broadcast_system(&self, message: String) {
        self.repository
            .broadcast(RoomEvent::text(&self.settings.system_name, message))
            .await;
    }

    /// 表示用テキストにメンション強調を適用する
    async fn render(&self, text: &str) -> String {
        match &self.settings.mention_template {
            Some(template) => {
                let members = self.repository.member_names().await;
                highlight_mentions(text, &members, template)
            }
            None => text.to_string(),
        }
    }
}
