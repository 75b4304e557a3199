//! Server configuration.
//!
//! Configuration comes from an optional JSON file. Every section and field has
//! a default, so a partial file (or none at all) is valid. The weather API key
//! may also be supplied through `CHAGUAN_WEATHER_API_KEY`.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    CommandEntry, CommandKind, CommandTable, ScriptedChatbot, mention::NAME_PLACEHOLDER,
};

/// Environment variable overriding `weather.api_key`
pub const WEATHER_API_KEY_ENV: &str = "CHAGUAN_WEATHER_API_KEY";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Author name of server-generated messages
    pub system_name: String,
    pub weather: WeatherConfig,
    pub movie: MovieConfig,
    pub chatbot: ChatbotConfig,
    pub mention: MentionConfig,
    /// Extra keyword commands, tried after the built-in ones
    pub keywords: Vec<KeywordConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            system_name: "系统".to_string(),
            weather: WeatherConfig::default(),
            movie: MovieConfig::default(),
            chatbot: ChatbotConfig::default(),
            mention: MentionConfig::default(),
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub prefix: String,
    pub endpoint: String,
    pub api_key: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            prefix: "@天气".to_string(),
            endpoint: "https://restapi.amap.com/v3/weather/weatherInfo".to_string(),
            api_key: String::new(),
            connect_timeout_secs: 5,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieConfig {
    pub prefix: String,
    /// Resolver endpoint the percent-encoded URL is appended to; empty disables it
    pub resolver_template: String,
    /// Reported to clients as `proxy_type`
    pub proxy_type: String,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            prefix: "@电影".to_string(),
            resolver_template: "https://jx.xmflv.com/?url=".to_string(),
            proxy_type: "resolver".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Bot name; the command prefix is `@` followed by the name
    pub name: String,
    pub thinking_delay_ms: u64,
    /// Exact phrase → reply
    pub special_replies: BTreeMap<String, String>,
    pub fallback_replies: Vec<String>,
}

impl ChatbotConfig {
    pub fn prefix(&self) -> String {
        format!("@{}", self.name)
    }
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        let special_replies = [
            ("你好", "你好！我是雨姐，很高兴为你服务。请问有什么可以帮助你的？"),
            ("hello", "Hello! 我是雨姐，有什么想聊的吗？"),
            ("谢谢", "不客气！有任何问题随时问我。"),
            ("再见", "再见！祝您有愉快的一天！"),
        ]
        .into_iter()
        .map(|(phrase, reply)| (phrase.to_string(), reply.to_string()))
        .collect();

        let fallback_replies = [
            "这个问题很有意思，让我想想……",
            "感谢你的提问！我觉得值得好好聊聊。",
            "很高兴为你解答！这是一个很好的话题。",
            "关于这个，我可以分享一些自己的看法。",
            "你说得有道理，大家怎么看？",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            name: "雨姐".to_string(),
            thinking_delay_ms: 1000,
            special_replies,
            fallback_replies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionConfig {
    pub enabled: bool,
    /// Replacement for `@<member>`; `{name}` is substituted
    pub template: String,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            template: "<span class=\"mention\">@{name}</span>".to_string(),
        }
    }
}

/// A prefix that broadcasts a fixed system reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub prefix: String,
    pub reply: String,
}

impl AppConfig {
    /// Load configuration from an optional JSON file, apply environment
    /// overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(api_key) = std::env::var(WEATHER_API_KEY_ENV)
            && !api_key.is_empty()
        {
            config.weather.api_key = api_key;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Check invariants the router relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system_name.trim().is_empty() {
            return Err(ConfigError::Invalid("system_name cannot be empty".into()));
        }
        if self.chatbot.name.trim().is_empty() {
            return Err(ConfigError::Invalid("chatbot.name cannot be empty".into()));
        }
        if self.chatbot.fallback_replies.is_empty() {
            return Err(ConfigError::Invalid(
                "chatbot.fallback_replies needs at least one reply".into(),
            ));
        }
        if self
            .chatbot
            .fallback_replies
            .iter()
            .chain(self.chatbot.special_replies.values())
            .any(|reply| reply.trim().is_empty())
        {
            return Err(ConfigError::Invalid("chatbot replies cannot be empty".into()));
        }
        if self.mention.enabled && !self.mention.template.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "mention.template must contain {NAME_PLACEHOLDER}"
            )));
        }

        let table = self.command_table();
        let mut seen = HashSet::new();
        for entry in table.entries() {
            let prefix = entry.prefix.as_str();
            if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "command prefix {prefix:?} must be a single non-empty token"
                )));
            }
            if !seen.insert(prefix) {
                return Err(ConfigError::Invalid(format!(
                    "command prefix {prefix:?} is configured twice"
                )));
            }
        }
        Ok(())
    }

    /// Dispatch table in priority order: weather, movie, chatbot, keywords.
    pub fn command_table(&self) -> CommandTable {
        let mut entries = vec![
            CommandEntry {
                prefix: self.weather.prefix.clone(),
                kind: CommandKind::Weather,
            },
            CommandEntry {
                prefix: self.movie.prefix.clone(),
                kind: CommandKind::Movie,
            },
            CommandEntry {
                prefix: self.chatbot.prefix(),
                kind: CommandKind::Chatbot,
            },
        ];
        entries.extend(self.keywords.iter().map(|k| CommandEntry {
            prefix: k.prefix.clone(),
            kind: CommandKind::Keyword(k.reply.clone()),
        }));
        CommandTable::new(entries)
    }

    /// Default chatbot policy built from the chatbot section.
    pub fn chatbot(&self) -> ScriptedChatbot {
        ScriptedChatbot::new(
            self.chatbot.special_replies.clone().into_iter().collect(),
            self.chatbot.fallback_replies.clone(),
        )
    }
}
