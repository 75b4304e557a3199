//! Command classification.
//!
//! A message is a command when its first token (the text before the first
//! space) equals a configured prefix. The rest of the message, trimmed, is the
//! argument. Entries are tried in table order and the first match wins.

/// What a matched prefix does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Weather,
    Movie,
    Chatbot,
    /// Broadcast a fixed reply
    Keyword(String),
}

/// One row of the dispatch table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub prefix: String,
    pub kind: CommandKind,
}

/// Classified message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Plain,
    Weather { city: String },
    Movie { url: String },
    Chatbot { query: String },
    Keyword { reply: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Plain => "plain",
            Command::Weather { .. } => "weather",
            Command::Movie { .. } => "movie",
            Command::Chatbot { .. } => "chatbot",
            Command::Keyword { .. } => "keyword",
        }
    }
}

/// Ordered prefix table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Classify raw message text
    pub fn classify(&self, raw: &str) -> Command {
        let (token, rest) = match raw.split_once(' ') {
            Some((token, rest)) => (token, rest),
            None => (raw, ""),
        };

        let Some(entry) = self.entries.iter().find(|e| e.prefix == token) else {
            return Command::Plain;
        };

        let argument = rest.trim().to_string();
        match &entry.kind {
            CommandKind::Weather => Command::Weather { city: argument },
            CommandKind::Movie => Command::Movie { url: argument },
            CommandKind::Chatbot => Command::Chatbot { query: argument },
            CommandKind::Keyword(reply) => Command::Keyword {
                reply: reply.clone(),
            },
        }
    }
}

/// Prepend `https://` unless the URL already names an http(s) scheme
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Append the percent-encoded URL to the resolver endpoint
///
/// An empty template means no resolver is configured and the URL is returned
/// as is.
pub fn resolve_url(resolver_template: &str, url: &str) -> String {
    if resolver_template.is_empty() {
        return url.to_string();
    }
    format!("{resolver_template}{}", urlencoding::encode(url))
}
