//! Scripted chatbot.
//!
//! There is no language model behind the bot. Replies come from a table of
//! special phrases and a pool of fallbacks; a real integration can replace the
//! policy without touching the router.

use std::collections::HashMap;

use rand::seq::IndexedRandom;

/// Reply used when the fallback pool is empty
pub const DEFAULT_REPLY: &str = "我在听，请继续说。";

/// Chooses the chatbot's reply to a query
pub trait ChatbotPolicy: Send + Sync {
    fn reply(&self, query: &str) -> String;
}

/// Special-phrase table plus a uniformly random fallback
#[derive(Debug, Clone)]
pub struct ScriptedChatbot {
    special_replies: HashMap<String, String>,
    fallback_replies: Vec<String>,
}

impl ScriptedChatbot {
    pub fn new(special_replies: HashMap<String, String>, fallback_replies: Vec<String>) -> Self {
        Self {
            special_replies,
            fallback_replies,
        }
    }
}

impl ChatbotPolicy for ScriptedChatbot {
    fn reply(&self, query: &str) -> String {
        if let Some(reply) = self.special_replies.get(query.trim()) {
            return reply.clone();
        }
        self.fallback_replies
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string())
    }
}
