pub mod persona;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cli::Args;
use persona::{load_persona, DEFAULT_PERSONA};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// How `/api/chat` produces replies. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Upstream,
    Canned,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseChatModeError {
    message: String,
}

impl fmt::Display for ParseChatModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ParseChatModeError {}

impl FromStr for ChatMode {
    type Err = ParseChatModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upstream" | "openai" | "llm" => Ok(ChatMode::Upstream),
            "canned" | "fallback" | "offline" => Ok(ChatMode::Canned),
            _ => Err(ParseChatModeError {
                message: format!("Invalid chat mode: '{}'", s),
            }),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Upstream => write!(f, "upstream"),
            ChatMode::Canned => write!(f, "canned"),
        }
    }
}

/// Everything the reply strategies need, resolved once from the command line
/// and environment and then handed to the factory. Handlers never read the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub mode: ChatMode,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub persona: Arc<str>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::Upstream,
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            persona: Arc::from(DEFAULT_PERSONA.trim()),
        }
    }
}

impl ChatConfig {
    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mode: ChatMode = args.chat_mode.parse()?;
        let api_key = if !args.chat_api_key.trim().is_empty() {
            Some(args.chat_api_key.trim().to_string())
        } else {
            None
        };
        let base_url = args
            .chat_base_url
            .as_ref()
            .filter(|u| !u.trim().is_empty())
            .cloned();

        Ok(Self {
            mode,
            api_key,
            base_url,
            model: args.chat_model.clone(),
            temperature: args.chat_temperature,
            max_tokens: args.chat_max_tokens,
            persona: load_persona(args.persona_path.as_deref())?,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_modes() {
        assert_eq!("Upstream".parse::<ChatMode>(), Ok(ChatMode::Upstream));
        assert_eq!("canned".parse::<ChatMode>(), Ok(ChatMode::Canned));
        assert!("bogus".parse::<ChatMode>().is_err());
    }

    #[test]
    fn empty_key_means_no_credential() {
        let args = Args::parse_from(["portfolio-chat", "--chat-api-key", "   "]);
        let config = ChatConfig::from_args(&args).unwrap();
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn explicit_key_and_mode() {
        let args = Args::parse_from([
            "portfolio-chat",
            "--chat-api-key",
            "sk-test",
            "--chat-mode",
            "canned",
        ]);
        let config = ChatConfig::from_args(&args).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.mode, ChatMode::Canned);
    }
}
