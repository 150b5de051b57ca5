//! Arena and agent configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for one LLM-backed agent (a player or the judge).
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name, shown in prompts and events.
    name: String,

    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    llm_temperature: f32,
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.1
}

impl AgentConfig {
    /// Creates an agent configuration with default LLM settings.
    #[instrument(skip(name), fields(agent_name = %name))]
    pub fn new(name: String) -> Self {
        Self {
            name,
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            llm_temperature: default_temperature(),
        }
    }

    /// Creates LLM configuration from this agent config.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
            self.llm_temperature,
        ))
    }
}

/// Configuration for a whole arena: both players, the judge, and the
/// betting and retry limits.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Agent playing X.
    #[serde(default = "default_player_x")]
    player_x: AgentConfig,

    /// Agent playing O.
    #[serde(default = "default_player_o")]
    player_o: AgentConfig,

    /// Agent judging the final board.
    #[serde(default = "default_judge")]
    judge: AgentConfig,

    /// Wallet balance at the start of a session.
    #[serde(default = "default_starting_balance")]
    starting_balance: f64,

    /// Smallest accepted stake.
    #[serde(default = "default_min_bet")]
    min_bet: f64,

    /// Attempts a player gets per turn before the game is abandoned.
    #[serde(default = "default_max_attempts_per_turn")]
    max_attempts_per_turn: usize,
}

fn default_player_x() -> AgentConfig {
    AgentConfig::new("Player X".to_string())
}

fn default_player_o() -> AgentConfig {
    AgentConfig::new("Player O".to_string())
}

fn default_judge() -> AgentConfig {
    AgentConfig::new("Judge".to_string())
}

fn default_starting_balance() -> f64 {
    100.0
}

fn default_min_bet() -> f64 {
    2.0
}

fn default_max_attempts_per_turn() -> usize {
    5
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            player_x = %config.player_x.name,
            player_o = %config.player_o.name,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_attempts_per_turn == 0 {
            return Err(ConfigError::new(
                "max_attempts_per_turn must be at least 1".to_string(),
            ));
        }
        if !(self.min_bet > 0.0 && self.min_bet <= self.starting_balance) {
            return Err(ConfigError::new(format!(
                "min_bet must be positive and no larger than starting_balance ({})",
                self.starting_balance
            )));
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_x: default_player_x(),
            player_o: default_player_o(),
            judge: default_judge(),
            starting_balance: default_starting_balance(),
            min_bet: default_min_bet(),
            max_attempts_per_turn: default_max_attempts_per_turn(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ArenaConfig::from_toml("").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.player_x().llm_model(), "gpt-4o");
        assert_eq!(*config.max_attempts_per_turn(), 5);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = ArenaConfig::from_toml("max_attempts_per_turn = 0").unwrap_err();
        assert!(err.message.contains("max_attempts_per_turn"));
    }

    #[test]
    fn test_min_bet_above_balance_rejected() {
        assert!(ArenaConfig::from_toml("starting_balance = 10.0\nmin_bet = 20.0").is_err());
    }
}
