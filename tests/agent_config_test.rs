//! Tests for arena configuration loading.

use std::io::Write;
use tempfile::NamedTempFile;
use tictactoe_arena::{ArenaConfig, LlmProvider};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
starting_balance = 250.0
min_bet = 5.0
max_attempts_per_turn = 3

[player_x]
name = "Claude X"
llm_provider = "anthropic"
llm_model = "claude-3-5-haiku-20241022"
llm_max_tokens = 50

[player_o]
name = "GPT O"

[judge]
name = "Judge"
llm_temperature = 0.0
"#,
    );

    let config = ArenaConfig::from_file(file.path()).expect("Config loads");

    assert_eq!(config.player_x().name(), "Claude X");
    assert_eq!(*config.player_x().llm_provider(), LlmProvider::Anthropic);
    assert_eq!(*config.player_x().llm_max_tokens(), 50);
    assert_eq!(*config.player_o().llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.player_o().llm_model(), "gpt-4o");
    assert_eq!(*config.judge().llm_temperature(), 0.0);
    assert_eq!(*config.starting_balance(), 250.0);
    assert_eq!(*config.min_bet(), 5.0);
    assert_eq!(*config.max_attempts_per_turn(), 3);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = ArenaConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_toml_is_error() {
    let file = write_config("[player_x\nname = ");
    let err = ArenaConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_unknown_provider_rejected() {
    let file = write_config("[player_x]\nname = \"X\"\nllm_provider = \"gemini\"\n");
    assert!(ArenaConfig::from_file(file.path()).is_err());
}
