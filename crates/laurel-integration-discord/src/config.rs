//! Discord configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Discord integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token
    pub token: String,
    /// Root of the JSON data directory
    pub data_path: String,
    /// Whether to register slash commands on startup
    pub register_commands: bool,
}

impl DiscordConfig {
    /// Create a new Discord configuration with just a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            data_path: "data".to_string(),
            register_commands: true,
        }
    }

    /// Set the data directory root
    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = data_path.into();
        self
    }

    /// Enable or disable slash-command registration
    pub fn with_register_commands(mut self, register: bool) -> Self {
        self.register_commands = register;
        self
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            data_path: "data".to_string(),
            register_commands: true,
        }
    }
}
