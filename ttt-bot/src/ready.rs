use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use ttt_types::{CommandDefinition, CommandOption, START_COMMAND, STATS_COMMAND};

const CHAT_INPUT_COMMAND: u8 = 1;
const USER_OPTION: u8 = 6;

/// The two slash commands the bot answers to.
pub fn command_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition {
            name: START_COMMAND.to_string(),
            description: "Start a game of Tic-Tac-Toe".to_string(),
            kind: CHAT_INPUT_COMMAND,
            options: vec![CommandOption {
                name: "opponent".to_string(),
                description: "Choose an opponent".to_string(),
                kind: USER_OPTION,
                required: true,
            }],
        },
        CommandDefinition {
            name: STATS_COMMAND.to_string(),
            description: "Show your Tic-Tac-Toe statistics".to_string(),
            kind: CHAT_INPUT_COMMAND,
            options: Vec::new(),
        },
    ]
}

#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replaces the registered commands, returning how many the platform accepted.
    async fn register_commands(
        &self,
        commands: &[CommandDefinition],
    ) -> Result<usize, RegistrationError>;
}

/// Registers commands through the platform's bulk-overwrite endpoint.
pub struct HttpCommandRegistrar {
    client: Client,
    api_base: String,
    application_id: String,
    bot_token: String,
}

impl HttpCommandRegistrar {
    pub fn new(api_base: String, application_id: String, bot_token: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            application_id,
            bot_token,
        }
    }

    fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/commands",
            self.api_base.trim_end_matches('/'),
            self.application_id
        )
    }
}

#[async_trait]
impl CommandRegistrar for HttpCommandRegistrar {
    async fn register_commands(
        &self,
        commands: &[CommandDefinition],
    ) -> Result<usize, RegistrationError> {
        let response = self
            .client
            .put(self.commands_url())
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(commands)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationError::Rejected(format!("{}: {}", status, body.trim())));
        }

        let synced: Vec<serde_json::Value> = response.json().await?;
        Ok(synced.len())
    }
}

/// Runs once before the bot serves events: announces itself and syncs its
/// commands. A failed sync is logged and the bot keeps running.
pub async fn on_ready(bot_name: &str, registrar: &dyn CommandRegistrar) -> Option<usize> {
    info!("Bot is online as {}", bot_name);

    match registrar.register_commands(&command_definitions()).await {
        Ok(count) => {
            info!("Commands synced: {}", count);
            Some(count)
        }
        Err(e) => {
            error!("Failed to sync commands: {}", e);
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("command registration request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("command registration rejected: {0}")]
    Rejected(String),
}
