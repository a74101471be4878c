use serde::{Deserialize, Serialize};

use crate::{GameId, Participant};

pub const START_COMMAND: &str = "start-tictactoe";
pub const STATS_COMMAND: &str = "stats";

const CELL_ID_PREFIX: &str = "ttt";

/// Events forwarded by the gateway relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    Command {
        name: String,
        user: Participant,
        #[serde(default)]
        opponent: Option<Participant>,
    },
    Component {
        custom_id: String,
        user: Participant,
    },
}

impl Interaction {
    pub fn user(&self) -> &Participant {
        match self {
            Interaction::Command { user, .. } => user,
            Interaction::Component { user, .. } => user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionResponse {
    /// Post a new message. Ephemeral messages are shown to the invoking user only.
    Message {
        content: String,
        #[serde(default)]
        components: Vec<ActionRow>,
        #[serde(default)]
        ephemeral: bool,
    },
    /// Edit the message that carried the clicked component.
    UpdateMessage {
        content: String,
        components: Vec<ActionRow>,
    },
}

impl InteractionResponse {
    pub fn ephemeral(content: impl Into<String>) -> Self {
        InteractionResponse::Message {
            content: content.into(),
            components: Vec::new(),
            ephemeral: true,
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        InteractionResponse::Message {
            content: content.into(),
            components: Vec::new(),
            ephemeral: false,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            InteractionResponse::Message { content, .. } => content,
            InteractionResponse::UpdateMessage { content, .. } => content,
        }
    }

    pub fn components(&self) -> &[ActionRow] {
        match self {
            InteractionResponse::Message { components, .. } => components,
            InteractionResponse::UpdateMessage { components, .. } => components,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, InteractionResponse::Message { ephemeral: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// Slash command registration payload, in the platform's application command shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
}

pub fn cell_custom_id(game_id: GameId, cell: usize) -> String {
    format!("{}:{}:{}", CELL_ID_PREFIX, game_id, cell)
}

/// Splits a cell button id back into its game and cell index.
pub fn parse_cell_custom_id(custom_id: &str) -> Option<(GameId, usize)> {
    let mut parts = custom_id.splitn(3, ':');
    if parts.next()? != CELL_ID_PREFIX {
        return None;
    }
    let game_id = GameId::parse_str(parts.next()?).ok()?;
    let cell = parts.next()?.parse().ok()?;
    Some((game_id, cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_custom_id_parses_back() {
        let game_id = GameId::new_v4();
        let id = cell_custom_id(game_id, 7);
        assert_eq!(parse_cell_custom_id(&id), Some((game_id, 7)));
    }

    #[test]
    fn test_foreign_custom_ids_are_ignored() {
        assert_eq!(parse_cell_custom_id("poll:abc:1"), None);
        assert_eq!(parse_cell_custom_id("ttt:not-a-uuid:1"), None);
        assert_eq!(
            parse_cell_custom_id(&format!("ttt:{}:x", GameId::new_v4())),
            None
        );
    }

    #[test]
    fn test_interaction_wire_format() {
        let json = r#"{
            "type": "command",
            "name": "start-tictactoe",
            "user": {"id": "1", "display_name": "Alice"},
            "opponent": {"id": "2", "display_name": "Bob", "bot": false}
        }"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        match interaction {
            Interaction::Command { name, user, opponent } => {
                assert_eq!(name, START_COMMAND);
                assert!(!user.bot);
                assert_eq!(opponent.unwrap().id, "2");
            }
            other => panic!("Expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_ephemeral_response_serialization() {
        let value = serde_json::to_value(InteractionResponse::ephemeral("nope")).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["ephemeral"], true);
        assert_eq!(value["content"], "nope");
    }
}
