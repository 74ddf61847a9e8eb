//! WebSocket protocol messages for Nim Race.

use nim_core::{
    Difficulty, GameAction, GameEvent, GameMode, Language, SessionSnapshot, Side, SoundEffect,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    ChooseLanguage { language: Language },

    ChooseMode { mode: GameMode },

    ChooseDifficulty { difficulty: Difficulty },

    /// Dismiss the rules screen
    AcknowledgeInstructions,

    ChooseFirstTurn { side: Side },

    /// Play a move for whichever local side is on turn
    Move { amount: u32 },

    PlayAgain,

    /// Request the current snapshot
    GetState,

    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// The game action this message carries, if it carries one
    pub fn into_action(self) -> Option<GameAction> {
        match self {
            ClientMessage::ChooseLanguage { language } => Some(GameAction::ChooseLanguage(language)),
            ClientMessage::ChooseMode { mode } => Some(GameAction::ChooseMode(mode)),
            ClientMessage::ChooseDifficulty { difficulty } => {
                Some(GameAction::ChooseDifficulty(difficulty))
            }
            ClientMessage::AcknowledgeInstructions => Some(GameAction::AcknowledgeInstructions),
            ClientMessage::ChooseFirstTurn { side } => Some(GameAction::ChooseFirstTurn(side)),
            ClientMessage::Move { amount } => Some(GameAction::Move(amount)),
            ClientMessage::PlayAgain => Some(GameAction::PlayAgain),
            ClientMessage::GetState | ClientMessage::Ping => None,
        }
    }
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with the connection's session ID
    Welcome { session_id: Uuid },

    /// Session snapshot, sent after every change
    State { state: SessionSnapshot },

    /// Result of a submitted action
    ActionResult {
        success: bool,
        events: Vec<GameEvent>,
        error: Option<String>,
    },

    /// Sound the client may play
    Sound { effect: SoundEffect },

    /// Match finished
    GameOver { winner: Side },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
