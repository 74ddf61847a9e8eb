//! Game actions that players can take.
//!
//! This module defines every input the rendering layer can submit and the
//! events that result from those inputs.

use crate::game::{MatchPhase, ScriptedTicket, Side};
use crate::rules::{Difficulty, GameMode, Language};
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Setup ====================
    /// Pick the display language (first screen only)
    ChooseLanguage(Language),
    /// Play against the computer or a second local player
    ChooseMode(GameMode),
    /// Scripted opponent strength (vs computer only)
    ChooseDifficulty(Difficulty),
    /// Dismiss the rules screen
    AcknowledgeInstructions,
    /// Decide who opens the match (vs computer only)
    ChooseFirstTurn(Side),

    // ==================== Play ====================
    /// Advance the running total by this many steps
    Move(u32),

    // ==================== Game Over ====================
    /// Start a fresh match with new goal and step limit
    PlayAgain,
}

/// Sound cue the rendering layer may play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    Move,
    Win,
    Lose,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LanguageChosen {
        language: Language,
    },

    ModeChosen {
        mode: GameMode,
    },

    DifficultyChosen {
        difficulty: Difficulty,
    },

    /// The setup flow moved on
    PhaseChanged {
        from: MatchPhase,
        to: MatchPhase,
    },

    /// A side is now on move
    TurnStarted {
        side: Side,
    },

    /// A move was added to the running total
    MoveApplied {
        side: Side,
        amount: u32,
        position: u32,
    },

    /// The scripted opponent will reply once `delay_ms` has passed
    ScriptedTurnScheduled {
        ticket: ScriptedTicket,
        delay_ms: u64,
    },

    /// The match ended
    MatchFinished {
        winner: Side,
        position: u32,
        /// True when the loser passed the goal instead of the winner hitting it
        overshoot: bool,
    },

    /// A fresh match was drawn
    MatchReset {
        goal: u32,
        max_step: u32,
    },
}

impl GameEvent {
    /// Sound the rendering layer should play for this event, if any
    pub fn sound_cue(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::MoveApplied { .. } => Some(SoundEffect::Move),
            GameEvent::MatchFinished { winner, .. } => {
                if *winner == Side::Scripted {
                    Some(SoundEffect::Lose)
                } else {
                    Some(SoundEffect::Win)
                }
            }
            _ => None,
        }
    }
}
