//! Per-connection game sessions.

use nim_core::{
    GameAction, GameError, GameEvent, GameSession, MatchRules, RulesError, ScriptedTicket,
    SessionSnapshot,
};
use thiserror::Error;
use uuid::Uuid;

use crate::protocol::ServerMessage;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid rules: {0}")]
    Rules(#[from] RulesError),

    #[error("Rejected: {0}")]
    Rejected(#[from] GameError),
}

/// A game session owned by one connection.
pub struct HostedSession {
    pub id: Uuid,
    game: GameSession,
}

impl HostedSession {
    pub fn new(id: Uuid, rules: MatchRules) -> Result<Self, SessionError> {
        Ok(Self {
            id,
            game: GameSession::new(rules)?,
        })
    }

    #[cfg(test)]
    pub fn with_seed(id: Uuid, rules: MatchRules, seed: u64) -> Result<Self, SessionError> {
        Ok(Self {
            id,
            game: GameSession::with_seed(rules, seed)?,
        })
    }

    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, SessionError> {
        Ok(self.game.apply_action(action)?)
    }

    /// Play the computer's reply for a ticket handed out earlier
    pub fn resolve(&mut self, ticket: ScriptedTicket) -> Result<Vec<GameEvent>, SessionError> {
        Ok(self.game.resolve_scripted_turn(ticket)?)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.game.snapshot()
    }

    #[cfg(test)]
    pub fn is_processing(&self) -> bool {
        self.game.is_processing()
    }

    #[cfg(test)]
    pub fn pending_ticket(&self) -> Option<ScriptedTicket> {
        self.game.pending_ticket()
    }
}

/// The computer reply an event batch asks for, with its delay
pub fn scheduled_reply(events: &[GameEvent]) -> Option<(ScriptedTicket, u64)> {
    events.iter().find_map(|e| match e {
        GameEvent::ScriptedTurnScheduled { ticket, delay_ms } => Some((*ticket, *delay_ms)),
        _ => None,
    })
}

/// Sound and game-over notifications for an event batch
pub fn notifications(events: &[GameEvent]) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    for event in events {
        if let Some(effect) = event.sound_cue() {
            messages.push(ServerMessage::Sound { effect });
        }
        if let GameEvent::MatchFinished { winner, .. } = event {
            messages.push(ServerMessage::GameOver { winner: *winner });
        }
    }
    messages
}
