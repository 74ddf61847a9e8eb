//! Core game state machine.
//!
//! This module contains the `GameSession` struct and all match logic.
//! Every input goes through [`GameSession::apply_action`], which checks it
//! against the current [`MatchPhase`] and either applies it or returns an
//! error with the session left untouched.

use crate::actions::{GameAction, GameEvent};
use crate::bot::Bot;
use crate::rules::{Difficulty, GameMode, Language, MatchRules, RulesError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The person playing against the computer
    Human,
    /// The computer opponent
    Scripted,
    /// First seat in two player mode
    Player1,
    /// Second seat in two player mode
    Player2,
}

impl Side {
    /// The side this one plays against
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Scripted,
            Side::Scripted => Side::Human,
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// Whether this side belongs to the given mode
    pub fn plays_in(self, mode: GameMode) -> bool {
        match mode {
            GameMode::VsComputer => matches!(self, Side::Human | Side::Scripted),
            GameMode::TwoPlayer => matches!(self, Side::Player1 | Side::Player2),
        }
    }
}

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// First load only, the language screen
    SelectingLanguage,

    /// Vs computer or two player
    SelectingMode,

    /// Vs computer only
    SelectingDifficulty,

    /// Rules screen with the drawn goal and step limit
    ShowingInstructions,

    /// Vs computer only, who moves first
    ChoosingFirstTurn,

    /// Moves are accepted
    InPlay,

    /// Match is over
    Finished { winner: Side },
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Move of {amount} is outside 1..={max_step}")]
    MoveOutOfRange { amount: u32, max_step: u32 },

    #[error("Computer is still thinking")]
    ScriptedTurnPending,

    #[error("Scheduled computer move no longer applies")]
    StaleTicket,

    #[error("That side does not play in this mode")]
    InvalidSide,
}

/// Settings fixed for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Total to hit exactly
    pub goal: u32,
    /// Largest single move
    pub max_step: u32,
    pub mode: GameMode,
    /// Only used against the computer
    pub difficulty: Difficulty,
}

/// State that changes during play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Increments on every new match
    pub match_id: u64,
    /// Running total
    pub position: u32,
    /// Side on move, unset until play starts and after it ends
    pub active_side: Option<Side>,
    /// Last amount the computer played
    pub last_scripted_move: Option<u32>,
    pub phase: MatchPhase,
    /// Moves applied this match
    pub turn: u32,
}

impl MatchState {
    pub fn new(match_id: u64) -> Self {
        Self {
            match_id,
            position: 0,
            active_side: None,
            last_scripted_move: None,
            phase: MatchPhase::SelectingLanguage,
            turn: 0,
        }
    }

    /// Winner once the match is over
    pub fn winner(&self) -> Option<Side> {
        if let MatchPhase::Finished { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }
}

/// Handle for a scheduled computer reply.
///
/// Only the ticket matching the session's current match and turn resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptedTicket {
    pub match_id: u64,
    pub turn: u32,
}

/// Read-only view for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub language: Language,
    pub config: MatchConfig,
    pub state: MatchState,
    /// Remaining distance to the goal
    pub remaining: u32,
    /// Position over goal, capped at 1.0
    pub progress: f64,
    /// A computer reply is scheduled
    pub processing: bool,
    pub valid_actions: Vec<GameAction>,
}

/// A running game: the current match plus everything that outlives it
pub struct GameSession {
    pub config: MatchConfig,
    pub state: MatchState,
    language: Language,
    rules: MatchRules,
    pending: Option<ScriptedTicket>,
    rng: StdRng,
    scripted: Bot,
}

impl GameSession {
    /// Create a session seeded from entropy
    pub fn new(rules: MatchRules) -> Result<Self, RulesError> {
        let seed = rand::thread_rng().gen();
        Self::with_seed(rules, seed)
    }

    /// Create a session whose draws and computer moves replay for a seed
    pub fn with_seed(rules: MatchRules, seed: u64) -> Result<Self, RulesError> {
        rules.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let (goal, max_step) = rules.draw(&mut rng);
        let difficulty = Difficulty::default();

        Ok(Self {
            config: MatchConfig {
                goal,
                max_step,
                mode: GameMode::VsComputer,
                difficulty,
            },
            state: MatchState::new(0),
            language: Language::default(),
            rules,
            pending: None,
            scripted: Bot::with_seed(difficulty, seed.wrapping_add(1)),
            rng,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// True while a computer reply is scheduled
    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    /// The scheduled computer reply, if any
    pub fn pending_ticket(&self) -> Option<ScriptedTicket> {
        self.pending
    }

    pub fn remaining(&self) -> u32 {
        self.config.goal.saturating_sub(self.state.position)
    }

    pub fn progress(&self) -> f64 {
        if self.config.goal == 0 {
            return 1.0;
        }
        (f64::from(self.state.position) / f64::from(self.config.goal)).min(1.0)
    }

    /// Copy of everything the renderer needs
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            language: self.language,
            config: self.config.clone(),
            state: self.state.clone(),
            remaining: self.remaining(),
            progress: self.progress(),
            processing: self.is_processing(),
            valid_actions: self.valid_actions(),
        }
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get all actions the input layer may submit right now
    pub fn valid_actions(&self) -> Vec<GameAction> {
        match self.state.phase {
            MatchPhase::SelectingLanguage => Language::ALL
                .into_iter()
                .map(GameAction::ChooseLanguage)
                .collect(),
            MatchPhase::SelectingMode => {
                GameMode::ALL.into_iter().map(GameAction::ChooseMode).collect()
            }
            MatchPhase::SelectingDifficulty => Difficulty::ALL
                .into_iter()
                .map(GameAction::ChooseDifficulty)
                .collect(),
            MatchPhase::ShowingInstructions => vec![GameAction::AcknowledgeInstructions],
            MatchPhase::ChoosingFirstTurn => vec![
                GameAction::ChooseFirstTurn(Side::Human),
                GameAction::ChooseFirstTurn(Side::Scripted),
            ],
            MatchPhase::InPlay => {
                if self.is_processing() || self.state.active_side == Some(Side::Scripted) {
                    Vec::new()
                } else {
                    (1..=self.config.max_step).map(GameAction::Move).collect()
                }
            }
            MatchPhase::Finished { .. } => vec![GameAction::PlayAgain],
        }
    }

    /// Apply an action to the session.
    ///
    /// On error nothing has changed.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let phase = self.state.phase;
        let result = self.dispatch(action.clone());
        if let Err(e) = &result {
            debug!(?action, ?phase, error = %e, "rejected action");
        }
        result
    }

    pub fn submit_language_choice(&mut self, language: Language) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::ChooseLanguage(language))
    }

    pub fn submit_mode_choice(&mut self, mode: GameMode) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::ChooseMode(mode))
    }

    pub fn submit_difficulty_choice(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::ChooseDifficulty(difficulty))
    }

    pub fn acknowledge_instructions(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::AcknowledgeInstructions)
    }

    pub fn submit_first_turn_choice(&mut self, side: Side) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::ChooseFirstTurn(side))
    }

    pub fn submit_move(&mut self, amount: u32) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::Move(amount))
    }

    pub fn request_reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(GameAction::PlayAgain)
    }

    /// Run the scheduled computer reply.
    ///
    /// Tickets from an earlier match or turn are refused with
    /// [`GameError::StaleTicket`].
    pub fn resolve_scripted_turn(
        &mut self,
        ticket: ScriptedTicket,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.pending != Some(ticket) {
            debug!(?ticket, pending = ?self.pending, "dropping stale computer move");
            return Err(GameError::StaleTicket);
        }

        let amount = self
            .scripted
            .choose_action(&self.state, &self.config)
            .ok_or(GameError::NotYourTurn)?;

        self.pending = None;
        debug!(amount, position = self.state.position, "computer moves");
        self.apply_move(Side::Scripted, amount)
    }

    /// Resolve any scheduled computer reply right away
    pub fn settle(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        while let Some(ticket) = self.pending {
            events.extend(self.resolve_scripted_turn(ticket)?);
        }
        Ok(events)
    }

    fn dispatch(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        match action {
            // ==================== Setup ====================
            GameAction::ChooseLanguage(language) => {
                self.require_phase(MatchPhase::SelectingLanguage)?;
                self.language = language;
                events.push(GameEvent::LanguageChosen { language });
                self.set_phase(MatchPhase::SelectingMode, &mut events);
            }

            GameAction::ChooseMode(mode) => {
                self.require_phase(MatchPhase::SelectingMode)?;
                self.config.mode = mode;
                events.push(GameEvent::ModeChosen { mode });

                let next = match mode {
                    GameMode::VsComputer => MatchPhase::SelectingDifficulty,
                    GameMode::TwoPlayer => MatchPhase::ShowingInstructions,
                };
                self.set_phase(next, &mut events);
            }

            GameAction::ChooseDifficulty(difficulty) => {
                self.require_phase(MatchPhase::SelectingDifficulty)?;
                self.config.difficulty = difficulty;
                self.scripted.difficulty = difficulty;
                events.push(GameEvent::DifficultyChosen { difficulty });
                self.set_phase(MatchPhase::ShowingInstructions, &mut events);
            }

            GameAction::AcknowledgeInstructions => {
                self.require_phase(MatchPhase::ShowingInstructions)?;
                match self.config.mode {
                    GameMode::VsComputer => {
                        self.set_phase(MatchPhase::ChoosingFirstTurn, &mut events);
                    }
                    GameMode::TwoPlayer => {
                        self.set_phase(MatchPhase::InPlay, &mut events);
                        self.start_turn(Side::Player1, &mut events);
                    }
                }
            }

            GameAction::ChooseFirstTurn(side) => {
                self.require_phase(MatchPhase::ChoosingFirstTurn)?;
                if !side.plays_in(self.config.mode) {
                    return Err(GameError::InvalidSide);
                }
                self.set_phase(MatchPhase::InPlay, &mut events);
                self.start_turn(side, &mut events);
            }

            // ==================== Play ====================
            GameAction::Move(amount) => {
                self.require_phase(MatchPhase::InPlay)?;
                if self.is_processing() {
                    return Err(GameError::ScriptedTurnPending);
                }
                let side = match self.state.active_side {
                    Some(Side::Scripted) | None => return Err(GameError::NotYourTurn),
                    Some(side) => side,
                };
                events.extend(self.apply_move(side, amount)?);
            }

            // ==================== Game Over ====================
            GameAction::PlayAgain => {
                if !self.state.is_finished() {
                    return Err(GameError::InvalidPhase);
                }
                self.reset_match(&mut events);
            }
        }

        Ok(events)
    }

    /// Add a validated move to the total and settle the outcome
    fn apply_move(&mut self, side: Side, amount: u32) -> Result<Vec<GameEvent>, GameError> {
        if amount == 0 || amount > self.config.max_step {
            return Err(GameError::MoveOutOfRange {
                amount,
                max_step: self.config.max_step,
            });
        }

        let mut events = Vec::new();

        self.state.position += amount;
        self.state.turn += 1;
        if side == Side::Scripted {
            self.state.last_scripted_move = Some(amount);
        }

        events.push(GameEvent::MoveApplied {
            side,
            amount,
            position: self.state.position,
        });

        let goal = self.config.goal;
        if self.state.position == goal {
            self.finish(side, false, &mut events);
        } else if self.state.position > goal {
            self.finish(side.opponent(), true, &mut events);
        } else {
            self.start_turn(side.opponent(), &mut events);
        }

        Ok(events)
    }

    fn start_turn(&mut self, side: Side, events: &mut Vec<GameEvent>) {
        self.state.active_side = Some(side);
        events.push(GameEvent::TurnStarted { side });

        if side == Side::Scripted {
            let ticket = ScriptedTicket {
                match_id: self.state.match_id,
                turn: self.state.turn,
            };
            self.pending = Some(ticket);
            events.push(GameEvent::ScriptedTurnScheduled {
                ticket,
                delay_ms: self.rules.scripted_delay_ms,
            });
        }
    }

    fn finish(&mut self, winner: Side, overshoot: bool, events: &mut Vec<GameEvent>) {
        self.state.active_side = None;
        self.set_phase(MatchPhase::Finished { winner }, events);
        events.push(GameEvent::MatchFinished {
            winner,
            position: self.state.position,
            overshoot,
        });
    }

    /// Draw a fresh match; language, mode and difficulty carry over
    fn reset_match(&mut self, events: &mut Vec<GameEvent>) {
        let (goal, max_step) = self.rules.draw(&mut self.rng);
        let from = self.state.phase;

        self.config.goal = goal;
        self.config.max_step = max_step;
        self.state = MatchState::new(self.state.match_id + 1);
        self.state.phase = MatchPhase::SelectingMode;
        self.pending = None;

        events.push(GameEvent::MatchReset { goal, max_step });
        events.push(GameEvent::PhaseChanged {
            from,
            to: MatchPhase::SelectingMode,
        });
    }

    fn require_phase(&self, phase: MatchPhase) -> Result<(), GameError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidPhase)
        }
    }

    fn set_phase(&mut self, to: MatchPhase, events: &mut Vec<GameEvent>) {
        let from = self.state.phase;
        self.state.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::with_seed(MatchRules::instant(), 42).unwrap()
    }

    /// Session in play against the computer with the human on move
    fn in_play(goal: u32, max_step: u32, position: u32) -> GameSession {
        let mut game = session();
        game.submit_language_choice(Language::English).unwrap();
        game.submit_mode_choice(GameMode::VsComputer).unwrap();
        game.submit_difficulty_choice(Difficulty::Hard).unwrap();
        game.acknowledge_instructions().unwrap();
        game.submit_first_turn_choice(Side::Human).unwrap();
        game.config.goal = goal;
        game.config.max_step = max_step;
        game.state.position = position;
        game
    }

    #[test]
    fn test_new_session_starts_on_language_screen() {
        let game = session();
        assert_eq!(game.state.phase, MatchPhase::SelectingLanguage);
        assert_eq!(game.state.position, 0);
        assert!((40..=70).contains(&game.config.goal));
        assert!((3..=7).contains(&game.config.max_step));
        assert!(!game.is_processing());
    }

    #[test]
    fn test_invalid_rules_refuse_session() {
        let rules = MatchRules {
            max_step_min: 0,
            ..MatchRules::default()
        };
        assert!(GameSession::with_seed(rules, 1).is_err());
    }

    #[test]
    fn test_vs_computer_setup_flow() {
        let mut game = session();
        game.submit_language_choice(Language::English).unwrap();
        assert_eq!(game.language(), Language::English);
        assert_eq!(game.state.phase, MatchPhase::SelectingMode);

        game.submit_mode_choice(GameMode::VsComputer).unwrap();
        assert_eq!(game.state.phase, MatchPhase::SelectingDifficulty);

        game.submit_difficulty_choice(Difficulty::Easy).unwrap();
        assert_eq!(game.config.difficulty, Difficulty::Easy);
        assert_eq!(game.state.phase, MatchPhase::ShowingInstructions);

        game.acknowledge_instructions().unwrap();
        assert_eq!(game.state.phase, MatchPhase::ChoosingFirstTurn);

        game.submit_first_turn_choice(Side::Human).unwrap();
        assert_eq!(game.state.phase, MatchPhase::InPlay);
        assert_eq!(game.state.active_side, Some(Side::Human));
    }

    #[test]
    fn test_two_player_skips_difficulty_and_first_turn() {
        let mut game = session();
        game.submit_language_choice(Language::Arabic).unwrap();
        game.submit_mode_choice(GameMode::TwoPlayer).unwrap();
        assert_eq!(game.state.phase, MatchPhase::ShowingInstructions);

        assert_eq!(
            game.submit_difficulty_choice(Difficulty::Hard),
            Err(GameError::InvalidPhase)
        );

        let events = game.acknowledge_instructions().unwrap();
        assert_eq!(game.state.phase, MatchPhase::InPlay);
        assert_eq!(game.state.active_side, Some(Side::Player1));
        assert!(events.contains(&GameEvent::TurnStarted {
            side: Side::Player1
        }));
    }

    #[test]
    fn test_out_of_phase_actions_rejected() {
        let mut game = session();
        assert_eq!(game.submit_move(1), Err(GameError::InvalidPhase));
        assert_eq!(game.request_reset(), Err(GameError::InvalidPhase));
        assert_eq!(
            game.submit_mode_choice(GameMode::TwoPlayer),
            Err(GameError::InvalidPhase)
        );
        assert_eq!(game.state.phase, MatchPhase::SelectingLanguage);
    }

    #[test]
    fn test_first_turn_side_must_match_mode() {
        let mut game = session();
        game.submit_language_choice(Language::English).unwrap();
        game.submit_mode_choice(GameMode::VsComputer).unwrap();
        game.submit_difficulty_choice(Difficulty::Medium).unwrap();
        game.acknowledge_instructions().unwrap();

        assert_eq!(
            game.submit_first_turn_choice(Side::Player2),
            Err(GameError::InvalidSide)
        );
        assert_eq!(game.state.phase, MatchPhase::ChoosingFirstTurn);
    }

    #[test]
    fn test_exact_hit_wins() {
        let mut game = in_play(45, 5, 40);
        let events = game.submit_move(5).unwrap();

        assert_eq!(game.state.position, 45);
        assert_eq!(game.state.winner(), Some(Side::Human));
        assert!(events.contains(&GameEvent::MatchFinished {
            winner: Side::Human,
            position: 45,
            overshoot: false,
        }));
    }

    #[test]
    fn test_overshoot_loses() {
        let mut game = in_play(45, 5, 42);
        game.submit_move(4).unwrap();

        assert_eq!(game.state.position, 46);
        assert_eq!(game.state.winner(), Some(Side::Scripted));
        assert!(!game.is_processing());
    }

    #[test]
    fn test_move_above_limit_rejected() {
        let mut game = in_play(45, 5, 42);
        let before = game.snapshot();

        assert_eq!(
            game.submit_move(6),
            Err(GameError::MoveOutOfRange {
                amount: 6,
                max_step: 5
            })
        );
        assert!(game.submit_move(0).is_err());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_human_move_schedules_computer_reply() {
        let mut game = in_play(50, 4, 0);
        let events = game.submit_move(1).unwrap();

        let ticket = game.pending_ticket().unwrap();
        assert!(events.contains(&GameEvent::ScriptedTurnScheduled {
            ticket,
            delay_ms: 0
        }));
        assert_eq!(game.state.active_side, Some(Side::Scripted));
        assert_eq!(game.submit_move(1), Err(GameError::ScriptedTurnPending));
        assert!(game.valid_actions().is_empty());

        // remaining 49, hard leaves 45
        game.resolve_scripted_turn(ticket).unwrap();
        assert_eq!(game.state.position, 5);
        assert_eq!(game.state.last_scripted_move, Some(4));
        assert_eq!(game.state.active_side, Some(Side::Human));
        assert!(!game.is_processing());
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut game = in_play(50, 4, 0);
        game.submit_move(1).unwrap();
        let ticket = game.pending_ticket().unwrap();
        game.resolve_scripted_turn(ticket).unwrap();

        let before = game.snapshot();
        assert_eq!(
            game.resolve_scripted_turn(ticket),
            Err(GameError::StaleTicket)
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_computer_first_schedules_immediately() {
        let mut game = session();
        game.submit_language_choice(Language::English).unwrap();
        game.submit_mode_choice(GameMode::VsComputer).unwrap();
        game.submit_difficulty_choice(Difficulty::Hard).unwrap();
        game.acknowledge_instructions().unwrap();
        game.submit_first_turn_choice(Side::Scripted).unwrap();

        assert!(game.is_processing());
        assert_eq!(game.submit_move(1), Err(GameError::ScriptedTurnPending));

        game.settle().unwrap();
        assert_eq!(game.state.active_side, Some(Side::Human));
        assert_eq!(game.state.turn, 1);
    }

    #[test]
    fn test_two_player_turns_alternate() {
        let mut game = session();
        game.submit_language_choice(Language::English).unwrap();
        game.submit_mode_choice(GameMode::TwoPlayer).unwrap();
        game.acknowledge_instructions().unwrap();
        game.config.goal = 10;
        game.config.max_step = 3;

        game.submit_move(3).unwrap();
        assert_eq!(game.state.active_side, Some(Side::Player2));
        game.submit_move(3).unwrap();
        assert_eq!(game.state.active_side, Some(Side::Player1));
        game.submit_move(3).unwrap();
        let events = game.submit_move(1).unwrap();

        assert_eq!(game.state.winner(), Some(Side::Player2));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::ScriptedTurnScheduled { .. })));
    }

    #[test]
    fn test_finished_match_rejects_moves_until_reset() {
        let mut game = in_play(45, 5, 40);
        game.submit_move(5).unwrap();

        assert_eq!(game.submit_move(1), Err(GameError::InvalidPhase));
        assert_eq!(game.valid_actions(), vec![GameAction::PlayAgain]);
        assert_eq!(game.state.winner(), Some(Side::Human));
    }

    #[test]
    fn test_reset_draws_new_match_and_keeps_choices() {
        let mut game = in_play(45, 5, 40);
        game.submit_move(5).unwrap();
        let old_id = game.state.match_id;

        let events = game.request_reset().unwrap();
        assert!(matches!(events[0], GameEvent::MatchReset { .. }));

        assert_eq!(game.state.phase, MatchPhase::SelectingMode);
        assert_eq!(game.state.position, 0);
        assert_eq!(game.state.winner(), None);
        assert_eq!(game.state.last_scripted_move, None);
        assert_eq!(game.state.match_id, old_id + 1);
        assert_eq!(game.language(), Language::English);
        assert_eq!(game.config.difficulty, Difficulty::Hard);
        assert!((40..=70).contains(&game.config.goal));
    }

    #[test]
    fn test_snapshot_is_stable() {
        let game = in_play(50, 4, 12);
        assert_eq!(game.snapshot(), game.snapshot());
        assert_eq!(game.remaining(), 38);
        assert!((game.progress() - 0.24).abs() < 1e-9);
    }
}
