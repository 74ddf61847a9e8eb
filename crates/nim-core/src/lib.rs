//! Nim Race - a race-to-the-goal counting game engine
//!
//! This crate provides the core game logic for Nim Race, including:
//! - Match rules and the ranges each match's goal and step limit come from
//! - The setup flow (language, mode, difficulty, rules screen, first turn)
//! - Turn handling with exact-hit wins and overshoot losses
//! - A scripted opponent with three difficulty levels
//!
//! # Architecture
//!
//! The game engine is designed to be platform-agnostic. Drawing, input and
//! audio live in the host, which submits [`GameAction`]s and reacts to the
//! returned [`GameEvent`]s. It can be compiled to:
//! - Native Rust for server-side game hosting
//! - WebAssembly for a browser canvas front end
//!
//! The computer's reply is never run inline. Handing it the turn yields a
//! [`ScriptedTicket`] that the host resolves after its own delay.
//!
//! # Modules
//!
//! - [`rules`]: Draw ranges and setup choices
//! - [`game`]: Session state machine
//! - [`bot`]: Scripted opponent
//! - [`actions`]: Inputs and events

pub mod actions;
pub mod bot;
pub mod game;
pub mod rules;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, SoundEffect};
pub use bot::{choose_move, Bot};
pub use game::{
    GameError, GameSession, MatchConfig, MatchPhase, MatchState, ScriptedTicket, SessionSnapshot,
    Side,
};
pub use rules::{Difficulty, GameMode, Language, MatchRules, RulesError};
