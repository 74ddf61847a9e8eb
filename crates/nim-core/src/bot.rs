//! Scripted opponent for Nim Race.
//!
//! This module provides the three difficulty levels of the computer player:
//! - Easy: Random legal moves
//! - Medium: Plays the winning line 60% of the time, random otherwise
//! - Hard: Always plays the winning line when one exists
//!
//! A remaining distance is *safe* for the side on move when it is not a
//! multiple of `max_step + 1`. The winning line hands the opponent a
//! remaining distance that is such a multiple.

use crate::game::{MatchConfig, MatchPhase, MatchState, Side};
use crate::rules::{Difficulty, GameMode};
use rand::prelude::*;

/// Chance that the medium bot follows the winning line on a given move
pub const MEDIUM_STRATEGY_PROBABILITY: f64 = 0.6;

/// The scripted player
pub struct Bot {
    pub difficulty: Difficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for the current state, or `None` if the scripted side
    /// is not on move
    pub fn choose_action(&mut self, state: &MatchState, config: &MatchConfig) -> Option<u32> {
        if config.mode != GameMode::VsComputer
            || state.phase != MatchPhase::InPlay
            || state.active_side != Some(Side::Scripted)
        {
            return None;
        }

        Some(choose_move(
            state.position,
            config.goal,
            config.max_step,
            self.difficulty,
            &mut self.rng,
        ))
    }
}

/// Pick a move in `1..=max_step` for the given difficulty
pub fn choose_move<R: Rng + ?Sized>(
    position: u32,
    goal: u32,
    max_step: u32,
    difficulty: Difficulty,
    rng: &mut R,
) -> u32 {
    let max_step = max_step.max(1);

    match difficulty {
        Difficulty::Easy => random_move(max_step, rng),
        Difficulty::Medium => {
            if rng.gen_bool(MEDIUM_STRATEGY_PROBABILITY) {
                choose_medium(position, goal, max_step, rng)
            } else {
                random_move(max_step, rng)
            }
        }
        Difficulty::Hard => choose_hard(position, goal, max_step, rng),
    }
}

/// Hard: exact hit, else the first winning move found, else random
fn choose_hard<R: Rng + ?Sized>(position: u32, goal: u32, max_step: u32, rng: &mut R) -> u32 {
    exact_win(position, goal, max_step)
        .or_else(|| optimal_moves(position, goal, max_step).first().copied())
        .unwrap_or_else(|| random_move(max_step, rng))
}

/// Medium's strategic branch: like hard, but picks among all winning moves
fn choose_medium<R: Rng + ?Sized>(position: u32, goal: u32, max_step: u32, rng: &mut R) -> u32 {
    exact_win(position, goal, max_step)
        .or_else(|| optimal_moves(position, goal, max_step).choose(rng).copied())
        .unwrap_or_else(|| random_move(max_step, rng))
}

fn random_move<R: Rng + ?Sized>(max_step: u32, rng: &mut R) -> u32 {
    rng.gen_range(1..=max_step)
}

/// Smallest move that lands exactly on the goal
pub fn exact_win(position: u32, goal: u32, max_step: u32) -> Option<u32> {
    (1..=max_step).find(|&i| position + i == goal)
}

/// Moves that stop short of the goal and leave the opponent on a multiple
/// of `max_step + 1`, ascending
pub fn optimal_moves(position: u32, goal: u32, max_step: u32) -> Vec<u32> {
    let modulus = max_step + 1;
    (1..=max_step)
        .filter(|&i| position + i < goal && (goal - (position + i)) % modulus == 0)
        .collect()
}

/// Whether the side on move can force a win from this remaining distance
pub fn is_safe_distance(remaining: u32, max_step: u32) -> bool {
    remaining % (max_step + 1) != 0
}
