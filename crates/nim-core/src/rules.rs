//! Match rules and setup choices.
//!
//! This module defines the ranges new matches are drawn from and the
//! choices a player makes before play starts (language, mode, difficulty).

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Smallest goal a match can draw
pub const DEFAULT_GOAL_MIN: u32 = 40;

/// Largest goal a match can draw
pub const DEFAULT_GOAL_MAX: u32 = 70;

/// Smallest step limit a match can draw
pub const DEFAULT_MAX_STEP_MIN: u32 = 3;

/// Largest step limit a match can draw
pub const DEFAULT_MAX_STEP_MAX: u32 = 7;

/// Pause before the scripted opponent replies
pub const DEFAULT_SCRIPTED_DELAY_MS: u64 = 2000;

/// Display language picked on the first screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Arabic,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Arabic, Language::English];
}

/// Who the human is playing against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Human against the scripted opponent
    VsComputer,
    /// Two people sharing one device
    TwoPlayer,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::VsComputer, GameMode::TwoPlayer];
}

/// Scripted opponent strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

/// Errors for a malformed rule set
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RulesError {
    #[error("Goal range {min}..={max} is empty")]
    EmptyGoalRange { min: u32, max: u32 },

    #[error("Step range {min}..={max} is empty")]
    EmptyStepRange { min: u32, max: u32 },

    #[error("Step limit must be at least 1")]
    ZeroStep,

    #[error("Goal {goal} must exceed the largest step {max_step}")]
    GoalTooSmall { goal: u32, max_step: u32 },
}

/// Ranges a fresh match is drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub goal_min: u32,
    pub goal_max: u32,
    pub max_step_min: u32,
    pub max_step_max: u32,
    /// Cosmetic pause before scripted replies; zero is valid
    pub scripted_delay_ms: u64,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            goal_min: DEFAULT_GOAL_MIN,
            goal_max: DEFAULT_GOAL_MAX,
            max_step_min: DEFAULT_MAX_STEP_MIN,
            max_step_max: DEFAULT_MAX_STEP_MAX,
            scripted_delay_ms: DEFAULT_SCRIPTED_DELAY_MS,
        }
    }
}

impl MatchRules {
    /// Same ranges, no reply pause. Handy for headless drivers.
    pub fn instant() -> Self {
        Self {
            scripted_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Override the reply pause
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scripted_delay_ms = delay_ms;
        self
    }

    /// Check the ranges can produce a playable match
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.goal_min > self.goal_max {
            return Err(RulesError::EmptyGoalRange {
                min: self.goal_min,
                max: self.goal_max,
            });
        }
        if self.max_step_min > self.max_step_max {
            return Err(RulesError::EmptyStepRange {
                min: self.max_step_min,
                max: self.max_step_max,
            });
        }
        if self.max_step_min == 0 {
            return Err(RulesError::ZeroStep);
        }
        if self.goal_min <= self.max_step_max {
            return Err(RulesError::GoalTooSmall {
                goal: self.goal_min,
                max_step: self.max_step_max,
            });
        }
        Ok(())
    }

    /// Draw a `(goal, max_step)` pair uniformly from the closed ranges
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        let goal = rng.gen_range(self.goal_min..=self.goal_max);
        let max_step = rng.gen_range(self.max_step_min..=self.max_step_max);
        (goal, max_step)
    }

    pub fn scripted_delay(&self) -> Duration {
        Duration::from_millis(self.scripted_delay_ms)
    }
}
