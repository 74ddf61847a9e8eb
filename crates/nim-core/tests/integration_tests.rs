//! Integration tests for the Nim Race game engine.
//!
//! These tests verify complete game flows from the language screen through
//! to game over and back.

use nim_core::*;
use pretty_assertions::assert_eq;

/// Helper to get any valid action of a specific type
fn find_action<F>(game: &GameSession, filter: F) -> Option<GameAction>
where
    F: Fn(&GameAction) -> bool,
{
    game.valid_actions().into_iter().find(filter)
}

/// Walk the setup screens into play
fn start_vs_computer(game: &mut GameSession, difficulty: Difficulty, first: Side) {
    game.submit_language_choice(Language::Arabic).unwrap();
    game.submit_mode_choice(GameMode::VsComputer).unwrap();
    game.submit_difficulty_choice(difficulty).unwrap();
    game.acknowledge_instructions().unwrap();
    game.submit_first_turn_choice(first).unwrap();
    game.settle().unwrap();
}

/// Play until the match ends, always taking the first offered move
fn play_out(game: &mut GameSession, max_iterations: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut iterations = 0;

    while !game.state.is_finished() && iterations < max_iterations {
        let action = find_action(game, |a| matches!(a, GameAction::Move(_)))
            .expect("a move should be offered while in play");
        events.extend(game.apply_action(action).unwrap());
        events.extend(game.settle().unwrap());
        iterations += 1;
    }

    assert!(
        game.state.is_finished(),
        "Match should finish within {} iterations",
        max_iterations
    );
    events
}

#[test]
fn test_full_match_against_hard_bot() {
    let mut game = GameSession::with_seed(MatchRules::instant(), 1234).unwrap();
    start_vs_computer(&mut game, Difficulty::Hard, Side::Human);

    let goal = game.config.goal;
    let events = play_out(&mut game, 200);

    let winner = game.state.winner().unwrap();
    assert!(winner.plays_in(GameMode::VsComputer));

    // nobody in this line ever overshoots: human plays 1, bot plays to win
    assert_eq!(game.state.position, goal);

    let applied: u32 = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::MoveApplied { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert_eq!(applied, goal);

    let finished: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MatchFinished { .. }))
        .collect();
    assert_eq!(finished.len(), 1);
}

#[test]
fn test_hard_bot_beats_always_one() {
    // Playing 1 every turn hands the bot a winning distance each time
    // unless the position is already lost for it.
    for seed in 0..30 {
        let mut game = GameSession::with_seed(MatchRules::instant(), seed).unwrap();
        start_vs_computer(&mut game, Difficulty::Hard, Side::Human);

        let modulus = game.config.max_step + 1;
        let after_first = game.config.goal - 1;
        play_out(&mut game, 200);

        if after_first % modulus != 0 {
            assert_eq!(game.state.winner(), Some(Side::Scripted), "seed {seed}");
        }
    }
}

#[test]
fn test_computer_opens_the_match() {
    let mut game = GameSession::with_seed(MatchRules::instant(), 77).unwrap();
    game.submit_language_choice(Language::English).unwrap();
    game.submit_mode_choice(GameMode::VsComputer).unwrap();
    game.submit_difficulty_choice(Difficulty::Easy).unwrap();
    game.acknowledge_instructions().unwrap();

    let events = game.submit_first_turn_choice(Side::Scripted).unwrap();
    let ticket = match events.last() {
        Some(GameEvent::ScriptedTurnScheduled { ticket, delay_ms }) => {
            assert_eq!(*delay_ms, 0);
            *ticket
        }
        other => panic!("expected scheduled reply, got {other:?}"),
    };

    // input during the pause is dropped
    assert_eq!(game.submit_move(1), Err(GameError::ScriptedTurnPending));
    assert_eq!(game.state.position, 0);

    let events = game.resolve_scripted_turn(ticket).unwrap();
    let moved = game.state.last_scripted_move.unwrap();
    assert!((1..=game.config.max_step).contains(&moved));
    assert_eq!(game.state.position, moved);
    assert_eq!(
        events[0],
        GameEvent::MoveApplied {
            side: Side::Scripted,
            amount: moved,
            position: moved,
        }
    );
    assert_eq!(game.state.active_side, Some(Side::Human));
}

#[test]
fn test_two_player_match_and_rematch() {
    let mut game = GameSession::with_seed(MatchRules::instant(), 5).unwrap();
    game.submit_language_choice(Language::English).unwrap();
    game.submit_mode_choice(GameMode::TwoPlayer).unwrap();
    game.acknowledge_instructions().unwrap();

    let events = play_out(&mut game, 200);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ScriptedTurnScheduled { .. })));

    // every move was 1, so the side that reached the goal won
    let winner = game.state.winner().unwrap();
    let goal = game.config.goal;
    let expected = if goal % 2 == 1 { Side::Player1 } else { Side::Player2 };
    assert_eq!(winner, expected);

    let cues: Vec<_> = events.iter().filter_map(GameEvent::sound_cue).collect();
    assert_eq!(cues.last(), Some(&SoundEffect::Win));
    assert_eq!(
        cues.iter().filter(|c| **c == SoundEffect::Move).count() as u32,
        goal
    );

    game.request_reset().unwrap();
    assert_eq!(game.state.phase, MatchPhase::SelectingMode);
    assert_eq!(game.config.mode, GameMode::TwoPlayer);
    assert_eq!(game.language(), Language::English);

    // language is only asked once per session
    assert_eq!(
        game.submit_language_choice(Language::Arabic),
        Err(GameError::InvalidPhase)
    );
    game.submit_mode_choice(GameMode::TwoPlayer).unwrap();
    game.acknowledge_instructions().unwrap();
    assert_eq!(game.state.active_side, Some(Side::Player1));
}

#[test]
fn test_seeded_sessions_replay() {
    let run = |seed| {
        let mut game = GameSession::with_seed(MatchRules::instant(), seed).unwrap();
        start_vs_computer(&mut game, Difficulty::Medium, Side::Scripted);
        play_out(&mut game, 200);
        game.snapshot()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_rejected_input_changes_nothing() {
    let mut game = GameSession::with_seed(MatchRules::instant(), 8).unwrap();
    start_vs_computer(&mut game, Difficulty::Hard, Side::Human);
    let before = game.snapshot();

    let over = game.config.max_step + 1;
    assert!(game.submit_move(over).is_err());
    assert!(game.submit_move(0).is_err());
    assert!(game.submit_mode_choice(GameMode::TwoPlayer).is_err());
    assert!(game.request_reset().is_err());
    assert!(game.submit_first_turn_choice(Side::Scripted).is_err());

    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_snapshot_json_round_trips() {
    let mut game = GameSession::with_seed(MatchRules::instant(), 3).unwrap();
    start_vs_computer(&mut game, Difficulty::Easy, Side::Human);

    let json = game.snapshot_json();
    let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, game.snapshot());
}
