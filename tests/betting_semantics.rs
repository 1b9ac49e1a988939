//! Betting rules driven through the public game API
//!
//! These tests cover the rules that are easy to get subtly wrong:
//! - Raise amounts are chips moved this action, call portion included
//! - A short all-in re-queues earlier actors without reopening raises
//! - A full-size all-in does reopen raises
//! - Heads-up blind and action order

use holdem_engine::{
    Action, Game, GameError, GameSettings, Phase, Street,
    entities::{Chips, SeatIndex},
};

fn game_with(stacks: &[Chips]) -> Game {
    let mut game = Game::new(GameSettings {
        first_button: Some(0),
        seed: Some(11),
        ..GameSettings::default()
    })
    .unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        game.add_player(format!("p{i}").as_str(), stack).unwrap();
    }
    game.start_hand().unwrap();
    game
}

fn act_all(game: &mut Game, actions: &[(SeatIndex, Action)]) {
    for (seat, action) in actions {
        game.act(*seat, action.clone()).unwrap();
    }
}

fn last_raise_increment(game: &Game) -> Chips {
    game.hand().unwrap().round.state().last_raise_increment
}

fn table_bet(game: &Game) -> Chips {
    game.hand().unwrap().round.state().table_bet
}

/// Three-handed with the button short. Preflop is limped and checked, then
/// seat 1 bets 20 on the flop and seat 2 calls, leaving the button to act
/// with `button_behind` chips.
fn flop_bet_and_call(button_behind: Chips) -> Game {
    let mut game = game_with(&[button_behind + 20, 1_000, 1_000]);
    act_all(
        &mut game,
        &[(0, Action::Call), (1, Action::Call), (2, Action::Check)],
    );
    assert_eq!(game.phase(), Phase::Betting(Street::Flop));
    act_all(&mut game, &[(1, Action::Bet(20)), (2, Action::Call)]);
    assert_eq!(table_bet(&game), 20);
    assert_eq!(last_raise_increment(&game), 20);
    game
}

// === Raise-By Tests ===

#[test]
fn test_raise_amount_includes_call_portion() {
    let mut game = game_with(&[1_000, 1_000]);
    // Button posted 10 and owes 10. Moving 40 makes the table bet 50.
    let applied = game.act(0, Action::Raise(40)).unwrap();
    assert_eq!(applied.chips, 40);
    assert_eq!(applied.table_bet, 50);
    assert_eq!(last_raise_increment(&game), 30);
    assert_eq!(game.table().players()[0].street_contribution, 50);
}

#[test]
fn test_raise_below_last_increment_rejected() {
    let mut game = game_with(&[1_000, 1_000, 1_000]);
    // UTG owes 20; moving 30 would only raise the table bet by 10.
    assert_eq!(
        game.act(0, Action::Raise(30)),
        Err(GameError::InvalidRaiseSize {
            attempted: 10,
            minimum: 20
        })
    );
    let applied = game.act(0, Action::Raise(40)).unwrap();
    assert_eq!(applied.table_bet, 40);
}

#[test]
fn test_raise_beyond_stack_rejected() {
    let mut game = game_with(&[100, 1_000, 1_000]);
    assert_eq!(
        game.act(0, Action::Raise(150)),
        Err(GameError::InsufficientChips {
            required: 150,
            available: 100
        })
    );
}

#[test]
fn test_min_raise_by_offered_at_decision() {
    let game = game_with(&[1_000, 1_000, 1_000]);
    let point = game.decision().unwrap();
    assert_eq!(point.call_amount, 20);
    assert_eq!(point.min_raise_by_amount, 40);
    assert_eq!(point.min_bet_amount, 20);
}

// === Reopening Tests ===

#[test]
fn test_short_all_in_does_not_reopen() {
    let mut game = flop_bet_and_call(30);
    let applied = game.act(0, Action::AllIn).unwrap();
    assert!(!applied.reopened);
    assert_eq!(table_bet(&game), 30);
    assert_eq!(last_raise_increment(&game), 20);

    // Both earlier actors owe 10 and may only call or fold.
    for seat in [1, 2] {
        let point = game.decision().unwrap();
        assert_eq!(point.seat, seat);
        assert_eq!(point.call_amount, 10);
        assert!(point.can(&Action::Call));
        assert!(point.can(&Action::Fold));
        assert!(!point.can(&Action::Raise(0)));
        assert!(!point.can(&Action::AllIn));
        assert!(matches!(
            game.act(seat, Action::Raise(40)),
            Err(GameError::InvalidAction { .. })
        ));
        game.act(seat, Action::Call).unwrap();
    }
    assert_eq!(game.phase(), Phase::Betting(Street::Turn));
}

#[test]
fn test_full_size_all_in_reopens() {
    let mut game = flop_bet_and_call(40);
    let applied = game.act(0, Action::AllIn).unwrap();
    assert!(applied.reopened);
    assert_eq!(table_bet(&game), 40);
    assert_eq!(last_raise_increment(&game), 20);

    let point = game.decision().unwrap();
    assert_eq!(point.seat, 1);
    assert!(point.can(&Action::Raise(0)));
    let applied = game.act(1, Action::Raise(40)).unwrap();
    assert_eq!(applied.table_bet, 60);
    assert!(game.decision().unwrap().can(&Action::Raise(0)));
}

#[test]
fn test_cascading_short_all_ins() {
    // Seats 3 and 4 each shove for a little more than the last.
    let mut game = game_with(&[1_000, 1_000, 1_000, 45, 50]);
    // Button 0, blinds 1 and 2, seat 3 is first preflop.
    game.act(3, Action::AllIn).unwrap();
    assert_eq!(table_bet(&game), 45);
    assert_eq!(last_raise_increment(&game), 25);
    let applied = game.act(4, Action::AllIn).unwrap();
    assert!(!applied.reopened);
    assert_eq!(table_bet(&game), 50);
    assert_eq!(last_raise_increment(&game), 25);
    // Nobody behind has acted yet, so raising is still open to them.
    assert!(game.decision().unwrap().can(&Action::Raise(0)));
}

// === Heads-Up Tests ===

#[test]
fn test_heads_up_order() {
    let mut game = game_with(&[1_000, 1_000]);
    let players = game.table().players();
    assert_eq!(players[0].street_contribution, 10);
    assert_eq!(players[1].street_contribution, 20);
    assert_eq!(game.to_act(), Some(0));

    act_all(&mut game, &[(0, Action::Call), (1, Action::Check)]);
    for street in [Street::Flop, Street::Turn, Street::River] {
        assert_eq!(game.phase(), Phase::Betting(street));
        assert_eq!(game.to_act(), Some(1));
        act_all(&mut game, &[(1, Action::Check), (0, Action::Check)]);
    }
    assert_eq!(game.phase(), Phase::HandComplete);
}

#[test]
fn test_heads_up_big_blind_option() {
    let mut game = game_with(&[1_000, 1_000]);
    game.act(0, Action::Call).unwrap();
    let point = game.decision().unwrap();
    assert_eq!(point.seat, 1);
    assert!(point.can(&Action::Check));
    assert!(point.can(&Action::Raise(0)));
}

// === Completion Tests ===

#[test]
fn test_fold_to_one_ends_hand_with_unmatched_bet() {
    let mut game = game_with(&[1_000, 1_000, 1_000]);
    act_all(
        &mut game,
        &[(0, Action::Raise(100)), (1, Action::Fold), (2, Action::Fold)],
    );
    assert_eq!(game.phase(), Phase::HandComplete);
    let stacks: Vec<_> = game.table().players().iter().map(|p| p.stack).collect();
    assert_eq!(stacks, vec![1_030, 990, 980]);
}

#[test]
fn test_out_of_turn_rejected() {
    let mut game = game_with(&[1_000, 1_000, 1_000]);
    assert_eq!(
        game.act(2, Action::Check),
        Err(GameError::OutOfTurn {
            seat: 2,
            expected: 0
        })
    );
}

#[test]
fn test_check_facing_bet_rejected() {
    let mut game = game_with(&[1_000, 1_000, 1_000]);
    assert!(matches!(
        game.act(0, Action::Check),
        Err(GameError::InvalidAction { .. })
    ));
}
