//! Save/restore tests
//!
//! A game saved mid-hand and restored with the same deck must play out
//! exactly like the game that was never interrupted.

use anyhow::Result;
use holdem_engine::{
    Action, Card, Game, GameSettings, GameSnapshot, Phase, SnapshotError,
    entities::Suit,
    game::{Dealer, Deck, StandardRanker},
};

fn stacked_cards() -> Vec<Card> {
    (2..=14)
        .rev()
        .flat_map(|value| Suit::ALL.map(|suit| Card(value, suit)))
        .collect()
}

fn new_game() -> Result<Game> {
    let mut game = Game::new(GameSettings {
        first_button: Some(0),
        seed: Some(21),
        ..GameSettings::default()
    })?
    .with_dealer(Deck::stacked(stacked_cards()));
    for name in ["ann", "ben", "cat"] {
        game.add_player(name, 1_000)?;
    }
    Ok(game)
}

fn finish(game: &mut Game) -> Result<Vec<u32>> {
    while matches!(game.phase(), Phase::Betting(_)) {
        let point = game.decision()?;
        let action = if point.can(&Action::Check) {
            Action::Check
        } else {
            Action::Call
        };
        game.act(point.seat, action)?;
    }
    Ok(game.table().players().iter().map(|p| p.stack).collect())
}

#[test]
fn test_restore_mid_hand_matches_uninterrupted_game() -> Result<()> {
    let mut game = new_game()?;
    game.start_hand()?;
    game.act(0, Action::Raise(60))?;
    game.act(1, Action::Call)?;

    let bytes = game.snapshot().to_bytes()?;
    let expected = finish(&mut game)?;

    // Replay the same deck up to where the snapshot was taken.
    let mut deck = Deck::stacked(stacked_cards());
    deck.shuffle();
    deck.deal(6)?;
    let mut restored = Game::restore(GameSnapshot::from_bytes(&bytes)?, deck, StandardRanker)?;
    assert_eq!(restored.to_act(), Some(2));
    assert_eq!(finish(&mut restored)?, expected);
    Ok(())
}

#[test]
fn test_json_snapshot_is_readable() -> Result<()> {
    let mut game = new_game()?;
    game.start_hand()?;
    let json = game.snapshot().to_json()?;
    assert!(json.contains("\"ann\""));
    assert_eq!(GameSnapshot::from_json(&json)?, game.snapshot());
    Ok(())
}

#[test]
fn test_tampered_snapshot_rejected() -> Result<()> {
    let mut game = new_game()?;
    game.start_hand()?;
    let mut json: serde_json::Value = serde_json::from_str(&game.snapshot().to_json()?)?;
    json["table"]["players"][0]["stack"] = serde_json::json!(0);
    json["table"]["players"][0]["state"] = serde_json::json!("AllIn");
    json["table"]["players"][0]["total_contributed"] = serde_json::json!(1);
    let result = GameSnapshot::from_json(&json.to_string());
    assert!(matches!(result, Err(SnapshotError::Invariant(_))));
    Ok(())
}
