//! Serializable game state.
//!
//! A [`GameSnapshot`] holds the table, settings, and the hand in progress.
//! The deck and the event log aren't part of it: restoring takes a dealer
//! from the caller and starts with an empty event log.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use thiserror::Error;

use super::{
    deck::{Dealer, seeded_rng},
    entities::{Chips, PlayerState},
    functional::HandRanker,
    state_machine::Game,
    states::{HandState, Phase},
    table::Table,
};
use crate::config::GameSettings;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("inconsistent snapshot: {0}")]
    Invariant(String),
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub settings: GameSettings,
    pub table: Table,
    pub phase: Phase,
    pub hand: Option<HandState>,
    pub hands_played: u32,
    pub started: bool,
}

fn invariant(msg: impl Into<String>) -> SnapshotError {
    SnapshotError::Invariant(msg.into())
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let (snapshot, _): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Re-check the accounting and betting invariants a live game keeps.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let players = self.table.players();
        if !players.windows(2).all(|w| w[0].seat < w[1].seat) {
            return Err(invariant("players aren't in strictly increasing seat order"));
        }
        if let Some(player) = players.iter().find(|p| p.seat >= self.table.max_seats()) {
            return Err(invariant(format!("seat #{} is past the table", player.seat)));
        }
        if let Some(player) = players
            .iter()
            .find(|p| p.state == PlayerState::AllIn && p.stack > 0)
        {
            return Err(invariant(format!("{} is all-in with chips behind", player.id)));
        }

        let hand = match (self.phase, &self.hand) {
            (Phase::Betting(street), Some(hand)) if hand.round.state().street == street => hand,
            (Phase::Betting(_), _) => {
                return Err(invariant("betting phase without a matching hand"));
            }
            (_, Some(_)) => return Err(invariant(format!("hand state while {}", self.phase))),
            (_, None) => {
                return match players.iter().find(|p| p.total_contributed > 0) {
                    Some(player) => Err(invariant(format!(
                        "{} has chips committed between hands",
                        player.id
                    ))),
                    None => Ok(()),
                };
            }
        };

        let committed: Chips = players.iter().map(|p| p.total_contributed).sum();
        if committed != hand.pot.total() {
            return Err(invariant(format!(
                "players committed ${committed} but the pot holds ${}",
                hand.pot.total()
            )));
        }
        if let Some(player) = players
            .iter()
            .find(|p| hand.pot.contribution(p.seat) != p.total_contributed)
        {
            return Err(invariant(format!("{} contribution doesn't match the pot", player.id)));
        }
        let pot = hand.pot.build(players);
        if pot.total() != committed {
            return Err(invariant("pot layers don't add up to the contributions"));
        }
        let folded: BTreeSet<_> = players
            .iter()
            .filter(|p| p.state == PlayerState::Folded)
            .map(|p| p.seat)
            .collect();
        if pot.layers().any(|layer| !layer.eligible.is_disjoint(&folded)) {
            return Err(invariant("a folded seat is eligible for a pot"));
        }

        let table_bet = hand.round.state().table_bet;
        if let Some(player) = players.iter().find(|p| p.street_contribution > table_bet) {
            return Err(invariant(format!(
                "{} put in more than the table bet this street",
                player.id
            )));
        }
        if let Some(seat) = hand.round.to_act() {
            match self.table.player(seat) {
                Some(player) if player.needs_action(table_bet) => {}
                _ => return Err(invariant(format!("seat #{seat} can't be the one to act"))),
            }
        }
        Ok(())
    }
}

impl Game {
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            settings: self.settings.clone(),
            table: self.table.clone(),
            phase: self.phase,
            hand: self.hand.clone(),
            hands_played: self.hands_played,
            started: self.started,
        }
    }

    /// Rebuild a game from a snapshot. The dealer picks up from wherever it
    /// is, so hole cards and board already dealt stay as they were.
    pub fn restore(
        snapshot: GameSnapshot,
        dealer: impl Dealer + 'static,
        ranker: impl HandRanker + 'static,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        snapshot
            .settings
            .validate()
            .map_err(|err| invariant(err.to_string()))?;
        Ok(Self {
            rng: seeded_rng(snapshot.settings.seed),
            settings: snapshot.settings,
            table: snapshot.table,
            dealer: Box::new(dealer),
            ranker: Box::new(ranker),
            phase: snapshot.phase,
            hand: snapshot.hand,
            hands_played: snapshot.hands_played,
            started: snapshot.started,
            events: VecDeque::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        deck::Deck,
        entities::Action,
        functional::StandardRanker,
    };

    fn running_game() -> Game {
        let mut game = Game::new(GameSettings {
            seed: Some(3),
            first_button: Some(0),
            ..GameSettings::default()
        })
        .unwrap();
        for name in ["a", "b", "c"] {
            game.add_player(name, 500).unwrap();
        }
        game.start_hand().unwrap();
        game.act(0, Action::Raise(40)).unwrap();
        game
    }

    #[test]
    fn test_bytes_round_trip_mid_hand() {
        let game = running_game();
        let snapshot = game.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(GameSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_json_round_trip_between_hands() {
        let mut game = running_game();
        game.act(1, Action::Fold).unwrap();
        game.act(2, Action::Fold).unwrap();
        let snapshot = game.snapshot();
        assert!(snapshot.hand.is_none());
        let json = snapshot.to_json().unwrap();
        assert_eq!(GameSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_restored_game_continues() {
        let game = running_game();
        let mut restored = Game::restore(game.snapshot(), Deck::new(Some(9)), StandardRanker).unwrap();
        assert_eq!(restored.to_act(), Some(1));
        restored.act(1, Action::Fold).unwrap();
        restored.act(2, Action::Call).unwrap();
        assert_eq!(restored.board().len(), 3);
        assert_eq!(restored.table().total_chips(), 1_500);
    }

    #[test]
    fn test_rejects_unbalanced_pot() {
        let game = running_game();
        let mut snapshot = game.snapshot();
        let mut table = snapshot.table.clone();
        table.players_mut()[0].total_contributed += 5;
        snapshot.table = table;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Invariant(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_seat_to_act() {
        let game = running_game();
        let mut snapshot = game.snapshot();
        snapshot.table.players_mut()[1].state = PlayerState::Folded;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_hand_outside_betting() {
        let game = running_game();
        let mut snapshot = game.snapshot();
        snapshot.phase = Phase::HandComplete;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            GameSnapshot::from_bytes(&[0xff, 0xff, 0xff]),
            Err(SnapshotError::Decode(_))
        ));
    }
}
