//! Resting phases of a game and the state owned by the hand in progress.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{
    betting::BettingRound,
    entities::{Card, Street},
    pot::PotAccountant,
    table::Positions,
};

/// Where the game is between calls. Showdown and awards happen inside the
/// call that closes the last street, so they never show up here.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    /// Fewer funded players than the game needs.
    WaitingForPlayers,
    /// Enough players to deal the first hand.
    Ready,
    /// A hand is in progress and waiting on an action.
    Betting(Street),
    /// Between hands.
    HandComplete,
    GameOver,
}

impl Phase {
    #[must_use]
    pub fn can_start_hand(self) -> bool {
        matches!(self, Self::Ready | Self::HandComplete)
    }

    /// Seats can only change while no hand is running.
    #[must_use]
    pub fn can_change_seats(self) -> bool {
        matches!(self, Self::WaitingForPlayers | Self::Ready | Self::HandComplete)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingForPlayers => write!(f, "waiting for players"),
            Self::Ready => write!(f, "ready"),
            Self::Betting(street) => write!(f, "betting on the {street}"),
            Self::HandComplete => write!(f, "between hands"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

/// Everything that lives for exactly one hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandState {
    pub hand_number: u32,
    pub positions: Positions,
    pub board: Vec<Card>,
    pub round: BettingRound,
    pub pot: PotAccountant,
}
