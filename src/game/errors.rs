use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Action, Chips, PlayerId, SeatIndex};

/// Errors surfaced to whoever drives the hand. Every one of these is
/// returned before any state is touched, so the caller can resubmit,
/// substitute a default action, or give up on the hand.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("seat {seat} acted out of turn (seat {expected} is up)")]
    OutOfTurn {
        seat: SeatIndex,
        expected: SeatIndex,
    },
    #[error("illegal action: {action:?}")]
    InvalidAction { action: Action },
    #[error("increment of ${attempted} is below the ${minimum} minimum")]
    InvalidRaiseSize { attempted: Chips, minimum: Chips },
    #[error("need ${required} but only ${available} behind")]
    InsufficientChips { required: Chips, available: Chips },
    #[error("need 2+ funded seats, found {funded}")]
    InsufficientPlayers { funded: usize },
    #[error("can't {operation} while {phase}")]
    State { operation: String, phase: String },
    #[error("table is full")]
    TableFull,
    #[error("{0} is already seated")]
    PlayerExists(PlayerId),
    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),
    #[error("no player in seat {0}")]
    UnknownSeat(SeatIndex),
    #[error("stack must be positive and keep the table total in range")]
    InvalidStack,
    #[error("deck exhausted: wanted {requested} cards, {remaining} left")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("seat {0} can't hold the button")]
    InvalidButton(SeatIndex),
}

impl GameError {
    pub(crate) fn state(operation: &str, phase: impl ToString) -> Self {
        Self::State {
            operation: operation.to_string(),
            phase: phase.to_string(),
        }
    }
}
