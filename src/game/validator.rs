//! Legal action sets and sizing checks. Nothing in here mutates state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    betting::BettingState,
    entities::{Action, ActionChoice, ActionChoices, Chips, Player, PlayerId, SeatIndex, Street},
    errors::GameError,
};

/// Everything the seat to act needs to make a decision.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DecisionPoint {
    pub seat: SeatIndex,
    pub player: PlayerId,
    pub street: Street,
    pub legal: ActionChoices,
    /// Chips a call moves, capped at the stack.
    pub call_amount: Chips,
    /// Smallest opening bet that isn't all-in.
    pub min_bet_amount: Chips,
    /// Smallest raise-by amount that isn't all-in: the call plus the last
    /// full raise increment.
    pub min_raise_by_amount: Chips,
    pub stack: Chips,
}

impl DecisionPoint {
    #[must_use]
    pub fn can(&self, action: &Action) -> bool {
        self.legal.contains(action)
    }
}

impl fmt::Display for DecisionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{}) can {}", self.player, self.seat, self.legal)
    }
}

fn to_call(state: &BettingState, player: &Player) -> Chips {
    state.table_bet.saturating_sub(player.street_contribution)
}

/// Whether `player` may increase the table bet. A player who already acted
/// and was only re-queued by a short all-in can't.
fn can_raise(state: &BettingState, player: &Player) -> bool {
    state.table_bet > 0 && player.stack > to_call(state, player) && !player.acted_this_street
}

#[must_use]
pub fn legal_actions(state: &BettingState, player: &Player) -> ActionChoices {
    let mut choices = ActionChoices::default();
    if !player.is_active() {
        return choices;
    }
    let to_call = to_call(state, player);
    choices.0.insert(ActionChoice::Fold);
    if to_call == 0 {
        choices.0.insert(ActionChoice::Check);
    } else {
        choices.0.insert(ActionChoice::Call(to_call.min(player.stack)));
    }
    if state.table_bet == 0 && player.stack > 0 {
        choices.0.insert(ActionChoice::Bet(state.min_bet));
    }
    let raising = can_raise(state, player);
    if raising {
        choices
            .0
            .insert(ActionChoice::Raise(to_call.saturating_add(state.last_raise_increment)));
    }
    // Shoving either calls for less or bets/raises; the latter needs the
    // same right to increase the table bet as any other raise.
    let shove_raises = player.stack > to_call;
    if player.stack > 0 && (!shove_raises || state.table_bet == 0 || raising) {
        choices.0.insert(ActionChoice::AllIn(player.stack));
    }
    choices
}

#[must_use]
pub fn options(state: &BettingState, player: &Player) -> DecisionPoint {
    let to_call = to_call(state, player);
    DecisionPoint {
        seat: player.seat,
        player: player.id.clone(),
        street: state.street,
        legal: legal_actions(state, player),
        call_amount: to_call.min(player.stack),
        min_bet_amount: state.min_bet,
        min_raise_by_amount: to_call.saturating_add(state.last_raise_increment),
        stack: player.stack,
    }
}

/// Check `action` for `player` and return the chips it moves from their
/// stack. Legality is checked before chips, and chips before sizing.
pub fn validate(state: &BettingState, player: &Player, action: &Action) -> Result<Chips, GameError> {
    if !legal_actions(state, player).contains(action) {
        return Err(GameError::InvalidAction {
            action: action.clone(),
        });
    }

    let to_call = to_call(state, player);
    let stack = player.stack;
    match *action {
        Action::Fold | Action::Check => Ok(0),
        Action::Call => Ok(to_call.min(stack)),
        Action::AllIn => Ok(stack),
        Action::Bet(amount) => {
            if amount > stack {
                return Err(GameError::InsufficientChips {
                    required: amount,
                    available: stack,
                });
            }
            if amount < state.min_bet && amount < stack {
                return Err(GameError::InvalidRaiseSize {
                    attempted: amount,
                    minimum: state.min_bet,
                });
            }
            Ok(amount)
        }
        Action::Raise(amount) => {
            if amount > stack {
                return Err(GameError::InsufficientChips {
                    required: amount,
                    available: stack,
                });
            }
            let increment = amount.saturating_sub(to_call);
            if increment == 0 || (increment < state.last_raise_increment && amount < stack) {
                return Err(GameError::InvalidRaiseSize {
                    attempted: increment,
                    minimum: state.last_raise_increment,
                });
            }
            Ok(amount)
        }
    }
}
