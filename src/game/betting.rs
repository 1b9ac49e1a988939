//! One street of betting.
//!
//! A [`BettingRound`] is either waiting on a seat or complete. Applying an
//! action validates first and mutates second, so a rejected action leaves
//! players, pot, and round untouched.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    entities::{Action, Chips, Player, PlayerState, SeatIndex, Street},
    errors::GameError,
    pot::PotAccountant,
    table::{clockwise, index_of},
    validator::{self, DecisionPoint},
};

/// Per-street betting parameters.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BettingState {
    pub street: Street,
    /// What every active player has to match this street.
    pub table_bet: Chips,
    /// Smallest increment that counts as a full raise.
    pub last_raise_increment: Chips,
    pub min_bet: Chips,
}

impl BettingState {
    /// Fresh street: nothing to match, raises measured against the big
    /// blind.
    #[must_use]
    pub fn new(street: Street, big_blind: Chips) -> Self {
        Self {
            street,
            table_bet: 0,
            last_raise_increment: big_blind,
            min_bet: big_blind,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundStatus {
    AwaitingAction(SeatIndex),
    StreetComplete,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingAction(seat) => write!(f, "waiting on seat #{seat}"),
            Self::StreetComplete => write!(f, "street complete"),
        }
    }
}

/// What an applied action did.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Applied {
    pub seat: SeatIndex,
    pub action: Action,
    /// Chips moved from the stack.
    pub chips: Chips,
    pub table_bet: Chips,
    /// Whether this was a full bet or raise that gave everyone else their
    /// raising rights back.
    pub reopened: bool,
    pub status: RoundStatus,
}

/// Whether betting on the street is over: nobody left to contest the pot,
/// nobody left who can act, or every active player has acted and matched.
/// A lone active player who owes nothing has nobody to bet against, so
/// that closes the street too.
#[must_use]
pub fn street_complete(players: &[Player], table_bet: Chips) -> bool {
    if players.iter().filter(|p| p.is_live()).count() <= 1 {
        return true;
    }
    let active: Vec<&Player> = players.iter().filter(|p| p.is_active()).collect();
    match active.as_slice() {
        [] => true,
        [lone] if lone.street_contribution >= table_bet => true,
        _ => active.iter().all(|p| !p.needs_action(table_bet)),
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BettingRound {
    state: BettingState,
    status: RoundStatus,
}

impl BettingRound {
    /// Open a street with no forced bets. Action starts at `first` or the
    /// next seat clockwise that can act.
    #[must_use]
    pub fn open(street: Street, big_blind: Chips, players: &[Player], first: SeatIndex) -> Self {
        Self::with_state(BettingState::new(street, big_blind), players, first)
    }

    /// Open preflop once blinds are in. The table bet is the full big blind
    /// even when the big blind was posted short.
    #[must_use]
    pub fn open_preflop(big_blind: Chips, players: &[Player], first: SeatIndex) -> Self {
        let state = BettingState {
            table_bet: big_blind,
            ..BettingState::new(Street::PreFlop, big_blind)
        };
        Self::with_state(state, players, first)
    }

    fn with_state(state: BettingState, players: &[Player], first: SeatIndex) -> Self {
        let status = if street_complete(players, state.table_bet) {
            RoundStatus::StreetComplete
        } else {
            clockwise(players, first, true)
                .find(|p| p.needs_action(state.table_bet))
                .map_or(RoundStatus::StreetComplete, |p| {
                    RoundStatus::AwaitingAction(p.seat)
                })
        };
        Self { state, status }
    }

    /// Move a forced bet (blind) into the pot. Doesn't count as acting.
    pub fn post_forced(
        players: &mut [Player],
        pot: &mut PotAccountant,
        seat: SeatIndex,
        amount: Chips,
    ) -> Result<Chips, GameError> {
        let idx = index_of(players, seat).ok_or(GameError::UnknownSeat(seat))?;
        let moved = players[idx].commit(amount);
        pot.collect(seat, moved);
        Ok(moved)
    }

    #[must_use]
    pub fn state(&self) -> &BettingState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn to_act(&self) -> Option<SeatIndex> {
        match self.status {
            RoundStatus::AwaitingAction(seat) => Some(seat),
            RoundStatus::StreetComplete => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == RoundStatus::StreetComplete
    }

    fn expect_turn(&self, seat: Option<SeatIndex>) -> Result<SeatIndex, GameError> {
        let expected = self
            .to_act()
            .ok_or_else(|| GameError::state("act", format!("the {} is complete", self.state.street)))?;
        match seat {
            Some(seat) if seat != expected => Err(GameError::OutOfTurn { seat, expected }),
            _ => Ok(expected),
        }
    }

    /// Legal actions and bounds for the seat to act.
    pub fn decision(&self, players: &[Player]) -> Result<DecisionPoint, GameError> {
        let seat = self.expect_turn(None)?;
        let idx = index_of(players, seat).ok_or(GameError::UnknownSeat(seat))?;
        Ok(validator::options(&self.state, &players[idx]))
    }

    /// Validate and apply `action` for `seat`, then pick the next seat or
    /// close the street.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        pot: &mut PotAccountant,
        seat: SeatIndex,
        action: &Action,
    ) -> Result<Applied, GameError> {
        self.expect_turn(Some(seat))?;
        let idx = index_of(players, seat).ok_or(GameError::UnknownSeat(seat))?;
        let chips = validator::validate(&self.state, &players[idx], action)?;

        let player = &mut players[idx];
        if *action == Action::Fold {
            player.state = PlayerState::Folded;
        }
        let chips = player.commit(chips);
        pot.collect(seat, chips);
        player.acted_this_street = true;

        let contribution = player.street_contribution;
        let mut reopened = false;
        if contribution > self.state.table_bet {
            let increment = contribution - self.state.table_bet;
            self.state.table_bet = contribution;
            if increment >= self.state.last_raise_increment {
                self.state.last_raise_increment = increment;
                reopened = true;
                for other in players.iter_mut() {
                    if other.seat != seat && other.is_active() {
                        other.acted_this_street = false;
                    }
                }
            } else {
                debug!(
                    "short all-in from #{seat}: +${increment} doesn't reopen (needs ${})",
                    self.state.last_raise_increment
                );
            }
        }

        self.status = if street_complete(players, self.state.table_bet) {
            RoundStatus::StreetComplete
        } else {
            clockwise(players, seat, false)
                .find(|p| p.needs_action(self.state.table_bet))
                .map_or(RoundStatus::StreetComplete, |p| {
                    RoundStatus::AwaitingAction(p.seat)
                })
        };

        Ok(Applied {
            seat,
            action: action.clone(),
            chips,
            table_bet: self.state.table_bet,
            reopened,
            status: self.status,
        })
    }
}
