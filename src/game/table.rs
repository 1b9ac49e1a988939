//! Seat bookkeeping and positional derivation.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    entities::{Chips, Player, PlayerId, SeatIndex, Street},
    errors::GameError,
};

/// Players in clockwise order starting after `seat` (or at `seat` when
/// `inclusive`), wrapping around the table. `players` must be sorted by
/// seat.
pub(crate) fn clockwise(
    players: &[Player],
    seat: SeatIndex,
    inclusive: bool,
) -> impl Iterator<Item = &Player> {
    let split = players.partition_point(|p| if inclusive { p.seat < seat } else { p.seat <= seat });
    players[split..].iter().chain(players[..split].iter())
}

pub(crate) fn index_of(players: &[Player], seat: SeatIndex) -> Option<usize> {
    players.binary_search_by_key(&seat, |p| p.seat).ok()
}

/// Blind and first-to-act seats for one hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Positions {
    pub button: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    pub first_preflop: SeatIndex,
    /// Where the search for the first postflop actor starts; players who
    /// can no longer act are skipped at that point.
    pub first_postflop: SeatIndex,
    pub heads_up: bool,
}

impl Positions {
    #[must_use]
    pub fn first_to_act(&self, street: Street) -> SeatIndex {
        match street {
            Street::PreFlop => self.first_preflop,
            Street::Flop | Street::Turn | Street::River => self.first_postflop,
        }
    }
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "button #{}, sb #{}, bb #{}",
            self.button, self.small_blind, self.big_blind
        )
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Table {
    /// Sorted by seat.
    players: Vec<Player>,
    max_seats: usize,
    button: Option<SeatIndex>,
}

impl Table {
    #[must_use]
    pub fn new(max_seats: usize) -> Self {
        Self {
            players: Vec::with_capacity(max_seats),
            max_seats,
            button: None,
        }
    }

    #[must_use]
    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    #[must_use]
    pub fn button(&self) -> Option<SeatIndex> {
        self.button
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    #[must_use]
    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        index_of(&self.players, seat).map(|idx| &self.players[idx])
    }

    #[must_use]
    pub fn find(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn funded_seats(&self) -> Vec<SeatIndex> {
        self.players
            .iter()
            .filter(|p| p.stack > 0)
            .map(|p| p.seat)
            .collect()
    }

    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.players
            .iter()
            .map(|p| p.stack + p.total_contributed)
            .sum()
    }

    /// Seat a player at the lowest open seat. The table's chips, summed,
    /// must fit in [`Chips`].
    pub fn seat_player(&mut self, id: PlayerId, stack: Chips) -> Result<SeatIndex, GameError> {
        if stack == 0 || self.total_chips().checked_add(stack).is_none() {
            return Err(GameError::InvalidStack);
        }
        if self.find(&id).is_some() {
            return Err(GameError::PlayerExists(id));
        }
        let seat = (0..self.max_seats)
            .find(|&seat| index_of(&self.players, seat).is_none())
            .ok_or(GameError::TableFull)?;
        let idx = self.players.partition_point(|p| p.seat < seat);
        debug!("{id} takes seat #{seat} with ${stack}");
        self.players.insert(idx, Player::new(id, seat, stack));
        Ok(seat)
    }

    pub fn unseat(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        let idx = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))?;
        let player = self.players.remove(idx);
        if self.players.is_empty() {
            self.button = None;
        }
        Ok(player)
    }

    /// Put the button on a specific funded seat.
    pub fn place_button(&mut self, seat: SeatIndex) -> Result<(), GameError> {
        match self.player(seat) {
            Some(player) if player.stack > 0 => {
                self.button = Some(seat);
                Ok(())
            }
            _ => Err(GameError::InvalidButton(seat)),
        }
    }

    pub(crate) fn restore_button(&mut self, button: Option<SeatIndex>) {
        self.button = button;
    }

    /// Move the button one seat clockwise among seats holding chips. The
    /// previous button seat doesn't need to be occupied anymore.
    pub fn advance_button(&mut self) -> Result<SeatIndex, GameError> {
        let funded = self.funded_seats().len();
        if funded < 2 {
            return Err(GameError::InsufficientPlayers { funded });
        }
        let from = self.button.unwrap_or(self.max_seats);
        let seat = clockwise(&self.players, from, false)
            .find(|p| p.stack > 0)
            .map(|p| p.seat)
            .ok_or(GameError::InsufficientPlayers { funded })?;
        self.button = Some(seat);
        Ok(seat)
    }

    /// Blind and acting seats for the coming hand, from the current button
    /// and the seats that hold chips.
    pub fn positions(&self) -> Result<Positions, GameError> {
        let funded = self.funded_seats();
        if funded.len() < 2 {
            return Err(GameError::InsufficientPlayers {
                funded: funded.len(),
            });
        }
        let button = match self.button {
            Some(seat) if funded.contains(&seat) => seat,
            Some(seat) => return Err(GameError::InvalidButton(seat)),
            None => return Err(GameError::state("compute positions", "no button is placed")),
        };
        let next_funded = |seat: SeatIndex| -> SeatIndex {
            clockwise(&self.players, seat, false)
                .find(|p| p.stack > 0)
                .map_or(seat, |p| p.seat)
        };

        let positions = if funded.len() == 2 {
            // Heads-up: the button posts the small blind and opens preflop
            // action, while the big blind opens every later street.
            let other = next_funded(button);
            Positions {
                button,
                small_blind: button,
                big_blind: other,
                first_preflop: button,
                first_postflop: other,
                heads_up: true,
            }
        } else {
            let small_blind = next_funded(button);
            let big_blind = next_funded(small_blind);
            Positions {
                button,
                small_blind,
                big_blind,
                first_preflop: next_funded(big_blind),
                first_postflop: small_blind,
                heads_up: false,
            }
        };
        Ok(positions)
    }
}
