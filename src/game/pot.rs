//! Contribution tracking, side-pot layering, and awards.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use super::{
    entities::{Card, Chips, HandValue, Player, SeatIndex},
    functional::{HandRanker, argmax},
    table::{clockwise, index_of},
};

/// One layer of the pot and the seats that can win it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotLayer {
    pub amount: Chips,
    pub eligible: BTreeSet<SeatIndex>,
}

/// The pot partition. Side pots are ordered by contribution threshold,
/// smallest first.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pot {
    pub main: PotLayer,
    pub side: Vec<PotLayer>,
}

impl Pot {
    /// Main pot first, then side pots in award order.
    pub fn layers(&self) -> impl Iterator<Item = &PotLayer> {
        std::iter::once(&self.main).chain(&self.side)
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.layers().map(|layer| layer.amount).sum()
    }
}

impl fmt::Display for Pot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.main.amount)?;
        for layer in &self.side {
            write!(f, " + ${}", layer.amount)?;
        }
        Ok(())
    }
}

/// Chips won by one seat from one pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Award {
    /// 0 is the main pot, 1.. are side pots.
    pub pot_index: usize,
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Tracks what each seat has put in, this street and over the hand.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotAccountant {
    street: BTreeMap<SeatIndex, Chips>,
    hand: BTreeMap<SeatIndex, Chips>,
}

impl PotAccountant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, seat: SeatIndex, chips: Chips) {
        if chips == 0 {
            return;
        }
        *self.street.entry(seat).or_default() += chips;
        *self.hand.entry(seat).or_default() += chips;
    }

    pub fn end_street(&mut self) {
        self.street.clear();
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.hand.values().sum()
    }

    #[must_use]
    pub fn street_total(&self) -> Chips {
        self.street.values().sum()
    }

    #[must_use]
    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.hand.get(&seat).copied().unwrap_or_default()
    }

    /// Partition the hand's contributions into a main pot and side pots.
    ///
    /// Every distinct contribution total is a layer threshold. A layer holds
    /// the slice of each contribution between the previous threshold and
    /// its own, and any non-folded seat that reached the threshold can win
    /// it. A layer nobody can win (everyone who reached it folded) falls
    /// into the pot below it.
    #[must_use]
    pub fn build(&self, players: &[Player]) -> Pot {
        let live = |seat: SeatIndex| {
            index_of(players, seat).is_some_and(|idx| players[idx].is_live())
        };
        let thresholds: BTreeSet<Chips> = self.hand.values().copied().collect();

        let mut layers: Vec<PotLayer> = Vec::with_capacity(thresholds.len());
        let mut previous = 0;
        let mut orphaned = 0;
        for threshold in thresholds {
            let reached: Vec<SeatIndex> = self
                .hand
                .iter()
                .filter(|&(_, &total)| total >= threshold)
                .map(|(&seat, _)| seat)
                .collect();
            let amount = (threshold - previous) * reached.len() as Chips;
            previous = threshold;

            let eligible: BTreeSet<SeatIndex> =
                reached.into_iter().filter(|&seat| live(seat)).collect();
            if eligible.is_empty() {
                match layers.last_mut() {
                    Some(below) => below.amount += amount,
                    None => orphaned += amount,
                }
                continue;
            }
            layers.push(PotLayer {
                amount: amount + orphaned,
                eligible,
            });
            orphaned = 0;
        }

        let mut layers = layers.into_iter();
        let main = layers.next().unwrap_or_default();
        let pot = Pot {
            main,
            side: layers.collect(),
        };
        debug!("pot partitioned into {pot}");
        pot
    }
}

/// Hand out each pot, smallest first, to the best hand(s) among its
/// eligible seats. Ties split evenly down to the chip unit. Leftover units
/// go one at a time to the tied winners in seat order starting left of
/// the button.
#[must_use]
pub fn award(
    pot: &Pot,
    players: &[Player],
    board: &[Card],
    ranker: &dyn HandRanker,
    button: SeatIndex,
    chip_unit: Chips,
) -> Vec<Award> {
    let chip_unit = chip_unit.max(1);
    let mut values: BTreeMap<SeatIndex, HandValue> = BTreeMap::new();
    let mut awards = Vec::new();

    for (pot_index, layer) in pot.layers().enumerate() {
        if layer.amount == 0 {
            continue;
        }
        let contenders: Vec<SeatIndex> = layer.eligible.iter().copied().collect();
        let winners: Vec<SeatIndex> = if contenders.len() == 1 {
            contenders
        } else {
            let ranked: Vec<HandValue> = contenders
                .iter()
                .map(|&seat| {
                    values
                        .entry(seat)
                        .or_insert_with(|| {
                            let hole = index_of(players, seat)
                                .map(|idx| players[idx].cards.as_slice())
                                .unwrap_or_default();
                            ranker.rank(hole, board)
                        })
                        .clone()
                })
                .collect();
            argmax(&ranked)
                .into_iter()
                .map(|idx| contenders[idx])
                .collect()
        };

        // Payout order starts left of the button.
        let ordered: Vec<SeatIndex> = clockwise(players, button, false)
            .map(|p| p.seat)
            .filter(|seat| winners.contains(seat))
            .collect();
        let n = ordered.len() as Chips;
        if n == 0 {
            continue;
        }
        let share = layer.amount / n / chip_unit * chip_unit;
        let mut payouts: Vec<Chips> = vec![share; ordered.len()];
        let mut remainder = layer.amount - share * n;
        let mut i = 0;
        while remainder > 0 {
            let give = remainder.min(chip_unit);
            payouts[i % ordered.len()] += give;
            remainder -= give;
            i += 1;
        }

        for (seat, amount) in ordered.into_iter().zip(payouts) {
            if amount > 0 {
                awards.push(Award {
                    pot_index,
                    seat,
                    amount,
                });
            }
        }
    }
    awards
}
