use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{
    constants::DECK_SIZE,
    entities::{Card, Suit},
    errors::GameError,
};

/// Supplies non-repeating cards to the hand. The engine asks for hole
/// cards, burns, and board cards through this and nothing else.
pub trait Dealer {
    /// Return every card to the deck and put it in a fresh order.
    fn shuffle(&mut self);

    /// Take the next `n` cards off the top.
    fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError>;

    /// Cards left to deal before the next shuffle.
    fn remaining(&self) -> usize;
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
enum Order {
    /// Shuffled with the deck's own generator.
    Random,
    /// Dealt in exactly the given order on every shuffle.
    Stacked(Vec<Card>),
}

/// Seeded when a seed is given, from OS entropy otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    deck_idx: usize,
    order: Order,
    rng: StdRng,
}

impl Deck {
    /// A standard 52-card deck. A seed makes every shuffle sequence
    /// reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            cards: Self::standard(),
            deck_idx: 0,
            order: Order::Random,
            rng: seeded_rng(seed),
        }
    }

    /// A deck that deals `cards` top-first and restores that order on
    /// every shuffle.
    #[must_use]
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.clone(),
            deck_idx: 0,
            order: Order::Stacked(cards),
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn standard() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for value in 2u8..=14u8 {
            for suit in Suit::ALL {
                cards.push(Card(value, suit));
            }
        }
        cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Dealer for Deck {
    fn shuffle(&mut self) {
        match &self.order {
            Order::Random => {
                self.cards.sort();
                self.cards.shuffle(&mut self.rng);
            }
            Order::Stacked(cards) => self.cards.clone_from(cards),
        }
        self.deck_idx = 0;
    }

    fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let cards = self.cards[self.deck_idx..self.deck_idx + n].to_vec();
        self.deck_idx += n;
        Ok(cards)
    }

    fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}
