//! The decision capability the game asks each seat for.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::{
    entities::{Action, Card, Chips, PlayerId, Street},
    validator::DecisionPoint,
};

/// What a seat sees when it's their turn.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DecisionContext {
    pub point: DecisionPoint,
    pub hand_number: u32,
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
    /// Everything committed this hand, current street included.
    pub pot: Chips,
    pub table_bet: Chips,
    pub big_blind: Chips,
}

impl DecisionContext {
    #[must_use]
    pub fn street(&self) -> Street {
        self.point.street
    }

    #[must_use]
    pub fn can(&self, action: &Action) -> bool {
        self.point.can(action)
    }
}

/// Anything that picks an action for a seat. The game only ever talks to
/// players through this, and treats whatever comes back as untrusted.
#[enum_dispatch]
pub trait Strategy {
    fn decide(&mut self, ctx: &DecisionContext) -> Action;
}

/// Strategy per player for [`crate::Game::play_hand`]. Players without an
/// entry fold whenever they're asked to act.
pub type Strategies = BTreeMap<PlayerId, Box<dyn Strategy>>;
