use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::HashSet,
    fmt::{self},
    hash::{Hash, Hasher},
    mem::discriminant,
};

use super::constants;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value (deuce=2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            10 => "T",
            v => &v.to_string(),
        };
        write!(f, "{value}{}", self.1)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Strength of a player's best five cards. The derived ordering compares
/// the rank first and then the tiebreak values, so two hands tie exactly
/// when their values are equal.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandValue {
    pub rank: Rank,
    pub values: Vec<Value>,
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)
    }
}

/// Type alias for whole chips. Every bet, stack, and pot is a whole number
/// of chips; fractional chips never exist.
pub type Chips = u32;

/// Type alias for seat positions at the table. Seat numbers are stable for
/// as long as a player stays seated.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        let mut id: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        id.truncate(constants::MAX_PLAYER_ID_LENGTH);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::PreFlop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }

    /// Number of community cards turned over when this street begins.
    #[must_use]
    pub fn board_cards(self) -> usize {
        match self {
            Self::PreFlop => 0,
            Self::Flop => 3,
            Self::Turn | Self::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/{}", self.small, self.big)
    }
}

/// An action submitted at the decision boundary. Amounts are always the
/// chips moved from the player's stack by this action (raise-by), never
/// the resulting table bet.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    AllIn,
    Bet(Chips),
    Call,
    Check,
    Fold,
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "goes all-in",
            Self::Bet(amount) => &format!("bets ${amount}"),
            Self::Call => "calls",
            Self::Check => "checks",
            Self::Fold => "folds",
            Self::Raise(amount) => &format!("raises by ${amount}"),
        };
        write!(f, "{repr}")
    }
}

/// A legal option at a decision point. Amounts carry the relevant bound:
/// the full stack for all-in, the minimum for bets and raises, and the
/// chips needed for a call.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    AllIn(Chips),
    Bet(Chips),
    Call(Chips),
    Check,
    Fold,
    Raise(Chips),
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn(amount) => format!("all-in (== ${amount})"),
            Self::Bet(amount) => format!("bet (>= ${amount})"),
            Self::Call(amount) => format!("call (== ${amount})"),
            Self::Check => "check".to_string(),
            Self::Fold => "fold".to_string(),
            Self::Raise(amount) => format!("raise by (>= ${amount})"),
        };
        write!(f, "{repr}")
    }
}

// Choices compare by variant only. The amounts inside are informational;
// the validator is what enforces sizing.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl From<&Action> for ActionChoice {
    fn from(value: &Action) -> Self {
        match value {
            Action::AllIn => Self::AllIn(0),
            Action::Bet(amount) => Self::Bet(*amount),
            Action::Call => Self::Call(0),
            Action::Check => Self::Check,
            Action::Fold => Self::Fold,
            Action::Raise(amount) => Self::Raise(*amount),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    pub fn contains(&self, action: &Action) -> bool {
        self.0.contains(&ActionChoice::from(action))
    }

    /// Look up the stored choice for the same variant as `action`.
    pub fn get(&self, action: &Action) -> Option<&ActionChoice> {
        self.0.get(&ActionChoice::from(action))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut choices: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        choices.sort();
        let num_options = choices.len();
        let repr = choices
            .into_iter()
            .enumerate()
            .map(|(i, repr)| match i {
                0 if num_options == 1 => repr,
                0 if num_options == 2 => format!("{repr} "),
                i if i == num_options - 1 => format!("or {repr}"),
                _ => format!("{repr}, "),
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect::<HashSet<_>>())
    }
}

/// Where a player stands within the current hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PlayerState {
    // Still in the hand with chips behind.
    Active,
    // Gave up any claim on the pot.
    Folded,
    // Whole stack is in the pot.
    AllIn,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::Folded => "folded",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr:6}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub seat: SeatIndex,
    /// Chips not yet wagered.
    pub stack: Chips,
    /// Chips added on the current street.
    pub street_contribution: Chips,
    /// Chips added over the whole hand.
    pub total_contributed: Chips,
    pub state: PlayerState,
    pub acted_this_street: bool,
    pub cards: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, seat: SeatIndex, stack: Chips) -> Self {
        Self {
            id,
            seat,
            stack,
            street_contribution: 0,
            total_contributed: 0,
            state: PlayerState::Active,
            acted_this_street: false,
            cards: Vec::with_capacity(constants::HOLE_CARDS),
        }
    }

    /// Move up to `chips` from the stack into the pot and return how many
    /// actually moved. Emptying the stack puts an active player all-in.
    pub fn commit(&mut self, chips: Chips) -> Chips {
        let chips = chips.min(self.stack);
        self.stack -= chips;
        self.street_contribution += chips;
        self.total_contributed += chips;
        if self.stack == 0 && self.state == PlayerState::Active {
            self.state = PlayerState::AllIn;
        }
        chips
    }

    /// Whether this player still owes a decision on the current street:
    /// either they haven't acted since betting last opened, or they're
    /// facing a bet they haven't matched.
    #[must_use]
    pub fn needs_action(&self, table_bet: Chips) -> bool {
        self.state == PlayerState::Active
            && (!self.acted_this_street || self.street_contribution < table_bet)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == PlayerState::Active
    }

    /// Not folded, so still contesting the pot.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state != PlayerState::Folded
    }

    pub fn reset_street(&mut self) {
        self.street_contribution = 0;
        self.acted_this_street = false;
    }

    /// Prepare for a new hand. Players without chips sit the hand out.
    pub fn reset_hand(&mut self) {
        self.reset_street();
        self.total_contributed = 0;
        self.cards.clear();
        self.state = if self.stack > 0 {
            PlayerState::Active
        } else {
            PlayerState::Folded
        };
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (${}, {})",
            self.seat, self.id, self.stack, self.state
        )
    }
}
