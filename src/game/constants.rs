use super::entities::Chips;

pub const DEFAULT_SMALL_BLIND: Chips = 10;
pub const DEFAULT_BIG_BLIND: Chips = 20;
pub const DEFAULT_CHIP_UNIT: Chips = 1;

pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 9;
pub const DEFAULT_MAX_HANDS: u32 = 1000;

/// 52 cards less three burns and a five card board leave 44 hole
/// cards, enough for 22 players.
pub const MAX_PLAYERS: usize = 22;

pub const DECK_SIZE: usize = 52;
pub const HOLE_CARDS: usize = 2;
pub const BOARD_CARDS: usize = 5;
pub const BURN_CARDS: usize = 1;
/// Streets that open with a burn.
pub const POSTFLOP_STREETS: usize = 3;

// Player ids get truncated past this.
pub const MAX_PLAYER_ID_LENGTH: usize = 32;
