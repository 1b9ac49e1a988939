//! # Holdem Engine
//!
//! A deterministic engine for hands of no-limit community-card poker.
//!
//! The engine is a library: whoever embeds it seats players, starts hands,
//! and feeds in one action at a time. Every action is validated before any
//! state changes, so a rejected submission can simply be retried.
//!
//! ## Architecture
//!
//! - [`game::table`]: seats, the button, and blind positions, including the
//!   heads-up exception
//! - [`game::validator`]: legal actions and sizing under raise-by semantics
//! - [`game::betting`]: turn order, reopening, and street completion
//! - [`game::pot`]: contribution tracking, side pots, and awards
//! - [`game::state_machine`]: the [`Game`] that runs hands street by street
//! - [`bot`]: strategies that can drive a game on their own
//!
//! ## Example
//!
//! ```
//! use holdem_engine::{Action, Game, GameSettings, Phase};
//!
//! let settings = GameSettings {
//!     first_button: Some(0),
//!     seed: Some(42),
//!     ..GameSettings::default()
//! };
//! let mut game = Game::new(settings).unwrap();
//! game.add_player("alice", 1_000).unwrap();
//! game.add_player("bob", 1_000).unwrap();
//!
//! game.start_hand().unwrap();
//! // Heads-up, the button posts the small blind and acts first.
//! let point = game.decision().unwrap();
//! assert_eq!(point.seat, 0);
//! game.act(0, Action::Fold).unwrap();
//!
//! assert_eq!(game.phase(), Phase::HandComplete);
//! assert_eq!(game.table().players()[1].stack, 1_010);
//! ```

pub mod bot;
pub mod config;
pub mod game;

pub use config::{ConfigError, GameSettings};
pub use game::{
    Game, GameError, GameEvent, GameSnapshot, Phase, SnapshotError,
    constants,
    entities::{self, Action, Card, Chips, PlayerId, SeatIndex, Street},
    functional,
};
