//! Decision providers for seats at the table.
//!
//! The game asks a [`Strategy`] for an action whenever a seat is up and
//! treats the answer as a submission like any other: illegal answers are
//! logged and replaced with a fold. The bots here are deliberately simple
//! and exist to drive the engine:
//!
//! - [`FoldBot`]: folds every decision
//! - [`CallBot`]: checks or calls
//! - [`AggressiveBot`]: min-raises, opens for two big blinds, else calls
//! - [`ScriptedBot`]: replays a fixed list of actions, then folds
//!
//! ## Example
//!
//! ```
//! use holdem_engine::{
//!     Game, GameSettings,
//!     bot::{Bot, CallBot, Strategies},
//! };
//!
//! let settings = GameSettings {
//!     seed: Some(7),
//!     first_button: Some(0),
//!     max_hands: 1,
//!     ..GameSettings::default()
//! };
//! let mut game = Game::new(settings).unwrap();
//! let mut strategies = Strategies::new();
//! for name in ["alice", "bob"] {
//!     game.add_player(name, 1_000).unwrap();
//!     strategies.insert(name.into(), Box::new(Bot::from(CallBot)));
//! }
//! game.play_hand(&mut strategies).unwrap();
//! assert_eq!(game.table().total_chips(), 2_000);
//! ```

pub mod decision;
pub mod models;

pub use decision::{DecisionContext, Strategies, Strategy};
pub use models::{AggressiveBot, Bot, CallBot, FoldBot, ScriptedBot};
