//! Hand engine: seating, betting, pots, and the game loop that ties them
//! together.

pub mod betting;
pub mod constants;
pub mod deck;
pub mod entities;
pub mod errors;
pub mod events;
pub mod functional;
pub mod pot;
pub mod snapshot;
pub mod state_machine;
pub mod states;
pub mod table;
pub mod validator;

pub use betting::{Applied, BettingRound, BettingState, RoundStatus};
pub use deck::{Dealer, Deck};
pub use errors::GameError;
pub use events::GameEvent;
pub use functional::{HandRanker, StandardRanker};
pub use pot::{Award, Pot, PotAccountant, PotLayer};
pub use snapshot::{GameSnapshot, SnapshotError};
pub use state_machine::Game;
pub use states::{HandState, Phase};
pub use table::{Positions, Table};
pub use validator::DecisionPoint;
