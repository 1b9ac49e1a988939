use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Action, Blinds, Card, Chips, HandValue, PlayerId, SeatIndex, Street};

/// Events that occur during gameplay. The game appends these to an
/// outbound queue in order; whoever drains the queue decides what to do
/// with them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    GameStarted {
        players: Vec<PlayerId>,
    },
    HandStarted {
        hand_number: u32,
        button: SeatIndex,
        blinds: Blinds,
    },
    BlindPosted {
        seat: SeatIndex,
        player: PlayerId,
        amount: Chips,
    },
    StreetDealt {
        street: Street,
        board: Vec<Card>,
    },
    ActionApplied {
        seat: SeatIndex,
        player: PlayerId,
        action: Action,
        chips: Chips,
        table_bet: Chips,
    },
    StreetComplete {
        street: Street,
        pot: Chips,
    },
    ShowdownStarted {
        contenders: Vec<SeatIndex>,
    },
    CardsRevealed {
        seat: SeatIndex,
        player: PlayerId,
        cards: Vec<Card>,
        value: HandValue,
    },
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        player: PlayerId,
        amount: Chips,
    },
    HandComplete {
        hand_number: u32,
    },
    PlayerEliminated {
        player: PlayerId,
    },
    GameEnded {
        hands_played: u32,
    },
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::GameStarted { players } => format!("game started with {}", join(players)),
            Self::HandStarted {
                hand_number,
                button,
                blinds,
            } => format!("hand #{hand_number} started ({blinds}, button on #{button})"),
            Self::BlindPosted { player, amount, .. } => format!("{player} posts ${amount}"),
            Self::StreetDealt { street, board } => format!("{street}: {}", join(board)),
            Self::ActionApplied { player, action, .. } => format!("{player} {action}"),
            Self::StreetComplete { street, pot } => format!("{street} complete, pot ${pot}"),
            Self::ShowdownStarted { contenders } => {
                format!("showdown between {} players", contenders.len())
            }
            Self::CardsRevealed {
                player,
                cards,
                value,
                ..
            } => format!("{player} shows {} ({value})", join(cards)),
            Self::PotAwarded {
                pot_index,
                player,
                amount,
                ..
            } => match pot_index {
                0 => format!("{player} wins ${amount} from the main pot"),
                i => format!("{player} wins ${amount} from side pot {i}"),
            },
            Self::HandComplete { hand_number } => format!("hand #{hand_number} complete"),
            Self::PlayerEliminated { player } => format!("{player} is out of chips"),
            Self::GameEnded { hands_played } => format!("game over after {hands_played} hands"),
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    #[test]
    fn test_event_display() {
        let event = GameEvent::ActionApplied {
            seat: 0,
            player: "alice".into(),
            action: Action::Raise(40),
            chips: 40,
            table_bet: 40,
        };
        assert_eq!(event.to_string(), "alice raises by $40");

        let event = GameEvent::StreetDealt {
            street: Street::Flop,
            board: vec![Card(14, Suit::Spade), Card(2, Suit::Club), Card(7, Suit::Heart)],
        };
        assert_eq!(event.to_string(), "flop: A♠ 2♣ 7♥");

        let event = GameEvent::PotAwarded {
            pot_index: 1,
            seat: 2,
            player: "bob".into(),
            amount: 200,
        };
        assert_eq!(event.to_string(), "bob wins $200 from side pot 1");
    }

    #[test]
    fn test_event_json_round_trip() {
        let event = GameEvent::HandStarted {
            hand_number: 3,
            button: 1,
            blinds: Blinds { small: 10, big: 20 },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<GameEvent>(&json).unwrap(), event);
    }
}
