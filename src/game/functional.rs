//! Hand ranking.
//!
//! The hand engine only ever compares [`HandValue`]s through the
//! [`HandRanker`] trait, so any evaluator can be swapped in. [`eval`] is the
//! stock one.

use std::collections::BTreeMap;

use super::entities::{Card, HandValue, Rank, Suit, Value};

/// Ranks a player's best five-card hand from their hole cards and the
/// board. Equal return values are ties.
pub trait HandRanker {
    fn rank(&self, hole: &[Card], board: &[Card]) -> HandValue;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn rank(&self, hole: &[Card], board: &[Card]) -> HandValue {
        let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
        eval(&cards)
    }
}

/// Highest card of the best straight within `values`, counting the ace
/// low for the wheel.
fn straight_high(values: &[Value]) -> Option<Value> {
    let mut present = [false; 15];
    for &value in values {
        present[usize::from(value)] = true;
    }
    present[1] = present[14];
    (5..=14u8)
        .rev()
        .find(|&high| (high - 4..=high).all(|v| present[usize::from(v)]))
}

/// The best hand among any number of cards (typically 5 to 7). With fewer
/// than five cards, the kickers are simply shorter.
#[must_use]
pub fn eval(cards: &[Card]) -> HandValue {
    let mut by_suit: BTreeMap<Suit, Vec<Value>> = BTreeMap::new();
    let mut counts = [0u8; 15];
    for card in cards {
        by_suit.entry(card.1).or_default().push(card.0);
        counts[usize::from(card.0)] += 1;
    }

    let flush = by_suit.into_values().find(|values| values.len() >= 5).map(|mut values| {
        values.sort_unstable_by(|a, b| b.cmp(a));
        values
    });

    if let Some(high) = flush.as_deref().and_then(straight_high) {
        return HandValue {
            rank: Rank::StraightFlush,
            values: vec![high],
        };
    }

    // Present values, high to low.
    let distinct: Vec<Value> = (2..=14u8)
        .rev()
        .filter(|&v| counts[usize::from(v)] > 0)
        .collect();
    let with_count = |n: u8| -> Vec<Value> {
        distinct
            .iter()
            .copied()
            .filter(|&v| counts[usize::from(v)] == n)
            .collect()
    };
    let kickers = |exclude: &[Value], n: usize| -> Vec<Value> {
        distinct
            .iter()
            .copied()
            .filter(|v| !exclude.contains(v))
            .take(n)
            .collect()
    };

    if let Some(&quad) = with_count(4).first() {
        let mut values = vec![quad];
        values.extend(kickers(&[quad], 1));
        return HandValue {
            rank: Rank::FourOfAKind,
            values,
        };
    }

    let trips = with_count(3);
    let pairs = with_count(2);

    if let Some(&trip) = trips.first() {
        // A second set of trips plays as the pair.
        let pair = trips.iter().skip(1).chain(&pairs).max().copied();
        if let Some(pair) = pair {
            return HandValue {
                rank: Rank::FullHouse,
                values: vec![trip, pair],
            };
        }
    }

    if let Some(mut values) = flush {
        values.truncate(5);
        return HandValue {
            rank: Rank::Flush,
            values,
        };
    }

    if let Some(high) = straight_high(&distinct) {
        return HandValue {
            rank: Rank::Straight,
            values: vec![high],
        };
    }

    if let Some(&trip) = trips.first() {
        let mut values = vec![trip];
        values.extend(kickers(&[trip], 2));
        return HandValue {
            rank: Rank::ThreeOfAKind,
            values,
        };
    }

    match pairs.as_slice() {
        [high, low, ..] => {
            let mut values = vec![*high, *low];
            values.extend(kickers(&[*high, *low], 1));
            HandValue {
                rank: Rank::TwoPair,
                values,
            }
        }
        [pair] => {
            let mut values = vec![*pair];
            values.extend(kickers(&[*pair], 3));
            HandValue {
                rank: Rank::OnePair,
                values,
            }
        }
        [] => HandValue {
            rank: Rank::HighCard,
            values: kickers(&[], 5),
        },
    }
}

/// Indices of the maximal values, in input order. More than one index
/// means a tie.
#[must_use]
pub fn argmax<T: Ord>(values: &[T]) -> Vec<usize> {
    let Some(best) = values.iter().max() else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| *value == best)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(repr: &str) -> Vec<Card> {
        repr.split_whitespace()
            .map(|s| {
                let (value, suit) = s.split_at(s.len() - 1);
                let value = match value {
                    "A" => 14,
                    "K" => 13,
                    "Q" => 12,
                    "J" => 11,
                    "T" => 10,
                    v => v.parse().unwrap(),
                };
                let suit = match suit {
                    "c" => Suit::Club,
                    "s" => Suit::Spade,
                    "d" => Suit::Diamond,
                    _ => Suit::Heart,
                };
                Card(value, suit)
            })
            .collect()
    }

    #[test]
    fn test_high_card() {
        let hand = eval(&cards("2c 5d 9h Js Kc 3d 7h"));
        assert_eq!(hand.rank, Rank::HighCard);
        assert_eq!(hand.values, vec![13, 11, 9, 7, 5]);
    }

    #[test]
    fn test_one_pair_kickers() {
        let hand = eval(&cards("9c 9d Ah Js 4c 3d 2h"));
        assert_eq!(hand.rank, Rank::OnePair);
        assert_eq!(hand.values, vec![9, 14, 11, 4]);
    }

    #[test]
    fn test_two_pair_uses_best_two() {
        let hand = eval(&cards("9c 9d 5h 5s 4c 4d Ah"));
        assert_eq!(hand.rank, Rank::TwoPair);
        assert_eq!(hand.values, vec![9, 5, 14]);
    }

    #[test]
    fn test_two_pair_third_pair_can_kick() {
        let hand = eval(&cards("9c 9d 5h 5s 4c 4d 2h"));
        assert_eq!(hand.values, vec![9, 5, 4]);
    }

    #[test]
    fn test_three_of_a_kind() {
        let hand = eval(&cards("7c 7d 7h Ks 2c 3d 9h"));
        assert_eq!(hand.rank, Rank::ThreeOfAKind);
        assert_eq!(hand.values, vec![7, 13, 9]);
    }

    #[test]
    fn test_wheel_straight() {
        let hand = eval(&cards("Ac 2d 3h 4s 5c Kd Kh"));
        assert_eq!(hand.rank, Rank::Straight);
        assert_eq!(hand.values, vec![5]);
    }

    #[test]
    fn test_broadway_straight() {
        let hand = eval(&cards("Ac Kd Qh Js Tc 2d 3h"));
        assert_eq!(hand.rank, Rank::Straight);
        assert_eq!(hand.values, vec![14]);
    }

    #[test]
    fn test_flush_takes_top_five() {
        let hand = eval(&cards("Ah 2h 5h 9h Jh Kh 3c"));
        assert_eq!(hand.rank, Rank::Flush);
        assert_eq!(hand.values, vec![14, 13, 11, 9, 5]);
    }

    #[test]
    fn test_full_house_from_two_trips() {
        let hand = eval(&cards("8c 8d 8h 4s 4c 4d Ah"));
        assert_eq!(hand.rank, Rank::FullHouse);
        assert_eq!(hand.values, vec![8, 4]);
    }

    #[test]
    fn test_full_house_beats_flush() {
        let hand = eval(&cards("8h 8d 8c 4h 4d 2h Ah 3h"));
        assert_eq!(hand.rank, Rank::FullHouse);
    }

    #[test]
    fn test_quads_kicker_ignores_group_size() {
        let hand = eval(&cards("Qc Qd Qh Qs 3c 3d Ah"));
        assert_eq!(hand.values, vec![12, 14]);
    }

    #[test]
    fn test_four_of_a_kind() {
        let hand = eval(&cards("Qc Qd Qh Qs 2c 3d Ah"));
        assert_eq!(hand.rank, Rank::FourOfAKind);
        assert_eq!(hand.values, vec![12, 14]);
    }

    #[test]
    fn test_straight_flush_over_higher_straight() {
        let hand = eval(&cards("5s 6s 7s 8s 9s Tc"));
        assert_eq!(hand.rank, Rank::StraightFlush);
        assert_eq!(hand.values, vec![9]);
    }

    #[test]
    fn test_steel_wheel() {
        let hand = eval(&cards("As 2s 3s 4s 5s Kd"));
        assert_eq!(hand.rank, Rank::StraightFlush);
        assert_eq!(hand.values, vec![5]);
    }

    #[test]
    fn test_board_plays_is_a_tie() {
        let board = cards("Ac Kd Qh Js Tc");
        let ranker = StandardRanker;
        let a = ranker.rank(&cards("2c 3d"), &board);
        let b = ranker.rank(&cards("4h 5s"), &board);
        assert_eq!(a, b);
        assert_eq!(argmax(&[a, b]), vec![0, 1]);
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[1, 3, 2, 3]), vec![1, 3]);
        assert_eq!(argmax::<u8>(&[]), Vec::<usize>::new());
    }
}
