//! Reference bots for driving games in tests and demos.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::decision::{DecisionContext, Strategy};
use crate::game::entities::Action;

/// Folds every time it's asked.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FoldBot;

impl Strategy for FoldBot {
    fn decide(&mut self, _ctx: &DecisionContext) -> Action {
        Action::Fold
    }
}

/// Never puts in a raise: checks when it can, calls otherwise.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CallBot;

impl Strategy for CallBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Action {
        [Action::Check, Action::Call]
            .into_iter()
            .find(|action| ctx.can(action))
            .unwrap_or(Action::Fold)
    }
}

/// Min-raises whenever it can, opens for two big blinds, and otherwise
/// calls along.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggressiveBot;

impl Strategy for AggressiveBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Action {
        let point = &ctx.point;
        let raise = Action::Raise(point.min_raise_by_amount.min(point.stack));
        let bet = Action::Bet((2 * ctx.big_blind).max(point.min_bet_amount).min(point.stack));
        [raise, bet, Action::Call, Action::Check]
            .into_iter()
            .find(|action| ctx.can(action))
            .unwrap_or(Action::Fold)
    }
}

/// Plays back a fixed list of actions, one per decision, then folds.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScriptedBot {
    script: VecDeque<Action>,
}

impl ScriptedBot {
    pub fn new<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        Self {
            script: actions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Strategy for ScriptedBot {
    fn decide(&mut self, _ctx: &DecisionContext) -> Action {
        self.script.pop_front().unwrap_or(Action::Fold)
    }
}

#[enum_dispatch(Strategy)]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Bot {
    FoldBot,
    CallBot,
    AggressiveBot,
    ScriptedBot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        entities::{ActionChoice, ActionChoices, Street},
        validator::DecisionPoint,
    };

    fn ctx(legal: &[ActionChoice], stack: u32) -> DecisionContext {
        DecisionContext {
            point: DecisionPoint {
                seat: 0,
                player: "bot".into(),
                street: Street::Flop,
                legal: ActionChoices::from(legal.iter().cloned()),
                call_amount: 20,
                min_bet_amount: 20,
                min_raise_by_amount: 40,
                stack,
            },
            hand_number: 1,
            hole: Vec::new(),
            board: Vec::new(),
            pot: 60,
            table_bet: 20,
            big_blind: 20,
        }
    }

    #[test]
    fn test_fold_bot() {
        let mut bot = Bot::from(FoldBot);
        let ctx = ctx(&[ActionChoice::Check, ActionChoice::Fold], 100);
        assert_eq!(bot.decide(&ctx), Action::Fold);
    }

    #[test]
    fn test_call_bot_prefers_check() {
        let mut bot = Bot::from(CallBot);
        let checkable = ctx(&[ActionChoice::Check, ActionChoice::Fold], 100);
        assert_eq!(bot.decide(&checkable), Action::Check);
        let facing_bet = ctx(&[ActionChoice::Call(20), ActionChoice::Fold], 100);
        assert_eq!(bot.decide(&facing_bet), Action::Call);
    }

    #[test]
    fn test_aggressive_bot_min_raises() {
        let mut bot = Bot::from(AggressiveBot);
        let legal = [
            ActionChoice::Call(20),
            ActionChoice::Raise(40),
            ActionChoice::Fold,
        ];
        assert_eq!(bot.decide(&ctx(&legal, 100)), Action::Raise(40));
        // Short stacks shove instead.
        assert_eq!(bot.decide(&ctx(&legal, 30)), Action::Raise(30));
    }

    #[test]
    fn test_aggressive_bot_opens_two_big_blinds() {
        let mut bot = Bot::from(AggressiveBot);
        let legal = [ActionChoice::Check, ActionChoice::Bet(20), ActionChoice::Fold];
        assert_eq!(bot.decide(&ctx(&legal, 100)), Action::Bet(40));
    }

    #[test]
    fn test_aggressive_bot_calls_when_raise_closed() {
        let mut bot = Bot::from(AggressiveBot);
        let legal = [ActionChoice::Call(10), ActionChoice::Fold];
        assert_eq!(bot.decide(&ctx(&legal, 100)), Action::Call);
    }

    #[test]
    fn test_scripted_bot_defaults_to_fold() {
        let mut bot = ScriptedBot::new([Action::Call, Action::Raise(60)]);
        let ctx = ctx(&[ActionChoice::Call(20), ActionChoice::Fold], 100);
        assert_eq!(bot.decide(&ctx), Action::Call);
        assert_eq!(bot.decide(&ctx), Action::Raise(60));
        assert_eq!(bot.remaining(), 0);
        assert_eq!(bot.decide(&ctx), Action::Fold);
    }
}
