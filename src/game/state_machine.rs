//! Hand and game sequencing.
//!
//! [`Game`] owns the table, the collaborators that deal and rank cards, and
//! the hand in progress. It can be driven one action at a time through
//! [`Game::decision`] and [`Game::act`], or handed a set of strategies and
//! left to play whole hands with [`Game::play_hand`] and [`Game::run`].

use log::{debug, info, warn};
use rand::{Rng, rngs::StdRng};
use std::{
    collections::{BTreeMap, VecDeque},
    fmt, mem,
};

use super::{
    betting::{Applied, BettingRound},
    constants::{BOARD_CARDS, BURN_CARDS, HOLE_CARDS, POSTFLOP_STREETS},
    deck::{Dealer, Deck, seeded_rng},
    entities::{Action, Card, Chips, Player, PlayerId, SeatIndex},
    errors::GameError,
    events::GameEvent,
    functional::{HandRanker, StandardRanker},
    pot::{self, PotAccountant},
    states::{HandState, Phase},
    table::{Positions, Table, clockwise, index_of},
    validator::DecisionPoint,
};
use crate::{
    bot::{DecisionContext, Strategies},
    config::{ConfigError, GameSettings},
};

pub struct Game {
    pub(crate) settings: GameSettings,
    pub(crate) table: Table,
    pub(crate) dealer: Box<dyn Dealer>,
    pub(crate) ranker: Box<dyn HandRanker>,
    pub(crate) phase: Phase,
    pub(crate) hand: Option<HandState>,
    pub(crate) hands_played: u32,
    pub(crate) started: bool,
    /// Outbound event log, oldest first.
    pub(crate) events: VecDeque<GameEvent>,
    pub(crate) rng: StdRng,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("settings", &self.settings)
            .field("table", &self.table)
            .field("phase", &self.phase)
            .field("hand", &self.hand)
            .field("hands_played", &self.hands_played)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// A game with a standard deck and the stock hand evaluator.
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            table: Table::new(settings.max_players),
            dealer: Box::new(Deck::new(settings.seed)),
            ranker: Box::new(StandardRanker),
            phase: Phase::WaitingForPlayers,
            hand: None,
            hands_played: 0,
            started: false,
            events: VecDeque::new(),
            rng: seeded_rng(settings.seed),
            settings,
        })
    }

    #[must_use]
    pub fn with_dealer(mut self, dealer: impl Dealer + 'static) -> Self {
        self.dealer = Box::new(dealer);
        self
    }

    #[must_use]
    pub fn with_ranker(mut self, ranker: impl HandRanker + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn hand(&self) -> Option<&HandState> {
        self.hand.as_ref()
    }

    #[must_use]
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        self.hand.as_ref().map_or(&[], |hand| hand.board.as_slice())
    }

    /// Chips committed to the hand in progress.
    #[must_use]
    pub fn pot_total(&self) -> Chips {
        self.hand.as_ref().map_or(0, |hand| hand.pot.total())
    }

    /// Seat whose action the game is waiting on.
    #[must_use]
    pub fn to_act(&self) -> Option<SeatIndex> {
        self.hand.as_ref().and_then(|hand| hand.round.to_act())
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    fn refresh_readiness(&mut self) {
        if matches!(self.phase, Phase::WaitingForPlayers | Phase::Ready) {
            self.phase = if self.table.funded_seats().len() >= self.settings.min_players {
                Phase::Ready
            } else {
                Phase::WaitingForPlayers
            };
        }
    }

    /// Seat a player at the lowest open seat. Only between hands.
    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        stack: Chips,
    ) -> Result<SeatIndex, GameError> {
        if !self.phase.can_change_seats() {
            return Err(GameError::state("seat a player", self.phase));
        }
        let seat = self.table.seat_player(id.into(), stack)?;
        self.refresh_readiness();
        Ok(seat)
    }

    /// Remove a player from the table. Only between hands.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        if !self.phase.can_change_seats() {
            return Err(GameError::state("remove a player", self.phase));
        }
        let player = self.table.unseat(id)?;
        info!("{id} left the table with ${}", player.stack);
        if self.phase == Phase::HandComplete
            && self.table.funded_seats().len() < self.settings.min_players
        {
            self.phase = Phase::WaitingForPlayers;
        }
        self.refresh_readiness();
        Ok(player)
    }

    fn place_first_button(&mut self) -> Result<SeatIndex, GameError> {
        let seat = match self.settings.first_button {
            Some(seat) => seat,
            None => {
                let funded = self.table.funded_seats();
                funded[self.rng.random_range(0..funded.len())]
            }
        };
        self.table.place_button(seat)?;
        Ok(seat)
    }

    /// Place the button and deal hole cards into a holding map. Players
    /// aren't touched, so on error only the button needs putting back.
    fn prepare_hand(&mut self) -> Result<(Positions, BTreeMap<SeatIndex, Vec<Card>>), GameError> {
        match self.table.button() {
            None => {
                self.place_first_button()?;
            }
            Some(seat) if self.table.player(seat).is_none_or(|p| p.stack == 0) => {
                self.table.advance_button()?;
            }
            Some(_) => {}
        }
        let positions = self.table.positions()?;

        // One card at a time, starting left of the button. Seats without
        // chips sit the hand out.
        let order: Vec<SeatIndex> = clockwise(self.table.players(), positions.button, false)
            .filter(|p| p.stack > 0)
            .map(|p| p.seat)
            .collect();
        self.dealer.shuffle();
        // Enough for every hole card plus a full run-out with burns.
        let requested = HOLE_CARDS * order.len() + BOARD_CARDS + BURN_CARDS * POSTFLOP_STREETS;
        let remaining = self.dealer.remaining();
        if remaining < requested {
            return Err(GameError::DeckExhausted {
                requested,
                remaining,
            });
        }
        let mut hole: BTreeMap<SeatIndex, Vec<Card>> = BTreeMap::new();
        for _ in 0..HOLE_CARDS {
            for &seat in &order {
                let cards = self.dealer.deal(1)?;
                hole.entry(seat).or_default().extend(cards);
            }
        }
        Ok((positions, hole))
    }

    /// Shuffle, post blinds, deal hole cards, and open preflop betting.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if !self.phase.can_start_hand() {
            return Err(GameError::state("start a hand", self.phase));
        }
        let funded = self.table.funded_seats().len();
        if funded < self.settings.min_players.max(2) {
            return Err(GameError::InsufficientPlayers { funded });
        }

        let button = self.table.button();
        let (positions, mut hole) = match self.prepare_hand() {
            Ok(prepared) => prepared,
            Err(err) => {
                self.table.restore_button(button);
                return Err(err);
            }
        };

        if !self.started {
            self.started = true;
            let players = self.table.players().iter().map(|p| p.id.clone()).collect();
            self.emit(GameEvent::GameStarted { players });
        }
        self.hands_played += 1;
        let hand_number = self.hands_played;
        for player in self.table.players_mut() {
            player.reset_hand();
            if let Some(cards) = hole.remove(&player.seat) {
                player.cards = cards;
            }
        }

        let blinds = self.settings.blinds();
        info!("hand #{hand_number}: {positions}, blinds {blinds}");
        self.emit(GameEvent::HandStarted {
            hand_number,
            button: positions.button,
            blinds: blinds.clone(),
        });

        let mut pot = PotAccountant::new();
        for (seat, amount) in [
            (positions.small_blind, blinds.small),
            (positions.big_blind, blinds.big),
        ] {
            let posted = BettingRound::post_forced(self.table.players_mut(), &mut pot, seat, amount)?;
            let player = self
                .table
                .player(seat)
                .map(|p| p.id.clone())
                .ok_or(GameError::UnknownSeat(seat))?;
            debug!("{player} posts ${posted}");
            self.emit(GameEvent::BlindPosted {
                seat,
                player,
                amount: posted,
            });
        }

        let round = BettingRound::open_preflop(
            blinds.big,
            self.table.players(),
            positions.first_preflop,
        );
        self.phase = Phase::Betting(round.state().street);
        self.hand = Some(HandState {
            hand_number,
            positions,
            board: Vec::with_capacity(BOARD_CARDS),
            round,
            pot,
        });
        self.advance()
    }

    fn betting_hand(&self, operation: &str) -> Result<&HandState, GameError> {
        match (self.phase, self.hand.as_ref()) {
            (Phase::Betting(_), Some(hand)) => Ok(hand),
            _ => Err(GameError::state(operation, self.phase)),
        }
    }

    /// Legal actions and bounds for the seat to act.
    pub fn decision(&self) -> Result<DecisionPoint, GameError> {
        self.betting_hand("ask for a decision")?
            .round
            .decision(self.table.players())
    }

    /// The decision point plus the cards and pot the seat to act can see.
    pub fn decision_context(&self) -> Result<DecisionContext, GameError> {
        let hand = self.betting_hand("ask for a decision")?;
        let point = hand.round.decision(self.table.players())?;
        let hole = self
            .table
            .player(point.seat)
            .map(|p| p.cards.clone())
            .unwrap_or_default();
        Ok(DecisionContext {
            hand_number: hand.hand_number,
            hole,
            board: hand.board.clone(),
            pot: hand.pot.total(),
            table_bet: hand.round.state().table_bet,
            big_blind: self.settings.big_blind,
            point,
        })
    }

    /// Submit an action for `seat`. A rejected action changes nothing. If
    /// the dealer fails while dealing the next street, the action stands
    /// and the completed street stays open.
    pub fn act(&mut self, seat: SeatIndex, action: Action) -> Result<Applied, GameError> {
        let hand = match (self.phase, self.hand.as_mut()) {
            (Phase::Betting(_), Some(hand)) => hand,
            _ => return Err(GameError::state("act", self.phase)),
        };
        let applied = hand
            .round
            .apply(self.table.players_mut(), &mut hand.pot, seat, &action)?;

        let player = self
            .table
            .player(seat)
            .map(|p| p.id.clone())
            .ok_or(GameError::UnknownSeat(seat))?;
        info!("{player} {action}");
        self.emit(GameEvent::ActionApplied {
            seat,
            player,
            action,
            chips: applied.chips,
            table_bet: applied.table_bet,
        });
        self.advance()?;
        Ok(applied)
    }

    /// Move through every street that has no betting left: close it, deal
    /// the next one, and finish the hand after the river or once a single
    /// player remains.
    fn advance(&mut self) -> Result<(), GameError> {
        loop {
            let Some(hand) = self.hand.as_mut() else {
                return Ok(());
            };
            if !hand.round.is_complete() {
                return Ok(());
            }

            let street = hand.round.state().street;
            let live = self.table.players().iter().filter(|p| p.is_live()).count();
            // Deal before closing the street so a failed deal leaves it open.
            let dealt = match street.next() {
                Some(next) if live > 1 => {
                    self.dealer.deal(BURN_CARDS)?;
                    Some((next, self.dealer.deal(next.board_cards())?))
                }
                _ => None,
            };

            self.events.push_back(GameEvent::StreetComplete {
                street,
                pot: hand.pot.total(),
            });
            hand.pot.end_street();
            for player in self.table.players_mut() {
                player.reset_street();
            }
            let Some((next, cards)) = dealt else {
                return self.finish_hand(live > 1);
            };
            hand.board.extend(cards);
            info!("{next}: {}", fmt_cards(&hand.board));
            self.events.push_back(GameEvent::StreetDealt {
                street: next,
                board: hand.board.clone(),
            });

            hand.round = BettingRound::open(
                next,
                self.settings.big_blind,
                self.table.players(),
                hand.positions.first_to_act(next),
            );
            self.phase = Phase::Betting(next);
        }
    }

    fn finish_hand(&mut self, showdown: bool) -> Result<(), GameError> {
        let Some(hand) = self.hand.take() else {
            return Err(GameError::state("finish a hand", self.phase));
        };
        let partition = hand.pot.build(self.table.players());

        if showdown {
            let contenders: Vec<SeatIndex> =
                clockwise(self.table.players(), hand.positions.button, false)
                    .filter(|p| p.is_live())
                    .map(|p| p.seat)
                    .collect();
            self.emit(GameEvent::ShowdownStarted {
                contenders: contenders.clone(),
            });
            for seat in contenders {
                let Some(player) = self.table.player(seat) else {
                    continue;
                };
                let value = self.ranker.rank(&player.cards, &hand.board);
                info!("{} shows {} ({value})", player.id, fmt_cards(&player.cards));
                let event = GameEvent::CardsRevealed {
                    seat,
                    player: player.id.clone(),
                    cards: player.cards.clone(),
                    value,
                };
                self.emit(event);
            }
        }

        let awards = pot::award(
            &partition,
            self.table.players(),
            &hand.board,
            self.ranker.as_ref(),
            hand.positions.button,
            self.settings.chip_unit,
        );
        for award in awards {
            let idx = index_of(self.table.players(), award.seat)
                .ok_or(GameError::UnknownSeat(award.seat))?;
            let player = &mut self.table.players_mut()[idx];
            player.stack += award.amount;
            let id = player.id.clone();
            info!("{id} wins ${}", award.amount);
            self.emit(GameEvent::PotAwarded {
                pot_index: award.pot_index,
                seat: award.seat,
                player: id,
                amount: award.amount,
            });
        }
        for player in self.table.players_mut() {
            player.reset_hand();
        }
        self.emit(GameEvent::HandComplete {
            hand_number: hand.hand_number,
        });

        let broke: Vec<PlayerId> = self
            .table
            .players()
            .iter()
            .filter(|p| p.stack == 0)
            .map(|p| p.id.clone())
            .collect();
        for id in broke {
            self.table.unseat(&id)?;
            info!("{id} is eliminated");
            self.emit(GameEvent::PlayerEliminated { player: id });
        }

        let funded = self.table.funded_seats().len();
        if funded < self.settings.min_players || self.hands_played >= self.settings.max_hands {
            info!("game over after {} hands", self.hands_played);
            self.phase = Phase::GameOver;
            self.emit(GameEvent::GameEnded {
                hands_played: self.hands_played,
            });
        } else {
            self.table.advance_button()?;
            self.phase = Phase::HandComplete;
        }
        Ok(())
    }

    /// Play one hand to completion, asking each seat's strategy for its
    /// actions. A missing strategy or an illegal answer is logged and
    /// replaced with a fold.
    pub fn play_hand(&mut self, strategies: &mut Strategies) -> Result<(), GameError> {
        self.start_hand()?;
        while matches!(self.phase, Phase::Betting(_)) {
            let ctx = self.decision_context()?;
            let seat = ctx.point.seat;
            let action = match strategies.get_mut(&ctx.point.player) {
                Some(strategy) => strategy.decide(&ctx),
                None => {
                    warn!("no strategy for {}, folding", ctx.point.player);
                    Action::Fold
                }
            };
            if let Err(err) = self.act(seat, action.clone()) {
                warn!(
                    "{} submitted {action:?} ({err}), folding instead",
                    ctx.point.player
                );
                self.act(seat, Action::Fold)?;
            }
        }
        Ok(())
    }

    /// Play hands until the game is over. Returns the number of hands
    /// played in total.
    pub fn run(&mut self, strategies: &mut Strategies) -> Result<u32, GameError> {
        while self.phase.can_start_hand() {
            self.play_hand(strategies)?;
        }
        match self.phase {
            Phase::GameOver => Ok(self.hands_played),
            Phase::WaitingForPlayers => Err(GameError::InsufficientPlayers {
                funded: self.table.funded_seats().len(),
            }),
            phase => Err(GameError::state("run the game", phase)),
        }
    }
}

fn fmt_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
