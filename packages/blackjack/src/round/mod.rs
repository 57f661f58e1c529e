use crate::io::{Console, KeyPress, Status, TableView};
use crate::rules::DEALER_STANDS_ON;
use crate::{Card, CountStatistics, GameError, Hand, Role, Shoe, TableRules};
use serde::{Deserialize, Serialize};

/// Frames in the shuffle progress animation
pub const SHUFFLE_ANIMATION_STEPS: u32 = 30;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    Dealing,
    /// Waiting on the player's keypress
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// How a completed round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerBlackjack,
    BlackjackPush,
    DealerBlackjack,
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Settled(RoundOutcome),
    /// Player quit mid-round; nothing was recorded
    Quit,
}

/// Player decision keys: h, s, q, and x for a manual reshuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Hit,
    Stand,
    Quit,
    ForceReshuffle,
    Unrecognized,
}

impl From<KeyPress> for PlayerAction {
    fn from(key: KeyPress) -> Self {
        match key {
            KeyPress::Exit => PlayerAction::Quit,
            KeyPress::Char(c) => match c.to_ascii_lowercase() {
                'h' => PlayerAction::Hit,
                's' => PlayerAction::Stand,
                'q' => PlayerAction::Quit,
                'x' => PlayerAction::ForceReshuffle,
                _ => PlayerAction::Unrecognized,
            },
        }
    }
}

/// Answer to the play-again prompt: y or h replays, q quits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayChoice {
    PlayAgain,
    Quit,
    Invalid,
}

impl From<KeyPress> for ReplayChoice {
    fn from(key: KeyPress) -> Self {
        match key {
            KeyPress::Exit => ReplayChoice::Quit,
            KeyPress::Char(c) => match c.to_ascii_lowercase() {
                'y' | 'h' => ReplayChoice::PlayAgain,
                'q' => ReplayChoice::Quit,
                _ => ReplayChoice::Invalid,
            },
        }
    }
}

enum PlayerTurnEnd {
    Stand,
    Bust,
    Quit,
}

enum DealerTurnEnd {
    Stand,
    Bust,
}

/// Owns the shoe, the count and both hands for the whole session, and plays rounds against a `Console`.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    shoe: Shoe,
    stats: CountStatistics,
    rules: TableRules,
    player_hand: Hand,
    dealer_hand: Hand,
    phase: RoundPhase,
    last_result: Option<RoundOutcome>,
}

impl RoundEngine {
    pub fn new(rules: TableRules) -> Result<Self, GameError> {
        let shoe = Shoe::new(rules.num_decks)?;
        Ok(Self::with_shoe(shoe, rules))
    }

    /// Start from a prepared shoe. Its deck count wins over `rules.num_decks`.
    pub fn with_shoe(shoe: Shoe, rules: TableRules) -> Self {
        let rules = TableRules {
            num_decks: shoe.num_decks(),
            ..rules
        };
        Self {
            shoe,
            stats: CountStatistics::new(),
            rules,
            player_hand: Hand::new(Role::Player),
            dealer_hand: Hand::new(Role::Dealer),
            phase: RoundPhase::Idle,
            last_result: None,
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn stats(&self) -> &CountStatistics {
        &self.stats
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn last_result(&self) -> Option<RoundOutcome> {
        self.last_result
    }

    pub fn true_count(&self) -> i32 {
        self.stats.true_count(self.shoe.decks_remaining())
    }

    pub fn view(&self) -> TableView {
        TableView {
            remaining_cards: self.shoe.remaining_count(),
            total_cards: self.shoe.total_count(),
            decks_remaining: self.shoe.decks_remaining(),
            true_count: self.true_count(),
            stats: self.stats.clone(),
            player_hand: self.player_hand.clone(),
            dealer_hand: self.dealer_hand.clone(),
            phase: self.phase,
            last_result: self.last_result,
        }
    }

    fn show<C: Console>(&self, console: &mut C, status: Status) {
        console.render(&self.view(), &status);
    }

    /// Draw one card into a hand and count it. Every dealt card goes through here.
    fn deal_to(&mut self, role: Role) -> Result<Card, GameError> {
        let card = self.shoe.draw()?;
        self.stats.record_card_seen(&card);
        match role {
            Role::Player => self.player_hand.add_card(card),
            Role::Dealer => self.dealer_hand.add_card(card),
        }
        log::debug!("{role:?} dealt {card}, running count {}", self.stats.running_count);
        Ok(card)
    }

    /// Animate, rebuild the shoe and zero the running count. Hands are left alone.
    pub fn reshuffle<C: Console>(&mut self, console: &mut C, manual: bool) {
        if manual {
            log::info!(
                "Manual reshuffle with {} of {} cards left",
                self.shoe.remaining_count(),
                self.shoe.total_count()
            );
        } else {
            log::info!(
                "Penetration reached ({} of {} cards left), reshuffling",
                self.shoe.remaining_count(),
                self.shoe.total_count()
            );
        }

        let pacing = self.rules.pacing;
        for step in 0..=SHUFFLE_ANIMATION_STEPS {
            self.show(
                console,
                Status::Shuffling {
                    manual,
                    step,
                    total: SHUFFLE_ANIMATION_STEPS,
                },
            );
            console.pause(pacing.shuffle_frame);
        }
        console.pause(pacing.shuffle_tail);

        self.shoe.reset();
        self.stats.reset_count();
        self.last_result = None;
    }

    /// Play one full round: reshuffle check, deal, blackjack check, player, dealer, settlement.
    pub fn play_round<C: Console>(&mut self, console: &mut C) -> Result<RoundEnd, GameError> {
        self.phase = RoundPhase::Idle;
        if self.shoe.needs_reshuffle() {
            self.reshuffle(console, false);
        }

        self.phase = RoundPhase::Dealing;
        self.player_hand = Hand::new(Role::Player);
        self.dealer_hand = Hand::new(Role::Dealer);
        for role in [Role::Player, Role::Dealer, Role::Player, Role::Dealer] {
            self.deal_to(role)?;
        }

        if let Some(outcome) = self.blackjack_outcome() {
            return Ok(RoundEnd::Settled(self.settle(console, outcome)));
        }

        self.phase = RoundPhase::PlayerTurn;
        match self.player_turn(console)? {
            PlayerTurnEnd::Quit => {
                log::info!("Player quit mid-round");
                self.phase = RoundPhase::Idle;
                return Ok(RoundEnd::Quit);
            }
            PlayerTurnEnd::Bust => {
                return Ok(RoundEnd::Settled(self.settle(console, RoundOutcome::PlayerBust)));
            }
            PlayerTurnEnd::Stand => {}
        }

        self.phase = RoundPhase::DealerTurn;
        let outcome = match self.dealer_turn(console)? {
            DealerTurnEnd::Bust => RoundOutcome::DealerBust,
            DealerTurnEnd::Stand => self.determine_winner(),
        };
        Ok(RoundEnd::Settled(self.settle(console, outcome)))
    }

    /// Natural blackjacks straight after the deal. A player blackjack against a dealer blackjack is a push.
    pub fn blackjack_outcome(&self) -> Option<RoundOutcome> {
        match (self.player_hand.is_blackjack(), self.dealer_hand.is_blackjack()) {
            (true, true) => Some(RoundOutcome::BlackjackPush),
            (true, false) => Some(RoundOutcome::PlayerBlackjack),
            (false, true) => Some(RoundOutcome::DealerBlackjack),
            (false, false) => None,
        }
    }

    fn player_turn<C: Console>(&mut self, console: &mut C) -> Result<PlayerTurnEnd, GameError> {
        let pacing = self.rules.pacing;

        loop {
            let value = self.player_hand.value();

            if value > 21 {
                self.phase = RoundPhase::Settled;
                self.show(console, Status::PlayerBusts);
                console.pause(pacing.player_result);
                return Ok(PlayerTurnEnd::Bust);
            }

            if value == 21 {
                self.phase = RoundPhase::DealerTurn;
                self.show(console, Status::PlayerHas21);
                console.pause(pacing.player_result);
                return Ok(PlayerTurnEnd::Stand);
            }

            self.show(console, Status::AwaitingAction);

            match PlayerAction::from(console.next_key()?) {
                PlayerAction::Hit => {
                    let card = self.deal_to(Role::Player)?;
                    self.show(console, Status::PlayerDrew(card));
                    console.pause(pacing.player_draw);
                }
                PlayerAction::Stand => return Ok(PlayerTurnEnd::Stand),
                PlayerAction::Quit => return Ok(PlayerTurnEnd::Quit),
                PlayerAction::ForceReshuffle => {
                    self.show(console, Status::ManualShuffleRequested);
                    console.pause(pacing.manual_shuffle);
                    self.reshuffle(console, true);
                    self.show(console, Status::ShuffleComplete);
                    console.pause(pacing.shuffle_done);
                }
                PlayerAction::Unrecognized => {}
            }
        }
    }

    fn dealer_turn<C: Console>(&mut self, console: &mut C) -> Result<DealerTurnEnd, GameError> {
        let pacing = self.rules.pacing;

        self.show(console, Status::DealerTurn);
        console.pause(pacing.dealer_turn);

        while self.dealer_hand.value() < DEALER_STANDS_ON {
            let card = self.deal_to(Role::Dealer)?;
            self.show(console, Status::DealerDraws(card));
            console.pause(pacing.dealer_draw);
        }

        let value = self.dealer_hand.value();
        if value > 21 {
            log::info!("Dealer busts with {value}");
            self.show(console, Status::DealerBusts);
            console.pause(pacing.dealer_result);
            return Ok(DealerTurnEnd::Bust);
        }

        log::info!("Dealer stands at {value}");
        self.show(console, Status::DealerStands(value));
        console.pause(pacing.dealer_result);
        Ok(DealerTurnEnd::Stand)
    }

    /// Compare final totals when nobody busted and no blackjack ended the round early
    pub fn determine_winner(&self) -> RoundOutcome {
        let player = self.player_hand.value();
        let dealer = self.dealer_hand.value();

        if player > dealer {
            RoundOutcome::PlayerWins
        } else if player < dealer {
            RoundOutcome::DealerWins
        } else {
            RoundOutcome::Push
        }
    }

    fn settle<C: Console>(&mut self, console: &mut C, outcome: RoundOutcome) -> RoundOutcome {
        self.stats.record_outcome(outcome);
        self.last_result = Some(outcome);
        self.phase = RoundPhase::Settled;

        log::info!(
            "Round {}: {outcome:?} (player {}, dealer {}), running count {}",
            self.stats.games_played,
            self.player_hand.value(),
            self.dealer_hand.value(),
            self.stats.running_count
        );

        self.show(console, Status::Idle);
        console.pause(self.rules.pacing.round_result);
        outcome
    }

    /// Play rounds until the player quits
    pub fn run<C: Console>(&mut self, console: &mut C) -> Result<(), GameError> {
        loop {
            if self.play_round(console)? == RoundEnd::Quit {
                return Ok(());
            }

            loop {
                self.show(console, Status::PlayAgainPrompt);
                match ReplayChoice::from(console.next_key()?) {
                    ReplayChoice::PlayAgain => break,
                    ReplayChoice::Quit => return Ok(()),
                    ReplayChoice::Invalid => {
                        self.show(console, Status::InvalidReplayChoice);
                        console.pause(self.rules.pacing.invalid_choice);
                    }
                }
            }

            self.last_result = None;
        }
    }
}
