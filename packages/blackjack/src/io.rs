//! Collaborator contracts between the round engine and whatever front-end drives it.
//!
//! The engine never touches a terminal. It asks `KeyInput` for keypresses, hands a
//! `TableView` snapshot plus a `Status` to `Presenter`, and waits on `Pacer` between
//! steps. Tests script all three.

use crate::{Card, CountStatistics, GameError, Hand, RoundOutcome, RoundPhase};
use std::time::Duration;

/// One resolved keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    /// Immediate session exit (Ctrl+C)
    Exit,
}

pub trait KeyInput {
    /// Block until exactly one key is available
    fn next_key(&mut self) -> Result<KeyPress, GameError>;
}

pub trait Presenter {
    fn render(&mut self, view: &TableView, status: &Status);
}

pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Everything the engine needs from its surroundings
pub trait Console: KeyInput + Presenter + Pacer {}

impl<T: KeyInput + Presenter + Pacer> Console for T {}

/// What the table is doing right now, for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    AwaitingAction,
    PlayerDrew(Card),
    PlayerBusts,
    PlayerHas21,
    ManualShuffleRequested,
    Shuffling { manual: bool, step: u32, total: u32 },
    ShuffleComplete,
    DealerTurn,
    DealerDraws(Card),
    DealerBusts,
    DealerStands(u8),
    PlayAgainPrompt,
    InvalidReplayChoice,
}

/// Snapshot of the table handed to the presenter
#[derive(Debug, Clone)]
pub struct TableView {
    pub remaining_cards: usize,
    pub total_cards: usize,
    pub decks_remaining: f64,
    pub true_count: i32,
    pub stats: CountStatistics,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub phase: RoundPhase,
    pub last_result: Option<RoundOutcome>,
}

impl TableView {
    /// The dealer's first card stays face down while the player is deciding
    pub fn hide_dealer_hole(&self) -> bool {
        self.phase == RoundPhase::PlayerTurn
    }
}
