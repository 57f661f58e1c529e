use crate::{Card, GameError, TableRules};
use rand::seq::SliceRandom;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const CARDS_PER_DECK: usize = 52;

/// Reshuffle once this fraction of the shoe or less is left to deal
pub const RESHUFFLE_PENETRATION: f64 = 0.25;

/// A multi-deck shoe. `remaining` is drawn from the tail; every drawn card moves to `dealt`.
#[derive(Debug, Clone)]
pub struct Shoe {
    num_decks: u8,
    remaining: Vec<Card>,
    dealt: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Shoe {
    pub fn new(num_decks: u8) -> Result<Self, GameError> {
        Self::with_rng(num_decks, ChaCha8Rng::from_entropy())
    }

    /// Deterministic shoe for reproducible sessions
    pub fn with_seed(num_decks: u8, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(num_decks, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(num_decks: u8, rng: ChaCha8Rng) -> Result<Self, GameError> {
        let num_decks = TableRules::validate_deck_count(num_decks)?;
        let mut shoe = Self {
            num_decks,
            remaining: Vec::with_capacity(num_decks as usize * CARDS_PER_DECK),
            dealt: Vec::new(),
            rng,
        };
        shoe.initialize();
        Ok(shoe)
    }

    /// Shoe whose first draws are `top`, in order, with the rest shuffled underneath.
    /// Every stacked card has to come out of the full multiset, so the shoe stays complete.
    pub fn stacked(num_decks: u8, seed: u64, top: &[Card]) -> Result<Self, GameError> {
        let mut shoe = Self::with_seed(num_decks, seed)?;
        for card in top {
            let pos = shoe
                .remaining
                .iter()
                .position(|c| c == card)
                .ok_or(GameError::CardNotInShoe(*card))?;
            shoe.remaining.remove(pos);
        }
        shoe.remaining.extend(top.iter().rev().copied());
        Ok(shoe)
    }

    fn initialize(&mut self) {
        self.remaining.clear();
        self.dealt.clear();

        for _ in 0..self.num_decks {
            self.remaining.extend(Card::full_deck());
        }

        self.shuffle();
    }

    fn shuffle(&mut self) {
        self.remaining.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self.remaining.pop().ok_or(GameError::EmptyShoe)?;
        self.dealt.push(card);
        Ok(card)
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    pub fn total_count(&self) -> usize {
        self.num_decks as usize * CARDS_PER_DECK
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn dealt_count(&self) -> usize {
        self.dealt.len()
    }

    pub fn dealt_cards(&self) -> &[Card] {
        &self.dealt
    }

    pub fn decks_remaining(&self) -> f64 {
        self.remaining_count() as f64 / CARDS_PER_DECK as f64
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.remaining_count() as f64 <= self.total_count() as f64 * RESHUFFLE_PENETRATION
    }

    /// Rebuild and reshuffle the full shoe, discarding the dealt pile
    pub fn reset(&mut self) {
        self.initialize();
    }
}
