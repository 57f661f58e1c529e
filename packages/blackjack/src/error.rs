use crate::Card;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("No cards left in shoe")]
    EmptyShoe,
    #[error("Invalid number of decks: {0} (expected 1-8)")]
    InvalidDeckCount(String),
    #[error("Card {0} is not available in the shoe")]
    CardNotInShoe(Card),
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}
