use crate::GameError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;
pub const DEFAULT_DECKS: u8 = 1;

/// Dealer draws below this total and stands on anything at or above it, soft 17 included
pub const DEALER_STANDS_ON: u8 = 17;

/// Delays between presentation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    pub player_draw: Duration,
    pub player_result: Duration,
    pub dealer_turn: Duration,
    pub dealer_draw: Duration,
    pub dealer_result: Duration,
    pub round_result: Duration,
    pub manual_shuffle: Duration,
    pub shuffle_done: Duration,
    pub shuffle_frame: Duration,
    pub shuffle_tail: Duration,
    pub invalid_choice: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            player_draw: Duration::from_millis(800),
            player_result: Duration::from_millis(1500),
            dealer_turn: Duration::from_millis(1000),
            dealer_draw: Duration::from_millis(1200),
            dealer_result: Duration::from_millis(1500),
            round_result: Duration::from_millis(2000),
            manual_shuffle: Duration::from_millis(1000),
            shuffle_done: Duration::from_millis(1500),
            shuffle_frame: Duration::from_millis(80),
            shuffle_tail: Duration::from_millis(500),
            invalid_choice: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// No delays at all
    pub fn instant() -> Self {
        Self {
            player_draw: Duration::ZERO,
            player_result: Duration::ZERO,
            dealer_turn: Duration::ZERO,
            dealer_draw: Duration::ZERO,
            dealer_result: Duration::ZERO,
            round_result: Duration::ZERO,
            manual_shuffle: Duration::ZERO,
            shuffle_done: Duration::ZERO,
            shuffle_frame: Duration::ZERO,
            shuffle_tail: Duration::ZERO,
            invalid_choice: Duration::ZERO,
        }
    }
}

/// Table configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Number of decks in the shoe
    pub num_decks: u8,

    /// Presentation delays
    pub pacing: Pacing,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            num_decks: DEFAULT_DECKS,
            pacing: Pacing::default(),
        }
    }
}

impl TableRules {
    pub fn new(num_decks: u8) -> Result<Self, GameError> {
        Ok(Self {
            num_decks: Self::validate_deck_count(num_decks)?,
            pacing: Pacing::default(),
        })
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn validate_deck_count(num_decks: u8) -> Result<u8, GameError> {
        if (MIN_DECKS..=MAX_DECKS).contains(&num_decks) {
            Ok(num_decks)
        } else {
            Err(GameError::InvalidDeckCount(num_decks.to_string()))
        }
    }

    /// Parse a typed deck count. Blank input means the default.
    pub fn parse_deck_count(input: &str) -> Result<u8, GameError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(DEFAULT_DECKS);
        }
        let num_decks: u8 = trimmed
            .parse()
            .map_err(|_| GameError::InvalidDeckCount(trimmed.to_string()))?;
        Self::validate_deck_count(num_decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deck_count_blank_uses_default() {
        assert_eq!(TableRules::parse_deck_count("").unwrap(), 1);
        assert_eq!(TableRules::parse_deck_count("  \n").unwrap(), 1);
    }

    #[test]
    fn test_parse_deck_count_in_range() {
        assert_eq!(TableRules::parse_deck_count("6").unwrap(), 6);
        assert_eq!(TableRules::parse_deck_count(" 8 ").unwrap(), 8);
    }

    #[test]
    fn test_parse_deck_count_rejects_out_of_range() {
        assert!(TableRules::parse_deck_count("0").is_err());
        assert!(TableRules::parse_deck_count("9").is_err());
        assert!(TableRules::parse_deck_count("-2").is_err());
        assert!(TableRules::parse_deck_count("two").is_err());
    }

    #[test]
    fn test_new_rejects_invalid_decks() {
        assert!(TableRules::new(0).is_err());
        assert!(TableRules::new(9).is_err());
        assert_eq!(TableRules::new(4).unwrap().num_decks, 4);
    }

    #[test]
    fn test_instant_pacing_has_no_delays() {
        let pacing = Pacing::instant();
        assert_eq!(pacing.round_result, Duration::ZERO);
        assert_eq!(pacing.shuffle_frame, Duration::ZERO);
        assert_eq!(Pacing::default().shuffle_frame, Duration::from_millis(80));
    }
}
