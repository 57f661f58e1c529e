use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A single playing card. Hand value and Hi-Lo value are derived from the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Blackjack value with the ace counted high. Soft-ace reduction happens at the hand level.
    pub fn value(&self) -> u8 {
        match self.rank {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            _ => 10, // Ten, Jack, Queen, King
        }
    }

    /// Hi-Lo contribution: 2-6 count +1, 7-9 count 0, tens and aces count -1.
    pub fn hi_lo_value(&self) -> i32 {
        match self.value() {
            10.. => -1, // includes the ace at 11
            7..=9 => 0,
            _ => 1,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    pub fn is_red(&self) -> bool {
        matches!(self.suit, Suit::Hearts | Suit::Diamonds)
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }

    /// Suit-major index into a single 52-card deck: spades, hearts, diamonds, clubs; ace to king.
    pub fn from_index(index: usize) -> Self {
        assert!(index < 52, "Invalid card index: {}", index);
        Card::new(Rank::ALL[index % 13], Suit::ALL[index / 13])
    }

    /// The 52 distinct cards of one deck, in index order.
    pub fn full_deck() -> Vec<Card> {
        (0..52).map(Card::from_index).collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_card_values() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).value(), 11);
        assert_eq!(Card::new(Rank::King, Suit::Hearts).value(), 10);
        assert_eq!(Card::new(Rank::Queen, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Diamonds).value(), 10);
        assert_eq!(Card::new(Rank::Ten, Suit::Spades).value(), 10);
        assert_eq!(Card::new(Rank::Seven, Suit::Spades).value(), 7);
        assert_eq!(Card::new(Rank::Two, Suit::Hearts).value(), 2);
    }

    #[test]
    fn test_hi_lo_low_cards_count_plus_one() {
        for rank in [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six] {
            assert_eq!(Card::new(rank, Suit::Clubs).hi_lo_value(), 1);
        }
    }

    #[test]
    fn test_hi_lo_neutral_cards() {
        for rank in [Rank::Seven, Rank::Eight, Rank::Nine] {
            assert_eq!(Card::new(rank, Suit::Hearts).hi_lo_value(), 0);
        }
    }

    #[test]
    fn test_hi_lo_high_cards_and_ace_count_minus_one() {
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace] {
            assert_eq!(Card::new(rank, Suit::Diamonds).hi_lo_value(), -1);
        }
    }

    #[test]
    fn test_full_deck_is_balanced() {
        let deck = Card::full_deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().collect::<HashSet<_>>().len(), 52);
        // A balanced count sums to zero over a complete deck
        assert_eq!(deck.iter().map(|c| c.hi_lo_value()).sum::<i32>(), 0);
    }

    #[test]
    fn test_from_index_order() {
        assert_eq!(Card::from_index(0), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(Card::from_index(13), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(Card::from_index(51), Card::new(Rank::King, Suit::Clubs));
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_display(), "10♥");
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
        assert!(Card::new(Rank::Two, Suit::Diamonds).is_red());
        assert!(!Card::new(Rank::Two, Suit::Clubs).is_red());
    }
}
