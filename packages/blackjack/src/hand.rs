use crate::Card;
use serde::{Deserialize, Serialize};

/// Which side of the table a hand belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Dealer,
}

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    // One ace at a time drops from 11 to 1
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard_total: u8 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .sum();
    cards.iter().any(Card::is_ace) && hard_total + 10 == calculate_hand_value(cards)
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == 21
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub role: Role,
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            cards: Vec::new(),
        }
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Hearts)).collect()
    }

    #[test]
    fn test_calculate_hand_value_simple() {
        assert_eq!(calculate_hand_value(&cards(&[Rank::Two, Rank::Three])), 5);
    }

    #[test]
    fn test_calculate_hand_value_with_face_cards() {
        assert_eq!(calculate_hand_value(&cards(&[Rank::King, Rank::Queen])), 20);
    }

    #[test]
    fn test_calculate_hand_value_soft_ace() {
        assert_eq!(calculate_hand_value(&cards(&[Rank::Ace, Rank::Six])), 17);
    }

    #[test]
    fn test_calculate_hand_value_hard_ace() {
        assert_eq!(calculate_hand_value(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])), 16);
    }

    #[test]
    fn test_calculate_hand_value_multiple_aces() {
        assert_eq!(calculate_hand_value(&cards(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
    }

    #[test]
    fn test_three_aces_and_eight_stop_at_21() {
        // 41 -> 31 -> 21, the third ace stays at 11
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Eight]);
        assert_eq!(calculate_hand_value(&hand), 21);
        assert!(is_soft_hand(&hand));
    }

    #[test]
    fn test_three_aces_and_king_reduce_three_times() {
        // 43 -> 33 -> 23 -> 13
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::King]);
        assert_eq!(calculate_hand_value(&hand), 13);
        assert!(!is_soft_hand(&hand));
        assert!(!is_busted(&hand));
    }

    #[test]
    fn test_ace_reduction_stops_once_under_22() {
        // 11 + 11 + 9 = 31 -> one reduction gives 21, the second ace stays high
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(calculate_hand_value(&hand), 21);
        assert!(is_soft_hand(&hand));
    }

    #[test]
    fn test_aces_exhausted_still_busts() {
        let hand = cards(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(calculate_hand_value(&hand), 26);
        assert!(is_busted(&hand));
    }

    #[test]
    fn test_empty_hand_is_zero() {
        assert_eq!(calculate_hand_value(&[]), 0);
    }

    #[test]
    fn test_is_blackjack() {
        assert!(is_blackjack(&cards(&[Rank::Ace, Rank::King])));
        assert!(!is_blackjack(&cards(&[Rank::Seven, Rank::Seven, Rank::Seven])));
        assert!(!is_blackjack(&cards(&[Rank::King, Rank::Queen])));
    }

    #[test]
    fn test_is_soft_hand() {
        assert!(is_soft_hand(&cards(&[Rank::Ace, Rank::Six])));
        assert!(!is_soft_hand(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])));
        assert!(!is_soft_hand(&cards(&[Rank::King, Rank::Queen])));
    }

    #[test]
    fn test_hand_struct() {
        let mut hand = Hand::new(Role::Dealer);
        assert!(hand.is_empty());
        hand.add_card(Card::new(Rank::King, Suit::Hearts));
        hand.add_card(Card::new(Rank::Seven, Suit::Spades));
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.role, Role::Dealer);
        assert!(!hand.is_blackjack());
    }
}
