use crate::{Card, RoundOutcome};
use serde::{Deserialize, Serialize};

/// Hi-Lo count plus session tallies. The count resets with every reshuffle, the tallies never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountStatistics {
    pub running_count: i32,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub games_tied: u32,
    pub blackjacks: u32,
    pub busts: u32,
    pub dealer_busts: u32,
}

impl CountStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_card_seen(&mut self, card: &Card) {
        self.running_count += card.hi_lo_value();
    }

    /// Running count per remaining deck, rounded half up
    pub fn true_count(&self, decks_remaining: f64) -> i32 {
        if decks_remaining <= 0.0 {
            return 0;
        }
        (self.running_count as f64 / decks_remaining + 0.5).floor() as i32
    }

    pub fn record_win(&mut self, is_blackjack: bool) {
        self.games_played += 1;
        self.games_won += 1;
        if is_blackjack {
            self.blackjacks += 1;
        }
    }

    pub fn record_loss(&mut self, is_bust: bool) {
        self.games_played += 1;
        self.games_lost += 1;
        if is_bust {
            self.busts += 1;
        }
    }

    pub fn record_tie(&mut self) {
        self.games_played += 1;
        self.games_tied += 1;
    }

    pub fn record_win_via_dealer_bust(&mut self) {
        self.dealer_busts += 1;
        self.record_win(false);
    }

    /// Settle a finished round. Exactly one game is added per call.
    pub fn record_outcome(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::PlayerBlackjack => self.record_win(true),
            RoundOutcome::PlayerWins => self.record_win(false),
            RoundOutcome::DealerBust => self.record_win_via_dealer_bust(),
            RoundOutcome::PlayerBust => self.record_loss(true),
            RoundOutcome::DealerBlackjack | RoundOutcome::DealerWins => self.record_loss(false),
            RoundOutcome::BlackjackPush | RoundOutcome::Push => self.record_tie(),
        }
    }

    pub fn reset_count(&mut self) {
        self.running_count = 0;
    }

    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (self.games_won as f64 / self.games_played as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    #[test]
    fn test_record_card_seen_accumulates_hi_lo() {
        let mut stats = CountStatistics::new();
        stats.record_card_seen(&Card::new(Rank::Two, Suit::Hearts));
        stats.record_card_seen(&Card::new(Rank::Five, Suit::Clubs));
        stats.record_card_seen(&Card::new(Rank::Eight, Suit::Clubs));
        stats.record_card_seen(&Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(stats.running_count, 1);
    }

    #[test]
    fn test_true_count_divides_and_rounds() {
        let stats = CountStatistics {
            running_count: 7,
            ..Default::default()
        };
        assert_eq!(stats.true_count(2.0), 4); // 3.5 rounds up
        assert_eq!(stats.true_count(3.0), 2); // 2.33
        assert_eq!(stats.true_count(0.5), 14);
    }

    #[test]
    fn test_true_count_negative_halves_round_up() {
        let stats = CountStatistics {
            running_count: -5,
            ..Default::default()
        };
        assert_eq!(stats.true_count(2.0), -2); // -2.5
        assert_eq!(stats.true_count(4.0), -1); // -1.25
    }

    #[test]
    fn test_true_count_zero_without_decks() {
        let stats = CountStatistics {
            running_count: 9,
            ..Default::default()
        };
        assert_eq!(stats.true_count(0.0), 0);
        assert_eq!(stats.true_count(-1.0), 0);
    }

    #[test]
    fn test_win_rate() {
        let mut stats = CountStatistics::new();
        assert_eq!(stats.win_rate(), 0);
        stats.record_win(false);
        stats.record_win(true);
        stats.record_win_via_dealer_bust();
        stats.record_loss(false);
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.win_rate(), 75);
    }

    #[test]
    fn test_win_rate_rounds_to_nearest() {
        let mut stats = CountStatistics::new();
        stats.record_win(false);
        stats.record_loss(false);
        stats.record_tie();
        assert_eq!(stats.win_rate(), 33);
        stats.record_win(false);
        stats.record_win(false);
        stats.record_tie();
        assert_eq!(stats.win_rate(), 50);
    }

    #[test]
    fn test_dealer_bust_counts_as_win() {
        let mut stats = CountStatistics::new();
        stats.record_win_via_dealer_bust();
        assert_eq!(stats.dealer_busts, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.blackjacks, 0);
    }

    #[test]
    fn test_every_outcome_adds_exactly_one_game() {
        let outcomes = [
            RoundOutcome::PlayerBlackjack,
            RoundOutcome::BlackjackPush,
            RoundOutcome::DealerBlackjack,
            RoundOutcome::PlayerBust,
            RoundOutcome::DealerBust,
            RoundOutcome::PlayerWins,
            RoundOutcome::DealerWins,
            RoundOutcome::Push,
        ];
        let mut stats = CountStatistics::new();
        for (i, outcome) in outcomes.into_iter().enumerate() {
            stats.record_outcome(outcome);
            assert_eq!(stats.games_played, i as u32 + 1);
            assert_eq!(
                stats.games_won + stats.games_lost + stats.games_tied,
                stats.games_played
            );
        }
        assert_eq!(stats.games_won, 3);
        assert_eq!(stats.games_lost, 3);
        assert_eq!(stats.games_tied, 2);
        assert_eq!(stats.blackjacks, 1);
        assert_eq!(stats.busts, 1);
        assert_eq!(stats.dealer_busts, 1);
    }

    #[test]
    fn test_blackjack_push_does_not_count_blackjack() {
        let mut stats = CountStatistics::new();
        stats.record_outcome(RoundOutcome::BlackjackPush);
        assert_eq!(stats.blackjacks, 0);
        assert_eq!(stats.games_tied, 1);
    }

    #[test]
    fn test_reset_count_keeps_tallies() {
        let mut stats = CountStatistics::new();
        stats.record_card_seen(&Card::new(Rank::Three, Suit::Hearts));
        stats.record_win(false);
        stats.reset_count();
        assert_eq!(stats.running_count, 0);
        assert_eq!(stats.games_won, 1);
    }
}
