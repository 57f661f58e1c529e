mod card;
mod error;
mod hand;
pub mod io;
mod round;
mod rules;
mod shoe;
mod stats;

pub use card::{Card, Rank, Suit};
pub use error::GameError;
pub use hand::{calculate_hand_value, is_blackjack, is_busted, is_soft_hand, Hand, Role};
pub use round::{
    PlayerAction, ReplayChoice, RoundEnd, RoundEngine, RoundOutcome, RoundPhase,
    SHUFFLE_ANIMATION_STEPS,
};
pub use rules::{Pacing, TableRules, DEALER_STANDS_ON, DEFAULT_DECKS, MAX_DECKS, MIN_DECKS};
pub use shoe::{Shoe, CARDS_PER_DECK, RESHUFFLE_PENETRATION};
pub use stats::CountStatistics;
