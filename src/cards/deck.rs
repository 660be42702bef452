use super::card::Card;
use rand::Rng;
use rand::seq::SliceRandom;

/// The stock: a shuffled 52-card pile dealt from the top.
///
/// Shuffling takes the caller's RNG so a match seeded once
/// replays identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// Creates a fresh, shuffled 52-card deck.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut cards = Self::ordered();
        cards.shuffle(rng);
        Self(cards)
    }
    /// All 52 cards in canonical order.
    pub fn ordered() -> Vec<Card> {
        (0..52u8).filter_map(|n| Card::try_from(n).ok()).collect()
    }
    /// Removes the top card, if any remain.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}
