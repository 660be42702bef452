use super::action::Action;
use super::observation::Observation;
use super::strategy::Strategy;
use crate::cards::Card;
use crate::gin::Hand;

/// Seat-independent identity of a player, unique per table.
pub type PlayerId = u64;

/// A hand plus the policy that plays it.
pub struct Player {
    id: PlayerId,
    hand: Hand,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new<S: Strategy + 'static>(id: PlayerId, strategy: S) -> Self {
        Self {
            id,
            hand: Hand::empty(),
            strategy: Box::new(strategy),
        }
    }
    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
    pub fn take(&mut self, card: Card) {
        self.hand.add(card);
    }
    /// Removes and returns the card at `index`, clamped to the last card.
    pub fn shed(&mut self, index: usize) -> Option<Card> {
        let index = index.min(self.hand.size().checked_sub(1)?);
        let card = self.hand.card_at(index)?;
        self.hand.discard(&card);
        Some(card)
    }
    pub fn decide(&mut self, observation: &Observation) -> Action {
        self.strategy.decide(observation)
    }
    pub fn accept_improper_knock(&mut self, observation: &Observation) -> bool {
        self.strategy.accept_improper_knock(observation)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({}) {}", self.id, self.hand)
    }
}
