use super::action::Phase;
use crate::HAND_CAPACITY;
use crate::INPUT_WIDTH;
use crate::Points;
use crate::Signal;
use crate::cards::*;
use crate::gin::Hand;

/// Everything the acting player may see when deciding.
#[derive(Debug, Clone)]
pub struct Observation {
    pub phase: Phase,
    pub hand: Hand,
    pub deadwood: Points,
    pub discard: Option<Card>,
    pub stock: usize,
    /// the opponent's cards, once an improper knock has exposed them
    pub exposed: Option<Hand>,
}

impl Observation {
    /// Fixed-width sensory vector, every entry in [0, 1]:
    /// hand rankings (padded), discard top, deadwood, stock, phase, exposure.
    pub fn signals(&self) -> [Signal; INPUT_WIDTH] {
        let mut signals = [0.; INPUT_WIDTH];
        self.hand
            .cards()
            .iter()
            .take(HAND_CAPACITY)
            .zip(signals.iter_mut())
            .for_each(|(card, s)| *s = sense(card));
        let tail = &mut signals[HAND_CAPACITY..];
        tail[0] = self.discard.as_ref().map_or(0., sense);
        tail[1] = (self.deadwood as Signal / 100.).min(1.);
        tail[2] = self.stock as Signal / 52.;
        tail[3] = Signal::from(self.phase);
        tail[4] = if self.exposed.is_some() { 1. } else { 0. };
        signals
    }
}

/// ranking scaled into (0, 1]
fn sense(card: &Card) -> Signal {
    card.ranking() as Signal / 52.
}
