use crate::Signal;

/// Which half of a turn the acting player is in. A player holding
/// fewer than [`crate::HAND_CAPACITY`] cards draws; a full hand discards.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Phase {
    Draw,
    Discard,
}

impl From<Phase> for Signal {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Draw => 0.,
            Phase::Discard => 1.,
        }
    }
}

/// A turn decision. Indices address the acting hand in canonical order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Action {
    Draw,
    PickupDiscard,
    Discard(usize),
    Knock(usize),
    KnockGin(usize),
}

impl Action {
    /// Decodes network outputs into an action legal for `phase`.
    ///
    /// The draw phase splits `action` into two buckets (stock, discard
    /// pile); the discard phase splits it into three (discard, knock,
    /// gin) and picks the card by splitting `index` over `hand`.
    pub fn decode(phase: Phase, action: Signal, index: Signal, hand: usize) -> Self {
        match phase {
            Phase::Draw => match bucket(action, 2) {
                0 => Action::Draw,
                _ => Action::PickupDiscard,
            },
            Phase::Discard => {
                let i = bucket(index, hand);
                match bucket(action, 3) {
                    0 => Action::Discard(i),
                    1 => Action::Knock(i),
                    _ => Action::KnockGin(i),
                }
            }
        }
    }
    pub fn phase(&self) -> Phase {
        match self {
            Action::Draw | Action::PickupDiscard => Phase::Draw,
            _ => Phase::Discard,
        }
    }
    /// Index of the card leaving the hand, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Action::Discard(i) | Action::Knock(i) | Action::KnockGin(i) => Some(*i),
            _ => None,
        }
    }
    pub fn is_knock(&self) -> bool {
        matches!(self, Action::Knock(_) | Action::KnockGin(_))
    }
}

/// floor(signal * n), clamped into 0..n. NaN lands in the first bucket.
pub fn bucket(signal: Signal, n: usize) -> usize {
    let n = n.max(1);
    ((signal * n as Signal).floor().max(0.) as usize).min(n - 1)
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Draw => write!(f, "DRAW"),
            Action::PickupDiscard => write!(f, "PICKUP"),
            Action::Discard(i) => write!(f, "DISCARD {}", i),
            Action::Knock(i) => write!(f, "KNOCK {}", i),
            Action::KnockGin(i) => write!(f, "GIN {}", i),
        }
    }
}
