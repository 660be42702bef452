use super::rank::Rank;
use super::suit::Suit;
use crate::Points;

/// A playing card encoded as a single byte.
///
/// The 52 cards are bijectively mapped to `0..52` with the encoding
/// `(rank - 1) * 4 + suit`. Deriving `Ord` on the byte therefore sorts
/// by rank first and breaks ties by the canonical suit order
/// (club < diamond < heart < spade), which is the deterministic order
/// every grouping scan relies on.
///
/// # Parsing
///
/// Cards parse from short strings like `"9h"`, `"Ts"`, `"10s"` or `"Ac"`.
/// Use [`Card::parse`] for whitespace-separated lists.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Extracts the rank component (ace through king).
    pub fn rank(&self) -> Rank {
        Rank::try_from(self.0 / 4 + 1).expect("byte encodes a valid rank")
    }
    /// Extracts the suit component.
    pub fn suit(&self) -> Suit {
        Suit::try_from(self.0 % 4).expect("byte encodes a valid suit")
    }
    /// Deadwood value of this card: `min(rank, 10)`.
    pub fn points(&self) -> Points {
        self.rank().points()
    }
    /// Flattened 1..=52 sensory index.
    /// Ac=1, 2c=2, .., Kc=13, Ad=14, .., Ks=52
    pub fn ranking(&self) -> u8 {
        u8::from(self.rank()) + self.suit().offset()
    }

    /// Parses a whitespace- or comma-separated list of cards.
    pub fn parse(s: &str) -> anyhow::Result<Vec<Self>> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(Self::try_from)
            .collect()
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self((u8::from(r) - 1) * 4 + u8::from(s))
    }
}
impl From<Card> for (Rank, Suit) {
    fn from(c: Card) -> Self {
        (c.rank(), c.suit())
    }
}

/// (u8, char) construction, the raw tuple form of hand fixtures.
/// rank outside 1..=13 or an unknown suit is an error
impl TryFrom<(u8, char)> for Card {
    type Error = anyhow::Error;
    fn try_from((r, s): (u8, char)) -> Result<Self, Self::Error> {
        Ok(Self::from((Rank::try_from(r)?, Suit::try_from(s)?)))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0..52
/// Ts
/// 39
/// 0b00100111
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl TryFrom<u8> for Card {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0..52 => Ok(Self(n)),
            _ => Err(anyhow::anyhow!("card byte out of range: {}", n)),
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        match s.char_indices().last() {
            Some((i, suit)) if i > 0 => {
                let rank = Rank::try_from(&s[..i])?;
                let suit = Suit::try_from(suit)?;
                Ok(Self::from((rank, suit)))
            }
            _ => Err(anyhow::anyhow!("card needs rank and suit: {:?}", s)),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}
