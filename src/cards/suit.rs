/// Declaration order is the canonical comparison order used for
/// tie-breaking and for the 1..=52 ranking: club < diamond < heart < spade.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const MAX: Self = Suit::Spade;
    pub const MIN: Self = Suit::Club;

    pub const fn all() -> [Self; 4] {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade]
    }

    /// offset into the flattened 1..=52 ranking
    pub const fn offset(&self) -> u8 {
        match self {
            Suit::Club => 0,
            Suit::Diamond => 13,
            Suit::Heart => 26,
            Suit::Spade => 39,
        }
    }
}

/// u8 isomorphism
impl TryFrom<u8> for Suit {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Suit::Club),
            1 => Ok(Suit::Diamond),
            2 => Ok(Suit::Heart),
            3 => Ok(Suit::Spade),
            _ => Err(anyhow::anyhow!("invalid suit u8: {}", n)),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// char isomorphism
impl TryFrom<char> for Suit {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'c' | '♣' => Ok(Suit::Club),
            'd' | '♦' => Ok(Suit::Diamond),
            'h' | '♥' => Ok(Suit::Heart),
            's' | '♠' => Ok(Suit::Spade),
            _ => Err(anyhow::anyhow!("suit not valid: {}", c)),
        }
    }
}
impl From<Suit> for char {
    fn from(s: Suit) -> char {
        match s {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_char() {
        for suit in Suit::all() {
            assert!(suit == Suit::try_from(char::from(suit)).unwrap());
        }
    }

    #[test]
    fn canonical_order() {
        assert!(Suit::Club < Suit::Diamond);
        assert!(Suit::Diamond < Suit::Heart);
        assert!(Suit::Heart < Suit::Spade);
    }

    #[test]
    fn rejects_unknown() {
        assert!(Suit::try_from('x').is_err());
        assert!(Suit::try_from(4u8).is_err());
    }
}
