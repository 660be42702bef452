use super::group::CardGroup;
use super::meld::Kind;
use super::solver::Arrangement;
use super::solver::Solver;
use crate::Points;
use crate::cards::*;

/// Passes of layoff against a knock. The second pass picks up cards
/// that only touch a meld once a first-pass card has extended it.
const LAYOFF_PASSES: usize = 2;

/// A player's cards, with the solver queries the match loop needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    group: CardGroup,
}

impl Hand {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) {
        self.group.add(card);
    }
    /// Removes `card` if held; does nothing otherwise.
    pub fn discard(&mut self, card: &Card) {
        self.group.discard(card);
    }
    pub fn size(&self) -> usize {
        self.group.size()
    }
    pub fn points(&self) -> Points {
        self.group.points()
    }
    pub fn card_at(&self, index: usize) -> Option<Card> {
        self.group.cards().get(index).copied()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.group.contains_card(card)
    }
    pub fn group(&self) -> &CardGroup {
        &self.group
    }
    pub fn cards(&self) -> &[Card] {
        self.group.cards()
    }
    pub fn clear(&mut self) {
        self.group = CardGroup::empty();
    }
}

/// solver queries. the `_with` forms reuse a caller-owned memo table
impl Hand {
    pub fn deadwood_count(&self) -> Points {
        self.deadwood_with(&mut Solver::default())
    }
    pub fn deadwood_with(&self, solver: &mut Solver) -> Points {
        solver.deadwood(&self.group)
    }
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement_with(&mut Solver::default())
    }
    pub fn arrangement_with(&self, solver: &mut Solver) -> Arrangement {
        solver.arrange(&self.group)
    }
    /// Cards left out of every grouping in an optimal arrangement.
    pub fn deadwood_cards(&self) -> CardGroup {
        self.arrangement().deadwood().clone()
    }
    pub fn can_knock(&self) -> bool {
        self.deadwood_count() <= crate::KNOCK_POINT
    }
    pub fn is_gin(&self) -> bool {
        self.deadwood_count() == 0
    }
}

/// layoffs
impl Hand {
    /// Lays this hand's deadwood off onto the knocker's groupings and
    /// returns the cards shed, in the order they went. Against gin
    /// nothing is laid off.
    ///
    /// The knocker's hand is taken as a validated knock; it is not
    /// checked again here.
    pub fn process_layoff(&mut self, knocker: &Hand) -> Vec<Card> {
        self.process_layoff_with(knocker, &mut Solver::default())
    }
    pub fn process_layoff_with(&mut self, knocker: &Hand, solver: &mut Solver) -> Vec<Card> {
        let (mut groupings, deadwood) = knocker.arrangement_with(solver).into_parts();
        if deadwood.points() == 0 {
            return Vec::new();
        }
        let mut shed = Vec::new();
        for _ in 0..LAYOFF_PASSES {
            shed.extend(self.layoff_pass_with(&mut groupings, solver));
        }
        shed
    }

    /// One pass of layoff. Eligibility is judged against `groupings` as
    /// they stood when the pass began; accepted cards are appended to the
    /// grouping they extend so the next pass sees them.
    pub fn layoff_pass(&mut self, groupings: &mut [CardGroup]) -> Vec<Card> {
        self.layoff_pass_with(groupings, &mut Solver::default())
    }
    pub fn layoff_pass_with(&mut self, groupings: &mut [CardGroup], solver: &mut Solver) -> Vec<Card> {
        let snapshot = groupings.to_vec();
        let deadwood = self.arrangement_with(solver).deadwood().clone();
        let mut shed = Vec::new();
        for card in deadwood.iter() {
            if let Some(i) = snapshot.iter().position(|g| accepts(g, card)) {
                log::trace!("lay off {} onto {}", card, groupings[i]);
                groupings[i].add(*card);
                self.discard(card);
                shed.push(*card);
            }
        }
        shed
    }
}

/// Whether `card` extends a grouping: a set of fewer than four takes a
/// missing suit of its rank, a run takes the same suit one step past
/// either end.
fn accepts(grouping: &CardGroup, card: &Card) -> bool {
    let cards = grouping.cards();
    let (Some(lo), Some(hi)) = (cards.first(), cards.last()) else {
        return false;
    };
    match Kind::of(grouping) {
        Some(Kind::Set) => cards.len() < 4 && card.rank() == lo.rank() && !grouping.contains_card(card),
        Some(Kind::Meld) => {
            card.suit() == lo.suit()
                && (lo.rank().pred() == Some(card.rank()) || hi.rank().succ() == Some(card.rank()))
        }
        None => false,
    }
}

/// Vec<Card> isomorphism
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            group: CardGroup::from(cards),
        }
    }
}
impl From<CardGroup> for Hand {
    fn from(group: CardGroup) -> Self {
        Self { group }
    }
}

/// str isomorphism
impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        CardGroup::try_from(s).map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    #[test]
    fn card_at_follows_canonical_order() {
        let hand = Hand::try_from("Kh 9c 5c").unwrap();
        assert_eq!(hand.card_at(0), Some(card("5c")));
        assert_eq!(hand.card_at(2), Some(card("Kh")));
        assert_eq!(hand.card_at(3), None);
    }

    #[test]
    fn knock_and_gin_thresholds() {
        let gin = Hand::try_from("Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc").unwrap();
        let knock = Hand::try_from("Ad 2c 3c 4c 5c 6c 7c 8c 9c Tc").unwrap();
        let awful = Hand::try_from("Ad 2c 3d 4c 5c 6d 7c 8d 9c Td").unwrap();
        assert!(gin.is_gin() && gin.can_knock());
        assert!(!knock.is_gin() && knock.can_knock());
        assert!(!awful.can_knock());
        assert_eq!(knock.deadwood_count(), 1);
        assert_eq!(awful.deadwood_count(), 55);
    }

    #[test]
    fn accepts_extensions() {
        let set = CardGroup::try_from("9c 9h 9s").unwrap();
        let run = CardGroup::try_from("4d 5d 6d").unwrap();
        assert!(accepts(&set, &card("9d")));
        assert!(!accepts(&set, &card("Td")));
        assert!(accepts(&run, &card("3d")));
        assert!(accepts(&run, &card("7d")));
        assert!(!accepts(&run, &card("8d")));
        assert!(!accepts(&run, &card("7c")));
        assert!(!accepts(&CardGroup::empty(), &card("7c")));
    }

    #[test]
    fn extended_runs_keep_accepting() {
        let long = CardGroup::try_from("3c 4c 5c 6c 7c 8c").unwrap();
        assert!(accepts(&long, &card("2c")));
        assert!(accepts(&long, &card("9c")));
        let loose = CardGroup::try_from("4c 5c 7c").unwrap();
        assert!(!accepts(&loose, &card("3c")));
        assert!(!accepts(&loose, &card("6c")));
    }

    #[test]
    fn quads_take_no_layoff() {
        let quads = CardGroup::try_from("9c 9d 9h 9s").unwrap();
        assert!(!accepts(&quads, &card("9s")));
    }
}
