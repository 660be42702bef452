use crate::Points;
use crate::cards::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::Hash;
use std::hash::Hasher;

/// Canonical multiset key: one occurrence count per card of the deck.
///
/// Two groups holding the same cards produce the same key no matter
/// how they were built or sorted, and synthetic groups with repeated
/// cards still get a distinct key per multiplicity.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Key([u8; 52]);

impl From<&CardGroup> for Key {
    fn from(group: &CardGroup) -> Self {
        let mut counts = [0u8; 52];
        group
            .iter()
            .for_each(|c| counts[u8::from(*c) as usize] = counts[u8::from(*c) as usize].saturating_add(1));
        Self(counts)
    }
}

/// An ordered, mutable collection of cards.
///
/// Kept sorted by (rank, suit) after every mutation so that adjacency
/// scans are deterministic. [`CardGroup::sort`] can regroup by suit for
/// run detection; equality, hashing and ordering always go through the
/// canonical (rank, suit) sequence, so regrouping never changes identity.
#[derive(Debug, Clone, Default)]
pub struct CardGroup {
    cards: Vec<Card>,
}

impl CardGroup {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a card and re-establishes canonical order.
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort(false);
    }
    /// Removes one copy of `card`. Absent cards are ignored.
    pub fn discard(&mut self, card: &Card) {
        if let Some(i) = self.cards.iter().position(|c| c == card) {
            self.cards.remove(i);
        }
    }
    /// Stable sort by (rank, suit), or by (suit, rank) when `by_suit`.
    pub fn sort(&mut self, by_suit: bool) {
        if by_suit {
            self.cards.sort_by_key(|c| (c.suit(), c.rank()));
        } else {
            self.cards.sort_by_key(|c| (c.rank(), c.suit()));
        }
    }

    pub fn contains(&self, rank: Rank, suit: Suit) -> bool {
        self.contains_card(&Card::from((rank, suit)))
    }
    pub fn contains_card(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
    pub fn size(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    /// Sum of point values, the "everything is deadwood" total.
    pub fn points(&self) -> Points {
        self.cards.iter().map(Card::points).sum()
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
    pub fn key(&self) -> Key {
        Key::from(self)
    }

    /// Remainder after removing one copy of every card in `other`.
    pub fn without(&self, other: &CardGroup) -> CardGroup {
        let mut rest = self.cards.clone();
        for card in other.iter() {
            if let Some(i) = rest.iter().position(|c| c == card) {
                rest.remove(i);
            }
        }
        Self { cards: rest }
    }

    fn canonical(&self) -> Cow<'_, [Card]> {
        if self.cards.is_sorted() {
            Cow::Borrowed(&self.cards)
        } else {
            let mut cards = self.cards.clone();
            cards.sort();
            Cow::Owned(cards)
        }
    }
}

/// membership tests used to prune cards that can never be grouped
impl CardGroup {
    /// True if two same-suit neighbours exist to form a 3-run with `card`:
    /// [r-2, r-1, r], [r-1, r, r+1] or [r, r+1, r+2]. Longer runs contain
    /// one of these, so this covers 4- and 5-runs too.
    pub fn is_in_a_meld(&self, card: &Card) -> bool {
        Self::runs_through(card)
            .iter()
            .filter(|run| run.size() == 3)
            .any(|run| run.iter().filter(|c| *c != card).all(|c| self.contains_card(c)))
    }
    /// True if exactly two other suits of the same rank are present.
    pub fn is_in_a_3set(&self, card: &Card) -> bool {
        self.companions(card) == 2
    }
    /// True if all three other suits of the same rank are present.
    pub fn is_in_a_4set(&self, card: &Card) -> bool {
        self.companions(card) == 3
    }
    /// True if `card` could take part in any meld or set of this group.
    pub fn could_group(&self, card: &Card) -> bool {
        self.is_in_a_meld(card) || self.is_in_a_3set(card) || self.is_in_a_4set(card)
    }

    /// distinct other suits sharing the rank of `card`
    fn companions(&self, card: &Card) -> usize {
        Suit::all()
            .into_iter()
            .filter(|s| *s != card.suit())
            .filter(|s| self.contains(card.rank(), *s))
            .count()
    }

    /// Splits into (specimen, early deadwood). Early deadwood holds only
    /// cards that cannot join any meld or set; the split is exact.
    pub fn partition(&self) -> (CardGroup, CardGroup) {
        let (specimen, deadwood) = self
            .cards
            .iter()
            .copied()
            .partition::<Vec<Card>, _>(|c| self.could_group(c));
        (Self::from(specimen), Self::from(deadwood))
    }

    /// Every 3-, 4- and 5-run of a full deck that passes through `card`,
    /// sorted by their lowest card.
    pub fn runs_through(card: &Card) -> Vec<CardGroup> {
        let r = u8::from(card.rank());
        let mut runs = (3..=5u8)
            .flat_map(|len| (1..=14 - len).map(move |lo| (lo, len)))
            .filter(|(lo, len)| *lo <= r && r < lo + len)
            .map(|(lo, len)| {
                (lo..lo + len)
                    .filter_map(|n| Rank::try_from(n).ok())
                    .map(|rank| Card::from((rank, card.suit())))
                    .collect::<CardGroup>()
            })
            .collect::<Vec<_>>();
        runs.sort();
        runs
    }
}

impl PartialEq for CardGroup {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for CardGroup {}

impl Hash for CardGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

/// lexicographic over canonical card sequences: first card, then the next, ..
impl Ord for CardGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}
impl PartialOrd for CardGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Vec<Card> isomorphism (up to permutation, this always comes out sorted)
impl From<Vec<Card>> for CardGroup {
    fn from(mut cards: Vec<Card>) -> Self {
        cards.sort();
        Self { cards }
    }
}
impl From<CardGroup> for Vec<Card> {
    fn from(group: CardGroup) -> Self {
        group.cards
    }
}
impl FromIterator<Card> for CardGroup {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
impl<'a> IntoIterator for &'a CardGroup {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;
    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// (rank, suit) pairs, the shape of hand fixtures
impl TryFrom<&[(u8, char)]> for CardGroup {
    type Error = anyhow::Error;
    fn try_from(pairs: &[(u8, char)]) -> Result<Self, Self::Error> {
        pairs
            .iter()
            .map(|&pair| Card::try_from(pair))
            .collect::<anyhow::Result<Vec<_>>>()
            .map(Self::from)
    }
}

/// str isomorphism
impl TryFrom<&str> for CardGroup {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Card::parse(s).map(Self::from)
    }
}

impl std::fmt::Display for CardGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", cards.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(s: &str) -> CardGroup {
        CardGroup::try_from(s).unwrap()
    }
    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    const CARD_DATA1: &str = "9h 9c 9s Ts Js Qs Ks Kc Kh 5c";
    const CARD_DATA2: &str = "9h 9c 9s 9d Ts Js Qs Ks Kc Kh";

    #[test]
    fn builds_from_pairs() {
        let pairs = [(9, 'h'), (9, 'c'), (13, 's')];
        let g = CardGroup::try_from(&pairs[..]).unwrap();
        assert_eq!(g.size(), 3);
        assert!(CardGroup::try_from(&[(0u8, 'c')][..]).is_err());
    }

    #[test]
    fn add_keeps_order() {
        let mut g = CardGroup::empty();
        g.add(card("Kh"));
        g.add(card("9c"));
        g.add(card("9s"));
        assert_eq!(g.cards(), &[card("9c"), card("9s"), card("Kh")]);
    }

    #[test]
    fn discard_removes_present_card() {
        let mut g = group(CARD_DATA1);
        g.discard(&card("9c"));
        assert_eq!(g.size(), 9);
    }

    #[test]
    fn discard_absent_card_is_noop() {
        let mut g = group(CARD_DATA1);
        g.discard(&card("2c"));
        assert_eq!(g.size(), 10);
        let mut empty = CardGroup::empty();
        empty.discard(&card("2c"));
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn contains_by_rank_and_suit() {
        let g = group(CARD_DATA1);
        assert!(g.contains(Rank::Five, Suit::Club));
        assert!(!g.contains(Rank::Five, Suit::Diamond));
        assert!(g.contains_card(&card("5c")));
        assert!(!g.contains_card(&card("5d")));
    }

    #[test]
    fn points_total() {
        assert_eq!(group(CARD_DATA1).points(), 92);
        assert_eq!(CardGroup::empty().points(), 0);
    }

    #[test]
    fn sorts_by_rank() {
        let mut g = group(CARD_DATA1);
        g.sort(true);
        g.sort(false);
        assert_eq!(g.cards(), group("5c 9c 9h 9s Ts Js Qs Kc Kh Ks").cards());
    }

    #[test]
    fn sorts_by_suit() {
        let mut g = group(CARD_DATA1);
        g.sort(true);
        let expected = Card::parse("5c 9c Kc 9h Kh 9s Ts Js Qs Ks").unwrap();
        assert_eq!(g.cards(), &expected[..]);
    }

    #[test]
    fn identity_ignores_order() {
        let a = group("9h 9c 9s");
        let mut b = group("9s 9h 9c");
        b.sort(true);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, group("9h 9c"));
    }

    #[test]
    fn key_counts_repeats() {
        let once = CardGroup::from(vec![card("9h")]);
        let twice = CardGroup::from(vec![card("9h"), card("9h")]);
        assert_ne!(once, twice);
    }

    #[test]
    fn without_removes_by_identity() {
        let g = group("2h 2c 2d 3c 4c 5c");
        let rest = g.without(&group("3c 4c 5c"));
        assert_eq!(rest, group("2h 2c 2d"));
    }

    #[test]
    fn meld_membership() {
        let g = group(CARD_DATA1);
        for c in g.cards() {
            let outside = ["5c", "9c", "9h", "Kc", "Kh"].contains(&c.to_string().as_str());
            assert_eq!(g.is_in_a_meld(c), !outside, "{}", c);
        }
    }

    #[test]
    fn set_membership() {
        let g = group(CARD_DATA2);
        assert!(!g.is_in_a_3set(&card("9s")));
        assert!(!g.is_in_a_3set(&card("Ts")));
        assert!(g.is_in_a_3set(&card("Ks")));
        assert!(!g.is_in_a_3set(&card("As")));
        assert!(g.is_in_a_4set(&card("9c")));
        assert!(!g.is_in_a_4set(&card("Tc")));
        assert!(!g.is_in_a_4set(&card("Ac")));
    }

    #[test]
    fn partition_keeps_groupable_cards() {
        let (specimen, early) = group(CARD_DATA1).partition();
        assert_eq!(early, group("5c"));
        assert_eq!(specimen.size(), 9);
    }

    #[test]
    fn partition_at_the_rank_edges() {
        let (specimen, early) = group("Ac 2c 3c Jd Qd Kd Kh Ks 2h Qs").partition();
        assert_eq!(specimen, group("Ac 2c 3c Jd Qd Kd Kh Ks"));
        assert_eq!(early, group("2h Qs"));
        let (specimen, early) = group("Qh Kh Ah 2h").partition();
        assert!(specimen.is_empty());
        assert_eq!(early.size(), 4);
    }

    #[test]
    fn partition_keeps_quads_and_their_runs() {
        let (specimen, early) = group("5c 5d 5h 5s 6s 7s 9c").partition();
        assert_eq!(specimen, group("5c 5d 5h 5s 6s 7s"));
        assert_eq!(early, group("9c"));
        let (specimen, early) = group("5c 5d 6d 7d 9c 9h").partition();
        assert_eq!(specimen, group("5d 6d 7d"));
        assert_eq!(early, group("5c 9c 9h"));
    }

    #[test]
    fn meld_membership_ignores_the_card_itself() {
        let g = group("4c 6c");
        assert!(g.is_in_a_meld(&card("5c")));
        assert!(!g.is_in_a_meld(&card("5d")));
        assert!(!g.is_in_a_meld(&card("4c")));
    }

    #[test]
    fn runs_through_a_five() {
        let runs = CardGroup::runs_through(&card("5c"));
        assert_eq!(runs.len(), 12);
        assert_eq!(runs[0], group("Ac 2c 3c 4c 5c"));
        assert!(runs.iter().all(|r| r.contains_card(&card("5c"))));
    }

    #[test]
    fn runs_through_edges() {
        assert_eq!(CardGroup::runs_through(&card("Ah")).len(), 3);
        assert_eq!(CardGroup::runs_through(&card("Kh")).len(), 3);
    }
}
