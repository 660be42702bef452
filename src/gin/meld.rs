use super::group::CardGroup;
use crate::cards::*;
use std::collections::BTreeSet;

/// The two legal groupings of gin rummy.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    /// 3 or more consecutive ranks of one suit, ace low. Enumeration
    /// stops at 5; layoffs may extend a run past that.
    Meld,
    /// 3 or 4 cards of one rank, distinct suits
    Set,
}

impl Kind {
    /// Classifies a group, or `None` if it is neither a meld nor a set.
    pub fn of(group: &CardGroup) -> Option<Self> {
        let cards = group.cards();
        let n = cards.len();
        let rank = cards.first().map(Card::rank)?;
        let suit = cards.first().map(Card::suit)?;
        let suits = cards.iter().map(Card::suit).collect::<BTreeSet<_>>();
        if (3..=4).contains(&n) && suits.len() == n && cards.iter().all(|c| c.rank() == rank) {
            Some(Kind::Set)
        } else if n >= 3 && cards.iter().all(|c| c.suit() == suit) && is_run(cards) {
            Some(Kind::Meld)
        } else {
            None
        }
    }
}

/// strictly consecutive ranks, assuming one suit and rank order
fn is_run(cards: &[Card]) -> bool {
    cards
        .windows(2)
        .all(|w| w[0].rank().succ() == Some(w[1].rank()))
}

/// Every candidate meld and set buildable from `group`.
///
/// Sets: each rank held in at least three distinct suits yields its full
/// set; a four-card set also yields its four 3-card subsets (each omitting
/// exactly one suit) so that three of the four can be scored while the
/// fourth serves elsewhere.
///
/// Melds: windows of length 3, 4 and 5 slide over the suit-grouped
/// sequence; a window qualifies when it is one suit and strictly
/// consecutive. A 5-run therefore also yields its 4- and 3-run windows,
/// each detected independently.
///
/// The result is deduplicated by multiset identity, every grouping is in
/// (rank, suit) order, and the collection is sorted lexicographically.
/// That order is stable across calls and drives solver exploration order.
pub fn melds_and_sets(group: &CardGroup) -> Vec<CardGroup> {
    let mut found = BTreeSet::new();
    sets(group).into_iter().for_each(|g| {
        found.insert(g);
    });
    melds(group).into_iter().for_each(|g| {
        found.insert(g);
    });
    found.into_iter().collect()
}

/// full sets plus the 3-subsets of every 4-set
pub fn sets(group: &CardGroup) -> Vec<CardGroup> {
    Rank::all()
        .into_iter()
        .map(|rank| {
            Suit::all()
                .into_iter()
                .filter(|suit| group.contains(rank, *suit))
                .map(|suit| Card::from((rank, suit)))
                .collect::<Vec<_>>()
        })
        .filter(|cards| cards.len() >= 3)
        .flat_map(|cards| {
            let full = CardGroup::from(cards.clone());
            let subsets = match cards.len() {
                4 => (0..4)
                    .map(|omit| {
                        cards
                            .iter()
                            .enumerate()
                            .filter(|(i, _)| *i != omit)
                            .map(|(_, c)| *c)
                            .collect::<CardGroup>()
                    })
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            };
            std::iter::once(full).chain(subsets)
        })
        .collect()
}

/// every same-suit consecutive window of length 3, 4 or 5
pub fn melds(group: &CardGroup) -> Vec<CardGroup> {
    let mut scan = group.clone();
    scan.sort(true);
    let cards = scan.cards();
    (3..=5usize)
        .flat_map(move |len| cards.windows(len))
        .filter(|w| w.iter().all(|c| c.suit() == w[0].suit()))
        .filter(|w| is_run(w))
        .map(|w| CardGroup::from(w.to_vec()))
        .collect()
}
