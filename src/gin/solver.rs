use super::cache::Cache;
use super::cache::CacheStats;
use super::group::CardGroup;
use super::meld::melds_and_sets;
use crate::Points;

/// An optimal split of a group into melds/sets plus leftover deadwood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    groupings: Vec<CardGroup>,
    deadwood: CardGroup,
}

impl Arrangement {
    pub fn groupings(&self) -> &[CardGroup] {
        &self.groupings
    }
    pub fn deadwood(&self) -> &CardGroup {
        &self.deadwood
    }
    pub fn points(&self) -> Points {
        self.deadwood.points()
    }
    pub fn into_parts(self) -> (Vec<CardGroup>, CardGroup) {
        (self.groupings, self.deadwood)
    }
}

impl std::fmt::Display for Arrangement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for grouping in self.groupings.iter() {
            write!(f, "{} ", grouping)?;
        }
        write!(f, "| {} = {}", self.deadwood, self.points())
    }
}

/// Minimum-deadwood search over card groups.
///
/// Every candidate meld/set of a group is tried as the next grouping to
/// lock in, and the remainder is solved recursively. The same remainders
/// come up again and again across branches, so results are memoized by
/// exact multiset in a [`Cache`] this solver owns. Keep one solver alive
/// for as long as the same kinds of hands keep being evaluated (a match,
/// a strategy) and drop it afterwards.
#[derive(Debug, Default)]
pub struct Solver {
    cache: Cache,
}

impl Solver {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: Cache::with_capacity(capacity),
        }
    }

    /// Minimum unmatched point total achievable with `group`.
    pub fn deadwood(&mut self, group: &CardGroup) -> Points {
        let worst = group.points();
        let (specimen, early) = group.partition();
        let explored = self.examine(&specimen) + early.points();
        worst.min(explored)
    }

    /// Recursive core. Never worse than `group.points()`.
    pub fn examine(&mut self, group: &CardGroup) -> Points {
        if group.is_empty() {
            return 0;
        }
        if group.size() < 3 {
            return group.points();
        }
        let ref key = group.key();
        if let Some(points) = self.cache.get(key) {
            return points;
        }
        let minimum = melds_and_sets(group)
            .iter()
            .map(|grouping| group.without(grouping))
            .map(|remainder| self.examine(&remainder))
            .fold(group.points(), Points::min);
        self.cache.put(*key, minimum);
        minimum
    }

    /// Reconstructs one optimal partition by walking down the memoized
    /// values: at each level the first candidate (in enumeration order)
    /// whose remainder achieves the optimum is taken.
    pub fn arrange(&mut self, group: &CardGroup) -> Arrangement {
        let (specimen, early) = group.partition();
        let mut groupings = Vec::new();
        let mut current = specimen;
        loop {
            let target = self.examine(&current);
            if target == current.points() {
                break;
            }
            let next = melds_and_sets(&current)
                .into_iter()
                .find(|grouping| self.examine(&current.without(grouping)) == target);
            match next {
                Some(grouping) => {
                    current = current.without(&grouping);
                    groupings.push(grouping);
                }
                None => break,
            }
        }
        let deadwood = early.iter().chain(current.iter()).copied().collect();
        Arrangement {
            groupings,
            deadwood,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
