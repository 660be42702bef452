use super::geneset::GeneSet;
use crate::Fitness;
use crate::gin::CacheStats;
use crate::gameplay::Match;
use crate::gameplay::Neural;
use crate::gameplay::Player;
use crate::neural::Layout;
use crate::neural::Network;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// Results of one generation's matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub fitness: Vec<Fitness>,
    pub matches: usize,
    pub games: usize,
    pub cache: CacheStats,
}

impl Evaluation {
    /// Index and fitness of the fittest member; ties go to the lower index.
    pub fn champion(&self) -> Option<(usize, Fitness)> {
        self.fitness
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(i, f)| (*f, std::cmp::Reverse(*i)))
    }
}

/// Genomes competing for survival, all wired to the same network layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    layout: Layout,
    members: Vec<GeneSet>,
}

impl Population {
    pub fn random<R: Rng>(size: usize, layout: Layout, rng: &mut R) -> Self {
        let len = Network::genome_len(layout);
        Self {
            layout,
            members: (0..size).map(|_| GeneSet::random(len, rng)).collect(),
        }
    }
    /// Checks that every genome can wire `layout`.
    pub fn new(layout: Layout, members: Vec<GeneSet>) -> anyhow::Result<Self> {
        members
            .iter()
            .try_for_each(|genes| Network::new(layout, genes).map(|_| ()))?;
        Ok(Self { layout, members })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
    pub fn members(&self) -> &[GeneSet] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every member plays `matches` matches against opponents drawn at
    /// random from the rest; fitness counts the matches it won.
    ///
    /// Matches run in parallel. Each one seeds its own RNG from `seed`
    /// and its (member, round) position, so the result does not depend
    /// on scheduling.
    pub fn evaluate(&self, matches: usize, seed: u64) -> anyhow::Result<Evaluation> {
        let n = self.len();
        if n < 2 {
            return Ok(Evaluation {
                fitness: vec![0; n],
                ..Evaluation::default()
            });
        }
        let ref networks = self
            .members
            .iter()
            .map(|genes| Network::new(self.layout, genes))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let results = (0..n * matches)
            .into_par_iter()
            .map(|task| {
                let (member, round) = (task / matches, task % matches);
                let ref mut rng = SmallRng::seed_from_u64(mix(seed, member, round));
                let other = match rng.random_range(0..n - 1) {
                    j if j >= member => j + 1,
                    j => j,
                };
                let us = Player::new(member as u64, Neural::from(networks[member].clone()));
                let them = Player::new(other as u64, Neural::from(networks[other].clone()));
                let seat = round % 2;
                let (a, b) = if seat == 0 { (us, them) } else { (them, us) };
                let outcome = Match::new(a, b, rng.random())?.run();
                Ok((member, outcome.winner == seat, outcome))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut evaluation = Evaluation {
            fitness: vec![0; n],
            matches: results.len(),
            ..Evaluation::default()
        };
        for (member, won, outcome) in results {
            evaluation.fitness[member] += won as Fitness;
            evaluation.games += outcome.games;
            evaluation.cache = evaluation.cache + outcome.cache;
        }
        Ok(evaluation)
    }

    /// Keeps the fittest `survivors` share (at least one member) and refills
    /// with mutated children of random survivor pairs.
    pub fn evolve<R: Rng>(&mut self, fitness: &[Fitness], survivors: f32, mutation: f32, rng: &mut R) {
        let n = self.len();
        if n == 0 {
            return;
        }
        let keep = ((n as f32 * survivors).ceil() as usize).clamp(1, n);
        let mut ranked = (0..n).collect::<Vec<_>>();
        ranked.sort_by_key(|i| std::cmp::Reverse(fitness.get(*i).copied().unwrap_or_default()));
        self.members = ranked
            .into_iter()
            .take(keep)
            .map(|i| self.members[i].clone())
            .collect::<Vec<_>>();
        self.breed(n, mutation, rng);
    }

    /// Truncates to `size` members, or grows to it with mutated children
    /// of the current members. An empty population grows from random genomes.
    pub fn resize<R: Rng>(&mut self, size: usize, mutation: f32, rng: &mut R) {
        if size <= self.len() {
            self.members.truncate(size);
        } else if self.is_empty() {
            let len = Network::genome_len(self.layout);
            self.members = (0..size).map(|_| GeneSet::random(len, rng)).collect();
        } else {
            self.breed(size, mutation, rng);
        }
    }

    /// refills up to `size` with mutated crosses of random current pairs
    fn breed<R: Rng>(&mut self, size: usize, mutation: f32, rng: &mut R) {
        let parents = self.len();
        while self.members.len() < size {
            let mom = &self.members[rng.random_range(0..parents)];
            let dad = &self.members[rng.random_range(0..parents)];
            let mut child = mom.cross(dad, rng);
            child.mutate(mutation, rng);
            self.members.push(child);
        }
    }

    /// The fittest member under `fitness`.
    pub fn best(&self, fitness: &[Fitness]) -> Option<&GeneSet> {
        self.members
            .iter()
            .enumerate()
            .max_by_key(|(i, _)| (fitness.get(*i).copied().unwrap_or_default(), std::cmp::Reverse(*i)))
            .map(|(_, genes)| genes)
    }
}

/// per-match seed from the generation seed and (member, round)
fn mix(seed: u64, member: usize, round: usize) -> u64 {
    seed ^ (member as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (round as u64 + 1).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Layout {
        Layout {
            hidden: 4,
            ..Layout::default()
        }
    }

    #[test]
    fn rejects_short_genomes() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let short = GeneSet::random(3, rng);
        assert!(Population::new(tiny(), vec![short]).is_err());
        let fits = GeneSet::random(Network::genome_len(tiny()), rng);
        assert!(Population::new(tiny(), vec![fits]).is_ok());
    }

    #[test]
    fn evaluation_is_reproducible() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let population = Population::random(4, tiny(), rng);
        let a = population.evaluate(2, 99).unwrap();
        let b = population.evaluate(2, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.matches, 8);
        assert_eq!(a.fitness.len(), 4);
        assert!(a.fitness.iter().all(|f| *f <= 2));
    }

    #[test]
    fn evaluation_sums_solver_lookups() {
        let ref mut rng = SmallRng::seed_from_u64(6);
        let population = Population::random(3, tiny(), rng);
        let evaluation = population.evaluate(1, 11).unwrap();
        assert!(evaluation.games > 0);
        assert!(evaluation.cache.lookups() > 0);
        assert!(evaluation.cache.hit_rate() <= 1.);
    }

    #[test]
    fn lonely_member_scores_nothing() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let population = Population::random(1, tiny(), rng);
        assert_eq!(population.evaluate(3, 0).unwrap().fitness, vec![0]);
    }

    #[test]
    fn evolve_keeps_size_and_fittest() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let mut population = Population::random(8, tiny(), rng);
        let fitness = [0, 0, 5, 0, 0, 0, 0, 1];
        let champion = population.members()[2].clone();
        let runner = population.members()[7].clone();
        population.evolve(&fitness, 0.25, 0.1, rng);
        assert_eq!(population.len(), 8);
        assert_eq!(population.members()[0], champion);
        assert_eq!(population.members()[1], runner);
        assert!(population.members().iter().all(|g| g.len() == Network::genome_len(tiny())));
    }

    #[test]
    fn resize_truncates_or_breeds() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut population = Population::random(4, tiny(), rng);
        let head = population.members()[..2].to_vec();
        population.resize(6, 0.1, rng);
        assert_eq!(population.len(), 6);
        assert_eq!(&population.members()[..2], &head[..]);
        assert!(population.members().iter().all(|g| g.len() == Network::genome_len(tiny())));
        population.resize(2, 0.1, rng);
        assert_eq!(population.members(), &head[..]);
        let mut empty = Population::random(0, tiny(), rng);
        empty.resize(3, 0.1, rng);
        assert_eq!(empty.len(), 3);
    }

    #[test]
    fn best_prefers_lowest_index_on_ties() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        let population = Population::random(3, tiny(), rng);
        assert_eq!(population.best(&[1, 3, 3]), Some(&population.members()[1]));
        let evaluation = Evaluation {
            fitness: vec![1, 3, 3],
            ..Evaluation::default()
        };
        assert_eq!(evaluation.champion(), Some((1, 3)));
    }

    #[test]
    fn snapshot_round_trips() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let population = Population::random(2, tiny(), rng);
        let json = serde_json::to_string(&population).unwrap();
        assert_eq!(serde_json::from_str::<Population>(&json).unwrap(), population);
    }
}
