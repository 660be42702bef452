use crate::gin::CacheStats;
use std::time::Duration;
use std::time::Instant;

/// Unified view of training progress.
///
/// Implementors supply the counters; formatting comes for free.
pub trait Progress {
    /// Generations evaluated and evolved.
    fn generation(&self) -> usize;
    /// Matches played across all generations.
    fn matches(&self) -> usize;
    /// Games played across all matches.
    fn games(&self) -> usize;
    /// Solver cache lookups summed over every match.
    fn cache(&self) -> CacheStats;
    /// Wall-clock duration since training started.
    fn elapsed(&self) -> Duration;
    /// Formats stats as aligned columns with throughput calculation.
    fn format(&self) -> String {
        let rates = self.games() as f64 / self.elapsed().as_secs().max(1) as f64;
        format!(
            "{:<20}{:<20}{:<20}{:<20}{:<20}",
            format!("gen {}", self.generation()),
            format!("matches {}", self.matches()),
            format!("games {}", self.games()),
            format!("G/sec {:.1}", rates),
            format!("cache {:.1}%", 100. * self.cache().hit_rate()),
        )
    }
    fn stats(&self) -> String {
        self.format()
    }
    fn summary(&self) -> String {
        format!("training stopped\n{}", self.format())
    }
}

/// Running counters owned by the trainer, with interval-gated logging.
#[derive(Debug)]
pub struct Metrics {
    generation: usize,
    matches: usize,
    games: usize,
    cache: CacheStats,
    start: Instant,
    check: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            generation: 0,
            matches: 0,
            games: 0,
            cache: CacheStats::default(),
            start: now,
            check: now,
        }
    }
}

impl Metrics {
    pub fn record(&mut self, matches: usize, games: usize, cache: CacheStats) {
        self.generation += 1;
        self.matches += matches;
        self.games += games;
        self.cache = self.cache + cache;
    }
    /// Returns stats only if the checkpoint interval has elapsed.
    pub fn checkpoint(&mut self) -> Option<String> {
        if self.check.elapsed() >= crate::TRAINING_LOG_INTERVAL {
            self.check = Instant::now();
            Some(self.stats())
        } else {
            None
        }
    }
}

impl Progress for Metrics {
    fn generation(&self) -> usize {
        self.generation
    }
    fn matches(&self) -> usize {
        self.matches
    }
    fn games(&self) -> usize {
        self.games
    }
    fn cache(&self) -> CacheStats {
        self.cache
    }
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
