use super::config::Config;
use super::progress::Metrics;
use super::progress::Progress;
use crate::Fitness;
use crate::genetics::Evaluation;
use crate::genetics::GeneSet;
use crate::genetics::Population;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// What `save` writes and `resume` reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: Config,
    pub generation: usize,
    pub population: Population,
    pub champion: Option<GeneSet>,
}

/// Drives a population through generations of matches.
///
/// Each step evaluates every member in parallel, logs the generation,
/// remembers the champion and evolves the population in place.
#[derive(Debug)]
pub struct Trainer {
    config: Config,
    generation: usize,
    population: Population,
    champion: Option<(GeneSet, Fitness)>,
    metrics: Metrics,
    rng: SmallRng,
}

impl Trainer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let population = Population::random(config.population, config.layout(), &mut rng);
        Ok(Self {
            config,
            generation: 0,
            population,
            champion: None,
            metrics: Metrics::default(),
            rng,
        })
    }

    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn population(&self) -> &Population {
        &self.population
    }
    pub fn champion(&self) -> Option<&GeneSet> {
        self.champion.as_ref().map(|(genes, _)| genes)
    }
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Evaluates and evolves one generation.
    pub fn step(&mut self) -> anyhow::Result<Evaluation> {
        let seed = self.rng.random::<u64>();
        let evaluation = self.population.evaluate(self.config.matches, seed)?;
        let mean = evaluation.fitness.iter().sum::<Fitness>() as f32 / evaluation.fitness.len().max(1) as f32;
        if let Some((i, best)) = evaluation.champion() {
            log::info!(
                "gen {:>4}  best {:>3}  mean {:>5.2}  games {:>6}  cache {:>5.1}%",
                self.generation,
                best,
                mean,
                evaluation.games,
                100. * evaluation.cache.hit_rate()
            );
            if self.champion.as_ref().is_none_or(|(_, f)| best >= *f) {
                self.champion = Some((self.population.members()[i].clone(), best));
            }
        }
        self.metrics.record(evaluation.matches, evaluation.games, evaluation.cache);
        self.population.evolve(
            &evaluation.fitness,
            self.config.survivors,
            self.config.mutation,
            &mut self.rng,
        );
        self.generation += 1;
        Ok(evaluation)
    }

    /// Steps until the generation limit or an interrupt.
    pub fn train(&mut self) -> anyhow::Result<()> {
        log::info!("training {} members for {} generations", self.population.len(), self.config.generations);
        log::info!("press 'Q + ↵' to stop gracefully");
        while self.generation < self.config.generations {
            self.step()?;
            if let Some(stats) = self.metrics.checkpoint() {
                log::info!("{}", stats);
            }
            if crate::interrupted() {
                break;
            }
        }
        log::info!("{}", self.metrics.summary());
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            generation: self.generation,
            population: self.population.clone(),
            champion: self.champion().cloned(),
        }
    }
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        std::fs::write(path, json)?;
        log::info!("saved generation {} to {}", self.generation, path.display());
        Ok(())
    }

    /// Picks up a saved run. `config` replaces the saved one, except that
    /// the saved network layout must still match. The population is
    /// truncated or bred up to `config.population`.
    pub fn resume(path: &Path, config: Config) -> anyhow::Result<Self> {
        let snapshot = serde_json::from_str::<Snapshot>(&std::fs::read_to_string(path)?)?;
        Self::try_from((snapshot, config))
    }
}

impl TryFrom<(Snapshot, Config)> for Trainer {
    type Error = anyhow::Error;
    fn try_from((snapshot, config): (Snapshot, Config)) -> Result<Self, Self::Error> {
        config.validate()?;
        let mut population = Population::new(snapshot.population.layout(), snapshot.population.members().to_vec())?;
        if population.layout() != config.layout() {
            return Err(anyhow::anyhow!(
                "snapshot layout {:?} does not match {:?}",
                population.layout(),
                config.layout()
            ));
        }
        let mut rng = SmallRng::seed_from_u64(config.seed ^ snapshot.generation as u64);
        if population.len() != config.population {
            log::info!("resizing population from {} to {}", population.len(), config.population);
            population.resize(config.population, config.mutation, &mut rng);
        }
        Ok(Self {
            config,
            generation: snapshot.generation,
            population,
            champion: snapshot.champion.map(|genes| (genes, 0)),
            metrics: Metrics::default(),
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Config {
        Config {
            population: 4,
            matches: 1,
            generations: 2,
            hidden: 4,
            seed: 17,
            ..Config::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config {
            population: 0,
            ..Config::default()
        };
        assert!(Trainer::new(config).is_err());
    }

    #[test]
    fn steps_advance_generations() {
        let mut trainer = Trainer::new(small()).unwrap();
        let evaluation = trainer.step().unwrap();
        assert_eq!(trainer.generation(), 1);
        assert_eq!(evaluation.matches, 4);
        assert_eq!(trainer.population().len(), 4);
        assert!(trainer.champion().is_some());
        assert_eq!(trainer.metrics().generation(), 1);
        assert_eq!(trainer.metrics().cache(), evaluation.cache);
    }

    #[test]
    fn train_stops_at_limit() {
        let mut trainer = Trainer::new(small()).unwrap();
        trainer.train().unwrap();
        assert_eq!(trainer.generation(), 2);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = Trainer::new(small()).unwrap();
        let mut b = Trainer::new(small()).unwrap();
        assert_eq!(a.step().unwrap(), b.step().unwrap());
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn resumes_from_snapshot() {
        let mut trainer = Trainer::new(small()).unwrap();
        trainer.step().unwrap();
        let snapshot = trainer.snapshot();
        let resumed = Trainer::try_from((snapshot.clone(), small())).unwrap();
        assert_eq!(resumed.generation(), 1);
        assert_eq!(resumed.population(), trainer.population());
        let wider = Config { hidden: 5, ..small() };
        assert!(Trainer::try_from((snapshot, wider)).is_err());
    }

    #[test]
    fn resume_follows_configured_population() {
        let mut trainer = Trainer::new(small()).unwrap();
        trainer.step().unwrap();
        let snapshot = trainer.snapshot();
        let larger = Config { population: 7, ..small() };
        let resumed = Trainer::try_from((snapshot.clone(), larger)).unwrap();
        assert_eq!(resumed.population().len(), 7);
        assert_eq!(&resumed.population().members()[..4], trainer.population().members());
        let smaller = Config { population: 2, ..small() };
        let resumed = Trainer::try_from((snapshot, smaller)).unwrap();
        assert_eq!(resumed.population().members(), &trainer.population().members()[..2]);
    }

    #[test]
    fn saves_and_resumes_file() {
        let path = std::env::temp_dir().join(format!("robogin-{}.json", std::process::id()));
        let trainer = Trainer::new(small()).unwrap();
        trainer.save(&path).unwrap();
        let resumed = Trainer::resume(&path, small()).unwrap();
        assert_eq!(resumed.population().len(), 4);
        std::fs::remove_file(&path).unwrap();
    }
}
